// src/bot/router.rs
// =============================================================================
// Routes commands and button taps to the GitHub clients and back to the chat.
//
// Commands:
//   /start, /help      -> usage text
//   /search <query>    -> page 1 of the results, sent as a new message
//
// Button taps (decoded from the token, one dispatch per tap):
//   nav|q|page   -> search again, edit the message in place
//                   (send a new one if the edit is refused)
//   readme|repo  -> README preview as a new message
//                   (Markdown, plain text if the Markdown is refused)
//   anything else -> acknowledged silently
//
// Every tap ends with an acknowledgement so the client stops showing the
// loading indicator. The only exception: a page change whose edit AND
// fallback send both fail; the error is returned to the caller instead.
// =============================================================================

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::commands::Command;
use super::platform::{
    Acknowledgement, ChatPlatform, Incoming, Interaction, MessageRef, OutgoingMessage, ParseMode,
};
use super::render::{escape_markdown, Renderer, NO_RESULTS_TEXT};
use super::token::{NavigationToken, MAX_REACHABLE_PAGE};
use crate::error::{PlatformError, TokenError};
use crate::github::{ContentClient, SearchClient};

pub const USAGE_TEXT: &str =
    "Send /search <query> to search GitHub repositories. Example: /search fastapi";
pub const SEARCH_USAGE_TEXT: &str = "Usage: /search <query>";
pub const QUERY_TOO_LONG_TEXT: &str = "Query is too long, please shorten it.";
pub const INVALID_NAVIGATION_TEXT: &str = "Invalid navigation";
pub const SEARCH_FAILED_NOTICE: &str = "GitHub search failed";
pub const EMPTY_PAGE_TEXT: &str = "No results on this page";
pub const README_NOT_FOUND_TEXT: &str = "README not found";
pub const README_SEND_FAILED_TEXT: &str = "Could not send the README preview";

// What a single update ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not for us (plain text, unknown command, group chat, unknown token)
    Ignored,
    /// Usage text sent (/start, /help, /search without a query)
    Usage,
    /// Query refused before searching
    InvalidQuery,
    /// First page of results sent
    ResultsSent,
    /// The search matched nothing
    NoResults,
    /// GitHub search failed, the user was told
    SearchFailed,
    /// Token could not be decoded
    Rejected,
    /// Page change shown; `resent` when a new message replaced the edit
    Navigated { resent: bool },
    /// The requested page came back empty
    EmptyPage,
    /// README preview sent; `plain_text` when Markdown was refused
    ReadmeSent { plain_text: bool },
    ReadmeNotFound,
    /// Neither the Markdown nor the plain-text preview could be sent
    ReadmeFailed,
}

pub struct Router {
    search: Arc<dyn SearchClient>,
    content: Arc<dyn ContentClient>,
    platform: Arc<dyn ChatPlatform>,
    renderer: Renderer,
}

impl Router {
    pub fn new(
        search: Arc<dyn SearchClient>,
        content: Arc<dyn ContentClient>,
        platform: Arc<dyn ChatPlatform>,
        renderer: Renderer,
    ) -> Self {
        Self {
            search,
            content,
            platform,
            renderer,
        }
    }

    /// Handles one update from the platform.
    pub async fn handle(&self, incoming: Incoming) -> Result<Outcome, PlatformError> {
        match incoming {
            Incoming::Text {
                chat_id,
                private,
                text,
            } => self.handle_text(chat_id, private, &text).await,
            Incoming::Interaction(interaction) => self.handle_interaction(&interaction).await,
        }
    }

    async fn handle_text(
        &self,
        chat_id: i64,
        private: bool,
        text: &str,
    ) -> Result<Outcome, PlatformError> {
        if !private {
            return Ok(Outcome::Ignored);
        }

        match Command::parse(text) {
            None => Ok(Outcome::Ignored),
            Some(Command::Start) => {
                self.reply(chat_id, USAGE_TEXT).await?;
                Ok(Outcome::Usage)
            }
            Some(Command::Search(query)) => self.search_command(chat_id, query).await,
        }
    }

    async fn search_command(&self, chat_id: i64, query: String) -> Result<Outcome, PlatformError> {
        if query.is_empty() {
            self.reply(chat_id, SEARCH_USAGE_TEXT).await?;
            return Ok(Outcome::Usage);
        }

        let longest = NavigationToken::Navigate {
            query: query.clone(),
            page: MAX_REACHABLE_PAGE,
        };
        if !longest.fits_transport() {
            self.reply(chat_id, QUERY_TOO_LONG_TEXT).await?;
            return Ok(Outcome::InvalidQuery);
        }

        let page = match self
            .search
            .search(&query, 1, self.renderer.page_size())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                error!(query = %query, error = %e, "GitHub search failed");
                self.reply(chat_id, &format!("GitHub search failed: {}", e))
                    .await?;
                return Ok(Outcome::SearchFailed);
            }
        };

        if page.is_empty() {
            self.reply(chat_id, NO_RESULTS_TEXT).await?;
            return Ok(Outcome::NoResults);
        }

        let message = self.renderer.render(&page).into_message();
        self.platform.send_message(chat_id, &message).await?;
        debug!(query = %query, total = page.total_count, "sent first page");
        Ok(Outcome::ResultsSent)
    }

    async fn handle_interaction(&self, interaction: &Interaction) -> Result<Outcome, PlatformError> {
        let token = match NavigationToken::decode(&interaction.data) {
            Ok(token) => token,
            Err(TokenError::Unknown) => {
                debug!(data = %interaction.data, "unknown token, acknowledging silently");
                self.answer(interaction, Acknowledgement::silent()).await?;
                return Ok(Outcome::Ignored);
            }
            Err(e @ TokenError::Malformed(_)) => {
                debug!(data = %interaction.data, error = %e, "rejected token");
                self.answer(interaction, Acknowledgement::notice(INVALID_NAVIGATION_TEXT))
                    .await?;
                return Ok(Outcome::Rejected);
            }
        };

        let Some(origin) = interaction.message else {
            debug!("interaction without a source message, nothing to update");
            self.answer(interaction, Acknowledgement::silent()).await?;
            return Ok(Outcome::Ignored);
        };

        match token {
            NavigationToken::Navigate { query, page } => {
                self.navigate(interaction, origin, &query, page).await
            }
            NavigationToken::Readme { repo } => {
                self.preview_readme(interaction, origin, &repo).await
            }
        }
    }

    async fn navigate(
        &self,
        interaction: &Interaction,
        origin: MessageRef,
        query: &str,
        page: u32,
    ) -> Result<Outcome, PlatformError> {
        let result = match self
            .search
            .search(query, page, self.renderer.page_size())
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(query, page, error = %e, "GitHub search failed during navigation");
                self.answer(interaction, Acknowledgement::notice(SEARCH_FAILED_NOTICE))
                    .await?;
                return Ok(Outcome::SearchFailed);
            }
        };

        if result.items.is_empty() {
            self.answer(interaction, Acknowledgement::notice(EMPTY_PAGE_TEXT))
                .await?;
            return Ok(Outcome::EmptyPage);
        }

        let message = self.renderer.render(&result).into_message();

        let resent = match self.platform.edit_message(origin, &message).await {
            Ok(()) => false,
            Err(e) => {
                debug!(error = %e, "edit refused, sending the page as a new message");
                self.platform.send_message(origin.chat_id, &message).await?;
                true
            }
        };

        self.answer(interaction, Acknowledgement::silent()).await?;
        Ok(Outcome::Navigated { resent })
    }

    async fn preview_readme(
        &self,
        interaction: &Interaction,
        origin: MessageRef,
        repo: &str,
    ) -> Result<Outcome, PlatformError> {
        let Some(preview) = self.content.fetch_readme(repo).await else {
            self.answer(interaction, Acknowledgement::alert(README_NOT_FOUND_TEXT))
                .await?;
            return Ok(Outcome::ReadmeNotFound);
        };

        let markdown = OutgoingMessage::plain(format!(
            "*README preview for {}*\n\n{}",
            escape_markdown(&preview.repo),
            preview.text
        ))
        .with_parse_mode(ParseMode::Markdown)
        .without_link_preview();

        let (outcome, ack) = match self.platform.send_message(origin.chat_id, &markdown).await {
            Ok(_) => (Outcome::ReadmeSent { plain_text: false }, Acknowledgement::silent()),
            Err(e) => {
                debug!(repo, error = %e, "Markdown preview refused, falling back to plain text");
                let plain = OutgoingMessage::plain(format!(
                    "README preview for {}:\n\n{}",
                    preview.repo, preview.text
                ))
                .without_link_preview();

                match self.platform.send_message(origin.chat_id, &plain).await {
                    Ok(_) => (Outcome::ReadmeSent { plain_text: true }, Acknowledgement::silent()),
                    Err(e) => {
                        warn!(repo, error = %e, "plain-text README preview failed too");
                        (
                            Outcome::ReadmeFailed,
                            Acknowledgement::notice(README_SEND_FAILED_TEXT),
                        )
                    }
                }
            }
        };

        self.answer(interaction, ack).await?;
        Ok(outcome)
    }

    async fn reply(&self, chat_id: i64, text: &str) -> Result<(), PlatformError> {
        self.platform
            .send_message(chat_id, &OutgoingMessage::plain(text))
            .await
            .map(|_| ())
    }

    async fn answer(
        &self,
        interaction: &Interaction,
        ack: Acknowledgement,
    ) -> Result<(), PlatformError> {
        self.platform.answer_interaction(&interaction.id, &ack).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::github::{ReadmePreview, RepoSummary, ResultPage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const CHAT: i64 = 42;
    const ORIGIN: MessageRef = MessageRef {
        chat_id: CHAT,
        message_id: 7,
    };

    struct FakeSearch {
        response: Result<ResultPage, UpstreamError>,
        calls: Mutex<Vec<(String, u32, u32)>>,
    }

    impl FakeSearch {
        fn returning(response: Result<ResultPage, UpstreamError>) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, u32, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchClient for FakeSearch {
        async fn search(
            &self,
            query: &str,
            page: u32,
            page_size: u32,
        ) -> Result<ResultPage, UpstreamError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), page, page_size));
            self.response.clone()
        }
    }

    struct FakeContent(Option<ReadmePreview>);

    #[async_trait]
    impl ContentClient for FakeContent {
        async fn fetch_readme(&self, _repo: &str) -> Option<ReadmePreview> {
            self.0.clone()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Send(i64, OutgoingMessage),
        Edit(MessageRef, OutgoingMessage),
        Answer(String, Acknowledgement),
    }

    #[derive(Default)]
    struct FakePlatform {
        calls: Mutex<Vec<Call>>,
        refuse_edits: bool,
        refuse_markdown: bool,
        refuse_sends: bool,
    }

    impl FakePlatform {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn sent(&self) -> Vec<OutgoingMessage> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Send(_, m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        fn answers(&self) -> Vec<Acknowledgement> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Answer(_, a) => Some(a),
                    _ => None,
                })
                .collect()
        }

        fn rejected() -> PlatformError {
            PlatformError::Rejected {
                description: "Bad Request".to_string(),
            }
        }
    }

    #[async_trait]
    impl ChatPlatform for FakePlatform {
        async fn send_message(
            &self,
            chat_id: i64,
            message: &OutgoingMessage,
        ) -> Result<MessageRef, PlatformError> {
            if self.refuse_sends
                || (self.refuse_markdown && message.parse_mode == Some(ParseMode::Markdown))
            {
                return Err(Self::rejected());
            }
            self.calls
                .lock()
                .unwrap()
                .push(Call::Send(chat_id, message.clone()));
            Ok(MessageRef {
                chat_id,
                message_id: 100,
            })
        }

        async fn edit_message(
            &self,
            target: MessageRef,
            message: &OutgoingMessage,
        ) -> Result<(), PlatformError> {
            if self.refuse_edits {
                return Err(Self::rejected());
            }
            self.calls
                .lock()
                .unwrap()
                .push(Call::Edit(target, message.clone()));
            Ok(())
        }

        async fn answer_interaction(
            &self,
            interaction_id: &str,
            ack: &Acknowledgement,
        ) -> Result<(), PlatformError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Answer(interaction_id.to_string(), ack.clone()));
            Ok(())
        }
    }

    fn results(query: &str, page: u32, total_count: u64, items: usize) -> ResultPage {
        ResultPage {
            query: query.to_string(),
            page,
            total_count,
            items: (0..items)
                .map(|n| RepoSummary {
                    full_name: format!("owner/repo{n}"),
                    description: Some("desc".to_string()),
                    stars: 10,
                    language: Some("Python".to_string()),
                    html_url: format!("https://github.com/owner/repo{n}"),
                })
                .collect(),
        }
    }

    fn readme(repo: &str, text: &str) -> Option<ReadmePreview> {
        Some(ReadmePreview {
            repo: repo.to_string(),
            text: text.to_string(),
        })
    }

    struct Harness {
        router: Router,
        search: Arc<FakeSearch>,
        platform: Arc<FakePlatform>,
    }

    fn harness(search: FakeSearch, content: FakeContent, platform: FakePlatform) -> Harness {
        let search = Arc::new(search);
        let platform = Arc::new(platform);
        let router = Router::new(
            search.clone(),
            Arc::new(content),
            platform.clone(),
            Renderer::new(5),
        );
        Harness {
            router,
            search,
            platform,
        }
    }

    fn text(body: &str) -> Incoming {
        Incoming::Text {
            chat_id: CHAT,
            private: true,
            text: body.to_string(),
        }
    }

    fn tap(data: &str) -> Incoming {
        Incoming::Interaction(Interaction {
            id: "cb-1".to_string(),
            message: Some(ORIGIN),
            data: data.to_string(),
        })
    }

    #[tokio::test]
    async fn test_search_sends_first_page() {
        let h = harness(
            FakeSearch::returning(Ok(results("fastapi", 1, 120000, 5))),
            FakeContent(None),
            FakePlatform::default(),
        );

        let outcome = h.router.handle(text("/search fastapi")).await.unwrap();

        assert_eq!(outcome, Outcome::ResultsSent);
        assert_eq!(h.search.calls(), vec![("fastapi".to_string(), 1, 5)]);
        let sent = h.platform.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0]
            .text
            .starts_with("Results for fastapi — 120000 repositories"));
        assert_eq!(sent[0].parse_mode, Some(ParseMode::Html));
        assert!(sent[0].disable_web_page_preview);
        let keyboard = sent[0].keyboard.as_ref().unwrap();
        let nav = keyboard.rows.last().unwrap();
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].token(), Some("nav|fastapi|2"));
    }

    #[tokio::test]
    async fn test_search_without_query_shows_usage() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 0, 0))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(h.router.handle(text("/search   ")).await.unwrap(), Outcome::Usage);
        assert!(h.search.calls().is_empty());
        assert_eq!(h.platform.sent()[0].text, SEARCH_USAGE_TEXT);
    }

    #[tokio::test]
    async fn test_start_shows_usage() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 0, 0))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(h.router.handle(text("/start")).await.unwrap(), Outcome::Usage);
        assert_eq!(h.platform.sent()[0].text, USAGE_TEXT);
    }

    #[tokio::test]
    async fn test_search_too_long_query() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 0, 0))),
            FakeContent(None),
            FakePlatform::default(),
        );

        let command = format!("/search {}", "a".repeat(80));
        assert_eq!(h.router.handle(text(&command)).await.unwrap(), Outcome::InvalidQuery);
        assert!(h.search.calls().is_empty());
        assert_eq!(h.platform.sent()[0].text, QUERY_TOO_LONG_TEXT);
    }

    #[tokio::test]
    async fn test_search_failure_is_reported() {
        let h = harness(
            FakeSearch::returning(Err(UpstreamError::Status(503))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(
            h.router.handle(text("/search rust")).await.unwrap(),
            Outcome::SearchFailed
        );
        assert_eq!(h.platform.sent()[0].text, "GitHub search failed: HTTP 503");
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let h = harness(
            FakeSearch::returning(Ok(results("zzzz", 1, 0, 0))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(
            h.router.handle(text("/search zzzz")).await.unwrap(),
            Outcome::NoResults
        );
        let sent = h.platform.sent();
        assert_eq!(sent[0].text, NO_RESULTS_TEXT);
        assert_eq!(sent[0].keyboard, None);
    }

    #[tokio::test]
    async fn test_group_chats_and_plain_text_ignored() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(None),
            FakePlatform::default(),
        );

        let group = Incoming::Text {
            chat_id: -100,
            private: false,
            text: "/search rust".to_string(),
        };
        assert_eq!(h.router.handle(group).await.unwrap(), Outcome::Ignored);
        assert_eq!(h.router.handle(text("hello")).await.unwrap(), Outcome::Ignored);
        assert!(h.platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_edits_in_place() {
        let h = harness(
            FakeSearch::returning(Ok(results("fastapi", 2, 120000, 5))),
            FakeContent(None),
            FakePlatform::default(),
        );

        let outcome = h.router.handle(tap("nav|fastapi|2")).await.unwrap();

        assert_eq!(outcome, Outcome::Navigated { resent: false });
        assert_eq!(h.search.calls(), vec![("fastapi".to_string(), 2, 5)]);
        let calls = h.platform.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::Edit(target, message) => {
                assert_eq!(*target, ORIGIN);
                let nav = message.keyboard.as_ref().unwrap().rows.last().unwrap().clone();
                assert_eq!(nav[0].token(), Some("nav|fastapi|1"));
                assert_eq!(nav[1].token(), Some("nav|fastapi|3"));
            }
            other => panic!("expected an edit, got {other:?}"),
        }
        assert_eq!(
            calls[1],
            Call::Answer("cb-1".to_string(), Acknowledgement::silent())
        );
    }

    #[tokio::test]
    async fn test_navigation_decodes_query() {
        let h = harness(
            FakeSearch::returning(Ok(results("web framework", 2, 100, 5))),
            FakeContent(None),
            FakePlatform::default(),
        );

        h.router.handle(tap("nav|web+framework|2")).await.unwrap();
        assert_eq!(h.search.calls(), vec![("web framework".to_string(), 2, 5)]);
    }

    #[tokio::test]
    async fn test_navigation_empty_page() {
        let h = harness(
            FakeSearch::returning(Ok(results("fastapi", 2, 120000, 0))),
            FakeContent(None),
            FakePlatform::default(),
        );

        let outcome = h.router.handle(tap("nav|fastapi|2")).await.unwrap();

        assert_eq!(outcome, Outcome::EmptyPage);
        assert_eq!(
            h.platform.calls(),
            vec![Call::Answer(
                "cb-1".to_string(),
                Acknowledgement::notice(EMPTY_PAGE_TEXT)
            )]
        );
    }

    #[tokio::test]
    async fn test_navigation_falls_back_to_new_message() {
        let h = harness(
            FakeSearch::returning(Ok(results("fastapi", 3, 120000, 5))),
            FakeContent(None),
            FakePlatform {
                refuse_edits: true,
                ..FakePlatform::default()
            },
        );

        let outcome = h.router.handle(tap("nav|fastapi|3")).await.unwrap();

        assert_eq!(outcome, Outcome::Navigated { resent: true });
        let sent = h.platform.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.starts_with("Results for fastapi"));
        assert_eq!(h.platform.answers(), vec![Acknowledgement::silent()]);
    }

    #[tokio::test]
    async fn test_navigation_unacknowledged_when_fallback_fails() {
        let h = harness(
            FakeSearch::returning(Ok(results("fastapi", 3, 120000, 5))),
            FakeContent(None),
            FakePlatform {
                refuse_edits: true,
                refuse_sends: true,
                ..FakePlatform::default()
            },
        );

        assert!(h.router.handle(tap("nav|fastapi|3")).await.is_err());
        assert!(h.platform.answers().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_search_failure() {
        let h = harness(
            FakeSearch::returning(Err(UpstreamError::Timeout)),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(
            h.router.handle(tap("nav|fastapi|2")).await.unwrap(),
            Outcome::SearchFailed
        );
        assert_eq!(
            h.platform.answers(),
            vec![Acknowledgement::notice(SEARCH_FAILED_NOTICE)]
        );
    }

    #[tokio::test]
    async fn test_invalid_navigation() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(
            h.router.handle(tap("nav|fastapi|abc")).await.unwrap(),
            Outcome::Rejected
        );
        assert!(h.search.calls().is_empty());
        assert_eq!(
            h.platform.answers(),
            vec![Acknowledgement::notice(INVALID_NAVIGATION_TEXT)]
        );
    }

    #[tokio::test]
    async fn test_unknown_token_acknowledged_silently() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(h.router.handle(tap("something-else")).await.unwrap(), Outcome::Ignored);
        assert_eq!(
            h.platform.calls(),
            vec![Call::Answer("cb-1".to_string(), Acknowledgement::silent())]
        );
    }

    #[tokio::test]
    async fn test_interaction_without_message_acknowledged_silently() {
        let h = harness(
            FakeSearch::returning(Ok(results("fastapi", 2, 100, 5))),
            FakeContent(readme("octocat/Hello-World", "text")),
            FakePlatform::default(),
        );

        let detached = Incoming::Interaction(Interaction {
            id: "cb-2".to_string(),
            message: None,
            data: "nav|fastapi|2".to_string(),
        });

        assert_eq!(h.router.handle(detached).await.unwrap(), Outcome::Ignored);
        assert!(h.search.calls().is_empty());
        assert_eq!(
            h.platform.calls(),
            vec![Call::Answer("cb-2".to_string(), Acknowledgement::silent())]
        );
    }

    #[tokio::test]
    async fn test_navigation_past_last_reachable_page_rejected() {
        let h = harness(
            FakeSearch::returning(Ok(results("q", 1, 1, 1))),
            FakeContent(None),
            FakePlatform::default(),
        );

        assert_eq!(
            h.router.handle(tap("nav|q|4294967295")).await.unwrap(),
            Outcome::Rejected
        );
        assert!(h.search.calls().is_empty());
        assert_eq!(
            h.platform.answers(),
            vec![Acknowledgement::notice(INVALID_NAVIGATION_TEXT)]
        );
    }

    #[tokio::test]
    async fn test_readme_not_found() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(None),
            FakePlatform::default(),
        );

        let outcome = h.router.handle(tap("readme|octocat/Hello-World")).await.unwrap();

        assert_eq!(outcome, Outcome::ReadmeNotFound);
        assert_eq!(
            h.platform.calls(),
            vec![Call::Answer(
                "cb-1".to_string(),
                Acknowledgement::alert(README_NOT_FOUND_TEXT)
            )]
        );
    }

    #[tokio::test]
    async fn test_readme_sent_as_markdown() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(readme("my_org/my_repo", "# Title")),
            FakePlatform::default(),
        );

        let outcome = h.router.handle(tap("readme|my_org/my_repo")).await.unwrap();

        assert_eq!(outcome, Outcome::ReadmeSent { plain_text: false });
        let sent = h.platform.sent();
        assert_eq!(sent[0].parse_mode, Some(ParseMode::Markdown));
        assert_eq!(
            sent[0].text,
            "*README preview for my\\_org/my\\_repo*\n\n# Title"
        );
        assert_eq!(h.platform.answers(), vec![Acknowledgement::silent()]);
    }

    #[tokio::test]
    async fn test_readme_falls_back_to_plain_text() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(readme("octocat/Hello-World", "use *this_ [broken")),
            FakePlatform {
                refuse_markdown: true,
                ..FakePlatform::default()
            },
        );

        let outcome = h.router.handle(tap("readme|octocat/Hello-World")).await.unwrap();

        assert_eq!(outcome, Outcome::ReadmeSent { plain_text: true });
        let sent = h.platform.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].parse_mode, None);
        assert_eq!(
            sent[0].text,
            "README preview for octocat/Hello-World:\n\nuse *this_ [broken"
        );
        assert_eq!(h.platform.answers(), vec![Acknowledgement::silent()]);
    }

    #[tokio::test]
    async fn test_readme_acknowledged_even_when_sends_fail() {
        let h = harness(
            FakeSearch::returning(Ok(results("x", 1, 1, 1))),
            FakeContent(readme("octocat/Hello-World", "text")),
            FakePlatform {
                refuse_sends: true,
                ..FakePlatform::default()
            },
        );

        assert_eq!(
            h.router.handle(tap("readme|octocat/Hello-World")).await.unwrap(),
            Outcome::ReadmeFailed
        );
        assert_eq!(
            h.platform.answers(),
            vec![Acknowledgement::notice(README_SEND_FAILED_TEXT)]
        );
    }
}

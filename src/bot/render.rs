// src/bot/render.rs
// =============================================================================
// Turns a ResultPage into message text plus inline buttons.
//
// Text (HTML parse mode):
//   Results for <query> — <total> repositories
//
//   <b>owner/name</b> — description
//   ⭐ 1234 — Rust
//   https://github.com/owner/name
//
// Buttons:
//   [🌐 Open] [📖 README]     one row per repository
//   [⬅️ Prev] [Next ➡️]       only the ones that apply, omitted if neither
//
// Everything that comes from the user or from GitHub is HTML-escaped.
// A README button is left out when its token would not fit in a callback
// payload; the Open button is always there.
// =============================================================================

use tracing::debug;

use super::platform::{Button, Keyboard, OutgoingMessage, ParseMode};
use super::token::{NavigationToken, MAX_REACHABLE_PAGE};
use crate::github::{RepoSummary, ResultPage};

pub const NO_RESULTS_TEXT: &str = "No repositories found.";

const OPEN_LABEL: &str = "🌐 Open";
const README_LABEL: &str = "📖 README";
const PREV_LABEL: &str = "⬅️ Prev";
const NEXT_LABEL: &str = "Next ➡️";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Rendered {
    /// The message to send or edit in: HTML, buttons attached, no link previews
    pub fn into_message(self) -> OutgoingMessage {
        OutgoingMessage::plain(self.text)
            .with_parse_mode(ParseMode::Html)
            .with_keyboard(self.keyboard)
            .without_link_preview()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    page_size: u32,
}

impl Renderer {
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn render(&self, page: &ResultPage) -> Rendered {
        if page.is_empty() {
            return Rendered {
                text: NO_RESULTS_TEXT.to_string(),
                keyboard: Keyboard::default(),
            };
        }

        let blocks: Vec<String> = page.items.iter().map(repo_block).collect();
        let text = format!(
            "Results for {} — {} repositories\n\n{}",
            escape_html(&page.query),
            page.total_count,
            blocks.join("\n\n")
        );

        Rendered {
            text,
            keyboard: self.keyboard(page),
        }
    }

    fn keyboard(&self, page: &ResultPage) -> Keyboard {
        let mut rows: Vec<Vec<Button>> = page
            .items
            .iter()
            .map(|item| {
                let mut row = vec![Button::url(OPEN_LABEL, &item.html_url)];
                let readme = NavigationToken::Readme {
                    repo: item.full_name.clone(),
                };
                if readme.fits_transport() {
                    row.push(Button::callback(README_LABEL, readme.encode()));
                } else {
                    debug!(repo = %item.full_name, "name too long for a README button");
                }
                row
            })
            .collect();

        let nav = self.navigation_row(page);
        if !nav.is_empty() {
            rows.push(nav);
        }

        Keyboard { rows }
    }

    // Prev when we're past page 1, Next while the end of this page is still
    // short of the total and the next page is one GitHub will serve
    fn navigation_row(&self, page: &ResultPage) -> Vec<Button> {
        let mut nav = Vec::new();

        if page.page > 1 {
            let token = NavigationToken::Navigate {
                query: page.query.clone(),
                page: page.page - 1,
            };
            nav.push(Button::callback(PREV_LABEL, token.encode()));
        }

        let page_size = u64::from(self.page_size);
        let shown_through = u64::from(page.page.saturating_sub(1)) * page_size + page_size;
        let next = page
            .page
            .checked_add(1)
            .filter(|next| *next <= MAX_REACHABLE_PAGE);
        if let Some(next) = next {
            if shown_through < page.total_count {
                let token = NavigationToken::Navigate {
                    query: page.query.clone(),
                    page: next,
                };
                nav.push(Button::callback(NEXT_LABEL, token.encode()));
            }
        }

        nav
    }
}

fn repo_block(item: &RepoSummary) -> String {
    format!(
        "<b>{}</b> — {}\n⭐ {} — {}\n{}",
        escape_html(&item.full_name),
        escape_html(item.description.as_deref().unwrap_or("")),
        item.stars,
        escape_html(item.language.as_deref().unwrap_or("Unknown")),
        escape_html(&item.html_url)
    )
}

// Escapes the characters Telegram's HTML mode treats as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// Escapes the characters that open an entity in Telegram's legacy Markdown
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// src/bot/commands.rs
// =============================================================================
// Parses slash commands out of incoming text messages.
//
//   /start, /help         -> usage
//   /search <query>       -> search (query is trimmed, may be empty)
//   /search@MyBot <query> -> same, the @bot suffix is ignored
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    /// The argument text after /search, trimmed (possibly empty)
    Search(String),
}

impl Command {
    // Returns None for plain text and for commands we don't know
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim_start();
        let body = text.strip_prefix('/')?;

        let (head, args) = match body.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (body, ""),
        };

        // "/search@MyBot" is how Telegram addresses a command to one bot
        let name = head.split('@').next().unwrap_or(head);

        match name.to_ascii_lowercase().as_str() {
            "start" | "help" => Some(Command::Start),
            "search" => Some(Command::Search(args.to_string())),
            _ => None,
        }
    }
}

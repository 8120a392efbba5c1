#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub command: String,
}

const KNOWN_COMMANDS: [&str; 7] = ["/help", "/h", "/calls", "/c", "/quit", "/exit", "/q"];

impl SlashCommand {
    /// Parses `text` as a command. Unknown commands are left to be treated as
    /// ordinary input, so a capture path or a question starting with `/` still
    /// goes through.
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        let command = text.split_whitespace().next()?.to_lowercase();
        if !KNOWN_COMMANDS.contains(&command.as_str()) {
            return None;
        }

        return Some(SlashCommand { command });
    }

    pub fn is_help(&self) -> bool {
        return self.command == "/help" || self.command == "/h";
    }

    pub fn is_calls(&self) -> bool {
        return self.command == "/calls" || self.command == "/c";
    }

    pub fn is_quit(&self) -> bool {
        return self.command == "/quit" || self.command == "/exit" || self.command == "/q";
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use serde::Deserialize;
use serde::Serialize;

use super::Role;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub enum MessageType {
    #[default]
    Normal,
    Error,
}

/// One entry of the conversation log. Never changed once created.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub struct Message {
    role: Role,
    content: String,
    message_type: MessageType,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
            message_type: MessageType::Normal,
        };
    }

    pub fn new_with_type(role: Role, message_type: MessageType, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
            message_type,
        };
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }

    pub fn message_type(&self) -> MessageType {
        return self.message_type;
    }
}

/// Plain-text rendering of a log, one `role: content` block per entry.
pub fn transcript(messages: &[Message]) -> String {
    return messages
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<String>>()
        .join("\n\n");
}

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Label(Role),
    Body(MessageType),
    Status,
    Blank,
}

/// One terminal row of the chat pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub kind: LineKind,
    pub text: String,
}

impl ChatLine {
    fn new(kind: LineKind, text: &str) -> ChatLine {
        return ChatLine {
            kind,
            text: text.to_string(),
        };
    }
}

fn label(role: Role) -> &'static str {
    match role {
        Role::System => return "Notice",
        Role::User => return "You",
        Role::Assistant => return "Assistant",
    }
}

fn split_at_width(word: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (idx, c) in word.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width && idx > 0 {
            return word.split_at(idx);
        }
        used += char_width;
    }

    return (word, "");
}

/// Greedy word wrap on terminal columns. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = vec![];

    for raw_line in text.replace('\t', "  ").split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for mut word in raw_line.split(' ') {
            let sep = usize::from(row_width > 0);

            if row_width + sep + word.width() > width && row_width > 0 {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            } else if sep == 1 {
                row.push(' ');
                row_width += 1;
            }

            while word.width() > width {
                let (head, rest) = split_at_width(word, width);
                if rest.is_empty() {
                    break;
                }
                rows.push(head.to_string());
                word = rest;
            }

            row_width += word.width();
            row.push_str(word);
        }

        rows.push(row);
    }

    return rows;
}

/// Lays the log out into rows for a pane `width` columns wide, followed by
/// the in-flight status line when there is one.
pub fn layout(messages: &[Message], status: Option<&str>, width: usize) -> Vec<ChatLine> {
    let mut lines = vec![];

    for message in messages {
        lines.push(ChatLine::new(
            LineKind::Label(message.role()),
            label(message.role()),
        ));
        for row in wrap(message.content(), width) {
            lines.push(ChatLine {
                kind: LineKind::Body(message.message_type()),
                text: row,
            });
        }
        lines.push(ChatLine::new(LineKind::Blank, ""));
    }

    if let Some(status) = status {
        lines.push(ChatLine::new(LineKind::Status, status));
    }

    return lines;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_wraps_on_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("one two three", 100), vec!["one two three"]);
    }

    #[test]
    fn it_splits_long_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn it_keeps_blank_lines() {
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn it_wraps_on_display_columns() {
        assert_eq!(wrap("📄 File overview:", 17), vec!["📄 File overview:"]);
        assert_eq!(wrap("📄 File overview:", 16), vec!["📄 File", "overview:"]);
    }

    #[test]
    fn it_splits_wide_characters_by_columns() {
        assert_eq!(
            wrap("通话失败原因是忙线请重试", 10),
            vec!["通话失败原", "因是忙线请", "重试"]
        );
        assert_eq!(wrap("通话", 1), vec!["通", "话"]);
    }

    #[test]
    fn it_lays_out_messages() {
        let messages = vec![
            Message::new(Role::Assistant, "hello"),
            Message::new_with_type(Role::Assistant, MessageType::Error, "❌ Cannot reach backend API."),
        ];

        let lines = layout(&messages, Some("Thinking..."), 80);

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], ChatLine::new(LineKind::Label(Role::Assistant), "Assistant"));
        assert_eq!(lines[1], ChatLine::new(LineKind::Body(MessageType::Normal), "hello"));
        assert_eq!(lines[2].kind, LineKind::Blank);
        assert_eq!(lines[4].kind, LineKind::Body(MessageType::Error));
        assert_eq!(lines[6], ChatLine::new(LineKind::Status, "Thinking..."));
    }
}

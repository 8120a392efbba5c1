use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use super::captures::clean_path;
use super::captures::load_capture;
use super::chat_lines;
use super::ChatLine;
use super::Conversation;
use crate::domain::models::Flow;
use super::Scroll;
use crate::domain::models::calls_text;
use crate::domain::models::help_text;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Phase;
use crate::domain::models::SlashCommand;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub struct AppStateProps {
    pub backend_url: String,
}

pub struct AppState<'a> {
    pub backend_url: String,
    pub conversation: Conversation,
    pub exit: bool,
    pub input: TextArea<'a>,
    pub last_known_height: usize,
    pub last_known_width: usize,
    pub lines: Vec<ChatLine>,
    pub scroll: Scroll,
    pub tick: usize,
}

impl<'a> AppState<'a> {
    pub fn new(props: AppStateProps) -> AppState<'a> {
        let mut app_state = AppState {
            backend_url: props.backend_url,
            conversation: Conversation::new(),
            exit: false,
            input: TextArea::default(),
            last_known_height: 0,
            last_known_width: 0,
            lines: vec![],
            scroll: Scroll::default(),
            tick: 0,
        };
        app_state.sync_dependants();

        return app_state;
    }

    /// Animated line shown under the log while a request is out.
    pub fn status_line(&self) -> Option<String> {
        let dots = ".".repeat(self.tick % 3 + 1);
        match self.conversation.in_flight()? {
            Flow::Upload => return Some(format!("Analyzing{dots}")),
            Flow::Question => return Some(format!("Thinking{dots}")),
        }
    }

    pub fn input_title(&self) -> &'static str {
        if self.conversation.is_busy() {
            return "Waiting for the analysis service";
        }

        match self.conversation.session().phase() {
            Phase::NoJob => return "PCAP file path (Enter to upload, /help for commands)",
            Phase::HasJob => return "Ask about this capture (Enter to send)",
        }
    }

    pub async fn handle_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        match event {
            Event::CaptureAnalyzed(outcome) => self.conversation.finish_upload(outcome),
            Event::QuestionAnswered(outcome) => self.conversation.finish_question(outcome),
            Event::BackendHealth(Ok(())) => {}
            Event::BackendHealth(Err(err)) => {
                self.conversation.notice(&format!(
                    "⚠️ The analysis service at {} isn't responding. Uploads will fail until it is reachable.\n\nError: {err}",
                    self.backend_url
                ));
            }
            Event::KeyboardCharInput(input) => {
                self.input.input(input);
            }
            Event::KeyboardPaste(text) => {
                self.input.insert_str(text);
            }
            Event::KeyboardEnter => self.handle_enter(tx).await?,
            Event::KeyboardCTRLC => self.exit = true,
            Event::UITick => self.tick = self.tick.wrapping_add(1),
            Event::UIScrollDown => self.scroll.down(),
            Event::UIScrollUp => self.scroll.up(),
            Event::UIScrollPageDown => self.scroll.down_page(),
            Event::UIScrollPageUp => self.scroll.up_page(),
        }

        self.sync_dependants();
        return Ok(());
    }

    async fn handle_enter(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let input_str = self.input.lines().join("\n");

        if let Some(command) = SlashCommand::parse(&input_str) {
            self.handle_slash_command(&command);
            self.reset_input();
            return Ok(());
        }

        if self.conversation.is_busy() {
            return Ok(());
        }

        match self.conversation.session().phase() {
            Phase::NoJob => self.submit_capture(&input_str, tx).await?,
            Phase::HasJob => {
                self.conversation.set_draft(&input_str);
                if let Some((job_id, question)) = self.conversation.start_question() {
                    self.reset_input();
                    tx.send(Action::AskQuestion(job_id, question))?;
                }
            }
        }

        self.scroll.last();
        return Ok(());
    }

    async fn submit_capture(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let path = clean_path(input_str);
        if path.is_empty() {
            return Ok(());
        }

        let file = match load_capture(path).await {
            Ok(file) => file,
            Err(err) => {
                self.conversation
                    .notice(&format!("⚠️ Could not open that capture.\n\nError: {err:#}"));
                return Ok(());
            }
        };

        if let Err(err) = self.conversation.select_capture(file) {
            tracing::warn!(error = %err, "capture could not be queued");
            return Ok(());
        }

        if let Some(file) = self.conversation.start_upload() {
            self.reset_input();
            tx.send(Action::SubmitCapture(file))?;
        }

        return Ok(());
    }

    fn handle_slash_command(&mut self, command: &SlashCommand) {
        if command.is_quit() {
            self.exit = true;
        } else if command.is_help() {
            self.conversation.notice(&help_text());
        } else if command.is_calls() {
            let text = calls_text(self.conversation.session().job());
            self.conversation.notice(&text);
        }
    }

    fn reset_input(&mut self) {
        self.input = TextArea::default();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width.into();
        self.last_known_height = rect.height.into();
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let status = self.status_line();
        self.lines = chat_lines::layout(
            self.conversation.session().messages(),
            status.as_deref(),
            self.last_known_width,
        );

        let follow = self.scroll.is_position_at_last();
        self.scroll.set_state(self.lines.len(), self.last_known_height);
        if follow {
            self.scroll.last();
        }
    }
}

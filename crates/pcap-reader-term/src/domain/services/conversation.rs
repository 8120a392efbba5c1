#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use pcap_reader_client::AnalysisClient;
use pcap_reader_client::AnalysisResult;
use pcap_reader_client::CaptureFile;
use pcap_reader_client::ChatAnswer;
use pcap_reader_client::JobId;
use pcap_reader_client::TransportError;

use crate::domain::models::analysis_report;
use crate::domain::models::failure_text;
use crate::domain::models::Flow;
use crate::domain::models::upload_echo;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;
use crate::domain::models::Session;
use crate::domain::models::SessionError;

/// Sole owner of the [`Session`].
///
/// Each flow is split in two: `start_*` applies the optimistic part and hands
/// back what has to be sent, `finish_*` applies the outcome. Only one flow can
/// be in flight; starting another one meanwhile is a no-op.
#[derive(Debug, Default)]
pub struct Conversation {
    session: Session,
    in_flight: Option<Flow>,
}

impl Conversation {
    pub fn new() -> Conversation {
        return Conversation::default();
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    pub fn in_flight(&self) -> Option<Flow> {
        return self.in_flight;
    }

    pub fn is_busy(&self) -> bool {
        return self.in_flight.is_some();
    }

    /// Appends a local notice that is not part of either flow.
    pub fn notice(&mut self, text: &str) {
        self.session
            .append_message(Message::new(Role::System, text));
    }

    /// Queues `file` for upload, replacing a queued file that has not been
    /// sent yet.
    pub fn select_capture(&mut self, file: CaptureFile) -> Result<(), SessionError> {
        if self.in_flight == Some(Flow::Upload) {
            return Err(SessionError::UploadAlreadyQueued);
        }

        if self.session.pending_file().is_some() && self.session.job_id().is_none() {
            self.session.withdraw_upload()?;
        }

        return self.session.begin_upload(file);
    }

    pub fn set_draft(&mut self, text: &str) {
        self.session.set_draft(text);
    }

    /// Starts the upload flow. Returns the file to send, or `None` when no
    /// upload may start right now.
    pub fn start_upload(&mut self) -> Option<CaptureFile> {
        if self.in_flight.is_some() || self.session.job_id().is_some() {
            return None;
        }

        let file = self.session.pending_file()?.clone();
        self.session
            .append_message(Message::new(Role::User, &upload_echo(&file.file_name)));
        self.in_flight = Some(Flow::Upload);
        tracing::debug!(file = %file.file_name, "upload started");

        return Some(file);
    }

    pub fn finish_upload(&mut self, outcome: Result<AnalysisResult, TransportError>) {
        if self.in_flight != Some(Flow::Upload) {
            tracing::warn!(in_flight = ?self.in_flight, "ignoring upload outcome with no upload in flight");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                if let Err(err) = self.session.complete_upload(&result) {
                    tracing::error!(error = %err, "analysis result could not be recorded");
                    return;
                }
                tracing::info!(job_id = %result.job_id, "job assigned");
                self.session
                    .append_message(Message::new(Role::Assistant, &analysis_report(&result)));
            }
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "upload failed");
                if let Err(err) = self.session.fail_upload() {
                    tracing::error!(error = %err, "upload failure could not be recorded");
                }
                self.append_failure(&err);
            }
        }
    }

    /// Runs the whole upload flow against `client`. Returns whether a request
    /// was made.
    pub async fn upload(&mut self, client: &dyn AnalysisClient) -> bool {
        let Some(file) = self.start_upload() else {
            return false;
        };

        let outcome = client.submit_capture(file).await;
        self.finish_upload(outcome);
        return true;
    }

    /// Starts the question flow with the current draft. Returns the job and
    /// the question to send, or `None` when there is no job, the draft is
    /// empty or another flow is in flight. The draft is left alone in that
    /// case.
    pub fn start_question(&mut self) -> Option<(JobId, String)> {
        if self.in_flight.is_some() || self.session.draft().is_empty() {
            return None;
        }
        let job_id = self.session.job_id()?.clone();

        let question = self.session.take_draft();
        self.session
            .append_message(Message::new(Role::User, &question));
        self.in_flight = Some(Flow::Question);
        tracing::debug!(job_id = %job_id, "question started");

        return Some((job_id, question));
    }

    pub fn finish_question(&mut self, outcome: Result<ChatAnswer, TransportError>) {
        if self.in_flight != Some(Flow::Question) {
            tracing::warn!(in_flight = ?self.in_flight, "ignoring answer with no question in flight");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(answer) => {
                self.session
                    .append_message(Message::new(Role::Assistant, &answer.answer));
            }
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "question failed");
                self.append_failure(&err);
            }
        }
    }

    /// Runs the whole question flow against `client`. Returns whether a
    /// request was made.
    pub async fn ask(&mut self, client: &dyn AnalysisClient) -> bool {
        let Some((job_id, question)) = self.start_question() else {
            return false;
        };

        let outcome = client.submit_question(&job_id, &question).await;
        self.finish_question(outcome);
        return true;
    }

    fn append_failure(&mut self, err: &TransportError) {
        self.session.append_message(Message::new_with_type(
            Role::Assistant,
            MessageType::Error,
            &failure_text(err),
        ));
    }
}

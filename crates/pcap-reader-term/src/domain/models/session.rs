#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use pcap_reader_client::AnalysisResult;
use pcap_reader_client::CallSummary;
use pcap_reader_client::CaptureFile;
use pcap_reader_client::JobId;
use strum::Display;
use thiserror::Error;

use super::Message;
use super::Role;

pub const GREETING: &str = "👋 Upload a PCAP file to begin analysis.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NoJob,
    HasJob,
}

/// A request that has been sent and not yet answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Flow {
    Upload,
    Question,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a capture has already been analyzed in this session (job {0})")]
    JobAlreadyAssigned(JobId),
    #[error("a capture is already queued for upload")]
    UploadAlreadyQueued,
    #[error("no capture is queued for upload")]
    NoPendingUpload,
    #[error("no capture has been analyzed yet")]
    NoJob,
}

/// Outcome of the one successful upload a session may have.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub file: Option<String>,
    pub calls: Vec<CallSummary>,
    pub capture_context: Option<serde_json::Value>,
}

impl Job {
    fn from_analysis(result: &AnalysisResult) -> Job {
        return Job {
            id: result.job_id.clone(),
            file: result.file.clone(),
            calls: result.calls.clone(),
            capture_context: result.capture_context.clone(),
        };
    }
}

/// The state of one conversation.
///
/// The log only grows and the job is assigned at most once. Every mutator
/// checks its precondition and leaves the session untouched when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    log: Vec<Message>,
    pending_file: Option<CaptureFile>,
    job: Option<Job>,
    draft: String,
}

impl Default for Session {
    fn default() -> Session {
        return Session::new();
    }
}

impl Session {
    pub fn new() -> Session {
        return Session {
            log: vec![Message::new(Role::Assistant, GREETING)],
            pending_file: None,
            job: None,
            draft: String::new(),
        };
    }

    pub fn phase(&self) -> Phase {
        if self.job.is_some() {
            return Phase::HasJob;
        }

        return Phase::NoJob;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.log;
    }

    pub fn job(&self) -> Option<&Job> {
        return self.job.as_ref();
    }

    pub fn job_id(&self) -> Option<&JobId> {
        return self.job.as_ref().map(|job| &job.id);
    }

    pub fn pending_file(&self) -> Option<&CaptureFile> {
        return self.pending_file.as_ref();
    }

    pub fn draft(&self) -> &str {
        return &self.draft;
    }

    fn ensure_no_job(&self) -> Result<(), SessionError> {
        if let Some(job) = &self.job {
            return Err(SessionError::JobAlreadyAssigned(job.id.clone()));
        }

        return Ok(());
    }

    pub fn begin_upload(&mut self, file: CaptureFile) -> Result<(), SessionError> {
        self.ensure_no_job()?;
        if self.pending_file.is_some() {
            return Err(SessionError::UploadAlreadyQueued);
        }

        self.pending_file = Some(file);
        return Ok(());
    }

    /// Drops a queued capture so another one can be selected.
    pub fn withdraw_upload(&mut self) -> Result<CaptureFile, SessionError> {
        return self.pending_file.take().ok_or(SessionError::NoPendingUpload);
    }

    pub fn complete_upload(&mut self, result: &AnalysisResult) -> Result<(), SessionError> {
        self.ensure_no_job()?;

        self.job = Some(Job::from_analysis(result));
        self.pending_file = None;
        return Ok(());
    }

    /// Clears the queued capture after a failed upload. The job stays absent
    /// so the user can retry with the same or another file.
    pub fn fail_upload(&mut self) -> Result<(), SessionError> {
        self.ensure_no_job()?;

        self.pending_file = None;
        return Ok(());
    }

    pub fn append_message(&mut self, message: Message) {
        self.log.push(message);
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn take_draft(&mut self) -> String {
        return std::mem::take(&mut self.draft);
    }
}

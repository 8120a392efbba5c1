use pcap_reader_client::CaptureFile;
use pcap_reader_client::JobId;

/// Work handed from the UI loop to the background worker.
#[derive(Debug, Clone)]
pub enum Action {
    SubmitCapture(CaptureFile),
    AskQuestion(JobId, String),
    HealthCheck,
}

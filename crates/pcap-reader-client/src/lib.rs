//! Client for the PCAP analysis service.
//!
//! The service analyses a packet capture out-of-band and hands back a job
//! identifier plus a summary. Follow-up questions are scoped to that job.
//! This crate only speaks the HTTP contract; sequencing and conversation state
//! live with the caller.

use async_trait::async_trait;

pub mod error;
pub mod http_client;
pub mod types;

pub use error::TransportError;
pub use http_client::HttpAnalysisClient;
pub use types::*;

/// Result type alias for analysis service calls.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Operations offered by the analysis service.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Upload a capture and wait for the backend's analysis summary.
    async fn submit_capture(&self, file: CaptureFile) -> Result<AnalysisResult>;

    /// Ask a question about a finished analysis job.
    async fn submit_question(&self, job_id: &JobId, question: &str) -> Result<ChatAnswer>;

    /// Check if the service is reachable and healthy.
    async fn health_check(&self) -> Result<()>;

    /// Base URL the client talks to, for display purposes.
    fn base_url(&self) -> &str;
}

pub type AnalysisClientBox = Box<dyn AnalysisClient>;

/// Factory for creating AnalysisClient instances
pub struct AnalysisClientFactory;

impl AnalysisClientFactory {
    /// Create an HTTP client bound to the configured service.
    pub fn create_http_client(config: ClientConfig) -> AnalysisClientBox {
        Box::new(HttpAnalysisClient::new(config))
    }
}

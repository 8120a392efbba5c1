use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Where the analysis service lives and how long to wait for it.
///
/// Built once before the first request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// A capture payload as selected by the user. Contents are not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl CaptureFile {
    pub fn new(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }
}

/// Opaque handle of a finished analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketStats {
    pub total_packets: u64,
    pub sip_packets: u64,
    pub rtp_packets: u64,
}

/// Per-call verdict as reported by the backend. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallSummary {
    pub call_id: Option<String>,
    pub final_verdict: Option<String>,
    pub root_cause: Option<String>,
    pub failure_stage: Option<String>,
    pub protocol_responsible: Option<String>,
}

/// Success payload of `POST /analyze/sip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub job_id: JobId,
    pub packet_stats: PacketStats,
    pub total_calls: u64,
    pub file_ai_insight: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub capture_context: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "calls_or_empty")]
    pub calls: Vec<CallSummary>,
}

// The backend sends `null` for calls when tshark found nothing.
fn calls_or_empty<'de, D>(deserializer: D) -> Result<Vec<CallSummary>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<CallSummary>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /chat/{job_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Success payload of `POST /chat/{job_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
}

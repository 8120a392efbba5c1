//! Error types for calls against the analysis service.

use thiserror::Error;

/// Outcome of a request that did not yield the documented success payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response was obtained: DNS, connection, timeout or a broken body.
    #[error("analysis service is unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("analysis service returned status {status}: {body}")]
    BackendError { status: u16, body: String },

    /// The service answered 2xx but the body is not the documented JSON.
    #[error("analysis service sent an unreadable response (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },
}

impl TransportError {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable(reason.into())
    }

    pub fn backend(status: u16, body: impl Into<String>) -> Self {
        Self::BackendError {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Unreachable(_) => None,
            TransportError::BackendError { status, .. }
            | TransportError::MalformedResponse { status, .. } => Some(*status),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, TransportError::Unreachable(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Unreachable(err.to_string())
    }
}

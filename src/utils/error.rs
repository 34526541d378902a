use crate::domain::model::ReportKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Malformed {kind} response: {reason}")]
    MalformedResponse { kind: ReportKind, reason: String },

    #[error("Upstream service failed for {kind}: {message}")]
    UpstreamError { kind: ReportKind, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

impl ReportError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn malformed(kind: ReportKind, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            kind,
            reason: reason.into(),
        }
    }

    pub fn upstream(kind: ReportKind, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            kind,
            message: message.into(),
        }
    }

    /// True for failures the aggregator recovers from locally instead of
    /// surfacing to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

use std::fmt;

use dashboard_core::{FileId, HistoryEntry, HistoryTrigger, Prediction, SubmissionId, UserProfile};

/// Completion of one effect, reported back by [`crate::ClientHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    ProfileLoaded(Result<UserProfile, ServiceError>),
    HistoryLoaded {
        trigger: HistoryTrigger,
        result: Result<Vec<HistoryEntry>, ServiceError>,
    },
    PreviewDecoded {
        file_id: FileId,
        result: Result<String, crate::PreviewError>,
    },
    PredictionCompleted {
        submission_id: SubmissionId,
        result: Result<Prediction, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
    /// Reason reported by the service in its error body, if it sent one.
    pub service_message: Option<String>,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            service_message: None,
        }
    }

    pub(crate) fn with_service_message(mut self, service_message: Option<String>) -> Self {
        self.service_message = service_message;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
    TooLarge { max_bytes: u64, actual: u64 },
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "file too large (max {max_bytes}, actual {actual})")
            }
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to start effect runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

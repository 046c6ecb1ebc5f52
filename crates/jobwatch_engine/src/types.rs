use thiserror::Error;

/// Why a monitor request produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{target}: {kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    /// Request path relative to the service base URL.
    pub target: String,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(
        kind: FailureKind,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target: target.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error")]
    Network,
    /// The body was not the JSON shape the endpoint promises.
    #[error("malformed response")]
    Decode,
    #[error("io error")]
    Io,
}

use std::fmt;

/// The external model call failed or produced no text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ModelInvocationError {
    pub kind: InvocationFailure,
    pub message: String,
}

impl ModelInvocationError {
    pub(crate) fn new(kind: InvocationFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationFailure {
    MissingApiKey,
    Timeout,
    Network,
    HttpStatus(u16),
    MalformedEnvelope,
    EmptyResponse,
}

impl fmt::Display for InvocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationFailure::MissingApiKey => write!(f, "missing api key"),
            InvocationFailure::Timeout => write!(f, "timeout"),
            InvocationFailure::Network => write!(f, "network error"),
            InvocationFailure::HttpStatus(code) => write!(f, "http status {code}"),
            InvocationFailure::MalformedEnvelope => write!(f, "malformed response envelope"),
            InvocationFailure::EmptyResponse => write!(f, "empty response"),
        }
    }
}

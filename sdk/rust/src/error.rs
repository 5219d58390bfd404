//! Errors surfaced by the SDK, mapped to the public error table's
//! `INVALID_ARGUMENT` and `SANDBOX_API_EXCEPTION` kinds.

/// Errors raised by SDK adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client-side rejection before any network call (blank command, etc).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// execd or the control plane responded with a non-2xx status.
    #[error("sandbox API error ({status}): {body}")]
    SandboxApiException { status: u16, body: String },

    /// Transport-level failure (connection reset, DNS, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A `data:` frame's JSON payload is malformed or an SSE stream
    /// couldn't be parsed as UTF-8 at all.
    #[error("stream error: {0}")]
    Stream(String),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::SandboxApiException { .. } => "SANDBOX_API_EXCEPTION",
            Self::Transport(_) => "SANDBOX_API_EXCEPTION",
            Self::Stream(_) => "SANDBOX_API_EXCEPTION",
            Self::Config(_) => "INVALID_ARGUMENT",
        }
    }
}

/// Map a non-2xx HTTP response to `SandboxApiException`, matching
/// `SandboxApiException(status, body)` from the original adapters.
pub fn api_exception(status: u16, body: impl Into<String>) -> Error {
    Error::SandboxApiException {
        status,
        body: body.into(),
    }
}

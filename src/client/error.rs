/// Classification of a failed proxy call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Network,
    Upstream,
    Decode,
}

/// Errors surfaced by the client aggregator.
///
/// An empty listing is not an error; see `Listing::NoResults`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("The request timed out.")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Timeout => ErrorKind::Timeout,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Upstream { .. } => ErrorKind::Upstream,
            ClientError::Decode(_) => ErrorKind::Decode,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.without_url().to_string())
        } else {
            ClientError::Network(err.without_url().to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

use thiserror::Error;

/// Any failed request against the REST backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server replied {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(err) => err.status().map(|s| s.as_u16()),
            TransportError::Decode(_) => None,
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

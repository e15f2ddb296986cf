use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Truck not found")]
    NotFound,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed backend payload: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Network, HTTP-level and payload failures, as opposed to a missing
    /// entity or a request rejected before it was sent.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Status { .. } | ClientError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

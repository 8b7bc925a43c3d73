use discharge_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Decode(#[from] CoreError),

    #[error("credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// The server answered, but not with a success status.
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}

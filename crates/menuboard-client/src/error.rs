//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status with the server's error code, if any
    #[error("Server returned {status}: {code}")]
    Status { status: u16, code: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    /// A draft edit the document model refused
    #[error("Invalid edit: {0}")]
    Invalid(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Why a publish did not reach the store
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("No remote endpoint configured")]
    NoEndpoint,

    #[error("Not logged in")]
    NoSession,

    #[error("Session expired, log in again")]
    SessionExpired,

    #[error("Session rejected by the server, log in again")]
    Unauthorized,

    #[error("Menu rejected by the server: {0}")]
    Rejected(String),

    #[error("Publish failed: {0}")]
    Failed(String),
}

impl PublishError {
    /// The caller has to log in before trying again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            PublishError::NoSession | PublishError::SessionExpired | PublishError::Unauthorized
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, PublishError::Failed(_))
    }
}

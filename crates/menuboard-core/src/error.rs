//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid menu payload: {0}")]
    InvalidPayload(String),

    #[error("Duplicate {set} id: {id}")]
    DuplicateId { set: &'static str, id: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Server not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Invalid data URL")]
    InvalidDataUrl,

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("Empty image")]
    EmptyImage,

    #[error("Image too large: {size} bytes (max {max})")]
    ImageTooLarge { size: usize, max: usize },

    #[error("AI not configured")]
    AiNotConfigured,

    #[error("Dish name is required")]
    MissingName,

    #[error("AI response contained no image")]
    NoImage,

    #[error("AI request failed: {0}")]
    AiFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

//! # Menu Board Core
//!
//! Menu document model, repository ports and the domain services behind
//! the HTTP API.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;

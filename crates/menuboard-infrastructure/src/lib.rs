//! # Menu Board Infrastructure
//!
//! Adapters behind the core ports: file storage and the AI backend.

pub mod storage;
pub mod ai;

pub use storage::{FileMenuRepository, FsImageRepository, InMemoryMenuRepository};
pub use ai::OpenAiCompatClient;

//! Domain services (business logic)

pub mod menu_service;
pub mod auth_service;
pub mod image_service;
pub mod content_service;

pub use menu_service::MenuService;
pub use auth_service::AuthService;
pub use image_service::{ImageUploadService, ParsedDataUrl};
pub use content_service::{ContentService, DishPrompt};

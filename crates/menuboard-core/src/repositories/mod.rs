//! Repository traits (ports)

pub mod menu_repository;
pub mod image_repository;
pub mod content_generator;

pub use menu_repository::MenuRepository;
pub use image_repository::ImageRepository;
pub use content_generator::{ContentGenerator, GeneratedImage};

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use content_generator::MockContentGenerator;

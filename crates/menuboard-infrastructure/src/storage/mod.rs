//! Storage adapters

pub mod file_menu_repo;
pub mod memory_menu_repo;
pub mod fs_image_repo;

pub use file_menu_repo::FileMenuRepository;
pub use memory_menu_repo::InMemoryMenuRepository;
pub use fs_image_repo::FsImageRepository;

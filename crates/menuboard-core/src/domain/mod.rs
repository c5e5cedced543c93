//! # Menu Board Core - Domain Module
//!
//! Entities of the menu document.

pub mod category;
pub mod dish;
pub mod promotion;
pub mod theme;
pub mod menu_document;

pub use category::Category;
pub use dish::{Dish, DishBadge, DishStatus};
pub use promotion::{AnimationStyle, Promotion, DEFAULT_PROMO_DURATION_SECS, DEFAULT_PROMO_FREQUENCY_SECS};
pub use theme::Theme;
pub use menu_document::{MenuDocument, SEED_FOOTER_MESSAGE};

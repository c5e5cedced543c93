// ============================================================================
// Menu Board Core - Category Entity
// File: crates/menuboard-core/src/domain/category.rs
// Description: Menu section shown as a heading on the display
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use menuboard_shared::new_id;

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[validate(length(min = 1, max = 64, message = "Category id must be between 1 and 64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,

    /// Sort key on the board
    #[serde(default)]
    pub order: i32,

    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Category {
    pub fn new(name: String, order: i32) -> Self {
        Self {
            id: new_id(),
            name: name.trim().to_string(),
            order,
            is_visible: true,
        }
    }

    pub fn toggle_visibility(&mut self) -> bool {
        self.is_visible = !self.is_visible;
        self.is_visible
    }
}

// ============================================================================
// Menu Board Core - Dish Entity
// File: crates/menuboard-core/src/domain/dish.rs
// Description: Menu item with price, status and badge
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use menuboard_shared::new_id;

/// Availability of a dish on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DishStatus {
    #[default]
    Available,
    SoldOut,
    Hidden,
}

impl DishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishStatus::Available => "AVAILABLE",
            DishStatus::SoldOut => "SOLD_OUT",
            DishStatus::Hidden => "HIDDEN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "AVAILABLE" => Some(DishStatus::Available),
            "SOLD_OUT" => Some(DishStatus::SoldOut),
            "HIDDEN" => Some(DishStatus::Hidden),
            _ => None,
        }
    }
}

/// Marketing badge next to the dish name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DishBadge {
    #[default]
    None,
    New,
    Hit,
    Spicy,
    Vegan,
}

impl DishBadge {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishBadge::None => "none",
            DishBadge::New => "new",
            DishBadge::Hit => "hit",
            DishBadge::Spicy => "spicy",
            DishBadge::Vegan => "vegan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(DishBadge::None),
            "new" => Some(DishBadge::New),
            "hit" => Some(DishBadge::Hit),
            "spicy" => Some(DishBadge::Spicy),
            "vegan" => Some(DishBadge::Vegan),
            _ => None,
        }
    }
}

/// Dish entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    #[validate(length(min = 1, max = 64, message = "Dish id must be between 1 and 64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 200, message = "Dish name must be between 1 and 200 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: String,

    /// Category id; may point at a deleted category
    #[serde(default)]
    pub category: String,

    pub price: u32,

    /// Expected below `price`, not enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<u32>,

    #[serde(default)]
    pub status: DishStatus,

    #[serde(default)]
    pub badge: DishBadge,

    /// Sort key within the category
    #[serde(default)]
    pub order: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_special: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

impl Dish {
    pub fn new(name: String, category: String, price: u32, order: i32) -> Self {
        Self {
            id: new_id(),
            name: name.trim().to_string(),
            description: String::new(),
            category,
            price,
            discount_price: None,
            status: DishStatus::Available,
            badge: DishBadge::None,
            order,
            image_url: None,
            is_special: None,
            calories: None,
        }
    }

    /// Price the guest actually pays.
    pub fn effective_price(&self) -> u32 {
        match self.discount_price {
            Some(discount) if discount > 0 => discount,
            _ => self.price,
        }
    }

    pub fn has_discount(&self) -> bool {
        matches!(self.discount_price, Some(discount) if discount > 0)
    }

    pub fn is_listed(&self) -> bool {
        self.status != DishStatus::Hidden
    }

    pub fn is_sold_out(&self) -> bool {
        self.status == DishStatus::SoldOut
    }
}

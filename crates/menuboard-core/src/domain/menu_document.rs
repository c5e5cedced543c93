// ============================================================================
// Menu Board Core - Menu Document Aggregate
// File: crates/menuboard-core/src/domain/menu_document.rs
// Description: The single shared document edited by admin and shown on TV
// ============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use menuboard_shared::constants::MAX_LAST_UPDATED;
use menuboard_shared::Millis;

use super::{AnimationStyle, Category, Dish, DishBadge, DishStatus, Promotion, Theme};
use crate::error::DomainError;

pub const SEED_FOOTER_MESSAGE: &str =
    "Приятного аппетита! • Время работы: 08:00 – 20:00 • Наличный и безналичный расчет";

/// Whole menu state. Always stored and transferred as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub dishes: Vec<Dish>,

    #[serde(default)]
    pub promotions: Vec<Promotion>,

    #[serde(default)]
    pub footer_message: String,

    #[serde(default)]
    pub theme: Theme,

    /// Version marker, epoch millis of the last publish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Millis>,
}

impl Default for MenuDocument {
    fn default() -> Self {
        Self::seed()
    }
}

impl MenuDocument {
    /// Built-in content shown before anything was ever published.
    pub fn seed() -> Self {
        let category = |id: &str, name: &str, order: i32| Category {
            id: id.to_string(),
            name: name.to_string(),
            order,
            is_visible: true,
        };

        Self {
            categories: vec![
                category("cat1", "Первые блюда", 1),
                category("cat2", "Вторые блюда", 2),
                category("cat3", "Гарниры", 3),
                category("cat4", "Напитки", 4),
            ],
            dishes: vec![
                Dish {
                    id: "d1".to_string(),
                    name: "Борщ Украинский".to_string(),
                    description: "Традиционный борщ со сметаной и пампушкой".to_string(),
                    category: "cat1".to_string(),
                    price: 180,
                    discount_price: None,
                    status: DishStatus::Available,
                    badge: DishBadge::None,
                    order: 1,
                    image_url: Some("https://picsum.photos/seed/borsch/400/300".to_string()),
                    is_special: None,
                    calories: None,
                },
                Dish {
                    id: "d2".to_string(),
                    name: "Котлета По-Киевски".to_string(),
                    description: "Сочная куриная грудка с маслом внутри".to_string(),
                    category: "cat2".to_string(),
                    price: 250,
                    discount_price: Some(220),
                    status: DishStatus::Available,
                    badge: DishBadge::Hit,
                    order: 1,
                    image_url: Some("https://picsum.photos/seed/kiev/400/300".to_string()),
                    is_special: None,
                    calories: None,
                },
            ],
            promotions: vec![Promotion {
                id: "p1".to_string(),
                title: "Счастливые часы!".to_string(),
                description: "С 16:00 до 18:00 скидка 20% на все меню".to_string(),
                image_url: None,
                animation_style: AnimationStyle::SlideUp,
                active: true,
                frequency: 60,
                duration: 10,
            }],
            footer_message: SEED_FOOTER_MESSAGE.to_string(),
            theme: Theme::Default,
            last_updated: None,
        }
    }

    /// Decode an untrusted publish body.
    ///
    /// The three entity sets must be present as arrays; everything else is
    /// lenient.
    pub fn from_payload(payload: Value) -> Result<Self, DomainError> {
        for key in ["categories", "dishes", "promotions"] {
            if !payload.get(key).is_some_and(Value::is_array) {
                return Err(DomainError::InvalidPayload(format!("`{}` must be an array", key)));
            }
        }
        serde_json::from_value(payload).map_err(|e| DomainError::InvalidPayload(e.to_string()))
    }

    /// Field rules plus id uniqueness within each set.
    /// Cross-set references are deliberately left unchecked.
    pub fn validate_document(&self) -> Result<(), DomainError> {
        if let Some(stamp) = self.last_updated {
            if !(0..=MAX_LAST_UPDATED).contains(&stamp) {
                return Err(DomainError::ValidationError(format!(
                    "lastUpdated {} is out of range",
                    stamp
                )));
            }
        }

        for category in &self.categories {
            category.validate()?;
        }
        for dish in &self.dishes {
            dish.validate()?;
        }
        for promotion in &self.promotions {
            promotion.validate()?;
        }

        ensure_unique("category", self.categories.iter().map(|c| c.id.as_str()))?;
        ensure_unique("dish", self.dishes.iter().map(|d| d.id.as_str()))?;
        ensure_unique("promotion", self.promotions.iter().map(|p| p.id.as_str()))?;
        Ok(())
    }

    pub fn version(&self) -> Option<Millis> {
        self.last_updated
    }

    /// Active promotions in document order.
    pub fn active_promotions(&self) -> Vec<&Promotion> {
        self.promotions.iter().filter(|p| p.active).collect()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn dish(&self, id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    // ------------------------------------------------------------------
    // Draft edits
    // ------------------------------------------------------------------

    /// Replace by id or append. Returns true when an existing dish changed.
    pub fn upsert_dish(&mut self, dish: Dish) -> bool {
        match self.dishes.iter_mut().find(|d| d.id == dish.id) {
            Some(existing) => {
                *existing = dish;
                true
            }
            None => {
                self.dishes.push(dish);
                false
            }
        }
    }

    pub fn remove_dish(&mut self, id: &str) -> Option<Dish> {
        let index = self.dishes.iter().position(|d| d.id == id)?;
        Some(self.dishes.remove(index))
    }

    /// Appends a visible category at the end of the board.
    pub fn add_category(&mut self, name: &str) -> Result<&Category, DomainError> {
        let category = Category::new(name.to_string(), self.categories.len() as i32 + 1);
        category.validate()?;
        self.categories.push(category);
        let last = self.categories.len() - 1;
        Ok(&self.categories[last])
    }

    /// Dishes of the removed category stay in the document.
    pub fn remove_category(&mut self, id: &str) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(index))
    }

    pub fn toggle_category_visibility(&mut self, id: &str) -> Option<bool> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .map(Category::toggle_visibility)
    }

    pub fn upsert_promotion(&mut self, promotion: Promotion) -> bool {
        match self.promotions.iter_mut().find(|p| p.id == promotion.id) {
            Some(existing) => {
                *existing = promotion;
                true
            }
            None => {
                self.promotions.push(promotion);
                false
            }
        }
    }

    pub fn set_promotion_active(&mut self, id: &str, active: bool) -> Option<()> {
        let promotion = self.promotions.iter_mut().find(|p| p.id == id)?;
        promotion.active = active;
        Some(())
    }

    pub fn toggle_promotion(&mut self, id: &str) -> Option<bool> {
        let promotion = self.promotions.iter_mut().find(|p| p.id == id)?;
        promotion.active = !promotion.active;
        Some(promotion.active)
    }

    pub fn remove_promotion(&mut self, id: &str) -> Option<Promotion> {
        let index = self.promotions.iter().position(|p| p.id == id)?;
        Some(self.promotions.remove(index))
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_footer_message(&mut self, message: &str) {
        self.footer_message = message.to_string();
    }
}

fn ensure_unique<'a>(
    set: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DomainError::DuplicateId { set, id: id.to_string() });
        }
    }
    Ok(())
}

//! Board view model: what the display renders for a document

use menuboard_core::{Dish, DishBadge, MenuDocument, Theme, SEED_FOOTER_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Lunch,
    Evening,
}

impl Greeting {
    /// By local hour: before 12, before 17, then evening.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Greeting::Morning,
            12..=16 => Greeting::Lunch,
            _ => Greeting::Evening,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Morning => "Доброе утро",
            Greeting::Lunch => "Приятного обеда",
            Greeting::Evening => "Добрый вечер",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardDish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u32,
    /// Set only when the dish is discounted
    pub discount_price: Option<u32>,
    pub sold_out: bool,
    pub badge: DishBadge,
    pub image_url: Option<String>,
}

impl From<&Dish> for BoardDish {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            description: dish.description.clone(),
            price: dish.price,
            discount_price: dish.has_discount().then(|| dish.effective_price()),
            sold_out: dish.is_sold_out(),
            badge: dish.badge,
            image_url: dish.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSection {
    pub category_id: String,
    pub title: String,
    pub dishes: Vec<BoardDish>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub theme: Theme,
    pub greeting: Greeting,
    pub sections: Vec<BoardSection>,
    pub footer: String,
}

impl BoardView {
    pub fn build(document: &MenuDocument, hour: u32) -> Self {
        let mut categories: Vec<_> = document.categories.iter().filter(|c| c.is_visible).collect();
        categories.sort_by_key(|c| c.order);

        // dishes pointing at a missing category never match a section
        let sections = categories
            .into_iter()
            .filter_map(|category| {
                let mut dishes: Vec<&Dish> = document
                    .dishes
                    .iter()
                    .filter(|d| d.category == category.id && d.is_listed())
                    .collect();
                if dishes.is_empty() {
                    return None;
                }
                dishes.sort_by_key(|d| d.order);
                Some(BoardSection {
                    category_id: category.id.clone(),
                    title: category.name.clone(),
                    dishes: dishes.into_iter().map(BoardDish::from).collect(),
                })
            })
            .collect();

        let footer = match document.footer_message.trim() {
            "" => SEED_FOOTER_MESSAGE.to_string(),
            text => text.to_string(),
        };

        Self {
            theme: document.theme,
            greeting: Greeting::for_hour(hour),
            sections,
            footer,
        }
    }

    pub fn dish_count(&self) -> usize {
        self.sections.iter().map(|s| s.dishes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuboard_core::{Category, DishStatus};

    fn document() -> MenuDocument {
        let mut doc = MenuDocument::seed();
        doc.categories = vec![
            Category { id: "c2".into(), name: "Вторые".into(), order: 2, is_visible: true },
            Category { id: "c1".into(), name: "Супы".into(), order: 1, is_visible: true },
            Category { id: "c3".into(), name: "Скрытая".into(), order: 3, is_visible: false },
            Category { id: "c4".into(), name: "Пустая".into(), order: 4, is_visible: true },
        ];
        let dish = |id: &str, category: &str, order: i32| {
            let mut d = Dish::new(id.to_string(), category.to_string(), 100, order);
            d.id = id.to_string();
            d
        };
        let mut sold_out = dish("d3", "c1", 0);
        sold_out.status = DishStatus::SoldOut;
        let mut hidden = dish("d4", "c2", 1);
        hidden.status = DishStatus::Hidden;
        let mut discounted = dish("d5", "c2", 2);
        discounted.discount_price = Some(80);
        doc.dishes = vec![
            dish("d1", "c1", 2),
            sold_out,
            hidden,
            discounted,
            dish("d6", "c3", 1),
            dish("orphan", "gone", 1),
        ];
        doc.footer_message = String::new();
        doc
    }

    #[test]
    fn test_sections_sorted_and_filtered() {
        let view = BoardView::build(&document(), 9);
        let titles: Vec<_> = view.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Супы", "Вторые"]);

        let soups: Vec<_> = view.sections[0].dishes.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(soups, ["d3", "d1"]);
        assert!(view.sections[0].dishes[0].sold_out);

        let mains = &view.sections[1].dishes;
        assert_eq!(mains.len(), 1);
        assert_eq!(mains[0].discount_price, Some(80));
        assert_eq!(mains[0].price, 100);
    }

    #[test]
    fn test_dangling_category_is_excluded() {
        let view = BoardView::build(&document(), 9);
        assert_eq!(view.dish_count(), 3);
        assert!(view
            .sections
            .iter()
            .all(|s| s.dishes.iter().all(|d| d.id != "orphan")));
    }

    #[test]
    fn test_empty_footer_falls_back() {
        let view = BoardView::build(&document(), 9);
        assert_eq!(view.footer, SEED_FOOTER_MESSAGE);
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Lunch);
        assert_eq!(Greeting::for_hour(16), Greeting::Lunch);
        assert_eq!(Greeting::for_hour(17), Greeting::Evening);
        assert_eq!(Greeting::Lunch.text(), "Приятного обеда");
    }
}

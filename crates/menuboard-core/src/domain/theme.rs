//! Display theme

use serde::{Deserialize, Serialize};

/// Seasonal decoration of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    NewYear,
    Spring,
    Autumn,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::NewYear => "new-year",
            Theme::Spring => "spring",
            Theme::Autumn => "autumn",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Theme::Default),
            "new-year" | "newyear" => Some(Theme::NewYear),
            "spring" => Some(Theme::Spring),
            "autumn" => Some(Theme::Autumn),
            _ => None,
        }
    }

    pub fn all() -> [Theme; 4] {
        [Theme::Default, Theme::NewYear, Theme::Spring, Theme::Autumn]
    }

    /// Dark background themes need light text.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::NewYear)
    }
}

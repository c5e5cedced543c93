// ============================================================================
// Menu Board Core - Promotion Entity
// File: crates/menuboard-core/src/domain/promotion.rs
// Description: Overlay card rotated over the display
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use menuboard_shared::new_id;

pub const DEFAULT_PROMO_FREQUENCY_SECS: u32 = 60;
pub const DEFAULT_PROMO_DURATION_SECS: u32 = 10;

/// Entry animation of the overlay card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationStyle {
    Fade,
    #[default]
    SlideUp,
    Bounce,
}

impl AnimationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationStyle::Fade => "fade",
            AnimationStyle::SlideUp => "slide-up",
            AnimationStyle::Bounce => "bounce",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fade" => Some(AnimationStyle::Fade),
            "slide-up" | "slideup" => Some(AnimationStyle::SlideUp),
            "bounce" => Some(AnimationStyle::Bounce),
            _ => None,
        }
    }
}

/// Promotion entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[validate(length(min = 1, max = 64, message = "Promotion id must be between 1 and 64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 200, message = "Promotion title must be between 1 and 200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub animation_style: AnimationStyle,

    #[serde(default = "default_active")]
    pub active: bool,

    /// Seconds; stored and editable, the rotation cadence does not read it
    #[serde(default = "default_frequency")]
    pub frequency: u32,

    /// Seconds the card stays on screen
    #[serde(default = "default_duration")]
    #[validate(range(min = 1, max = 3600, message = "Duration must be between 1 and 3600 seconds"))]
    pub duration: u32,
}

fn default_active() -> bool {
    true
}

fn default_frequency() -> u32 {
    DEFAULT_PROMO_FREQUENCY_SECS
}

fn default_duration() -> u32 {
    DEFAULT_PROMO_DURATION_SECS
}

impl Promotion {
    /// New promotions start active with the standard timing.
    pub fn new(title: String, description: String, animation_style: AnimationStyle) -> Self {
        Self {
            id: new_id(),
            title: title.trim().to_string(),
            description,
            image_url: None,
            animation_style,
            active: true,
            frequency: DEFAULT_PROMO_FREQUENCY_SECS,
            duration: DEFAULT_PROMO_DURATION_SECS,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        u64::from(self.duration) * 1000
    }
}

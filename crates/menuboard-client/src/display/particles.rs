// ============================================================================
// Menu Board Client - Theme Particles
// File: crates/menuboard-client/src/display/particles.rs
// ============================================================================
//! Falling particles behind the board: snowflakes for new-year, petals for
//! spring, leaves for autumn, nothing for the default theme.
//!
//! Three layers (near, middle, far) differ in count, speed and opacity.
//! The particle set is generated once per theme; document refreshes that
//! keep the theme leave it untouched so nothing jumps on screen.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use menuboard_core::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Snowflake,
    Petal,
    Leaf,
}

impl ParticleKind {
    pub fn for_theme(theme: Theme) -> Option<Self> {
        match theme {
            Theme::Default => None,
            Theme::NewYear => Some(Self::Snowflake),
            Theme::Spring => Some(Self::Petal),
            Theme::Autumn => Some(Self::Leaf),
        }
    }

    /// Glyph for a layer, nearest first.
    pub fn glyph(self, layer: usize) -> char {
        let glyphs = match self {
            Self::Snowflake => ['❄', '*', '·'],
            Self::Petal => ['✿', '❀', '·'],
            Self::Leaf => ['❦', '❧', '·'],
        };
        glyphs[layer.min(glyphs.len() - 1)]
    }
}

struct LayerSpec {
    count: usize,
    speed_base_ms: u64,
    opacity: f64,
}

const LAYERS: [LayerSpec; 3] = [
    LayerSpec { count: 10, speed_base_ms: 12_000, opacity: 0.8 },
    LayerSpec { count: 15, speed_base_ms: 25_000, opacity: 0.5 },
    LayerSpec { count: 12, speed_base_ms: 40_000, opacity: 0.2 },
];

const SPEED_JITTER_MS: u64 = 15_000;
const MAX_PHASE_MS: u64 = 60_000;
const SWAY_PERIOD_MS: f64 = 4_000.0;
const SWAY_AMPLITUDE: f64 = 0.015;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub layer: usize,
    /// Horizontal start, as a fraction of the width
    pub left: f64,
    pub duration_ms: u64,
    /// Offset into the fall so particles do not start together
    pub phase_ms: u64,
    /// Horizontal travel over one fall, as a fraction of the width
    pub drift: f64,
    pub opacity: f64,
}

impl Particle {
    /// Position at `now` as fractions of the area; `y` runs from just above
    /// the top edge to just below the bottom one.
    pub fn position(&self, now: u64) -> ParticlePosition {
        let duration = self.duration_ms.max(1);
        let progress = (now.wrapping_add(self.phase_ms) % duration) as f64 / duration as f64;
        let sway = (now as f64 / SWAY_PERIOD_MS * TAU).sin() * SWAY_AMPLITUDE;
        ParticlePosition {
            layer: self.layer,
            x: self.left + self.drift * progress + sway,
            y: -0.1 + 1.2 * progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePosition {
    pub layer: usize,
    pub x: f64,
    pub y: f64,
}

impl ParticlePosition {
    pub fn is_visible(&self) -> bool {
        (0.0..1.0).contains(&self.x) && (0.0..1.0).contains(&self.y)
    }
}

pub struct ParticleField {
    theme: Theme,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(theme: Theme, seed: u64) -> Self {
        let mut field = Self {
            theme,
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        field.regenerate();
        field
    }

    /// Returns `true` when the theme changed and the particles were rebuilt.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        self.regenerate();
        true
    }

    fn regenerate(&mut self) {
        self.particles.clear();
        if ParticleKind::for_theme(self.theme).is_none() {
            return;
        }

        for (layer, spec) in LAYERS.iter().enumerate() {
            for _ in 0..spec.count {
                self.particles.push(Particle {
                    layer,
                    left: self.rng.random_range(-0.025..1.025),
                    duration_ms: spec.speed_base_ms + self.rng.random_range(0..SPEED_JITTER_MS),
                    phase_ms: self.rng.random_range(0..MAX_PHASE_MS),
                    drift: self.rng.random_range(0.02..0.1),
                    opacity: spec.opacity,
                });
            }
        }
        debug!(theme = self.theme.as_str(), count = self.particles.len(), "Particles generated");
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn kind(&self) -> Option<ParticleKind> {
        ParticleKind::for_theme(self.theme)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// On-screen particles at `now`, far layers first.
    pub fn visible(&self, now: u64) -> Vec<ParticlePosition> {
        let mut positions: Vec<_> = self
            .particles
            .iter()
            .map(|p| p.position(now))
            .filter(ParticlePosition::is_visible)
            .collect();
        positions.sort_by(|a, b| b.layer.cmp(&a.layer));
        positions
    }
}

// ============================================================================
// Menu Board Client - Auto-Scroll
// File: crates/menuboard-client/src/display/autoscroll.rs
// ============================================================================
//! Idle-time scrolling for boards taller than the screen

use menuboard_shared::config::ScrollSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Waiting,
    ScrollingDown,
    PausedAtBottom,
    ScrollingUp,
    PausedAtTop,
}

#[derive(Debug, Clone)]
pub struct AutoScroll {
    settings: ScrollSettings,
    phase: ScrollPhase,
    /// End of the current wait or dwell
    until: u64,
    position: f64,
}

impl AutoScroll {
    pub fn new(settings: ScrollSettings, now: u64) -> Self {
        let until = now.saturating_add(settings.start_delay_ms);
        Self {
            settings,
            phase: ScrollPhase::Waiting,
            until,
            position: 0.0,
        }
    }

    /// Content changed: drop everything pending and wait again from the top.
    pub fn reset(&mut self, now: u64) {
        self.phase = ScrollPhase::Waiting;
        self.until = now.saturating_add(self.settings.start_delay_ms);
        self.position = 0.0;
    }

    /// One animation frame. Returns the position to render, always within
    /// `[0, max_scroll]`.
    pub fn frame(&mut self, now: u64, max_scroll: f64) -> f64 {
        if max_scroll.is_nan() || max_scroll <= 0.0 {
            self.position = 0.0;
            return self.position;
        }
        self.position = self.position.clamp(0.0, max_scroll);

        match self.phase {
            ScrollPhase::Waiting | ScrollPhase::PausedAtTop if now >= self.until => {
                self.phase = ScrollPhase::ScrollingDown;
            }
            ScrollPhase::PausedAtBottom if now >= self.until => {
                self.phase = ScrollPhase::ScrollingUp;
            }
            ScrollPhase::ScrollingDown => {
                self.position = (self.position + self.settings.down_step).min(max_scroll);
                if self.position >= max_scroll {
                    self.dwell(ScrollPhase::PausedAtBottom, now);
                }
            }
            ScrollPhase::ScrollingUp => {
                self.position = (self.position - self.settings.up_step).max(0.0);
                if self.position <= 0.0 {
                    self.dwell(ScrollPhase::PausedAtTop, now);
                }
            }
            _ => {}
        }
        self.position
    }

    fn dwell(&mut self, phase: ScrollPhase, now: u64) {
        self.phase = phase;
        self.until = now.saturating_add(self.settings.dwell_ms);
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// End of the current wait; `None` while moving.
    pub fn next_deadline(&self) -> Option<u64> {
        match self.phase {
            ScrollPhase::Waiting | ScrollPhase::PausedAtBottom | ScrollPhase::PausedAtTop => {
                Some(self.until)
            }
            ScrollPhase::ScrollingDown | ScrollPhase::ScrollingUp => None,
        }
    }
}

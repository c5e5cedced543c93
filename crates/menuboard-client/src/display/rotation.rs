// ============================================================================
// Menu Board Client - Promotion Rotation
// File: crates/menuboard-client/src/display/rotation.rs
// ============================================================================
//! Promotion rotation engine
//!
//! `idle -> showing -> hiding -> idle`. Triggers fire once after the
//! initial delay and then on a fixed cadence measured from the schedule
//! origin. A trigger that arrives while a card is on screen is ignored.
//! After the exit grace period the index advances modulo the number of
//! active promotions.
//!
//! The schedule restarts only when the ids of the active set change;
//! content edits of the same promotions are picked up in place.

use tracing::debug;

use menuboard_core::Promotion;
use menuboard_shared::config::RotationSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    Idle,
    Showing,
    Hiding,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    Showing { promotion: Promotion, until: u64 },
    /// `advance` is false when the card left the active set while on
    /// screen; the index already points at its successor.
    Hiding { promotion: Promotion, until: u64, advance: bool },
}

/// What the overlay should render right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationView<'a> {
    pub promotion: &'a Promotion,
    pub phase: RotationPhase,
}

#[derive(Debug, Clone)]
pub struct RotationEngine {
    initial_delay: u64,
    cadence: u64,
    exit_grace: u64,
    promotions: Vec<Promotion>,
    origin: u64,
    next_trigger: u64,
    index: usize,
    state: State,
    shown: u64,
    ignored: u64,
}

impl RotationEngine {
    pub fn new(settings: &RotationSettings, now: u64) -> Self {
        Self {
            initial_delay: settings.initial_delay_ms,
            cadence: settings.cadence_ms.max(1),
            exit_grace: settings.exit_grace_ms,
            promotions: Vec::new(),
            origin: now,
            next_trigger: now.saturating_add(settings.initial_delay_ms),
            index: 0,
            state: State::Idle,
            shown: 0,
            ignored: 0,
        }
    }

    /// Feed the promotions of the current document; inactive ones are
    /// skipped. Returns `true` when the schedule was restarted.
    pub fn set_promotions<I>(&mut self, promotions: I, now: u64) -> bool
    where
        I: IntoIterator<Item = Promotion>,
    {
        let active: Vec<Promotion> = promotions.into_iter().filter(|p| p.active).collect();
        let changed = active.len() != self.promotions.len()
            || active.iter().zip(&self.promotions).any(|(a, b)| a.id != b.id);
        let previous = std::mem::replace(&mut self.promotions, active);

        let mut position = None;
        let grace_end = now.saturating_add(self.exit_grace);
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.state = match state {
            State::Idle => State::Idle,
            State::Showing { promotion, until } => match self.position_of(&promotion.id) {
                Some(pos) => {
                    position = Some(pos);
                    State::Showing {
                        promotion: self.promotions[pos].clone(),
                        until,
                    }
                }
                None => {
                    debug!(id = %promotion.id, "Promotion on screen left the active set");
                    position = follower(&previous, &self.promotions, &promotion.id);
                    State::Hiding {
                        promotion,
                        until: grace_end,
                        advance: false,
                    }
                }
            },
            State::Hiding {
                promotion,
                until,
                advance,
            } => match self.position_of(&promotion.id) {
                Some(pos) => {
                    position = Some(pos);
                    State::Hiding {
                        promotion: self.promotions[pos].clone(),
                        until,
                        advance: true,
                    }
                }
                None => {
                    if advance {
                        position = follower(&previous, &self.promotions, &promotion.id);
                    }
                    State::Hiding {
                        promotion,
                        until,
                        advance: false,
                    }
                }
            },
        };

        if changed {
            self.origin = now;
            self.next_trigger = now.saturating_add(self.initial_delay);
            self.index = match (position, self.promotions.len()) {
                (_, 0) => 0,
                (Some(pos), _) => pos,
                (None, len) => self.index % len,
            };
            debug!(count = self.promotions.len(), index = self.index, "Rotation schedule restarted");
        }
        changed
    }

    /// Advance to `now`, processing every deadline in time order.
    pub fn tick(&mut self, now: u64) {
        loop {
            let phase_end = match &self.state {
                State::Showing { until, .. } | State::Hiding { until, .. } => Some(*until),
                State::Idle => None,
            };

            if let Some(end) = phase_end.filter(|end| *end <= now && *end <= self.next_trigger) {
                self.finish_phase(end);
                continue;
            }

            if self.next_trigger <= now {
                let at = self.next_trigger;
                self.fire(at);
                self.next_trigger = self.following_trigger(at);
                continue;
            }

            break;
        }
    }

    fn fire(&mut self, at: u64) {
        match self.state {
            State::Idle if !self.promotions.is_empty() => {
                self.index %= self.promotions.len();
                let promotion = self.promotions[self.index].clone();
                let until = at.saturating_add(promotion.duration_ms());
                debug!(id = %promotion.id, index = self.index, "Showing promotion");
                self.state = State::Showing { promotion, until };
                self.shown += 1;
            }
            State::Idle => {}
            State::Showing { .. } | State::Hiding { .. } => {
                self.ignored += 1;
            }
        }
    }

    fn finish_phase(&mut self, at: u64) {
        let state = std::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Showing { promotion, .. } => {
                self.state = State::Hiding {
                    promotion,
                    until: at.saturating_add(self.exit_grace),
                    advance: true,
                };
            }
            State::Hiding { advance, .. } => {
                let len = self.promotions.len();
                if len > 0 {
                    let next = if advance { self.index + 1 } else { self.index };
                    self.index = next % len;
                }
            }
            State::Idle => {}
        }
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.promotions.iter().position(|p| p.id == id)
    }

    fn following_trigger(&self, after: u64) -> u64 {
        let k = (after.saturating_sub(self.origin)) / self.cadence + 1;
        self.origin.saturating_add(k.saturating_mul(self.cadence))
    }

    pub fn current(&self) -> Option<RotationView<'_>> {
        match &self.state {
            State::Showing { promotion, .. } => Some(RotationView {
                promotion,
                phase: RotationPhase::Showing,
            }),
            State::Hiding { promotion, .. } => Some(RotationView {
                promotion,
                phase: RotationPhase::Hiding,
            }),
            State::Idle => None,
        }
    }

    pub fn phase(&self) -> RotationPhase {
        match self.state {
            State::Idle => RotationPhase::Idle,
            State::Showing { .. } => RotationPhase::Showing,
            State::Hiding { .. } => RotationPhase::Hiding,
        }
    }

    /// Index of the next promotion to show, always valid for a non-empty set.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn active_count(&self) -> usize {
        self.promotions.len()
    }

    /// Next time `tick` has something to do.
    pub fn next_deadline(&self) -> Option<u64> {
        match &self.state {
            State::Showing { until, .. } | State::Hiding { until, .. } => {
                Some((*until).min(self.next_trigger))
            }
            State::Idle if self.promotions.is_empty() => None,
            State::Idle => Some(self.next_trigger),
        }
    }

    pub fn shown_count(&self) -> u64 {
        self.shown
    }

    pub fn ignored_triggers(&self) -> u64 {
        self.ignored
    }
}

/// Position in `current` of the first card after `id`, in `previous`
/// order, that is still active.
fn follower(previous: &[Promotion], current: &[Promotion], id: &str) -> Option<usize> {
    let start = previous.iter().position(|p| p.id == id)?;
    previous
        .iter()
        .cycle()
        .skip(start + 1)
        .take(previous.len())
        .find_map(|p| current.iter().position(|c| c.id == p.id))
}

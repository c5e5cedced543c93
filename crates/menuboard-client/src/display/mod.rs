//! # Display engines
//!
//! State machines behind the TV view. All of them take explicit
//! millisecond timestamps; the runtime feeds them from one [`Clock`].

pub mod autoscroll;
pub mod board;
pub mod clock;
pub mod particles;
pub mod rotation;

pub use autoscroll::{AutoScroll, ScrollPhase};
pub use board::{BoardDish, BoardSection, BoardView, Greeting};
pub use clock::Clock;
pub use particles::{Particle, ParticleField, ParticleKind, ParticlePosition};
pub use rotation::{RotationEngine, RotationPhase, RotationView};

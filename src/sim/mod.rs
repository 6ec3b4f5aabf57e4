//! Game state machine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-driven clock only (no wall time)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod schedule;
pub mod signal;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use schedule::{Scheduled, Scheduler, Task};
pub use signal::Signal;
pub use state::{GameEvent, GameState, Phase, Snapshot, Timing};
pub use tick::{SubmitOutcome, start, submit, tick};

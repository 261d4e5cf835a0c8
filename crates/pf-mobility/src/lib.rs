//! `pf-mobility` — how passengers move between zones.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`model`]   | `MovementModel` — the per-passenger, per-tick step           |
//! | [`engine`]  | `MovementEngine` — applies the step to the whole active set  |
//! | [`error`]   | `MovementError`, `MovementResult<T>`                         |
//!
//! # Movement model
//!
//! Each tick a passenger does exactly one of two things:
//!
//! 1. **Walk** — farther than `arrival_threshold` from its zone's anchor: move
//!    `min(speed, distance)` along the straight line.  Dwell is unchanged.
//! 2. **Dwell** — within the threshold: `dwell_ticks += 1`; once it reaches
//!    the zone's requirement the counter resets and the passenger heads for
//!    the next zone (or `Complete` after the last one).
//!
//! At most one zone transition happens per passenger per tick, so a zone
//! with dwell 0 still costs the tick on which the passenger is seen there.
//! There is no queueing, no capacity and no collision avoidance: the model
//! measures flow volume, not contention.

pub mod engine;
pub mod error;
pub mod model;

#[cfg(test)]
mod tests;

pub use engine::{MovePhaseReport, MovementEngine};
pub use error::{MovementError, MovementResult};
pub use model::{MovementModel, StepOutcome};

//! `pf-core` — foundational types for the `rust_pflow` passenger-flow simulator.
//!
//! This crate is a dependency of every other `pf-*` crate.  It has no `pf-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `PassengerId`, `SubscriberId`                             |
//! | [`geo`]      | `Point` (2-D canvas coordinate), straight-line stepping   |
//! | [`zone`]     | `Zone` enum — the processing stages                       |
//! | [`time`]     | `Tick`, `SimClock`                                        |
//! | [`config`]   | `FlowConfig`, `ArrivalKind`, `Scenario`                   |
//! | [`rng`]      | `SimRng` (seeded, injected — never a global source)       |
//! | [`error`]    | `PfError`, `PfResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ArrivalKind, FlowConfig, MAX_SAMPLE_INTERVAL_SECS, MAX_TICK_INTERVAL_MS, Scenario, ZoneDwell,
};
pub use error::{PfError, PfResult};
pub use geo::Point;
pub use ids::{PassengerId, SubscriberId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
pub use zone::Zone;

//! `pf-sim` — tick loop orchestrator for the rust_pflow simulator.
//!
//! # Tick loop
//!
//! ```text
//! Sim::step (tick t):
//!   ① Move     — MovementEngine walks / dwells / advances every active
//!                passenger; passengers reaching Complete are removed and
//!                counted processed.
//!   ② Arrive   — the generator emits every passenger due at or before the
//!                start of tick t (they move from tick t+1 on).
//!   ③ Advance  — the clock moves to t+1.
//!   ④ Measure  — MetricsAggregator publishes an immutable snapshot and, on
//!                sample boundaries, a flow sample.
//! ```
//!
//! `Sim` is deterministic and thread-free: drive it directly with
//! [`Sim::run_ticks`] in tests and batch runs.  For real-time runs,
//! [`FlowController`] owns a `Sim` and a wall-clock [`Scheduler`] and exposes
//! the `start` / `stop` / `reset` lifecycle plus snapshot subscriptions.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs the movement phase on Rayon's thread pool.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pf_core::{FlowConfig, Scenario};
//! use pf_sim::FlowController;
//!
//! let ctl = FlowController::new(FlowConfig::for_scenario(Scenario::PeakHour));
//! ctl.subscribe(|snap| println!("{} processed", snap.total_processed));
//! ctl.start()?;
//! std::thread::sleep(std::time::Duration::from_secs(30));
//! ctl.stop()?;
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod scheduler;
pub mod sim;
pub mod subscribers;


pub use builder::{ArrivalFactory, SimBuilder};
pub use controller::{FlowController, SimFactory, SimState, WeakFlowController};
pub use error::{SimError, SimResult};
pub use metrics::{FlowSample, FlowSeries, MetricRow, MetricsAggregator, MetricsSnapshot, Totals};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::Scheduler;
pub use sim::Sim;
pub use subscribers::SubscriberList;

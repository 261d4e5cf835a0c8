//! `pf-agent` — passengers, the active set, and the arrival generator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`passenger`]   | `Passenger` — one simulated traveller                     |
//! | [`store`]       | `PassengerStore` — the active set                         |
//! | [`arrival`]     | `ArrivalProcess` trait, `FixedRate`, `PoissonArrivals`    |
//! | [`generator`]   | `PassengerGenerator` — turns arrivals into passengers     |
//!
//! Passengers are transient: created by the generator, mutated by the
//! movement model each tick, and discarded once they reach `Complete`.

pub mod arrival;
pub mod generator;
pub mod passenger;
pub mod store;

#[cfg(test)]
mod tests;

pub use arrival::{ArrivalProcess, FixedRate, PoissonArrivals};
pub use generator::PassengerGenerator;
pub use passenger::Passenger;
pub use store::PassengerStore;

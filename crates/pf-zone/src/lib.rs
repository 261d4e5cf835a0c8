//! `pf-zone` — the ordered sequence of processing zones.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`graph`]   | `ZoneSpec`, `ZoneGraph`, `ZoneGraphBuilder`             |
//! | [`error`]   | `ZoneError`, `ZoneResult<T>`                            |
//!
//! # Model
//!
//! The "graph" is a path: each zone has exactly one successor, and the
//! successor of the last zone is [`Zone::Complete`][pf_core::Zone::Complete].
//! Zones must be added in strictly increasing `Zone` order, so a passenger
//! walking the graph can only ever move forward.
//!
//! Anchors are spatial only.  They decide when a passenger has "arrived"; no
//! routing happens between them (straight-line walking, see `pf-mobility`).

pub mod error;
pub mod graph;


pub use error::{ZoneError, ZoneResult};
pub use graph::{ZoneGraph, ZoneGraphBuilder, ZoneSpec};

//! Zone-graph error type.

use thiserror::Error;

use pf_core::Zone;

/// Errors produced while building a [`ZoneGraph`][crate::ZoneGraph].
#[derive(Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("zone graph has no processing zones")]
    Empty,

    #[error("zone {zone} added after {previous}; zones must be strictly increasing")]
    OutOfOrder { previous: Zone, zone: Zone },

    #[error("{0} is terminal and cannot be a processing zone")]
    TerminalZone(Zone),

    #[error("anchor for {0} is not a finite point")]
    BadAnchor(Zone),
}

pub type ZoneResult<T> = Result<T, ZoneError>;

use pf_core::PfError;
use pf_zone::ZoneError;
use thiserror::Error;

use crate::SimState;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] PfError),

    #[error("zone graph error: {0}")]
    Zone(#[from] ZoneError),

    #[error("cannot {op} while {from}")]
    InvalidTransition {
        from: SimState,
        op:   &'static str,
    },

    #[error("failed to spawn the clock thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("scheduler error: {0}")]
    Scheduler(String),
}

pub type SimResult<T> = Result<T, SimError>;

use pf_core::{PassengerId, Zone};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MovementError {
    #[error("passenger {0} has a non-finite position")]
    NonFinitePosition(PassengerId),

    #[error("passenger {id} is heading for {zone}, which is not in the zone graph")]
    UnknownZone { id: PassengerId, zone: Zone },
}

pub type MovementResult<T> = Result<T, MovementError>;

//! A single simulated passenger.

use pf_core::{PassengerId, Point, Tick, Zone};

/// One passenger walking through the terminal.
///
/// `zone` is where the passenger is heading (or dwelling).  `dwell_ticks`
/// counts ticks spent at that zone's anchor and is reset to zero on every
/// zone transition.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub id:          PassengerId,
    pub position:    Point,
    pub zone:        Zone,
    pub dwell_ticks: u32,
    /// Tick on which the generator created the passenger.
    pub born:        Tick,
}

impl Passenger {
    /// A fresh passenger at `position`, heading for `zone` with no dwell.
    #[inline]
    pub fn new(id: PassengerId, position: Point, zone: Zone, born: Tick) -> Self {
        Self { id, position, zone, dwell_ticks: 0, born }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.zone.is_complete()
    }

    /// Move to the next zone and clear the dwell counter.
    #[inline]
    pub fn transition_to(&mut self, zone: Zone) {
        debug_assert!(zone > self.zone, "passenger {} moved backwards", self.id);
        self.zone = zone;
        self.dwell_ticks = 0;
    }
}

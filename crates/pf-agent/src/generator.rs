//! Turns an arrival schedule into passengers.

use pf_core::{FlowConfig, PassengerId, PfResult, Point, Tick, Zone};

use crate::arrival::{self, ArrivalProcess};
use crate::{Passenger, PassengerStore};

/// Emits passengers at the entrance according to an [`ArrivalProcess`].
///
/// The generator never blocks and applies no back-pressure: every due
/// arrival becomes a passenger regardless of how crowded the terminal is.
pub struct PassengerGenerator {
    entrance:   Point,
    first_zone: Zone,
    next_id:    PassengerId,
    process:    Box<dyn ArrivalProcess>,
    next_due:   f64,
}

/// Slack for comparing float arrival times against exact tick times.
const DUE_EPSILON: f64 = 1e-9;

impl PassengerGenerator {
    /// Generator with an explicit arrival process.
    pub fn new(entrance: Point, first_zone: Zone, mut process: Box<dyn ArrivalProcess>) -> Self {
        let next_due = process.next_arrival_secs();
        Self {
            entrance,
            first_zone,
            next_id: PassengerId(0),
            process,
            next_due,
        }
    }

    /// Generator for `config`, sending passengers to `first_zone`.
    pub fn from_config(config: &FlowConfig, first_zone: Zone) -> PfResult<Self> {
        Ok(Self::new(config.entrance, first_zone, arrival::from_config(config)?))
    }

    /// Create exactly one passenger at the entrance, dwell 0.
    pub fn generate_one(&mut self, now: Tick) -> Passenger {
        let id = self.next_id;
        self.next_id = id.next();
        Passenger::new(id, self.entrance, self.first_zone, now)
    }

    /// Push every passenger due at or before `now_secs` into `store`.
    ///
    /// Returns the number created.  Several passengers can be due in one tick
    /// when the arrival rate outpaces the tick rate.
    pub fn emit_due(&mut self, now_secs: f64, now: Tick, store: &mut PassengerStore) -> usize {
        let mut created = 0;
        while self.next_due <= now_secs + DUE_EPSILON {
            store.push(self.generate_one(now));
            self.next_due = self.process.next_arrival_secs();
            created += 1;
        }
        created
    }

    /// Simulated time of the next scheduled arrival.
    #[inline]
    pub fn next_due_secs(&self) -> f64 {
        self.next_due
    }

    /// Number of passengers created so far.
    #[inline]
    pub fn created(&self) -> u64 {
        self.next_id.0 as u64
    }
}

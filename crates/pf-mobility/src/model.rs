//! The per-passenger movement step.

use pf_agent::Passenger;
use pf_core::{FlowConfig, Zone};
use pf_zone::ZoneGraph;

use crate::{MovementError, MovementResult};

/// What a single passenger did this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Walked towards the current zone's anchor.
    InTransit,
    /// At the anchor, dwell counter incremented, requirement not yet met.
    Dwelling,
    /// Dwell requirement met; now heading for `to` (possibly `Complete`).
    Advanced { from: Zone, to: Zone },
}

/// Walking speed and arrival radius, shared by every passenger.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementModel {
    /// Canvas units per tick.
    pub speed:             f32,
    /// Distance at or below which a passenger counts as "at" a zone.
    pub arrival_threshold: f32,
}

impl MovementModel {
    pub fn new(speed: f32, arrival_threshold: f32) -> Self {
        Self { speed, arrival_threshold }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(config.speed, config.arrival_threshold)
    }

    /// Advance `p` by one tick.
    ///
    /// On error the passenger is left exactly as it was.
    pub fn step(&self, p: &mut Passenger, graph: &ZoneGraph) -> MovementResult<StepOutcome> {
        if !p.position.is_finite() {
            return Err(MovementError::NonFinitePosition(p.id));
        }
        let spec = graph
            .spec(p.zone)
            .ok_or(MovementError::UnknownZone { id: p.id, zone: p.zone })?;

        let distance = p.position.distance(spec.anchor);
        if distance > self.arrival_threshold {
            p.position = p.position.step_towards(spec.anchor, self.speed);
            return Ok(StepOutcome::InTransit);
        }

        p.dwell_ticks += 1;
        if p.dwell_ticks < spec.dwell_ticks {
            return Ok(StepOutcome::Dwelling);
        }

        let from = p.zone;
        let to = graph.next(from);
        p.transition_to(to);
        Ok(StepOutcome::Advanced { from, to })
    }
}

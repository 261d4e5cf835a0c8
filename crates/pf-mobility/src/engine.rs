//! Applies the movement model to every active passenger.

use pf_agent::PassengerStore;
use pf_core::PassengerId;
use pf_zone::ZoneGraph;

use crate::{MovementError, MovementModel, MovementResult, StepOutcome};

/// Tally of one movement phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovePhaseReport {
    pub in_transit:  usize,
    pub dwelling:    usize,
    /// Zone transitions, including those into `Complete`.
    pub transitions: usize,
    /// Passengers that reached `Complete` and were removed this tick.
    pub completed:   usize,
    /// Passengers skipped this tick because their step failed.
    pub faults:      Vec<(PassengerId, MovementError)>,
}

/// Wraps a [`MovementModel`] and the static [`ZoneGraph`] it walks.
pub struct MovementEngine {
    pub model: MovementModel,
    pub graph: ZoneGraph,
}

impl MovementEngine {
    pub fn new(model: MovementModel, graph: ZoneGraph) -> Self {
        Self { model, graph }
    }

    /// Step every passenger once, then retire the ones that completed.
    ///
    /// A failing passenger is isolated: it is reported in
    /// [`MovePhaseReport::faults`], left untouched, and every other passenger
    /// is still processed.
    pub fn tick(&self, store: &mut PassengerStore) -> MovePhaseReport {
        let outcomes = self.step_all(store);

        let mut report = MovePhaseReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(StepOutcome::InTransit) => report.in_transit += 1,
                Ok(StepOutcome::Dwelling) => report.dwelling += 1,
                Ok(StepOutcome::Advanced { .. }) => report.transitions += 1,
                Err(e) => report.faults.push((id, e)),
            }
        }
        report.completed = store.retire_complete();
        report
    }

    #[cfg(not(feature = "parallel"))]
    fn step_all(&self, store: &mut PassengerStore) -> Vec<(PassengerId, MovementResult<StepOutcome>)> {
        store
            .as_mut_slice()
            .iter_mut()
            .map(|p| (p.id, self.model.step(p, &self.graph)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn step_all(&self, store: &mut PassengerStore) -> Vec<(PassengerId, MovementResult<StepOutcome>)> {
        use rayon::prelude::*;

        let model = self.model;
        let graph = &self.graph;
        store
            .as_mut_slice()
            .par_iter_mut()
            .map(|p| (p.id, model.step(p, graph)))
            .collect()
    }
}

//! Unit tests for pf-mobility.

use pf_agent::{Passenger, PassengerStore};
use pf_core::{FlowConfig, PassengerId, Point, Tick, Zone, ZoneDwell};
use pf_zone::{ZoneGraph, ZoneGraphBuilder};

use crate::{MovementEngine, MovementError, MovementModel, StepOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Zones 100 units apart on the x axis, all with the given dwell.
fn line_graph(dwell: u32) -> ZoneGraph {
    ZoneGraphBuilder::new()
        .add_zone(Zone::CheckIn, dwell, Point::new(100.0, 0.0))
        .add_zone(Zone::Security, dwell, Point::new(200.0, 0.0))
        .add_zone(Zone::Gate, dwell, Point::new(300.0, 0.0))
        .add_zone(Zone::Boarding, dwell, Point::new(400.0, 0.0))
        .build()
        .unwrap()
}

fn at(x: f32, zone: Zone) -> Passenger {
    Passenger::new(PassengerId(0), Point::new(x, 0.0), zone, Tick(0))
}

fn reference_model() -> MovementModel {
    MovementModel::from_config(&FlowConfig::default())
}

// ── MovementModel ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod step {
    use super::*;

    #[test]
    fn walks_by_speed_without_dwelling() {
        let g = line_graph(3);
        let mut p = at(0.0, Zone::CheckIn);
        assert_eq!(reference_model().step(&mut p, &g), Ok(StepOutcome::InTransit));
        assert!((p.position.x - 5.0).abs() < 1e-5);
        assert_eq!(p.dwell_ticks, 0);
    }

    #[test]
    fn last_step_is_clamped_to_anchor() {
        let g = line_graph(3);
        let mut p = at(97.0, Zone::CheckIn);
        // 3 units away, threshold 5 → already at zone, so use a tighter model.
        let model = MovementModel::new(5.0, 1.0);
        assert_eq!(model.step(&mut p, &g), Ok(StepOutcome::InTransit));
        assert_eq!(p.position, Point::new(100.0, 0.0));
    }

    #[test]
    fn reaches_reference_check_in_after_walking() {
        // Entrance (10,175) → check-in anchor (80,175): 70 units at 5 per
        // tick with a 5-unit arrival radius: 13 steps, give or take f32
        // rounding on the last one.
        let cfg = FlowConfig::default();
        let g = ZoneGraph::from_config(&cfg).unwrap();
        let model = MovementModel::from_config(&cfg);
        let mut p = Passenger::new(PassengerId(0), cfg.entrance, Zone::CheckIn, Tick(0));
        let mut walked = 0;
        while model.step(&mut p, &g) == Ok(StepOutcome::InTransit) {
            walked += 1;
            assert!(walked <= 14, "still walking after {walked} ticks");
        }
        assert!(walked >= 13, "arrived after only {walked} ticks");
        assert_eq!(p.dwell_ticks, 1);
        assert_eq!(p.zone, Zone::CheckIn);
    }

    #[test]
    fn dwell_one_transitions_on_tick_after_arrival() {
        let g = line_graph(1);
        let model = MovementModel::new(10.0, 0.5);
        let mut p = at(90.0, Zone::CheckIn);

        // Arrival tick: the step lands exactly on the anchor, no dwell yet.
        assert_eq!(model.step(&mut p, &g), Ok(StepOutcome::InTransit));
        assert_eq!(p.zone, Zone::CheckIn);

        // Very next tick: dwell 1 ≥ 1 → advance.
        assert_eq!(
            model.step(&mut p, &g),
            Ok(StepOutcome::Advanced { from: Zone::CheckIn, to: Zone::Security })
        );
        assert_eq!(p.dwell_ticks, 0);
    }

    #[test]
    fn transitions_only_when_dwell_met() {
        let g = line_graph(4);
        let model = reference_model();
        let mut p = at(100.0, Zone::CheckIn);
        for expected in 1..4 {
            assert_eq!(model.step(&mut p, &g), Ok(StepOutcome::Dwelling));
            assert_eq!(p.dwell_ticks, expected);
            assert_eq!(p.zone, Zone::CheckIn);
        }
        assert!(matches!(model.step(&mut p, &g), Ok(StepOutcome::Advanced { .. })));
        assert_eq!(p.zone, Zone::Security);
    }

    #[test]
    fn zero_dwell_is_deferred_not_chained() {
        // Every anchor within reach: a chaining model would finish in one tick.
        let g = line_graph(0);
        let model = MovementModel::new(5.0, 1_000.0);
        let mut p = at(100.0, Zone::CheckIn);
        let mut zones = vec![];
        while !p.is_complete() {
            model.step(&mut p, &g).unwrap();
            zones.push(p.zone);
        }
        assert_eq!(zones, [Zone::Security, Zone::Gate, Zone::Boarding, Zone::Complete]);
    }

    #[test]
    fn boarding_advances_to_complete() {
        let g = line_graph(1);
        let mut p = at(400.0, Zone::Boarding);
        assert_eq!(
            reference_model().step(&mut p, &g),
            Ok(StepOutcome::Advanced { from: Zone::Boarding, to: Zone::Complete })
        );
    }

    #[test]
    fn non_finite_position_is_an_error_and_untouched() {
        let g = line_graph(1);
        let mut p = at(f32::NAN, Zone::CheckIn);
        p.dwell_ticks = 2;
        let err = reference_model().step(&mut p, &g).unwrap_err();
        assert_eq!(err, MovementError::NonFinitePosition(PassengerId(0)));
        assert_eq!(p.dwell_ticks, 2);
        assert_eq!(p.zone, Zone::CheckIn);
    }

    #[test]
    fn zone_missing_from_graph_is_an_error() {
        let g = ZoneGraphBuilder::new()
            .add_zone(Zone::CheckIn, 1, Point::new(0.0, 0.0))
            .build()
            .unwrap();
        let mut p = at(0.0, Zone::Gate);
        assert!(matches!(
            reference_model().step(&mut p, &g),
            Err(MovementError::UnknownZone { zone: Zone::Gate, .. })
        ));
    }
}

// ── MovementEngine ────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;

    #[test]
    fn completed_passengers_are_removed_same_tick() {
        let engine = MovementEngine::new(reference_model(), line_graph(1));
        let mut store = PassengerStore::new();
        store.push(at(400.0, Zone::Boarding));
        store.push(at(0.0, Zone::CheckIn));

        let report = engine.tick(&mut store);
        assert_eq!(report.completed, 1);
        assert_eq!(report.transitions, 1);
        assert_eq!(report.in_transit, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.count_in(Zone::Complete), 0);
    }

    #[test]
    fn faulty_passenger_does_not_stop_the_others() {
        let engine = MovementEngine::new(reference_model(), line_graph(2));
        let mut store = PassengerStore::new();
        let mut bad = at(f32::INFINITY, Zone::CheckIn);
        bad.id = PassengerId(9);
        store.push(bad);
        store.push(at(100.0, Zone::CheckIn));

        let report = engine.tick(&mut store);
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].0, PassengerId(9));
        assert_eq!(report.dwelling, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn zones_never_decrease_over_many_ticks() {
        let cfg = FlowConfig { dwell: ZoneDwell::uniform(2), ..FlowConfig::default() };
        let engine = MovementEngine::new(
            MovementModel::from_config(&cfg),
            ZoneGraph::from_config(&cfg).unwrap(),
        );
        let mut store = PassengerStore::new();
        for i in 0..5 {
            let mut p = Passenger::new(PassengerId(i), cfg.entrance, Zone::CheckIn, Tick(0));
            p.position.y += i as f32 * 3.0;
            store.push(p);
        }

        let mut last: Vec<(PassengerId, Zone)> = store.iter().map(|p| (p.id, p.zone)).collect();
        let mut completed = 0;
        for _ in 0..500 {
            completed += engine.tick(&mut store).completed;
            for p in store.iter() {
                let prev = last.iter().find(|(id, _)| *id == p.id).map(|(_, z)| *z).unwrap();
                assert!(p.zone >= prev, "{} went from {prev} to {}", p.id, p.zone);
            }
            last = store.iter().map(|p| (p.id, p.zone)).collect();
        }
        assert_eq!(completed, 5);
        assert!(store.is_empty());
    }
}

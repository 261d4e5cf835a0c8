//! Unit tests for pf-agent.

use pf_core::{FlowConfig, PassengerId, Point, SimRng, Tick, Zone};

use crate::{ArrivalProcess, FixedRate, Passenger, PassengerGenerator, PassengerStore, PoissonArrivals};

fn passenger(id: u32, zone: Zone) -> Passenger {
    Passenger::new(PassengerId(id), Point::new(0.0, 0.0), zone, Tick(0))
}

// ── PassengerStore ────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn counts_by_zone_ignores_complete() {
        let mut s = PassengerStore::new();
        s.push(passenger(0, Zone::CheckIn));
        s.push(passenger(1, Zone::CheckIn));
        s.push(passenger(2, Zone::Gate));
        s.push(passenger(3, Zone::Complete));
        assert_eq!(s.counts_by_zone(), [2, 0, 1, 0]);
        assert_eq!(s.count_in(Zone::Complete), 1);
    }

    #[test]
    fn retire_complete_removes_only_complete() {
        let mut s = PassengerStore::new();
        s.push(passenger(0, Zone::Boarding));
        s.push(passenger(1, Zone::Complete));
        s.push(passenger(2, Zone::Complete));
        assert_eq!(s.retire_complete(), 2);
        assert_eq!(s.len(), 1);
        assert_eq!(s.iter().next().map(|p| p.id), Some(PassengerId(0)));
        assert_eq!(s.retire_complete(), 0);
    }

    #[test]
    fn transition_resets_dwell() {
        let mut p = passenger(0, Zone::CheckIn);
        p.dwell_ticks = 12;
        p.transition_to(Zone::Security);
        assert_eq!(p.zone, Zone::Security);
        assert_eq!(p.dwell_ticks, 0);
    }
}

// ── Arrival processes ─────────────────────────────────────────────────────────

#[cfg(test)]
mod arrivals {
    use super::*;

    #[test]
    fn fixed_rate_first_arrival_after_one_period() {
        let mut f = FixedRate::new(3.0).unwrap();
        assert!((f.period_secs() - 20.0).abs() < 1e-12);
        assert!((f.next_arrival_secs() - 20.0).abs() < 1e-9);
        assert!((f.next_arrival_secs() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_rate_does_not_drift() {
        let mut f = FixedRate::new(7.0).unwrap();
        let mut last = 0.0;
        for _ in 0..7_000 {
            last = f.next_arrival_secs();
        }
        assert!((last - 60_000.0).abs() < 1e-6, "got {last}");
    }

    #[test]
    fn rejects_bad_rates() {
        assert!(FixedRate::new(0.0).is_err());
        assert!(FixedRate::new(f64::NAN).is_err());
        assert!(PoissonArrivals::new(-2.0, SimRng::new(1)).is_err());
    }

    #[test]
    fn poisson_is_seeded_and_monotone() {
        let mut a = PoissonArrivals::new(6.0, SimRng::new(5)).unwrap();
        let mut b = PoissonArrivals::new(6.0, SimRng::new(5)).unwrap();
        let mut prev = 0.0;
        for _ in 0..100 {
            let x = a.next_arrival_secs();
            assert_eq!(x, b.next_arrival_secs());
            assert!(x >= prev);
            prev = x;
        }
    }

    #[test]
    fn poisson_mean_gap_is_close_to_period() {
        let mut p = PoissonArrivals::new(6.0, SimRng::new(11)).unwrap();
        let n = 20_000;
        let mut last = 0.0;
        for _ in 0..n {
            last = p.next_arrival_secs();
        }
        let mean = last / n as f64;
        assert!((mean - 10.0).abs() < 0.5, "mean gap {mean}");
    }
}

// ── PassengerGenerator ────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use super::*;

    fn one_per_minute() -> PassengerGenerator {
        let cfg = FlowConfig { arrival_rate_per_min: 1.0, ..FlowConfig::default() };
        PassengerGenerator::from_config(&cfg, Zone::CheckIn).unwrap()
    }

    #[test]
    fn generate_one_starts_at_entrance_in_first_zone() {
        let mut g = one_per_minute();
        let p = g.generate_one(Tick(4));
        assert_eq!(p.position, FlowConfig::default().entrance);
        assert_eq!(p.zone, Zone::CheckIn);
        assert_eq!(p.dwell_ticks, 0);
        assert_eq!(p.born, Tick(4));
        assert_eq!(g.generate_one(Tick(4)).id, PassengerId(1));
        assert_eq!(g.created(), 2);
    }

    #[test]
    fn nothing_due_before_first_period() {
        let mut g = one_per_minute();
        let mut s = PassengerStore::new();
        assert_eq!(g.emit_due(59.75, Tick(239), &mut s), 0);
        assert_eq!(g.emit_due(60.0, Tick(240), &mut s), 1);
        assert_eq!(g.emit_due(60.0, Tick(240), &mut s), 0);
        assert!((g.next_due_secs() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn high_rate_emits_several_per_tick() {
        let cfg = FlowConfig { arrival_rate_per_min: 600.0, ..FlowConfig::default() };
        let mut g = PassengerGenerator::from_config(&cfg, Zone::CheckIn).unwrap();
        let mut s = PassengerStore::new();
        // 10 per second: arrivals at 0.1, 0.2, … 1.0
        assert_eq!(g.emit_due(1.0, Tick(4), &mut s), 10);
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn custom_process_is_honoured() {
        struct Burst(u32);
        impl ArrivalProcess for Burst {
            fn next_arrival_secs(&mut self) -> f64 {
                self.0 += 1;
                if self.0 <= 3 { 1.0 } else { f64::INFINITY }
            }
        }
        let mut g = PassengerGenerator::new(Point::new(1.0, 1.0), Zone::Security, Box::new(Burst(0)));
        let mut s = PassengerStore::new();
        assert_eq!(g.emit_due(1.0, Tick(1), &mut s), 3);
        assert_eq!(g.emit_due(1e12, Tick(2), &mut s), 0);
        assert!(s.iter().all(|p| p.zone == Zone::Security));
    }
}

//! Simulation configuration.
//!
//! `FlowConfig` is a plain value: the application builds it (or loads it from
//! JSON with the `serde` feature) and hands it to the orchestrator, which
//! validates it at start time.  `Default` yields the reference terminal: four
//! zones in a row, 250 ms ticks, and 3 passengers per minute.

use std::time::Duration;

use crate::{PfError, PfResult, Point, SimClock, Zone};

// ── ZoneDwell ─────────────────────────────────────────────────────────────────

/// Required dwell, in ticks, for each processing zone.
///
/// The counter increments before it is compared, so `0` and `1` both hold a
/// passenger for exactly the one tick on which it is observed at the zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDwell {
    pub check_in: u32,
    pub security: u32,
    pub gate:     u32,
    pub boarding: u32,
}

impl ZoneDwell {
    /// Same requirement for every zone.
    pub const fn uniform(ticks: u32) -> Self {
        Self { check_in: ticks, security: ticks, gate: ticks, boarding: ticks }
    }

    /// Requirement for `zone`.  `Complete` has no dwell.
    pub fn get(&self, zone: Zone) -> u32 {
        match zone {
            Zone::CheckIn  => self.check_in,
            Zone::Security => self.security,
            Zone::Gate     => self.gate,
            Zone::Boarding => self.boarding,
            Zone::Complete => 0,
        }
    }
}

impl Default for ZoneDwell {
    fn default() -> Self {
        Self { check_in: 30, security: 50, gate: 20, boarding: 10 }
    }
}

// ── ArrivalKind ───────────────────────────────────────────────────────────────

/// How inter-arrival times are produced from the mean rate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalKind {
    /// One passenger every `60 / rate` seconds, first one after a full period.
    #[default]
    FixedRate,
    /// Exponentially distributed gaps with mean `60 / rate` seconds, drawn
    /// from a `SimRng` seeded with `FlowConfig::seed`.
    Poisson,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// Named traffic presets offered by the terminal's simulation screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scenario {
    NormalDay,
    PeakHour,
    LowTraffic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::NormalDay, Scenario::PeakHour, Scenario::LowTraffic];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::NormalDay  => "Normal Day Flow",
            Scenario::PeakHour   => "Peak Hour Rush",
            Scenario::LowTraffic => "Low Traffic Period",
        }
    }

    /// Mean arrivals per minute for the preset.
    pub fn arrival_rate_per_min(self) -> f64 {
        match self {
            Scenario::NormalDay  => 3.0,
            Scenario::PeakHour   => 8.0,
            Scenario::LowTraffic => 1.0,
        }
    }

    /// Parse a label or a short name (`normal`, `peak`, `low`), case-insensitive.
    pub fn parse(s: &str) -> Option<Scenario> {
        let s = s.trim().to_ascii_lowercase();
        Scenario::ALL.into_iter().find(|sc| {
            sc.label().to_ascii_lowercase() == s
                || sc.label().to_ascii_lowercase().starts_with(&s) && !s.is_empty()
        })
    }
}

// ── FlowConfig ────────────────────────────────────────────────────────────────

/// Longest accepted tick: one hour.
pub const MAX_TICK_INTERVAL_MS: u64 = 3_600_000;

/// Longest accepted flow sample interval: one day.
pub const MAX_SAMPLE_INTERVAL_SECS: u64 = 86_400;

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowConfig {
    /// Mean passengers generated per minute.  Any positive finite value.
    pub arrival_rate_per_min: f64,

    /// Inter-arrival process.
    pub arrival: ArrivalKind,

    /// Wall-clock *and* simulated length of one tick, in milliseconds.
    pub tick_interval_ms: u64,

    /// Canvas units a passenger walks per tick.
    pub speed: f32,

    /// A passenger within this distance of a zone anchor is "at" the zone.
    pub arrival_threshold: f32,

    /// Required dwell ticks per zone.
    pub dwell: ZoneDwell,

    /// Where new passengers appear.
    pub entrance: Point,

    /// Anchor of each processing zone, in `Zone::PROCESSING` order.
    pub anchors: [Point; 4],

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Record a `(elapsed, processed)` flow sample every N simulated seconds.
    /// `0` disables sampling.
    pub sample_interval_secs: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            arrival_rate_per_min: Scenario::NormalDay.arrival_rate_per_min(),
            arrival:              ArrivalKind::FixedRate,
            tick_interval_ms:     250,
            speed:                5.0,
            arrival_threshold:    5.0,
            dwell:                ZoneDwell::default(),
            // Zone rectangles are 100×150 at x = 30/160/290/420, y = 100;
            // anchors are their centres.  The entrance sits on the left edge.
            entrance:             Point::new(10.0, 175.0),
            anchors: [
                Point::new(80.0, 175.0),
                Point::new(210.0, 175.0),
                Point::new(340.0, 175.0),
                Point::new(470.0, 175.0),
            ],
            seed:                 42,
            sample_interval_secs: 5,
        }
    }
}

impl FlowConfig {
    /// Reference configuration with the preset's arrival rate.
    pub fn for_scenario(scenario: Scenario) -> Self {
        Self {
            arrival_rate_per_min: scenario.arrival_rate_per_min(),
            ..Self::default()
        }
    }

    /// Reject non-positive or non-finite parameters.
    pub fn validate(&self) -> PfResult<()> {
        if !(self.arrival_rate_per_min.is_finite() && self.arrival_rate_per_min > 0.0) {
            return Err(PfError::Config(format!(
                "arrival rate must be a positive number of passengers per minute, got {}",
                self.arrival_rate_per_min
            )));
        }
        if self.tick_interval_ms == 0 || self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(PfError::Config(format!(
                "tick interval must be between 1 and {MAX_TICK_INTERVAL_MS} ms, got {}",
                self.tick_interval_ms
            )));
        }
        if self.sample_interval_secs > MAX_SAMPLE_INTERVAL_SECS {
            return Err(PfError::Config(format!(
                "flow sample interval must be at most {MAX_SAMPLE_INTERVAL_SECS} s, got {}",
                self.sample_interval_secs
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(PfError::Config(format!("speed must be positive, got {}", self.speed)));
        }
        if !(self.arrival_threshold.is_finite() && self.arrival_threshold > 0.0) {
            return Err(PfError::Config(format!(
                "arrival threshold must be positive, got {}",
                self.arrival_threshold
            )));
        }
        if !self.entrance.is_finite() || self.anchors.iter().any(|a| !a.is_finite()) {
            return Err(PfError::Config("entrance and zone anchors must be finite".into()));
        }
        Ok(())
    }

    /// Mean seconds between arrivals (`60 / rate`).
    #[inline]
    pub fn arrival_interval_secs(&self) -> f64 {
        60.0 / self.arrival_rate_per_min
    }

    /// Tick interval as a `Duration` for the wall-clock scheduler.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Anchor of a processing zone.  `Complete` has none.
    pub fn anchor(&self, zone: Zone) -> Option<Point> {
        Zone::PROCESSING
            .iter()
            .position(|&z| z == zone)
            .map(|i| self.anchors[i])
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_interval_ms)
    }
}

//! Arrival processes — when the next passenger shows up.

use rand_distr::{Distribution, Exp};

use pf_core::{ArrivalKind, FlowConfig, PfError, PfResult, SimRng};

/// Pluggable arrival schedule.
///
/// Implementations return the *absolute* simulated time, in seconds since
/// the run started, of each successive arrival.  Returned times must be
/// non-decreasing.
///
/// Randomness, if any, must come from an injected [`SimRng`] so runs are
/// reproducible from the config seed.
pub trait ArrivalProcess: Send + 'static {
    /// Time of the next arrival.  Called once per generated passenger.
    fn next_arrival_secs(&mut self) -> f64;
}

/// Build the process selected by `config.arrival`.
pub fn from_config(config: &FlowConfig) -> PfResult<Box<dyn ArrivalProcess>> {
    Ok(match config.arrival {
        ArrivalKind::FixedRate => Box::new(FixedRate::new(config.arrival_rate_per_min)?),
        ArrivalKind::Poisson => Box::new(PoissonArrivals::new(
            config.arrival_rate_per_min,
            SimRng::new(config.seed),
        )?),
    })
}

// ── FixedRate ─────────────────────────────────────────────────────────────────

/// One arrival every `60 / rate` seconds, the first after one full period.
///
/// Arrival `k` (1-based) is at `k * period`, computed from the count so the
/// schedule never drifts.
pub struct FixedRate {
    period_secs: f64,
    emitted:     u64,
}

impl FixedRate {
    pub fn new(rate_per_min: f64) -> PfResult<Self> {
        check_rate(rate_per_min)?;
        Ok(Self { period_secs: 60.0 / rate_per_min, emitted: 0 })
    }

    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }
}

impl ArrivalProcess for FixedRate {
    fn next_arrival_secs(&mut self) -> f64 {
        self.emitted += 1;
        self.emitted as f64 * self.period_secs
    }
}

// ── PoissonArrivals ───────────────────────────────────────────────────────────

/// Exponentially distributed inter-arrival gaps with mean `60 / rate` seconds.
pub struct PoissonArrivals {
    gaps: Exp<f64>,
    rng:  SimRng,
    now:  f64,
}

impl PoissonArrivals {
    pub fn new(rate_per_min: f64, rng: SimRng) -> PfResult<Self> {
        check_rate(rate_per_min)?;
        let gaps = Exp::new(rate_per_min / 60.0)
            .map_err(|e| PfError::Config(format!("arrival rate {rate_per_min}: {e}")))?;
        Ok(Self { gaps, rng, now: 0.0 })
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn next_arrival_secs(&mut self) -> f64 {
        self.now += self.gaps.sample(self.rng.inner());
        self.now
    }
}

fn check_rate(rate_per_min: f64) -> PfResult<()> {
    if rate_per_min.is_finite() && rate_per_min > 0.0 {
        Ok(())
    } else {
        Err(PfError::Config(format!("arrival rate must be positive, got {rate_per_min}")))
    }
}

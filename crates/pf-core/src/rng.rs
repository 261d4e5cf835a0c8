//! Deterministic simulation-level RNG.
//!
//! Every random draw in the simulator goes through a `SimRng` seeded from
//! `FlowConfig::seed`.  The same seed always reproduces the same run; there
//! is no thread-local or global random source anywhere in the workspace.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seeded RNG injected into components that need randomness (e.g. Poisson
/// arrivals).
///
/// Used only from the single simulation thread.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

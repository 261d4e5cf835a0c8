//! The active set: every passenger created but not yet complete.

use pf_core::Zone;

use crate::Passenger;

/// Unordered collection of active passengers.
///
/// Membership is the source of truth for "in flight".  Iteration order is
/// creation order until passengers are retired; nothing should depend on it.
#[derive(Default, Clone, Debug)]
pub struct PassengerStore {
    passengers: Vec<Passenger>,
}

impl PassengerStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, passenger: Passenger) {
        self.passengers.push(passenger);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> + '_ {
        self.passengers.iter()
    }

    /// Mutable slice for the movement phase (and its parallel variant).
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Passenger] {
        &mut self.passengers
    }

    #[inline]
    pub fn as_slice(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Remove every passenger in `Zone::Complete`.  Returns how many left.
    pub fn retire_complete(&mut self) -> usize {
        let before = self.passengers.len();
        self.passengers.retain(|p| !p.is_complete());
        before - self.passengers.len()
    }

    /// Number of active passengers whose current zone is `zone`.
    pub fn count_in(&self, zone: Zone) -> usize {
        self.passengers.iter().filter(|p| p.zone == zone).count()
    }

    /// Per-zone occupancy in `Zone::PROCESSING` order, in one pass.
    pub fn counts_by_zone(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for p in &self.passengers {
            if let Some(c) = counts.get_mut(p.zone.ordinal()) {
                *c += 1;
            }
        }
        counts
    }

    pub fn clear(&mut self) {
        self.passengers.clear();
    }
}

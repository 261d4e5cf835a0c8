//! Processing stages a passenger walks through.

use std::fmt;

/// A stage in the passenger-processing sequence.
///
/// The derive order *is* the processing order: `Ord` compares ordinals, so
/// "a passenger's zone never decreases" is a plain `<=` check.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    #[default]
    CheckIn,
    Security,
    Gate,
    Boarding,
    /// Terminal state.  Passengers reaching it leave the active set.
    Complete,
}

impl Zone {
    /// The four zones that hold passengers, in processing order.
    pub const PROCESSING: [Zone; 4] = [Zone::CheckIn, Zone::Security, Zone::Gate, Zone::Boarding];

    /// Position in the processing sequence (`Complete` = 4).
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The zone after `self`; `Complete` is absorbing.
    #[inline]
    pub fn next(self) -> Zone {
        match self {
            Zone::CheckIn  => Zone::Security,
            Zone::Security => Zone::Gate,
            Zone::Gate     => Zone::Boarding,
            Zone::Boarding | Zone::Complete => Zone::Complete,
        }
    }

    #[inline]
    pub fn is_complete(self) -> bool {
        self == Zone::Complete
    }

    /// Human-readable label used in metric tables and output files.
    pub fn label(self) -> &'static str {
        match self {
            Zone::CheckIn  => "Check-in",
            Zone::Security => "Security",
            Zone::Gate     => "Gate",
            Zone::Boarding => "Boarding",
            Zone::Complete => "Complete",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

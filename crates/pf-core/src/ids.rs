//! Strongly typed identifier wrappers.
//!
//! Passenger IDs are handed out sequentially by the generator and are only
//! used for debugging and output rows; no business logic keys off them.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The ID that follows `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Sequential passenger identity.  Max ~4.3 billion passengers per run.
    pub struct PassengerId(u32);
}

typed_id! {
    /// Handle returned when registering a snapshot subscriber.
    pub struct SubscriberId(u32);
}

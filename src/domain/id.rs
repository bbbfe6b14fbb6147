//! Typed entity identifiers and the per-kind allocator.
//!
//! Every registered entity kind (department, doctor, patient) has its own
//! identifier type so that an id of one kind cannot be passed where another
//! is expected. Identifiers are issued by an [`IdSequence`], start at 1 and
//! strictly increase; they are never reused or reassigned.

use std::{fmt, marker::PhantomData, num::NonZeroU32, str::FromStr};

/// Error returned when a string cannot be parsed as an entity identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid identifier '{0}': expected a positive integer")]
pub struct ParseIdError(String);

macro_rules! entity_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Creates an identifier from a raw non-zero value.
            #[must_use]
            pub const fn new(value: NonZeroU32) -> Self {
                Self(value)
            }

            /// Returns the numeric value of the identifier.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl From<NonZeroU32> for $name {
            fn from(value: NonZeroU32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .parse::<NonZeroU32>()
                    .map_err(|_| ParseIdError(s.to_string()))?;
                Ok(Self(value))
            }
        }
    };
}

entity_id! {
    /// Unique identifier of a [`Department`](crate::Department).
    DepartmentId
}

entity_id! {
    /// Unique identifier of a [`Doctor`](crate::Doctor).
    DoctorId
}

entity_id! {
    /// Unique identifier of a [`Patient`](crate::Patient).
    PatientId
}

/// Issues identifiers of a single kind, starting at 1.
///
/// Each issued identifier is strictly greater than every identifier issued
/// before it. The sequence is not shared between kinds: each store owns its
/// own `IdSequence`.
#[derive(Debug, Clone)]
pub struct IdSequence<T> {
    next: NonZeroU32,
    _kind: PhantomData<T>,
}

impl<T: From<NonZeroU32>> IdSequence<T> {
    /// Issues the next identifier in the sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence overflows `u32` (over four billion entities in
    /// a single interactive session).
    pub fn next_id(&mut self) -> T {
        let issued = self.next;
        self.next = issued.checked_add(1).expect("identifier overflow!");
        T::from(issued)
    }
}

impl<T> Default for IdSequence<T> {
    fn default() -> Self {
        Self {
            next: NonZeroU32::MIN,
            _kind: PhantomData,
        }
    }
}

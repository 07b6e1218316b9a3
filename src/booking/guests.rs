//! Guests

use std::fmt;

use thiserror::Error;

/// Error returned for a guest count outside `1..=4`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("guest count must be between {min} and {max}, got {0}", min = GuestCount::MIN, max = GuestCount::MAX)]
pub struct InvalidGuestCount(pub u8);

/// Number of guests on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuestCount(u8);

impl GuestCount {
    /// Fewest guests a booking can hold.
    pub const MIN: u8 = 1;

    /// Most guests a booking can hold.
    pub const MAX: u8 = 4;

    /// Number of guests
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for GuestCount {
    type Error = InvalidGuestCount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidGuestCount(value))
        }
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.0 > 1 { "s" } else { "" };

        write!(f, "{} Guest{plural}", self.0)
    }
}

/// Identity of the guest making the booking.
///
/// Fields are free text; only their presence is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDetails {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,
}

impl GuestDetails {
    /// Full name as shown on confirmations.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

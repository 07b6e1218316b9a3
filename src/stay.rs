//! Stays
//!
//! Nights are counted as the difference between two calendar dates. Instants
//! are never subtracted, so a stay spanning a daylight saving change still
//! counts one night per date boundary.

use jiff::civil::{Date, DateTime};
use thiserror::Error;

/// Errors raised while deriving a stay.
#[derive(Debug, Error)]
pub enum StayError {
    /// Check-out is not strictly after check-in.
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidRange {
        /// Check-in date
        check_in: Date,

        /// Check-out date
        check_out: Date,
    },

    /// Wrapped date arithmetic error.
    #[error(transparent)]
    Date(#[from] jiff::Error),
}

/// Whole nights between check-in and check-out.
///
/// # Errors
///
/// - [`StayError::InvalidRange`]: `check_out` is on or before `check_in`.
/// - [`StayError::Date`]: the calendar difference could not be computed.
pub fn nights(check_in: Date, check_out: Date) -> Result<u32, StayError> {
    let invalid = || StayError::InvalidRange {
        check_in,
        check_out,
    };

    if check_out <= check_in {
        return Err(invalid());
    }

    // Largest unit for civil dates is days, so this never rolls up into months.
    let span = check_in.until(check_out)?;

    u32::try_from(span.get_days()).map_err(|_err| invalid())
}

/// A guest-selected interval with check-out strictly after check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayRange {
    check_in: Date,
    check_out: Date,
    nights: u32,
}

impl StayRange {
    /// Creates a stay from two calendar dates.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::InvalidRange`] if `check_out` is not after `check_in`.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, StayError> {
        let nights = nights(check_in, check_out)?;

        Ok(Self {
            check_in,
            check_out,
            nights,
        })
    }

    /// Creates a stay from two local date-times, keeping only their dates.
    ///
    /// # Errors
    ///
    /// Returns [`StayError::InvalidRange`] if the check-out date is not after
    /// the check-in date.
    pub fn from_datetimes(check_in: DateTime, check_out: DateTime) -> Result<Self, StayError> {
        Self::new(check_in.date(), check_out.date())
    }

    /// Check-in date
    pub fn check_in(&self) -> Date {
        self.check_in
    }

    /// Check-out date
    pub fn check_out(&self) -> Date {
        self.check_out
    }

    /// Number of nights in the stay; always at least one.
    pub fn nights(&self) -> u32 {
        self.nights
    }
}

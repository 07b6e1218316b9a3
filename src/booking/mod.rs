//! Bookings
//!
//! The booking page collects a room, two dates and the guest's details. The
//! [`BookingReconciler`] keeps a live quote for the summary panel and decides
//! whether the form may be submitted.

use std::fmt;

use jiff::civil::Date;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    quote::{BookingQuote, QuoteError},
    rooms::RoomOffering,
    stay::StayRange,
};

pub mod form;
pub mod guests;
pub mod reconciler;

pub use form::BookingForm;
pub use guests::{GuestCount, GuestDetails, InvalidGuestCount};
pub use reconciler::{BookingReconciler, FormState, Reconciled, reconcile};

/// Field a booking cannot be submitted without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// Check-in date
    CheckIn,

    /// Check-out date
    CheckOut,

    /// A room that exists in the catalog
    Room,

    /// Guest first name
    FirstName,

    /// Guest last name
    LastName,

    /// Guest email
    Email,

    /// Guest phone
    Phone,
}

impl RequiredField {
    /// Form label for the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::CheckIn => "check-in date",
            Self::CheckOut => "check-out date",
            Self::Room => "room type",
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Check if this is one of the two stay dates.
    pub fn is_date(self) -> bool {
        matches!(self, Self::CheckIn | Self::CheckOut)
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RejectReason {
    /// One or more required fields are absent.
    #[error("missing required fields: {}", join_labels(.0))]
    MissingRequiredField(SmallVec<[RequiredField; 4]>),

    /// Check-out is on or before check-in.
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidRange {
        /// Check-in date
        check_in: Date,

        /// Check-out date
        check_out: Date,
    },

    /// The quote could not be calculated.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl RejectReason {
    /// Fields reported missing, if this is a missing field rejection.
    pub fn missing_fields(&self) -> &[RequiredField] {
        match self {
            Self::MissingRequiredField(fields) => fields,
            Self::InvalidRange { .. } | Self::Quote(_) => &[],
        }
    }
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .copied()
        .map(RequiredField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A complete booking, ready to hand over for confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    /// Guest identity
    pub guest: GuestDetails,

    /// Number of guests
    pub guests: GuestCount,

    /// Booked room
    pub room: RoomOffering,

    /// Booked dates
    pub stay: StayRange,

    /// Free-text special requests
    pub special_requests: Option<String>,

    /// Finalized price breakdown
    pub quote: BookingQuote,
}

//! Admin
//!
//! Management of the records behind the admin panel. Each kind of record sits
//! behind a repository trait so the pages can be driven by any store; the
//! in-memory implementations start from the same seed data the site ships with.

use thiserror::Error;

use crate::rooms::Price;

pub mod messages;
pub mod rooms;
pub mod services;

pub use messages::{
    GuestMessage, InMemoryMessagesRepository, MessageCounts, MessageFilter, MessageStatus,
    MessagesRepository, NewMessage, UnknownFilter,
};
pub use rooms::{
    InMemoryRoomsRepository, ManagedRoom, RoomDraft, RoomStatus, RoomsRepository, RoomsSummary,
};
pub use services::{
    HotelService, InMemoryServicesRepository, ServiceDraft, ServiceStatus, ServicesRepository,
};

/// Identifier of an admin record.
pub type RecordId = u32;

/// Errors returned by the admin repositories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminError {
    /// No record with this id.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// A required field was left blank.
    #[error("missing required data: {0}")]
    MissingRequiredData(&'static str),

    /// The price is negative.
    #[error("invalid price value: {0}")]
    InvalidPrice(String),

    /// The price is not in the repository's currency.
    #[error("price is in {actual}, expected {expected}")]
    CurrencyMismatch {
        /// Currency the repository holds prices in
        expected: &'static str,

        /// Currency of the rejected price
        actual: &'static str,
    },

    /// Ids are exhausted.
    #[error("no more record ids available")]
    IdsExhausted,
}

/// Next id after the largest one in use, starting at 1.
pub(crate) fn next_id(ids: impl IntoIterator<Item = RecordId>) -> Result<RecordId, AdminError> {
    ids.into_iter()
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(AdminError::IdsExhausted)
}

/// Rejects blank text.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        return Err(AdminError::MissingRequiredData(field));
    }

    Ok(())
}

/// Rejects negative prices and prices in another currency.
pub(crate) fn check_price(price: &Price, expected: &'static str) -> Result<(), AdminError> {
    if price.amount().is_sign_negative() && !price.amount().is_zero() {
        return Err(AdminError::InvalidPrice(price.to_string()));
    }

    let actual = price.currency().iso_alpha_code;

    if actual != expected {
        return Err(AdminError::CurrencyMismatch { expected, actual });
    }

    Ok(())
}

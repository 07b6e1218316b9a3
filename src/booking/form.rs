//! Booking Form

use jiff::civil::Date;
use smallvec::SmallVec;

use crate::{
    booking::{
        RequiredField,
        guests::{GuestCount, GuestDetails},
    },
    rooms::RoomId,
};

/// Raw booking form fields, as collected by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    /// Selected check-in date
    pub check_in: Option<Date>,

    /// Selected check-out date
    pub check_out: Option<Date>,

    /// Selected room, which may not exist in the catalog
    pub room: Option<RoomId>,

    /// Number of guests
    pub guests: GuestCount,

    /// Guest identity
    pub guest: GuestDetails,

    /// Free-text special requests
    pub special_requests: String,
}

impl BookingForm {
    /// An empty form with the room preselected, as when arriving from a room page.
    pub fn for_room(room: impl Into<RoomId>) -> Self {
        Self {
            room: Some(room.into()),
            ..Self::default()
        }
    }

    /// Check if none of the dates or the room have been chosen yet.
    pub fn is_empty(&self) -> bool {
        self.check_in.is_none() && self.check_out.is_none() && self.room.is_none()
    }

    /// Required fields that are absent or blank.
    ///
    /// The room only counts as present when `room_resolves` is true.
    pub fn missing_fields(&self, room_resolves: bool) -> SmallVec<[RequiredField; 4]> {
        let mut missing = SmallVec::new();

        if self.check_in.is_none() {
            missing.push(RequiredField::CheckIn);
        }

        if self.check_out.is_none() {
            missing.push(RequiredField::CheckOut);
        }

        if !room_resolves {
            missing.push(RequiredField::Room);
        }

        let identity = [
            (RequiredField::FirstName, &self.guest.first_name),
            (RequiredField::LastName, &self.guest.last_name),
            (RequiredField::Email, &self.guest.email),
            (RequiredField::Phone, &self.guest.phone),
        ];

        missing.extend(
            identity
                .into_iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(field, _)| field),
        );

        missing
    }

    /// Special requests, if any were written.
    pub fn special_requests(&self) -> Option<&str> {
        let trimmed = self.special_requests.trim();

        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Clears every field back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Notifications
//!
//! User-facing feedback (the toasts shown by the site) and the sink that
//! receives booking outcomes.

use std::fmt;

use mockall::automock;
use tracing::{info, warn};

use crate::{
    admin::messages::MessageStatus,
    booking::{BookingRequest, RejectReason, RequiredField},
};

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Informational or success message
    #[default]
    Default,

    /// Error message
    Destructive,
}

/// A short message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline
    pub title: String,

    /// Body text
    pub description: String,

    /// Visual style
    pub variant: Variant,
}

impl Notification {
    /// Creates an informational notification.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    /// Creates an error notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            ..Self::new(title, description)
        }
    }

    /// Confirmation shown after a booking is accepted.
    pub fn booking_confirmed(request: &BookingRequest) -> Self {
        Self::new(
            "Booking Confirmed!",
            format!(
                "Your reservation for {} has been confirmed. Confirmation details will be sent to your email.",
                request.room.name
            ),
        )
    }

    /// Error shown when a booking is refused.
    ///
    /// Missing dates take precedence over a missing room, which takes
    /// precedence over missing guest details.
    pub fn booking_rejected(reason: &RejectReason) -> Self {
        match reason {
            RejectReason::MissingRequiredField(fields)
                if fields.iter().any(|field| field.is_date()) =>
            {
                Self::destructive(
                    "Missing Dates",
                    "Please select check-in and check-out dates.",
                )
            }
            RejectReason::MissingRequiredField(fields)
                if fields.contains(&RequiredField::Room) =>
            {
                Self::destructive("Room Selection Required", "Please select a room type.")
            }
            RejectReason::MissingRequiredField(_) => Self::destructive(
                "Missing Guest Details",
                format!("Please fill in: {}.", reason_fields(reason)),
            ),
            RejectReason::InvalidRange { .. } => Self::destructive(
                "Invalid Dates",
                "Please choose a check-out date after your check-in date.",
            ),
            RejectReason::Quote(error) => Self::destructive("Pricing Unavailable", error.to_string()),
        }
    }

    /// Confirmation shown after a contact form is sent.
    pub fn message_sent() -> Self {
        Self::new(
            "Message Sent Successfully",
            "Thank you for contacting us. We'll get back to you within 24 hours.",
        )
    }

    /// Confirmation for a created admin record, e.g. `("Room", "Executive Suite")`.
    pub fn created(kind: &str, name: &str) -> Self {
        Self::new(
            format!("{kind} Created"),
            format!("{name} has been successfully created."),
        )
    }

    /// Confirmation for an updated admin record.
    pub fn updated(kind: &str, name: &str) -> Self {
        Self::new(
            format!("{kind} Updated"),
            format!("{name} has been successfully updated."),
        )
    }

    /// Confirmation for a deleted admin record.
    pub fn deleted(kind: &str, name: &str) -> Self {
        Self::new(
            format!("{kind} Deleted"),
            format!("{name} has been successfully deleted."),
        )
    }

    /// Confirmation for a deleted guest message.
    pub fn message_deleted(sender: &str) -> Self {
        Self::new(
            "Message Deleted",
            format!("Message from {sender} has been deleted."),
        )
    }

    /// Confirmation for a message status change.
    pub fn message_updated(status: MessageStatus) -> Self {
        Self::new(
            "Message Updated",
            format!("Message has been {}.", status.action_label()),
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

fn reason_fields(reason: &RejectReason) -> String {
    reason
        .missing_fields()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Receives the outcome of every booking submission.
#[automock]
pub trait BookingSink {
    /// Called exactly once for each accepted submission.
    fn confirmed(&mut self, request: &BookingRequest);

    /// Called for each refused submission.
    fn rejected(&mut self, reason: &RejectReason);
}

/// Sink that records booking outcomes as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl BookingSink for TracingSink {
    fn confirmed(&mut self, request: &BookingRequest) {
        info!(
            room = %request.room.id,
            room_name = %request.room.name,
            check_in = %request.stay.check_in(),
            check_out = %request.stay.check_out(),
            nights = request.stay.nights(),
            guests = request.guests.get(),
            email = %request.guest.email,
            total = %request.quote.total(),
            "booking submitted"
        );
    }

    fn rejected(&mut self, reason: &RejectReason) {
        warn!(%reason, "booking rejected");
    }
}

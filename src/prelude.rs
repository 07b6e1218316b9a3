//! Luxora prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{
        AdminError, GuestMessage, HotelService, InMemoryMessagesRepository,
        InMemoryRoomsRepository, InMemoryServicesRepository, ManagedRoom, MessageCounts,
        MessageFilter, MessageStatus, MessagesRepository, NewMessage, RecordId, RoomDraft,
        RoomStatus, RoomsRepository, RoomsSummary, ServiceDraft, ServiceStatus,
        ServicesRepository,
    },
    booking::{
        BookingForm, BookingReconciler, BookingRequest, FormState, GuestCount, GuestDetails,
        Reconciled, RejectReason, RequiredField, reconcile,
    },
    catalog::{CatalogError, RoomCatalog},
    contact::{ContactError, ContactField, ContactForm},
    fixtures::{FixtureError, load_catalog, parse_catalog},
    notifications::{BookingSink, Notification, TracingSink, Variant},
    quote::{BookingQuote, DEFAULT_TAX_RATE, QuoteError, default_tax_rate, quote},
    rooms::{Price, RoomCategory, RoomId, RoomOffering},
    stay::{StayError, StayRange, nights},
};

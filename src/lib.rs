//! Luxora
//!
//! Booking quotes, room catalog and guest messaging for the Luxora hotel.
//!
//! The booking page picks a room and two dates; [`booking::BookingReconciler`]
//! keeps the live [`quote::BookingQuote`] and decides when the form can be
//! submitted. The admin panel's records live behind the repositories in
//! [`admin`].

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod contact;
pub mod fixtures;
pub mod notifications;
pub mod prelude;
pub mod quote;
pub mod rooms;
pub mod stay;

//! Rooms

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Money amount in one of the ISO currencies.
pub type Price = Money<'static, Currency>;

/// Room identifier, as carried by booking links (`/booking?room=4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a room id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for RoomId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

/// Error returned when a room category name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown room category: {0}")]
pub struct UnknownCategory(pub String);

/// Room category, used by the rooms page filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomCategory {
    /// Suites
    Suite,

    /// Deluxe rooms
    Deluxe,

    /// Classic rooms
    Classic,
}

impl RoomCategory {
    /// Every category, in display order.
    pub const ALL: [RoomCategory; 3] = [Self::Suite, Self::Deluxe, Self::Classic];

    /// Lower-case key used in links and fixture files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suite => "suite",
            Self::Deluxe => "deluxe",
            Self::Classic => "classic",
        }
    }

    /// Plural label shown on filter buttons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Suite => "Suites",
            Self::Deluxe => "Deluxe",
            Self::Classic => "Classic",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suite" | "suites" => Ok(Self::Suite),
            "deluxe" => Ok(Self::Deluxe),
            "classic" => Ok(Self::Classic),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A bookable room offering.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomOffering {
    /// Catalog key
    pub id: RoomId,

    /// Display name
    pub name: String,

    /// Category the room is listed under
    pub category: RoomCategory,

    /// Maximum number of guests
    pub max_guests: u8,

    /// Price per night, unrounded
    pub nightly_rate: Price,
}

impl RoomOffering {
    /// Creates a new room offering.
    pub fn new(
        id: impl Into<RoomId>,
        name: impl Into<String>,
        category: RoomCategory,
        max_guests: u8,
        nightly_rate: Price,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            max_guests,
            nightly_rate,
        }
    }

    /// Currency the room is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.nightly_rate.currency()
    }
}

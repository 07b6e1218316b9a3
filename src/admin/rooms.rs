//! Managed Rooms

use std::{fmt, io};

use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::info;

use crate::{
    admin::{AdminError, RecordId, check_price, next_id, require},
    rooms::Price,
};

/// Occupancy status of a managed room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoomStatus {
    /// Free to book
    #[default]
    Available,

    /// A guest is staying
    Occupied,

    /// Out of service
    Maintenance,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
        })
    }
}

/// A room as managed from the admin panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedRoom {
    /// Record id
    pub id: RecordId,

    /// Display name
    pub name: String,

    /// Marketing description
    pub description: String,

    /// Nightly price
    pub price: Price,

    /// Amenity labels
    pub amenities: Vec<String>,

    /// Current status
    pub status: RoomStatus,
}

/// Editable fields of a managed room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    /// Display name
    pub name: String,

    /// Marketing description
    pub description: String,

    /// Nightly price
    pub price: Price,

    /// Amenity labels
    pub amenities: Vec<String>,
}

impl RoomDraft {
    /// Creates a draft, splitting `amenities` on commas.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        amenities: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            amenities: parse_amenities(amenities),
        }
    }
}

/// Splits a comma-separated amenity list, trimming entries and dropping blanks.
pub fn parse_amenities(amenities: &str) -> Vec<String> {
    amenities
        .split(',')
        .map(str::trim)
        .filter(|amenity| !amenity.is_empty())
        .map(str::to_string)
        .collect()
}

/// Store of managed rooms.
#[automock]
pub trait RoomsRepository {
    /// All rooms, in creation order.
    fn list(&self) -> Vec<ManagedRoom>;

    /// A single room.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no room has this id.
    fn get(&self, id: RecordId) -> Result<ManagedRoom, AdminError>;

    /// Adds a room as [`RoomStatus::Available`] with the next free id.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is incomplete or its price is invalid.
    fn create(&mut self, draft: RoomDraft) -> Result<ManagedRoom, AdminError>;

    /// Replaces a room's editable fields, keeping its id and status.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the draft is invalid.
    fn update(&mut self, id: RecordId, draft: RoomDraft) -> Result<ManagedRoom, AdminError>;

    /// Removes a room, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no room has this id.
    fn delete(&mut self, id: RecordId) -> Result<ManagedRoom, AdminError>;

    /// Sets a room's status.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no room has this id.
    fn set_status(&mut self, id: RecordId, status: RoomStatus) -> Result<ManagedRoom, AdminError>;

    /// Puts an available room into maintenance, and any other room back to available.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no room has this id.
    fn toggle_maintenance(&mut self, id: RecordId) -> Result<ManagedRoom, AdminError> {
        let status = match self.get(id)?.status {
            RoomStatus::Available => RoomStatus::Maintenance,
            RoomStatus::Occupied | RoomStatus::Maintenance => RoomStatus::Available,
        };

        self.set_status(id, status)
    }
}

/// Rooms held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRoomsRepository {
    rooms: Vec<ManagedRoom>,
    currency: &'static Currency,
}

impl InMemoryRoomsRepository {
    /// An empty repository pricing rooms in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            rooms: Vec::new(),
            currency,
        }
    }

    /// The rooms the admin panel starts with.
    pub fn seeded() -> Self {
        let room = |id, name: &str, description: &str, price, amenities: &str, status| {
            ManagedRoom {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price: Money::from_major(price, iso::USD),
                amenities: parse_amenities(amenities),
                status,
            }
        };

        Self {
            rooms: vec![
                room(
                    1,
                    "Presidential Suite",
                    "Our most luxurious accommodation with panoramic ocean views",
                    1200,
                    "Ocean View, Private Balcony, King Bed, Marble Bath",
                    RoomStatus::Available,
                ),
                room(
                    2,
                    "Luxury Ocean View",
                    "Elegant room with stunning ocean vistas and premium amenities",
                    800,
                    "Ocean View, Queen Bed, Sitting Area, Premium Amenities",
                    RoomStatus::Occupied,
                ),
                room(
                    3,
                    "Executive Suite",
                    "Perfect for business travelers with work space and city views",
                    600,
                    "City View, Work Space, King Bed, Luxury Bath",
                    RoomStatus::Available,
                ),
            ],
            currency: iso::USD,
        }
    }

    /// Currency rooms are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn validate(&self, draft: &RoomDraft) -> Result<(), AdminError> {
        require("name", &draft.name)?;
        check_price(&draft.price, self.currency.iso_alpha_code)
    }

    fn find_mut(&mut self, id: RecordId) -> Result<&mut ManagedRoom, AdminError> {
        self.rooms
            .iter_mut()
            .find(|room| room.id == id)
            .ok_or(AdminError::NotFound(id))
    }
}

impl RoomsRepository for InMemoryRoomsRepository {
    fn list(&self) -> Vec<ManagedRoom> {
        self.rooms.clone()
    }

    fn get(&self, id: RecordId) -> Result<ManagedRoom, AdminError> {
        self.rooms
            .iter()
            .find(|room| room.id == id)
            .cloned()
            .ok_or(AdminError::NotFound(id))
    }

    fn create(&mut self, draft: RoomDraft) -> Result<ManagedRoom, AdminError> {
        self.validate(&draft)?;

        let room = ManagedRoom {
            id: next_id(self.rooms.iter().map(|room| room.id))?,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            amenities: draft.amenities,
            status: RoomStatus::Available,
        };

        info!(id = room.id, name = %room.name, "room created");

        self.rooms.push(room.clone());

        Ok(room)
    }

    fn update(&mut self, id: RecordId, draft: RoomDraft) -> Result<ManagedRoom, AdminError> {
        self.validate(&draft)?;

        let room = self.find_mut(id)?;

        room.name = draft.name;
        room.description = draft.description;
        room.price = draft.price;
        room.amenities = draft.amenities;

        info!(id, name = %room.name, "room updated");

        Ok(room.clone())
    }

    fn delete(&mut self, id: RecordId) -> Result<ManagedRoom, AdminError> {
        let position = self
            .rooms
            .iter()
            .position(|room| room.id == id)
            .ok_or(AdminError::NotFound(id))?;

        let room = self.rooms.remove(position);

        info!(id, name = %room.name, "room deleted");

        Ok(room)
    }

    fn set_status(
        &mut self,
        id: RecordId,
        status: RoomStatus,
    ) -> Result<ManagedRoom, AdminError> {
        let room = self.find_mut(id)?;

        room.status = status;

        info!(id, %status, "room status changed");

        Ok(room.clone())
    }
}

/// Figures shown above the room management list.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomsSummary {
    /// Number of rooms
    pub total: usize,

    /// Rooms with [`RoomStatus::Available`]
    pub available: usize,

    /// Mean nightly price rounded to a whole unit, if there are rooms
    pub average_price: Option<Price>,
}

impl RoomsSummary {
    /// Summarizes `rooms`, averaging prices in `currency`.
    pub fn from_rooms(rooms: &[ManagedRoom], currency: &'static Currency) -> Self {
        let available = rooms
            .iter()
            .filter(|room| room.status == RoomStatus::Available)
            .count();

        let average_price = (!rooms.is_empty())
            .then(|| {
                let sum = rooms.iter().try_fold(Decimal::ZERO, |sum, room| {
                    sum.checked_add(*room.price.amount())
                })?;

                sum.checked_div(Decimal::from(rooms.len()))
            })
            .flatten()
            .map(|mean| {
                Money::from_decimal(
                    mean.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
                    currency,
                )
            });

        Self {
            total: rooms.len(),
            available,
            average_price,
        }
    }

    /// Writes the summary as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        let average = self
            .average_price
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);

        builder.push_record(["Total Rooms".to_string(), self.total.to_string()]);
        builder.push_record(["Available".to_string(), self.available.to_string()]);
        builder.push_record(["Avg. Price".to_string(), average]);

        let mut table = builder.build();

        table
            .with(Style::modern_rounded())
            .modify(Columns::one(1), Alignment::right());

        writeln!(out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn draft(name: &str, price: i64) -> RoomDraft {
        RoomDraft::new(
            name,
            "Quiet garden room",
            Money::from_major(price, iso::USD),
            "Garden View, , Queen Bed ",
        )
    }

    #[test]
    fn amenities_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_amenities(" Ocean View,,King Bed ,  "),
            ["Ocean View", "King Bed"]
        );
        assert!(parse_amenities("").is_empty());
    }

    #[test]
    fn seeded_repository_has_three_rooms() -> TestResult {
        let rooms = InMemoryRoomsRepository::seeded();

        assert_eq!(rooms.list().len(), 3);
        assert_eq!(rooms.get(2)?.status, RoomStatus::Occupied);

        Ok(())
    }

    #[test]
    fn create_assigns_next_id_and_available() -> TestResult {
        let mut rooms = InMemoryRoomsRepository::seeded();

        let room = rooms.create(draft("Garden Room", 400))?;

        assert_eq!(room.id, 4);
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.amenities, ["Garden View", "Queen Bed"]);
        assert_eq!(rooms.list().len(), 4);

        Ok(())
    }

    #[test]
    fn empty_repository_starts_at_one() -> TestResult {
        let mut rooms = InMemoryRoomsRepository::new(iso::USD);

        assert_eq!(rooms.create(draft("Garden Room", 400))?.id, 1);
        assert_eq!(rooms.currency(), iso::USD);

        Ok(())
    }

    #[test]
    fn create_rejects_other_currency() {
        let mut rooms = InMemoryRoomsRepository::new(iso::EUR);

        assert_eq!(
            rooms.create(draft("Garden Room", 400)),
            Err(AdminError::CurrencyMismatch {
                expected: "EUR",
                actual: "USD",
            })
        );
    }

    #[test]
    fn create_rejects_blank_name_and_negative_price() {
        let mut rooms = InMemoryRoomsRepository::seeded();

        assert_eq!(
            rooms.create(draft(" ", 400)),
            Err(AdminError::MissingRequiredData("name"))
        );
        assert!(matches!(
            rooms.create(draft("Garden Room", -1)),
            Err(AdminError::InvalidPrice(_))
        ));
        assert_eq!(rooms.list().len(), 3);
    }

    #[test]
    fn update_keeps_id_and_status() -> TestResult {
        let mut rooms = InMemoryRoomsRepository::seeded();

        let room = rooms.update(2, draft("Ocean Deluxe", 850))?;

        assert_eq!(room.id, 2);
        assert_eq!(room.status, RoomStatus::Occupied);
        assert_eq!(rooms.get(2)?.name, "Ocean Deluxe");

        Ok(())
    }

    #[test]
    fn delete_unknown_room_is_not_found() {
        let mut rooms = InMemoryRoomsRepository::seeded();

        assert_eq!(rooms.delete(9), Err(AdminError::NotFound(9)));
    }

    #[test]
    fn ids_keep_growing_after_delete() -> TestResult {
        let mut rooms = InMemoryRoomsRepository::seeded();

        rooms.delete(2)?;

        assert_eq!(rooms.create(draft("Garden Room", 400))?.id, 4);

        Ok(())
    }

    #[test]
    fn toggle_maintenance_flips_status() -> TestResult {
        let mut rooms = InMemoryRoomsRepository::seeded();

        assert_eq!(rooms.toggle_maintenance(1)?.status, RoomStatus::Maintenance);
        assert_eq!(rooms.toggle_maintenance(1)?.status, RoomStatus::Available);
        assert_eq!(rooms.toggle_maintenance(2)?.status, RoomStatus::Available);

        Ok(())
    }

    #[test]
    fn summary_counts_and_averages() {
        let rooms = InMemoryRoomsRepository::seeded();

        let summary = RoomsSummary::from_rooms(&rooms.list(), iso::USD);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.available, 2);
        assert_eq!(
            summary.average_price,
            Some(Money::from_major(867, iso::USD))
        );
    }

    #[test]
    fn empty_summary_has_no_average() {
        let summary = RoomsSummary::from_rooms(&[], iso::USD);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_price, None);
    }

    #[test]
    fn summary_table_lists_figures() -> TestResult {
        let summary = RoomsSummary::from_rooms(&InMemoryRoomsRepository::seeded().list(), iso::USD);
        let mut out = Vec::new();

        summary.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Total Rooms"));
        assert!(rendered.contains("$867"));

        Ok(())
    }
}

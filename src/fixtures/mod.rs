//! Fixtures
//!
//! Room catalogs described in YAML, e.g. `fixtures/rooms/luxora.yml`:
//!
//! ```yaml
//! rooms:
//!   - id: "4"
//!     name: Deluxe Ocean Room
//!     category: deluxe
//!     max_guests: 2
//!     price: 600 USD
//! ```

use std::{fs, path::Path};

use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{CatalogError, RoomCatalog},
    fixtures::rooms::RoomsFixture,
    rooms::RoomOffering,
};

pub mod rooms;

pub use rooms::parse_price;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown room category
    #[error("Invalid room category: {0}")]
    InvalidCategory(String),

    /// The fixture lists no rooms
    #[error("No rooms in fixture; currency unknown")]
    NoRooms,

    /// The rooms do not form a valid catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Builds a catalog from YAML text.
///
/// The catalog takes the currency of the first room.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a room is invalid, or the rooms
/// do not form a valid catalog.
pub fn parse_catalog(yaml: &str) -> Result<RoomCatalog, FixtureError> {
    let fixture: RoomsFixture = serde_norway::from_str(yaml)?;

    let offerings = fixture
        .rooms
        .into_iter()
        .map(RoomOffering::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let currency = offerings
        .first()
        .map(RoomOffering::currency)
        .ok_or(FixtureError::NoRooms)?;

    Ok(RoomCatalog::from_offerings(offerings, currency)?)
}

/// Loads a catalog from a YAML fixture file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a valid
/// catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<RoomCatalog, FixtureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents)?;

    info!(path = %path.display(), rooms = catalog.len(), "room catalog loaded");

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::rooms::{RoomCategory, RoomId};

    use super::*;

    #[test]
    fn parses_rooms_in_order() -> TestResult {
        let catalog = parse_catalog(
            r#"
rooms:
  - id: "a"
    name: Garden Room
    category: classic
    max_guests: 2
    price: 180.50 EUR
  - id: "b"
    name: Tower Suite
    category: suite
    max_guests: 4
    price: 900 EUR
"#,
        )?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.currency(), EUR);

        let garden = catalog.lookup(&RoomId::from("a"))?;

        assert_eq!(garden.category, RoomCategory::Classic);
        assert_eq!(
            garden.nightly_rate,
            Money::from_decimal(Decimal::new(18_050, 2), EUR)
        );

        let names: Vec<_> = catalog.iter().map(|room| room.name.as_str()).collect();

        assert_eq!(names, ["Garden Room", "Tower Suite"]);

        Ok(())
    }

    #[test]
    fn empty_fixture_is_rejected() {
        let result = parse_catalog("rooms: []");

        assert!(matches!(result, Err(FixtureError::NoRooms)));
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let result = parse_catalog(
            r#"
rooms:
  - { id: "a", name: A, category: suite, max_guests: 2, price: 100 USD }
  - { id: "b", name: B, category: suite, max_guests: 2, price: 100 EUR }
"#,
        );

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(..)))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = parse_catalog(
            r#"
rooms:
  - { id: "a", name: A, category: suite, max_guests: 2, price: 100 USD }
  - { id: "a", name: B, category: suite, max_guests: 2, price: 200 USD }
"#,
        );

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::DuplicateRoom(_)))
        ));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let result = parse_catalog("rooms: [");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_catalog("./fixtures/rooms/does-not-exist.yml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn bundled_fixture_matches_builtin_catalog() -> TestResult {
        let loaded = load_catalog("./fixtures/rooms/luxora.yml")?;
        let builtin = RoomCatalog::builtin();

        assert!(loaded.iter().eq(builtin.iter()));

        Ok(())
    }
}

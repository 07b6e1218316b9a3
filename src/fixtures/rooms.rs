//! Room Fixtures

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    rooms::{Price, RoomCategory, RoomOffering},
};

/// Wrapper for rooms in YAML
#[derive(Debug, Deserialize)]
pub struct RoomsFixture {
    /// Rooms, in listing order
    pub rooms: Vec<RoomFixture>,
}

/// Room Fixture
#[derive(Debug, Deserialize)]
pub struct RoomFixture {
    /// Catalog key
    pub id: String,

    /// Display name
    pub name: String,

    /// Category (e.g., "suite")
    pub category: String,

    /// Maximum number of guests
    pub max_guests: u8,

    /// Nightly price (e.g., "600 USD")
    pub price: String,
}

impl TryFrom<RoomFixture> for RoomOffering {
    type Error = FixtureError;

    fn try_from(fixture: RoomFixture) -> Result<Self, Self::Error> {
        let category = fixture
            .category
            .parse::<RoomCategory>()
            .map_err(|error| FixtureError::InvalidCategory(error.0))?;

        let nightly_rate = parse_price(&fixture.price)?;

        Ok(RoomOffering::new(
            fixture.id,
            fixture.name,
            category,
            fixture.max_guests,
            nightly_rate,
        ))
    }
}

/// Parse price string (e.g., "600 USD") into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<Price, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency: &'static Currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok(Money::from_decimal(amount, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::rooms::RoomId;

    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("600USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_non_numeric_amount() {
        let result = parse_price("six USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(text)) if text == "six USD"));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("600 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_keeps_decimal_places() -> TestResult {
        let price = parse_price("449.99 GBP")?;

        assert_eq!(price, Money::from_decimal(Decimal::new(44_999, 2), GBP));

        Ok(())
    }

    #[test]
    fn room_fixture_converts_to_offering() -> TestResult {
        let room = RoomOffering::try_from(RoomFixture {
            id: "2".to_string(),
            name: "Royal Ocean Suite".to_string(),
            category: "Suites".to_string(),
            max_guests: 3,
            price: "950 USD".to_string(),
        })?;

        assert_eq!(room.id, RoomId::from("2"));
        assert_eq!(room.category, RoomCategory::Suite);
        assert_eq!(room.nightly_rate, Money::from_major(950, USD));

        Ok(())
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = RoomOffering::try_from(RoomFixture {
            id: "9".to_string(),
            name: "Penthouse".to_string(),
            category: "penthouse".to_string(),
            max_guests: 6,
            price: "5000 USD".to_string(),
        });

        assert!(matches!(result, Err(FixtureError::InvalidCategory(name)) if name == "penthouse"));
    }
}

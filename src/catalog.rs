//! Room Catalog

use std::io;

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};
use thiserror::Error;

use crate::rooms::{RoomCategory, RoomId, RoomOffering};

/// Errors raised while building or querying a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No room with this id exists.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// Two offerings share an id.
    #[error("room {0} is listed more than once")]
    DuplicateRoom(RoomId),

    /// An offering has a negative nightly rate.
    #[error("room {0} has a negative nightly rate")]
    NegativeRate(RoomId),

    /// An offering is priced in a different currency (room, room currency, catalog currency).
    #[error("room {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(RoomId, &'static str, &'static str),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Read-only catalog of bookable rooms.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    offerings: Vec<RoomOffering>,
    index: FxHashMap<RoomId, usize>,
    currency: &'static Currency,
}

impl RoomCatalog {
    /// Builds a catalog, validating ids, rates and currency.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateRoom`]: two offerings share an id.
    /// - [`CatalogError::NegativeRate`]: an offering has a negative rate.
    /// - [`CatalogError::CurrencyMismatch`]: an offering is priced in another currency.
    pub fn from_offerings(
        offerings: impl Into<Vec<RoomOffering>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let offerings = offerings.into();
        let mut index = FxHashMap::default();

        for (position, room) in offerings.iter().enumerate() {
            if room.currency() != currency {
                return Err(CatalogError::CurrencyMismatch(
                    room.id.clone(),
                    room.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if room.nightly_rate.amount().is_sign_negative() {
                return Err(CatalogError::NegativeRate(room.id.clone()));
            }

            if index.insert(room.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateRoom(room.id.clone()));
            }
        }

        Ok(Self {
            offerings,
            index,
            currency,
        })
    }

    /// The rooms offered on the Luxora booking page, priced in USD.
    pub fn builtin() -> Self {
        let usd = iso::USD;

        let offerings = vec![
            RoomOffering::new(
                "1",
                "Presidential Suite",
                RoomCategory::Suite,
                4,
                Money::from_major(1200, usd),
            ),
            RoomOffering::new(
                "2",
                "Royal Ocean Suite",
                RoomCategory::Suite,
                3,
                Money::from_major(950, usd),
            ),
            RoomOffering::new(
                "3",
                "Executive Suite",
                RoomCategory::Suite,
                2,
                Money::from_major(750, usd),
            ),
            RoomOffering::new(
                "4",
                "Deluxe Ocean Room",
                RoomCategory::Deluxe,
                2,
                Money::from_major(600, usd),
            ),
            RoomOffering::new(
                "5",
                "Deluxe City Room",
                RoomCategory::Deluxe,
                2,
                Money::from_major(450, usd),
            ),
            RoomOffering::new(
                "6",
                "Classic Luxury Room",
                RoomCategory::Classic,
                2,
                Money::from_major(350, usd),
            ),
        ];

        let index = offerings
            .iter()
            .enumerate()
            .map(|(position, room)| (room.id.clone(), position))
            .collect();

        Self {
            offerings,
            index,
            currency: usd,
        }
    }

    /// Resolves a room id to its offering.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no offering has this id. Callers
    /// treat this as "no room selected".
    pub fn lookup(&self, id: &RoomId) -> Result<&RoomOffering, CatalogError> {
        self.index
            .get(id)
            .and_then(|&position| self.offerings.get(position))
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Iterate over the offerings in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &RoomOffering> {
        self.offerings.iter()
    }

    /// Offerings listed under the given category.
    pub fn by_category(&self, category: RoomCategory) -> impl Iterator<Item = &RoomOffering> {
        self.offerings
            .iter()
            .filter(move |room| room.category == category)
    }

    /// Number of offerings in each category, in display order.
    pub fn category_counts(&self) -> SmallVec<[(RoomCategory, usize); 3]> {
        RoomCategory::ALL
            .iter()
            .map(|&category| (category, self.by_category(category).count()))
            .collect()
    }

    /// Number of offerings.
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Currency every offering is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the offerings as a table, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IO`] if the table cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        category: Option<RoomCategory>,
    ) -> Result<(), CatalogError> {
        let mut builder = Builder::default();

        builder.push_record(["Id", "Room", "Category", "Guests", "Per Night"]);

        let rooms = self
            .offerings
            .iter()
            .filter(|room| category.is_none_or(|category| room.category == category));

        let mut shown = 0_usize;

        for room in rooms {
            builder.push_record([
                room.id.to_string(),
                room.name.clone(),
                room.category.label().to_string(),
                room.max_guests.to_string(),
                format!("{}", room.nightly_rate),
            ]);

            shown += 1;
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| CatalogError::IO)?;

        let plural = if shown == 1 { "" } else { "s" };

        writeln!(out, " Showing {shown} room{plural}\n").map_err(|_err| CatalogError::IO)
    }
}

//! Quotes

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::rooms::Price;

/// Tax applied to every stay, as a fraction (15%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Default tax rate as a percentage.
pub fn default_tax_rate() -> Percentage {
    Percentage::from(DEFAULT_TAX_RATE)
}

/// Errors that can occur while calculating a quote.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteError {
    /// The nightly rate is below zero.
    #[error("nightly rate must not be negative, got {0}")]
    NegativeRate(Decimal),

    /// The tax rate is outside `0 <= rate < 1`.
    #[error("tax rate must be at least 0 and below 1, got {0}")]
    InvalidTaxRate(Decimal),

    /// The amounts do not fit in a decimal.
    #[error("quote amounts overflowed")]
    Overflow,

    /// IO error
    #[error("IO error")]
    IO,
}

/// Price breakdown for a prospective stay.
///
/// Amounts are kept unrounded; rounding to the currency's minor unit only
/// happens when the quote is formatted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingQuote {
    nights: u32,
    nightly_rate: Price,
    tax_rate: Decimal,
    subtotal: Price,
    taxes: Price,
    total: Price,
}

impl BookingQuote {
    /// The quote shown while the form is incomplete.
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            nights: 0,
            nightly_rate: zero,
            tax_rate: DEFAULT_TAX_RATE,
            subtotal: zero,
            taxes: zero,
            total: zero,
        }
    }

    /// Number of nights quoted
    pub fn nights(&self) -> u32 {
        self.nights
    }

    /// Rate charged per night
    pub fn nightly_rate(&self) -> Price {
        self.nightly_rate
    }

    /// Tax rate applied to the subtotal
    pub fn tax_rate(&self) -> Percentage {
        Percentage::from(self.tax_rate)
    }

    /// Nights multiplied by the nightly rate
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Tax on the subtotal
    pub fn taxes(&self) -> Price {
        self.taxes
    }

    /// Subtotal plus taxes
    pub fn total(&self) -> Price {
        self.total
    }

    /// Currency of every amount in the quote
    pub fn currency(&self) -> &'static Currency {
        self.total.currency()
    }

    /// Check if nothing is being charged.
    pub fn is_zero(&self) -> bool {
        self.nights == 0 && self.total.amount().is_zero()
    }

    /// Writes the quote as a price summary table.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::IO`] if the summary cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), QuoteError> {
        let nights_label = if self.nights == 1 { "night" } else { "nights" };
        let tax_points = (self.tax_rate * Decimal::ONE_HUNDRED).normalize();

        let mut builder = Builder::default();

        builder.push_record([
            format!("{} x {} {nights_label}", self.nightly_rate, self.nights),
            format!("{}", self.subtotal),
        ]);
        builder.push_record([format!("Taxes ({tax_points}%)"), format!("{}", self.taxes)]);
        builder.push_record(["Total".to_string(), format!("{}", self.total)]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::last(), Alignment::right());

        writeln!(out, "\n{table}\n").map_err(|_err| QuoteError::IO)
    }
}

/// Calculates the quote for a stay.
///
/// # Errors
///
/// - [`QuoteError::NegativeRate`]: the nightly rate is below zero.
/// - [`QuoteError::InvalidTaxRate`]: the tax rate is negative or not below one.
/// - [`QuoteError::Overflow`]: the amounts do not fit in a decimal.
pub fn quote(
    nights: u32,
    nightly_rate: Price,
    tax_rate: Percentage,
) -> Result<BookingQuote, QuoteError> {
    let rate = *nightly_rate.amount();
    let tax_fraction = tax_rate * Decimal::ONE;

    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(QuoteError::NegativeRate(rate));
    }

    if (tax_fraction.is_sign_negative() && !tax_fraction.is_zero()) || tax_fraction >= Decimal::ONE
    {
        return Err(QuoteError::InvalidTaxRate(tax_fraction));
    }

    let subtotal = rate
        .checked_mul(Decimal::from(nights))
        .ok_or(QuoteError::Overflow)?;

    let taxes = subtotal
        .checked_mul(tax_fraction)
        .ok_or(QuoteError::Overflow)?;

    let total = subtotal.checked_add(taxes).ok_or(QuoteError::Overflow)?;

    let currency = nightly_rate.currency();

    Ok(BookingQuote {
        nights,
        nightly_rate,
        tax_rate: tax_fraction,
        subtotal: Money::from_decimal(subtotal, currency),
        taxes: Money::from_decimal(taxes, currency),
        total: Money::from_decimal(total, currency),
    })
}

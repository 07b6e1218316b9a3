//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jiff::civil::Date;
use rust_decimal::Decimal;

use luxora::{
    admin::MessageFilter,
    booking::GuestCount,
    rooms::{RoomCategory, RoomId},
};

/// Luxora booking tools configuration
#[derive(Debug, Parser)]
#[command(name = "luxora", about = "Luxora hotel booking tools", long_about = None)]
pub struct Config {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Room catalog fixture (YAML); the built-in catalog is used when omitted
    #[arg(long, env = "LUXORA_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Tax rate applied to room subtotals, as a fraction
    #[arg(long, env = "LUXORA_TAX_RATE", default_value = "0.15", global = true)]
    pub tax_rate: Decimal,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the rooms in the catalog
    Rooms {
        /// Only show rooms in this category (suite, deluxe, classic)
        #[arg(long)]
        category: Option<RoomCategory>,
    },

    /// Price a stay
    Quote(StayArgs),

    /// Submit a booking
    Book(BookArgs),

    /// Send a message through the contact form
    Contact(ContactArgs),

    /// Show the admin overview
    Dashboard {
        /// Which messages to list (all, new, replied, archived)
        #[arg(long, default_value = "all")]
        messages: MessageFilter,
    },
}

/// Room and dates of a stay.
#[derive(Debug, Args)]
pub struct StayArgs {
    /// Room id, e.g. 4
    #[arg(long)]
    pub room: RoomId,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: Date,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: Date,
}

/// Booking form fields.
#[derive(Debug, Args)]
pub struct BookArgs {
    /// Room and dates
    #[command(flatten)]
    pub stay: StayArgs,

    /// Number of guests (1-4)
    #[arg(long, default_value = "1", value_parser = parse_guests)]
    pub guests: GuestCount,

    /// Guest first name
    #[arg(long)]
    pub first_name: String,

    /// Guest last name
    #[arg(long)]
    pub last_name: String,

    /// Guest email
    #[arg(long)]
    pub email: String,

    /// Guest phone
    #[arg(long)]
    pub phone: String,

    /// Free-text special requests
    #[arg(long)]
    pub special_requests: Option<String>,
}

/// Contact form fields.
#[derive(Debug, Args)]
pub struct ContactArgs {
    /// Sender name
    #[arg(long)]
    pub name: String,

    /// Sender email
    #[arg(long)]
    pub email: String,

    /// Sender phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Subject line
    #[arg(long)]
    pub subject: String,

    /// Message body
    #[arg(long)]
    pub message: String,
}

fn parse_guests(value: &str) -> Result<GuestCount, String> {
    let count = value
        .parse::<u8>()
        .map_err(|error| format!("invalid guest count: {error}"))?;

    GuestCount::try_from(count).map_err(|error| error.to_string())
}

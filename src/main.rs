//! Luxora CLI

use std::{
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use decimal_percentage::Percentage;
use jiff::Zoned;
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};
use thiserror::Error;
use tracing::{error, info};

use luxora::{
    admin::{
        GuestMessage, HotelService, InMemoryMessagesRepository, InMemoryRoomsRepository,
        InMemoryServicesRepository, MessageFilter, MessagesRepository, RoomsRepository,
        RoomsSummary, ServicesRepository,
    },
    booking::{BookingForm, BookingReconciler, GuestDetails, RejectReason},
    catalog::{CatalogError, RoomCatalog},
    contact::{ContactError, ContactForm},
    fixtures::{FixtureError, load_catalog},
    notifications::{Notification, TracingSink},
    quote::{QuoteError, quote},
    rooms::RoomCategory,
    stay::{StayError, StayRange},
};

use crate::{
    config::{BookArgs, Command, Config, ContactArgs, StayArgs},
    observability::init_logging,
};

mod config;
mod observability;

/// Errors reported by the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Stay(#[from] StayError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("booking rejected: {0}")]
    Rejected(#[from] RejectReason),

    #[error("message not sent: {0}")]
    Contact(#[from] ContactError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let config = Config::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "command failed");

            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<(), CliError> {
    let tax_rate = Percentage::from(config.tax_rate);
    let fixture = config.catalog.as_deref();
    let out = io::stdout().lock();

    match config.command {
        Command::Rooms { category } => list_rooms(&catalog(fixture)?, category, out),
        Command::Quote(args) => quote_stay(&catalog(fixture)?, tax_rate, &args, out),
        Command::Book(args) => book(&catalog(fixture)?, tax_rate, args, out),
        Command::Contact(args) => contact(args, out),
        Command::Dashboard { messages } => dashboard(messages, out),
    }
}

fn catalog(fixture: Option<&Path>) -> Result<RoomCatalog, CliError> {
    match fixture {
        Some(path) => Ok(load_catalog(path)?),
        None => Ok(RoomCatalog::builtin()),
    }
}

fn list_rooms(
    catalog: &RoomCatalog,
    category: Option<RoomCategory>,
    out: impl Write,
) -> Result<(), CliError> {
    Ok(catalog.write_to(out, category)?)
}

fn quote_stay(
    catalog: &RoomCatalog,
    tax_rate: Percentage,
    args: &StayArgs,
    mut out: impl Write,
) -> Result<(), CliError> {
    let room = catalog.lookup(&args.room)?;
    let stay = StayRange::new(args.check_in, args.check_out)?;
    let quote = quote(stay.nights(), room.nightly_rate, tax_rate)?;

    info!(room = %room.id, nights = stay.nights(), total = %quote.total(), "quote calculated");

    writeln!(
        out,
        "{} | {} to {}",
        room.name,
        stay.check_in(),
        stay.check_out()
    )?;

    Ok(quote.write_to(out)?)
}

fn book(
    catalog: &RoomCatalog,
    tax_rate: Percentage,
    args: BookArgs,
    mut out: impl Write,
) -> Result<(), CliError> {
    let form = BookingForm {
        check_in: Some(args.stay.check_in),
        check_out: Some(args.stay.check_out),
        room: Some(args.stay.room),
        guests: args.guests,
        guest: GuestDetails {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
        },
        special_requests: args.special_requests.unwrap_or_default(),
    };

    let mut reconciler = BookingReconciler::with_form(catalog, form).with_tax_rate(tax_rate);

    match reconciler.submit(&mut TracingSink) {
        Ok(request) => {
            writeln!(out, "{}", Notification::booking_confirmed(&request))?;
            writeln!(
                out,
                "{} | {} | {} to {}",
                request.guest.full_name(),
                request.guests,
                request.stay.check_in(),
                request.stay.check_out()
            )?;

            Ok(request.quote.write_to(out)?)
        }
        Err(reason) => {
            writeln!(out, "{}", Notification::booking_rejected(&reason))?;

            Err(reason.into())
        }
    }
}

fn contact(args: ContactArgs, mut out: impl Write) -> Result<(), CliError> {
    let mut inbox = InMemoryMessagesRepository::seeded();

    let mut form = ContactForm {
        name: args.name,
        email: args.email,
        phone: args.phone.unwrap_or_default(),
        subject: args.subject,
        message: args.message,
    };

    let message = form.submit(&mut inbox, Zoned::now().datetime())?;

    writeln!(out, "{}", Notification::message_sent())?;

    write_messages(&[message], &mut out)?;
    inbox.counts().write_to(out)?;

    Ok(())
}

fn dashboard(filter: MessageFilter, mut out: impl Write) -> Result<(), CliError> {
    let rooms = InMemoryRoomsRepository::seeded();
    let services = InMemoryServicesRepository::seeded();
    let messages = InMemoryMessagesRepository::seeded();

    RoomsSummary::from_rooms(&rooms.list(), rooms.currency()).write_to(&mut out)?;
    write_services(&services.list(), &mut out)?;
    messages.counts().write_to(&mut out)?;
    write_messages(&messages.list_by_status(filter), out)?;

    Ok(())
}

fn write_services(services: &[HotelService], mut out: impl Write) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Service", "Category", "Pricing", "Status"]);

    for service in services {
        builder.push_record([
            service.name.clone(),
            service.category.clone(),
            service.pricing.clone(),
            service.status.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")
}

fn write_messages(messages: &[GuestMessage], mut out: impl Write) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["#", "From", "Subject", "Status", "Received"]);

    for message in messages {
        builder.push_record([
            message.id.to_string(),
            message.name.clone(),
            message.subject.clone(),
            message.status.to_string(),
            message.received_at.strftime("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")
}

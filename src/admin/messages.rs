//! Guest Messages
//!
//! The inbox fed by the contact form. Staff mark messages as replied or
//! archive them, and the message page filters by status.

use std::{fmt, io, str::FromStr};

use jiff::civil::{DateTime, datetime};
use mockall::automock;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::info;

use crate::admin::{AdminError, RecordId, next_id, require};

/// Error returned when a message filter is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message filter: {0}")]
pub struct UnknownFilter(pub String);

/// Handling status of a guest message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageStatus {
    /// Not yet handled
    #[default]
    New,

    /// Answered by staff
    Replied,

    /// Filed away
    Archived,
}

impl MessageStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::New, Self::Replied, Self::Archived];

    /// How a change to this status is described, e.g. "marked as replied".
    pub fn action_label(self) -> &'static str {
        match self {
            Self::New => "marked as new",
            Self::Replied => "marked as replied",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::New => "New",
            Self::Replied => "Replied",
            Self::Archived => "Archived",
        })
    }
}

/// Which messages to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFilter {
    /// Every message
    #[default]
    All,

    /// Only messages with this status
    Status(MessageStatus),
}

impl MessageFilter {
    /// Check if a message passes the filter.
    pub fn matches(self, message: &GuestMessage) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => message.status == status,
        }
    }
}

impl FromStr for MessageFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = s.trim();

        if filter.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        MessageStatus::ALL
            .into_iter()
            .find(|status| filter.eq_ignore_ascii_case(&status.to_string()))
            .map(Self::Status)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// A message left by a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestMessage {
    /// Record id
    pub id: RecordId,

    /// Sender name
    pub name: String,

    /// Sender email
    pub email: String,

    /// Sender phone, if given
    pub phone: Option<String>,

    /// Subject line
    pub subject: String,

    /// Message body
    pub message: String,

    /// Handling status
    pub status: MessageStatus,

    /// When the message arrived
    pub received_at: DateTime,
}

/// A message about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Sender name
    pub name: String,

    /// Sender email
    pub email: String,

    /// Sender phone, if given
    pub phone: Option<String>,

    /// Subject line
    pub subject: String,

    /// Message body
    pub message: String,

    /// When the message arrived
    pub received_at: DateTime,
}

/// Number of messages per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCounts {
    /// Unhandled messages
    pub new: usize,

    /// Answered messages
    pub replied: usize,

    /// Archived messages
    pub archived: usize,
}

impl MessageCounts {
    /// Tallies `messages` by status.
    pub fn tally<'a>(messages: impl IntoIterator<Item = &'a GuestMessage>) -> Self {
        messages
            .into_iter()
            .fold(Self::default(), |mut counts, message| {
                match message.status {
                    MessageStatus::New => counts.new += 1,
                    MessageStatus::Replied => counts.replied += 1,
                    MessageStatus::Archived => counts.archived += 1,
                }

                counts
            })
    }

    /// Count for a single status.
    pub fn get(&self, status: MessageStatus) -> usize {
        match status {
            MessageStatus::New => self.new,
            MessageStatus::Replied => self.replied,
            MessageStatus::Archived => self.archived,
        }
    }

    /// Total number of messages.
    pub fn total(&self) -> usize {
        self.new + self.replied + self.archived
    }

    /// Writes the counts as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Messages", "Count"]);
        builder.push_record(["All".to_string(), self.total().to_string()]);

        for status in MessageStatus::ALL {
            builder.push_record([status.to_string(), self.get(status).to_string()]);
        }

        let mut table = builder.build();

        table
            .with(Style::modern_rounded())
            .modify(Columns::one(1), Alignment::right());

        writeln!(out, "{table}")
    }
}

/// Store of guest messages.
#[automock]
pub trait MessagesRepository {
    /// All messages, in arrival order.
    fn list(&self) -> Vec<GuestMessage>;

    /// A single message.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no message has this id.
    fn get(&self, id: RecordId) -> Result<GuestMessage, AdminError>;

    /// Stores a new message as [`MessageStatus::New`].
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::MissingRequiredData`] if a required field is blank.
    fn create(&mut self, message: NewMessage) -> Result<GuestMessage, AdminError>;

    /// Changes a message's status.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no message has this id.
    fn set_status(
        &mut self,
        id: RecordId,
        status: MessageStatus,
    ) -> Result<GuestMessage, AdminError>;

    /// Removes a message, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no message has this id.
    fn delete(&mut self, id: RecordId) -> Result<GuestMessage, AdminError>;

    /// Messages passing `filter`, in arrival order.
    fn list_by_status(&self, filter: MessageFilter) -> Vec<GuestMessage> {
        self.list()
            .into_iter()
            .filter(|message| filter.matches(message))
            .collect()
    }

    /// Number of messages per status.
    fn counts(&self) -> MessageCounts {
        MessageCounts::tally(&self.list())
    }
}

/// Messages held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessagesRepository {
    messages: Vec<GuestMessage>,
}

impl InMemoryMessagesRepository {
    /// The messages the admin panel starts with.
    pub fn seeded() -> Self {
        let message = |id,
                       name: &str,
                       email: &str,
                       phone: Option<&str>,
                       subject: &str,
                       body: &str,
                       status,
                       received_at| GuestMessage {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            subject: subject.to_string(),
            message: body.to_string(),
            status,
            received_at,
        };

        Self {
            messages: vec![
                message(
                    1,
                    "John Smith",
                    "john.smith@email.com",
                    Some("+1 (555) 123-4567"),
                    "Special Dietary Requirements",
                    "I have celiac disease and would like to know about gluten-free dining options during my stay next month.",
                    MessageStatus::New,
                    datetime(2024, 1, 15, 10, 30, 0, 0),
                ),
                message(
                    2,
                    "Maria Garcia",
                    "maria.garcia@email.com",
                    None,
                    "Wedding Event Inquiry",
                    "I'm planning my wedding for June and would love to discuss venue options and catering packages. Can we schedule a consultation?",
                    MessageStatus::Replied,
                    datetime(2024, 1, 15, 8, 15, 0, 0),
                ),
                message(
                    3,
                    "Robert Brown",
                    "robert.brown@email.com",
                    Some("+1 (555) 987-6543"),
                    "Transportation Service",
                    "Do you provide airport shuttle service? I'm arriving at LAX on Friday evening and would appreciate assistance with transportation to the hotel.",
                    MessageStatus::New,
                    datetime(2024, 1, 14, 18, 45, 0, 0),
                ),
                message(
                    4,
                    "Jennifer Lee",
                    "jennifer.lee@email.com",
                    None,
                    "Spa Appointment Request",
                    "I'd like to book a couples massage for my anniversary celebration. What packages do you recommend for a romantic spa experience?",
                    MessageStatus::Replied,
                    datetime(2024, 1, 14, 14, 20, 0, 0),
                ),
                message(
                    5,
                    "Michael Thompson",
                    "michael.thompson@email.com",
                    None,
                    "Business Meeting Facilities",
                    "I need to host a board meeting for 12 people next week. Do you have conference rooms available with AV equipment and catering options?",
                    MessageStatus::Archived,
                    datetime(2024, 1, 13, 11, 10, 0, 0),
                ),
            ],
        }
    }
}

impl MessagesRepository for InMemoryMessagesRepository {
    fn list(&self) -> Vec<GuestMessage> {
        self.messages.clone()
    }

    fn get(&self, id: RecordId) -> Result<GuestMessage, AdminError> {
        self.messages
            .iter()
            .find(|message| message.id == id)
            .cloned()
            .ok_or(AdminError::NotFound(id))
    }

    fn create(&mut self, message: NewMessage) -> Result<GuestMessage, AdminError> {
        require("name", &message.name)?;
        require("email", &message.email)?;
        require("subject", &message.subject)?;
        require("message", &message.message)?;

        let stored = GuestMessage {
            id: next_id(self.messages.iter().map(|message| message.id))?,
            name: message.name,
            email: message.email,
            phone: message.phone.filter(|phone| !phone.trim().is_empty()),
            subject: message.subject,
            message: message.message,
            status: MessageStatus::New,
            received_at: message.received_at,
        };

        info!(id = stored.id, subject = %stored.subject, "message received");

        self.messages.push(stored.clone());

        Ok(stored)
    }

    fn set_status(
        &mut self,
        id: RecordId,
        status: MessageStatus,
    ) -> Result<GuestMessage, AdminError> {
        let message = self
            .messages
            .iter_mut()
            .find(|message| message.id == id)
            .ok_or(AdminError::NotFound(id))?;

        message.status = status;

        info!(id, %status, "message status changed");

        Ok(message.clone())
    }

    fn delete(&mut self, id: RecordId) -> Result<GuestMessage, AdminError> {
        let position = self
            .messages
            .iter()
            .position(|message| message.id == id)
            .ok_or(AdminError::NotFound(id))?;

        let message = self.messages.remove(position);

        info!(id, name = %message.name, "message deleted");

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn new_message(subject: &str) -> NewMessage {
        NewMessage {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("  ".to_string()),
            subject: subject.to_string(),
            message: "Is the pool heated in winter?".to_string(),
            received_at: datetime(2024, 2, 1, 9, 0, 0, 0),
        }
    }

    #[test]
    fn seeded_counts_per_status() {
        let counts = InMemoryMessagesRepository::seeded().counts();

        assert_eq!(
            counts,
            MessageCounts {
                new: 2,
                replied: 2,
                archived: 1,
            }
        );
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn filter_by_status() {
        let messages = InMemoryMessagesRepository::seeded();

        let replied: Vec<_> = messages
            .list_by_status(MessageFilter::Status(MessageStatus::Replied))
            .into_iter()
            .map(|message| message.name)
            .collect();

        assert_eq!(replied, ["Maria Garcia", "Jennifer Lee"]);
        assert_eq!(messages.list_by_status(MessageFilter::All).len(), 5);
    }

    #[test]
    fn filter_parses_case_insensitively() -> TestResult {
        assert_eq!("all".parse::<MessageFilter>()?, MessageFilter::All);
        assert_eq!(
            "ARCHIVED".parse::<MessageFilter>()?,
            MessageFilter::Status(MessageStatus::Archived)
        );
        assert_eq!(
            "pending".parse::<MessageFilter>(),
            Err(UnknownFilter("pending".to_string()))
        );

        Ok(())
    }

    #[test]
    fn create_stores_new_message() -> TestResult {
        let mut messages = InMemoryMessagesRepository::seeded();

        let stored = messages.create(new_message("Pool hours"))?;

        assert_eq!(stored.id, 6);
        assert_eq!(stored.status, MessageStatus::New);
        assert_eq!(stored.phone, None);
        assert_eq!(messages.counts().new, 3);

        Ok(())
    }

    #[test]
    fn create_requires_subject() {
        let mut messages = InMemoryMessagesRepository::default();

        assert_eq!(
            messages.create(new_message("")),
            Err(AdminError::MissingRequiredData("subject"))
        );
        assert!(messages.list().is_empty());
    }

    #[test]
    fn set_status_moves_message_between_filters() -> TestResult {
        let mut messages = InMemoryMessagesRepository::seeded();

        messages.set_status(1, MessageStatus::Archived)?;

        let counts = messages.counts();

        assert_eq!(counts.new, 1);
        assert_eq!(counts.archived, 2);

        Ok(())
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut messages = InMemoryMessagesRepository::seeded();

        assert_eq!(
            messages.set_status(10, MessageStatus::Replied),
            Err(AdminError::NotFound(10))
        );
        assert_eq!(messages.delete(10), Err(AdminError::NotFound(10)));
    }

    #[test]
    fn action_labels() {
        assert_eq!(MessageStatus::New.action_label(), "marked as new");
        assert_eq!(MessageStatus::Replied.action_label(), "marked as replied");
        assert_eq!(MessageStatus::Archived.action_label(), "archived");
    }

    #[test]
    fn counts_table_lists_every_status() -> TestResult {
        let mut out = Vec::new();

        InMemoryMessagesRepository::seeded()
            .counts()
            .write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        for label in ["All", "New", "Replied", "Archived"] {
            assert!(rendered.contains(label), "missing {label}");
        }

        Ok(())
    }
}

//! Contact Form

use std::fmt;

use jiff::civil::DateTime;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{info, warn};

use crate::admin::{AdminError, GuestMessage, MessagesRepository, NewMessage};

/// Field the contact form cannot be sent without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Sender name
    Name,

    /// Sender email
    Email,

    /// Subject line
    Subject,

    /// Message body
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        })
    }
}

/// Errors returned when sending the contact form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    /// Required fields are blank.
    #[error("missing required fields: {}", join(.0))]
    MissingFields(SmallVec<[ContactField; 4]>),

    /// The inbox refused the message.
    #[error(transparent)]
    Inbox(#[from] AdminError),
}

fn join(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The public contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender name
    pub name: String,

    /// Sender email
    pub email: String,

    /// Sender phone, optional
    pub phone: String,

    /// Subject line
    pub subject: String,

    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Required fields that are blank.
    pub fn missing_fields(&self) -> SmallVec<[ContactField; 4]> {
        [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Subject, &self.subject),
            (ContactField::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Sends the form to `inbox` and clears it.
    ///
    /// A failed send leaves the form as it was.
    ///
    /// # Errors
    ///
    /// - [`ContactError::MissingFields`]: name, email, subject or message is blank.
    /// - [`ContactError::Inbox`]: the inbox could not store the message.
    pub fn submit(
        &mut self,
        inbox: &mut impl MessagesRepository,
        received_at: DateTime,
    ) -> Result<GuestMessage, ContactError> {
        let missing = self.missing_fields();

        if !missing.is_empty() {
            let error = ContactError::MissingFields(missing);

            warn!(%error, "contact form rejected");

            return Err(error);
        }

        let phone = self.phone.trim();

        let stored = inbox.create(NewMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            received_at,
        })?;

        info!(id = stored.id, "contact message sent");

        *self = Self::default();

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;
    use testresult::TestResult;

    use crate::admin::{
        InMemoryMessagesRepository, MessageStatus, messages::MockMessagesRepository,
    };

    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: " Ana Silva ".to_string(),
            email: "ana@example.com".to_string(),
            phone: String::new(),
            subject: "Late arrival".to_string(),
            message: "We land at midnight, is the front desk open?".to_string(),
        }
    }

    #[test]
    fn blank_form_reports_required_fields() {
        assert_eq!(
            ContactForm::default().missing_fields().as_slice(),
            [
                ContactField::Name,
                ContactField::Email,
                ContactField::Subject,
                ContactField::Message
            ]
        );
    }

    #[test]
    fn phone_is_optional() {
        assert!(filled().missing_fields().is_empty());
    }

    #[test]
    fn submit_stores_new_message_and_resets() -> TestResult {
        let mut inbox = InMemoryMessagesRepository::default();
        let mut form = filled();

        let stored = form.submit(&mut inbox, datetime(2024, 2, 1, 23, 5, 0, 0))?;

        assert_eq!(stored.name, "Ana Silva");
        assert_eq!(stored.phone, None);
        assert_eq!(stored.status, MessageStatus::New);
        assert_eq!(inbox.list().len(), 1);
        assert_eq!(form, ContactForm::default());

        Ok(())
    }

    #[test]
    fn incomplete_form_never_reaches_inbox() {
        let mut inbox = MockMessagesRepository::new();
        inbox.expect_create().never();

        let mut form = ContactForm {
            subject: "  ".to_string(),
            ..filled()
        };

        let result = form.submit(&mut inbox, datetime(2024, 2, 1, 9, 0, 0, 0));

        assert_eq!(
            result,
            Err(ContactError::MissingFields(SmallVec::from_slice(&[
                ContactField::Subject
            ])))
        );
        assert_eq!(form.subject, "  ");
    }

    #[test]
    fn inbox_failure_keeps_form() {
        let mut inbox = MockMessagesRepository::new();
        inbox
            .expect_create()
            .times(1)
            .returning(|_| Err(AdminError::IdsExhausted));

        let mut form = filled();

        let result = form.submit(&mut inbox, datetime(2024, 2, 1, 9, 0, 0, 0));

        assert_eq!(result, Err(ContactError::Inbox(AdminError::IdsExhausted)));
        assert_eq!(form, filled());
    }

    #[test]
    fn error_lists_missing_fields() {
        let error = ContactError::MissingFields(SmallVec::from_slice(&[
            ContactField::Name,
            ContactField::Message,
        ]));

        assert_eq!(error.to_string(), "missing required fields: name, message");
    }
}

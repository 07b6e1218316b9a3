//! Booking Reconciler

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    booking::{BookingForm, BookingRequest, RejectReason, RequiredField},
    catalog::RoomCatalog,
    notifications::BookingSink,
    quote::{BookingQuote, DEFAULT_TAX_RATE, quote},
    rooms::RoomOffering,
    stay::{StayError, StayRange},
};

/// Where a booking form stands.
///
/// Submission is not a resting state: an accepted submit hands the request
/// to the sink and the form is back to [`FormState::Empty`] straight away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// No dates and no room chosen.
    Empty,

    /// Something chosen, but not everything required.
    Partial,

    /// Everything required is present and valid.
    Ready,
}

/// Outcome of reconciling a form against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    /// Required fields are still missing.
    Partial(SmallVec<[RequiredField; 4]>),

    /// The form describes a complete booking.
    Ready(Box<BookingRequest>),
}

/// Decides whether a form describes a complete booking.
///
/// An unknown room counts as no room. Missing fields are reported before the
/// date order is checked.
///
/// # Errors
///
/// - [`RejectReason::InvalidRange`]: both dates are set but check-out is not after check-in.
/// - [`RejectReason::Quote`]: the room's rate or the tax rate is invalid.
pub fn reconcile(
    form: &BookingForm,
    catalog: &RoomCatalog,
    tax_rate: Percentage,
) -> Result<Reconciled, RejectReason> {
    let room = resolve_room(form, catalog);
    let missing = form.missing_fields(room.is_some());

    let (Some(room), Some(check_in), Some(check_out), true) =
        (room, form.check_in, form.check_out, missing.is_empty())
    else {
        return Ok(Reconciled::Partial(missing));
    };

    let stay = StayRange::new(check_in, check_out).map_err(|_err| RejectReason::InvalidRange {
        check_in,
        check_out,
    })?;

    let quote = quote(stay.nights(), room.nightly_rate, tax_rate)?;

    Ok(Reconciled::Ready(Box::new(BookingRequest {
        guest: form.guest.clone(),
        guests: form.guests,
        room: room.clone(),
        stay,
        special_requests: form.special_requests().map(str::to_string),
        quote,
    })))
}

fn resolve_room<'c>(form: &BookingForm, catalog: &'c RoomCatalog) -> Option<&'c RoomOffering> {
    let id = form.room.as_ref()?;

    match catalog.lookup(id) {
        Ok(room) => Some(room),
        Err(error) => {
            debug!(%error, "treating unknown room as unselected");
            None
        }
    }
}

/// Drives a booking form: live quote, state and submission.
#[derive(Debug)]
pub struct BookingReconciler<'a> {
    catalog: &'a RoomCatalog,
    tax_rate: Decimal,
    form: BookingForm,
}

impl<'a> BookingReconciler<'a> {
    /// Creates a reconciler with an empty form and the default tax rate.
    pub fn new(catalog: &'a RoomCatalog) -> Self {
        Self::with_form(catalog, BookingForm::default())
    }

    /// Creates a reconciler starting from the given form.
    pub fn with_form(catalog: &'a RoomCatalog, form: BookingForm) -> Self {
        Self {
            catalog,
            tax_rate: DEFAULT_TAX_RATE,
            form,
        }
    }

    /// Replaces the tax rate used for quotes.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: Percentage) -> Self {
        self.tax_rate = tax_rate * Decimal::ONE;
        self
    }

    /// Current form fields.
    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Current form fields, mutably.
    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    /// Where the form currently stands.
    pub fn state(&self) -> FormState {
        if self.form.is_empty() {
            return FormState::Empty;
        }

        match self.reconcile() {
            Ok(Reconciled::Ready(_)) => FormState::Ready,
            Ok(Reconciled::Partial(_)) | Err(_) => FormState::Partial,
        }
    }

    /// Reconciles the current form against the catalog.
    ///
    /// # Errors
    ///
    /// See [`reconcile`].
    pub fn reconcile(&self) -> Result<Reconciled, RejectReason> {
        reconcile(&self.form, self.catalog, Percentage::from(self.tax_rate))
    }

    /// Live quote for the summary panel.
    ///
    /// This only needs the dates and a known room; guest details are not
    /// required. Anything short of that gives the zero quote.
    pub fn quote(&self) -> BookingQuote {
        let zero = BookingQuote::zero(self.catalog.currency());

        let Some(room) = resolve_room(&self.form, self.catalog) else {
            return zero;
        };

        let (Some(check_in), Some(check_out)) = (self.form.check_in, self.form.check_out) else {
            return zero;
        };

        let nights = match StayRange::new(check_in, check_out) {
            Ok(stay) => stay.nights(),
            Err(StayError::InvalidRange { .. } | StayError::Date(_)) => return zero,
        };

        quote(nights, room.nightly_rate, Percentage::from(self.tax_rate)).unwrap_or(zero)
    }

    /// Submits the form.
    ///
    /// On success the request is handed to `sink` once and the form is reset.
    /// On failure `sink` hears the reason and the form is left untouched.
    ///
    /// # Errors
    ///
    /// - [`RejectReason::MissingRequiredField`]: dates, a known room or guest details are missing.
    /// - [`RejectReason::InvalidRange`]: check-out is not after check-in.
    /// - [`RejectReason::Quote`]: the quote could not be calculated.
    pub fn submit(&mut self, sink: &mut impl BookingSink) -> Result<BookingRequest, RejectReason> {
        let outcome = match self.reconcile() {
            Ok(Reconciled::Ready(request)) => Ok(*request),
            Ok(Reconciled::Partial(missing)) => Err(RejectReason::MissingRequiredField(missing)),
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(request) => {
                sink.confirmed(&request);
                self.form.reset();

                Ok(request)
            }
            Err(reason) => {
                sink.rejected(&reason);

                Err(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use mockall::predicate::always;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        booking::GuestDetails, notifications::MockBookingSink, quote::default_tax_rate,
        rooms::RoomId,
    };

    use super::*;

    fn guest() -> GuestDetails {
        GuestDetails {
            first_name: "Emily".to_string(),
            last_name: "Rodriguez".to_string(),
            email: "emily@example.com".to_string(),
            phone: "+1 (555) 010-2030".to_string(),
        }
    }

    fn ready_form() -> BookingForm {
        BookingForm {
            check_in: Some(date(2024, 3, 1)),
            check_out: Some(date(2024, 3, 4)),
            room: Some(RoomId::from("4")),
            guest: guest(),
            ..BookingForm::default()
        }
    }

    #[test]
    fn empty_form_is_empty_with_zero_quote() {
        let catalog = RoomCatalog::builtin();
        let reconciler = BookingReconciler::new(&catalog);

        assert_eq!(reconciler.state(), FormState::Empty);
        assert!(reconciler.quote().is_zero());
    }

    #[test]
    fn guest_details_alone_keep_form_empty() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            guest: guest(),
            ..BookingForm::default()
        };

        assert_eq!(
            BookingReconciler::with_form(&catalog, form).state(),
            FormState::Empty
        );
    }

    #[test]
    fn dates_without_room_are_partial_with_zero_quote() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            room: None,
            ..ready_form()
        };

        let reconciler = BookingReconciler::with_form(&catalog, form);

        assert_eq!(reconciler.state(), FormState::Partial);
        assert!(reconciler.quote().is_zero());
    }

    #[test]
    fn unknown_room_keeps_quote_at_zero() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            room: Some(RoomId::from("42")),
            ..ready_form()
        };

        let reconciler = BookingReconciler::with_form(&catalog, form);

        assert_eq!(reconciler.state(), FormState::Partial);
        assert!(reconciler.quote().is_zero());
    }

    #[test]
    fn live_quote_does_not_need_guest_details() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            guest: GuestDetails::default(),
            ..ready_form()
        };

        let reconciler = BookingReconciler::with_form(&catalog, form);

        assert_eq!(reconciler.state(), FormState::Partial);
        assert_eq!(reconciler.quote().total(), Money::from_major(2070, USD));
    }

    #[test]
    fn inverted_dates_keep_quote_at_zero() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            check_in: Some(date(2024, 3, 4)),
            check_out: Some(date(2024, 3, 1)),
            ..ready_form()
        };

        let reconciler = BookingReconciler::with_form(&catalog, form);

        assert_eq!(reconciler.state(), FormState::Partial);
        assert!(reconciler.quote().is_zero());
    }

    #[test]
    fn complete_form_is_ready() -> TestResult {
        let catalog = RoomCatalog::builtin();
        let reconciler = BookingReconciler::with_form(&catalog, ready_form());

        assert_eq!(reconciler.state(), FormState::Ready);

        let request = match reconciler.reconcile()? {
            Reconciled::Ready(request) => Some(request),
            Reconciled::Partial(_) => None,
        }
        .ok_or("Expected a ready form")?;

        assert_eq!(request.stay.nights(), 3);
        assert_eq!(request.room.name, "Deluxe Ocean Room");
        assert_eq!(request.special_requests, None);

        Ok(())
    }

    #[test]
    fn reconcile_reports_every_missing_field() -> TestResult {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm::for_room("1");

        let reconciled = reconcile(&form, &catalog, default_tax_rate())?;

        assert_eq!(
            reconciled,
            Reconciled::Partial(SmallVec::from_slice(&[
                RequiredField::CheckIn,
                RequiredField::CheckOut,
                RequiredField::FirstName,
                RequiredField::LastName,
                RequiredField::Email,
                RequiredField::Phone,
            ]))
        );

        Ok(())
    }

    #[test]
    fn reconcile_rejects_same_day_stay() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            check_out: Some(date(2024, 3, 1)),
            ..ready_form()
        };

        assert_eq!(
            reconcile(&form, &catalog, default_tax_rate()),
            Err(RejectReason::InvalidRange {
                check_in: date(2024, 3, 1),
                check_out: date(2024, 3, 1),
            })
        );
    }

    #[test]
    fn submit_emits_once_and_resets() -> TestResult {
        let catalog = RoomCatalog::builtin();
        let mut reconciler = BookingReconciler::with_form(&catalog, ready_form());
        let mut sink = MockBookingSink::new();

        sink.expect_confirmed()
            .withf(|request: &BookingRequest| {
                request.quote.total() == Money::from_major(2070, USD)
            })
            .times(1)
            .return_const(());
        sink.expect_rejected().never();

        let request = reconciler.submit(&mut sink)?;

        assert_eq!(request.quote.subtotal(), Money::from_major(1800, USD));
        assert_eq!(reconciler.state(), FormState::Empty);
        assert_eq!(reconciler.form(), &BookingForm::default());

        Ok(())
    }

    #[test]
    fn rejected_submit_keeps_form() {
        let catalog = RoomCatalog::builtin();
        let form = BookingForm {
            room: None,
            ..ready_form()
        };
        let mut reconciler = BookingReconciler::with_form(&catalog, form.clone());
        let mut sink = MockBookingSink::new();

        sink.expect_confirmed().never();
        sink.expect_rejected().with(always()).times(1).return_const(());

        let result = reconciler.submit(&mut sink);

        assert!(matches!(
            result,
            Err(RejectReason::MissingRequiredField(ref fields)) if fields.as_slice() == [RequiredField::Room]
        ));
        assert_eq!(reconciler.form(), &form);
        assert_eq!(reconciler.state(), FormState::Partial);
    }

    #[test]
    fn custom_tax_rate_flows_into_quote() {
        let catalog = RoomCatalog::builtin();
        let reconciler = BookingReconciler::with_form(&catalog, ready_form())
            .with_tax_rate(Percentage::from(Decimal::ZERO));

        assert_eq!(reconciler.quote().total(), Money::from_major(1800, USD));
    }

    #[test]
    fn form_mut_edits_are_seen_by_quote() {
        let catalog = RoomCatalog::builtin();
        let mut reconciler = BookingReconciler::new(&catalog);

        reconciler.form_mut().room = Some(RoomId::from("6"));
        reconciler.form_mut().check_in = Some(date(2024, 5, 10));
        reconciler.form_mut().check_out = Some(date(2024, 5, 12));

        assert_eq!(reconciler.quote().subtotal(), Money::from_major(700, USD));
    }
}

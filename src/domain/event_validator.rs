//! Cross-field rules for an event submission.
//!
//! [`EventValidator`] checks the price pair and the ordering of the four
//! instants. Every rule runs independently, so a single submission can
//! collect several errors; the returned list keeps rule order:
//!
//! 1. price consistency (`basePrice`, `maxPrice`, object-level `wrongPrices`)
//! 2. `endEventDateTime`
//! 3. `beginEventDateTime`
//! 4. `closeEnrollmentDateTime`
//!
//! Comparisons are strict: two equal instants never conflict.

use chrono::NaiveDateTime;

use super::EventSubmission;
use super::validation::{ValidationErrors, WRONG_PRICES, WRONG_VALUE};

/// Stateless validator for [`EventSubmission`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventValidator;

impl EventValidator {
    /// Runs every rule against `submission` and returns the violations in
    /// rule order. An empty list means the submission is acceptable.
    #[must_use]
    pub fn validate(&self, submission: &EventSubmission) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check_prices(submission, &mut errors);
        check_end_event(submission, &mut errors);
        check_begin_event(submission, &mut errors);
        check_close_enrollment(submission, &mut errors);
        errors
    }
}

// A max price of 0 means "no maximum", so the pair is only compared when
// a maximum exists.
fn check_prices(s: &EventSubmission, errors: &mut ValidationErrors) {
    if s.base_price > s.max_price && s.max_price > 0 {
        errors.reject_value(
            "basePrice",
            WRONG_VALUE,
            "BasePrice is Wrong.",
            Some(s.base_price.into()),
        );
        errors.reject_value(
            "maxPrice",
            WRONG_VALUE,
            "MaxPrice is Wrong.",
            Some(s.max_price.into()),
        );
        errors.reject(WRONG_PRICES, "Values for prices are wrong");
    }
}

fn check_end_event(s: &EventSubmission, errors: &mut ValidationErrors) {
    let end = s.end_event_date_time;
    if end < s.begin_event_date_time
        || end < s.close_enrollment_date_time
        || end < s.begin_enrollment_date_time
    {
        errors.reject_value(
            "endEventDateTime",
            WRONG_VALUE,
            "EndEventDateTime is Wrong.",
            Some(instant(end)),
        );
    }
}

fn check_begin_event(s: &EventSubmission, errors: &mut ValidationErrors) {
    let begin = s.begin_event_date_time;
    if begin > s.end_event_date_time
        || begin < s.close_enrollment_date_time
        || begin < s.begin_enrollment_date_time
    {
        errors.reject_value(
            "beginEventDateTime",
            WRONG_VALUE,
            "BeginEventDateTime is Wrong.",
            Some(instant(begin)),
        );
    }
}

fn check_close_enrollment(s: &EventSubmission, errors: &mut ValidationErrors) {
    let close = s.close_enrollment_date_time;
    if close < s.begin_enrollment_date_time
        || close > s.begin_event_date_time
        || close > s.end_event_date_time
    {
        errors.reject_value(
            "closeEnrollmentDateTime",
            WRONG_VALUE,
            "CloseEnrollmentDateTime is Wrong.",
            Some(instant(close)),
        );
    }
}

fn instant(at: NaiveDateTime) -> serde_json::Value {
    serde_json::Value::String(at.format("%Y-%m-%dT%H:%M:%S").to_string())
}

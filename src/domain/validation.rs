//! Structured validation failures.
//!
//! A failed check is ordinary data, not a fault: every check appends a
//! [`FieldError`] to an ordered [`ValidationErrors`] list and the caller
//! decides what a non-empty list means (the HTTP layer turns it into a
//! `400 Bad Request`).

use serde::Serialize;
use utoipa::ToSchema;

/// Object name reported on every error raised against an event submission.
pub const SUBMISSION_OBJECT: &str = "eventSubmission";

/// Error code for a value that violates a cross-field rule.
pub const WRONG_VALUE: &str = "wrongValue";

/// Error code for the object-level price pair rule.
pub const WRONG_PRICES: &str = "wrongPrices";

/// Error code for a required text field that is missing or empty.
pub const NOT_EMPTY: &str = "notEmpty";

/// Error code for a required field that is missing.
pub const NOT_NULL: &str = "notNull";

/// Error code for a number below its lower bound.
pub const MIN: &str = "min";

/// A single rejected field, or the submission as a whole when `field` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Name of the validated object.
    pub object_name: String,
    /// JSON key of the offending field; absent for object-level errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Machine-readable error code (e.g. `wrongValue`).
    pub code: String,
    /// Human-readable message.
    pub default_message: String,
    /// The value that was rejected, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub rejected_value: Option<serde_json::Value>,
}

impl FieldError {
    /// Returns `true` if this error names the given field.
    #[must_use]
    pub fn is_for(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }

    /// Returns `true` if this is an object-level error.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.field.is_none()
    }
}

/// Ordered, append-only list of [`FieldError`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Rejects a single field.
    pub fn reject_value(
        &mut self,
        field: &str,
        code: &str,
        message: &str,
        rejected: Option<serde_json::Value>,
    ) {
        self.0.push(FieldError {
            object_name: SUBMISSION_OBJECT.to_string(),
            field: Some(field.to_string()),
            code: code.to_string(),
            default_message: message.to_string(),
            rejected_value: rejected,
        });
    }

    /// Rejects the submission as a whole.
    pub fn reject(&mut self, code: &str, message: &str) {
        self.0.push(FieldError {
            object_name: SUBMISSION_OBJECT.to_string(),
            field: None,
            code: code.to_string(),
            default_message: message.to_string(),
            rejected_value: None,
        });
    }

    /// Returns `true` if no check failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the errors in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns `true` if any error names the given field.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.is_for(field))
    }

    /// Returns `true` if any object-level error carries the given code.
    #[must_use]
    pub fn has_global(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.is_global() && e.code == code)
    }

    /// Consumes the list, yielding the errors in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// Converts to `Ok(value)` when empty, `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns the list itself when at least one check failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            match &err.field {
                Some(field) => write!(f, "{field}: {}", err.default_message)?,
                None => f.write_str(&err.default_message)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut errors = ValidationErrors::new();
        errors.reject_value("basePrice", WRONG_VALUE, "BasePrice is Wrong.", None);
        errors.reject(WRONG_PRICES, "Values for prices are wrong");

        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec![WRONG_VALUE, WRONG_PRICES]);
        assert!(errors.has_field("basePrice"));
        assert!(errors.has_global(WRONG_PRICES));
        assert!(!errors.has_global(WRONG_VALUE));
    }

    #[test]
    fn object_level_errors_omit_field_key() {
        let mut errors = ValidationErrors::new();
        errors.reject(WRONG_PRICES, "Values for prices are wrong");

        let json = serde_json::to_value(&errors).unwrap_or_default();
        assert_eq!(json[0]["objectName"], SUBMISSION_OBJECT);
        assert_eq!(json[0]["code"], WRONG_PRICES);
        assert!(json[0].get("field").is_none());
    }

    #[test]
    fn into_result_splits_on_emptiness() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.reject_value("name", NOT_EMPTY, "must not be empty", None);
        assert!(errors.clone().into_result(5).is_err());
        assert_eq!(errors.to_string(), "name: must not be empty");
    }
}

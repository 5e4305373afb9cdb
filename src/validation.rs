//! Field validation primitives shared by every step form
//!
//! Each form has its own field enum; validation collects one message per
//! offending field into [`FieldErrors`], which the front ends render inline
//! next to the field.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Calendar date format used for date of birth and the agreement date
pub const DATE_FORMAT: &str = "%m/%d/%Y";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}$").expect("phone pattern is valid")
});

static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern is valid"));

static SSN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3}-\d{2}-\d{4}|\d{9})$").expect("ssn pattern is valid"));

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[012])/(0[1-9]|[12][0-9]|3[01])/(19|20)\d\d$")
        .expect("date pattern is valid")
});

/// Validation messages keyed by field, in field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord + Copy> FieldErrors<F> {
    /// Create an empty error set
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record an error for a field; the first message per field wins
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Record an error if `result` is an Err
    pub fn check(&mut self, field: F, result: Result<(), String>) {
        if let Err(message) = result {
            self.insert(field, message);
        }
    }

    /// Message for a field, if any
    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether the field has an error
    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// Remove any error on a field (e.g. after the user edits it)
    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First field with an error, used to move focus
    pub fn first_field(&self) -> Option<F> {
        self.errors.keys().next().copied()
    }

    /// Iterate over (field, message) pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when empty, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<F: Ord + Copy> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Field must not be blank
pub fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Field must not exceed `max` characters
pub fn max_len(value: &str, max: usize, label: &str) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{} must be at most {} characters", label, max))
    } else {
        Ok(())
    }
}

/// Field must be at least `min` characters
pub fn min_len(value: &str, min: usize, label: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", label, min))
    } else {
        Ok(())
    }
}

/// Blank is accepted; otherwise apply `rule`
pub fn optional(value: &str, rule: impl FnOnce(&str) -> Result<(), String>) -> Result<(), String> {
    if value.trim().is_empty() {
        Ok(())
    } else {
        rule(value.trim())
    }
}

pub fn email(value: &str, label: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(format!("{} must be a valid email", label))
    }
}

pub fn phone(value: &str, label: &str) -> Result<(), String> {
    if PHONE_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(format!("{} must be a 10-digit phone number", label))
    }
}

pub fn zip(value: &str) -> Result<(), String> {
    if ZIP_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err("Zip must match 12345 or 12345-6789".to_string())
    }
}

pub fn ssn(value: &str) -> Result<(), String> {
    if SSN_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err("SSN must match 123-45-6789".to_string())
    }
}

/// Parse a `MM/DD/YYYY` date, rejecting impossible days like 02/30
pub fn parse_date(value: &str, label: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    let message = || format!("{} must match format MM/DD/YYYY and be a valid date", label);
    if !DATE_RE.is_match(value) {
        return Err(message());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| message())
}

/// Collapse runs of whitespace and lowercase, for name comparisons
pub fn normalize_name(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        Name,
        Email,
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "first");
        errors.insert(Field::Email, "second");
        errors.insert(Field::Name, "name");

        assert_eq!(errors.get(Field::Email), Some("first"));
        assert_eq!(errors.first_field(), Some(Field::Name));
        assert_eq!(errors.len(), 2);

        errors.clear(Field::Name);
        assert!(!errors.contains(Field::Name));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_errors_are_ok() {
        let errors: FieldErrors<Field> = FieldErrors::default();
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_email() {
        assert!(email("jane.doe@example.com", "Email").is_ok());
        assert!(email("jane@sub.example.co", "Email").is_ok());
        assert!(email("jane@", "Email").is_err());
        assert!(email("not-an-email", "Email").is_err());
        assert!(email("jane@localhost", "Email").is_err());
    }

    #[test]
    fn test_phone_and_zip() {
        assert!(phone("555-123-4567", "Phone").is_ok());
        assert!(phone("(555) 123-4567", "Phone").is_ok());
        assert!(phone("5551234567", "Phone").is_ok());
        assert!(phone("555-1234", "Phone").is_err());

        assert!(zip("90210").is_ok());
        assert!(zip("90210-1234").is_ok());
        assert!(zip("9021").is_err());
    }

    #[test]
    fn test_ssn() {
        assert!(ssn("123-45-6789").is_ok());
        assert!(ssn("123456789").is_ok());
        assert!(ssn("123-456-789").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("07/04/1990", "DOB").unwrap(),
            NaiveDate::from_ymd_opt(1990, 7, 4).unwrap()
        );
        assert!(parse_date("1990-07-04", "DOB").is_err());
        assert!(parse_date("02/30/1990", "DOB").is_err());
        assert!(parse_date("13/01/1990", "DOB").is_err());
    }

    #[test]
    fn test_length_rules() {
        assert!(max_len("abc", 3, "Name").is_ok());
        assert_eq!(
            max_len("abcd", 3, "Name").unwrap_err(),
            "Name must be at most 3 characters"
        );
        assert!(min_len("abc", 4, "Password").is_err());
        assert!(optional("  ", |v| email(v, "Email")).is_ok());
        assert!(optional("bad", |v| email(v, "Email")).is_err());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jane   Q  Doe "), "jane q doe");
    }
}

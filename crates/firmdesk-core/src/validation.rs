//! Business validation rules: name, email and password formats.
//!
//! Validation is exception-free: every check appends to a
//! [`FieldErrors`] accumulator, which callers convert into a
//! [`crate::FirmError::Validation`] when non-empty. The patterns mirror
//! the rules the business uses for its (Cyrillic) customer data and are
//! treated as swappable constants, not a frozen interface.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Names must be capitalized and Cyrillic-only.
static NAME_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[А-ЯЁ][а-яё]+$").unwrap());

/// login@domain with a 2–5 letter TLD.
static EMAIL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,5}$").unwrap());

/// Characters accepted in passwords; the "special" subset must occur
/// at least once.
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// A single rejected field with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulated field-level validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// True when `value` satisfies the name rule.
pub fn valid_name(value: &str) -> bool {
    NAME_RULE.is_match(value)
}

/// True when `value` satisfies the email rule.
pub fn valid_email(value: &str) -> bool {
    EMAIL_RULE.is_match(value)
}

/// Password strength: at least 8 characters from the allowed set, with
/// at least one lowercase letter, one uppercase letter, one digit and
/// one special character. Expressed as explicit character checks since
/// the original lookahead pattern has no `regex`-crate equivalent.
pub fn strong_password(value: &str) -> bool {
    if value.chars().count() < 8 {
        return false;
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    if !value.chars().all(allowed) {
        return false;
    }
    value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Append a field error unless `value` passes the name rule.
pub fn check_name(errors: &mut FieldErrors, field: &str, value: &str) {
    if !valid_name(value) {
        errors.push(
            field,
            "must start with a capital letter and contain only Cyrillic letters",
        );
    }
}

/// Append a field error unless `value` passes the email rule.
pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !valid_email(value) {
        errors.push(field, "must be a valid login@domain address");
    }
}

/// Append a field error unless `value` passes the password rule.
pub fn check_password(errors: &mut FieldErrors, field: &str, value: &str) {
    if !strong_password(value) {
        errors.push(
            field,
            "must be at least 8 characters with upper and lower case letters, \
             a digit and a special character",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalized_cyrillic_name_passes() {
        assert!(valid_name("Иванов"));
        assert!(valid_name("Ёлкина"));
    }

    #[test]
    fn lowercase_or_latin_name_fails() {
        assert!(!valid_name("ivanov"));
        assert!(!valid_name("иванов"));
        assert!(!valid_name("Ivanov"));
        assert!(!valid_name("И"));
        assert!(!valid_name(""));
    }

    #[test]
    fn email_rule() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("a.b+c@mail.example.ru"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("user example.com"));
        assert!(!valid_email("user@example.toolong"));
    }

    #[test]
    fn password_strength() {
        assert!(strong_password("Sup3rSecret!"));
        assert!(!strong_password("Ab1!xyz"));
        assert!(!strong_password("alllowercase1!"));
        assert!(!strong_password("ALLUPPERCASE1!"));
        assert!(!strong_password("NoDigits!!"));
        assert!(!strong_password("NoSpecial123"));
        // Character outside the allowed set.
        assert!(!strong_password("Sup3rSecret!#"));
    }

    #[test]
    fn field_errors_accumulate() {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, "surname", "ivanov");
        check_email(&mut errors, "email", "not-an-email");
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.errors()[0].field, "surname");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn empty_field_errors_are_ok() {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, "surname", "Иванов");
        assert!(errors.into_result().is_ok());
    }
}

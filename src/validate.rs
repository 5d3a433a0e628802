//! Contact form validation
//!
//! Pure functions from field values to failures. Validation never
//! short-circuits: every rule is applied and every failure is collected, in
//! field order (name, email, message). The subject field is free-form and
//! never validated.
//!
//! Failures are values, not errors; see [`crate::error`] for the
//! distinction.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

/// Minimum length of a message after trimming
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Failure message for an empty name
pub const NAME_REQUIRED: &str = "Name is required";
/// Failure message for an empty email
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Failure message for a malformed email
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
/// Failure message for an empty message
pub const MESSAGE_REQUIRED: &str = "Message is required";
/// Failure message for a too-short message
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters long";

/// A snapshot of the contact form's field values
///
/// Constructed fresh per submission attempt; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
  pub name: String,
  pub email: String,
  pub subject: String,
  pub message: String,
}

/// The validated fields of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
  Name,
  Email,
  Subject,
  Message,
}

impl FieldName {
  /// Maps a `name` attribute value to a field
  pub fn from_attr(name: &str) -> Option<Self> {
    match name {
      "name" => Some(FieldName::Name),
      "email" => Some(FieldName::Email),
      "subject" => Some(FieldName::Subject),
      "message" => Some(FieldName::Message),
      _ => None,
    }
  }

  /// The field's `name` attribute value
  pub fn as_attr(self) -> &'static str {
    match self {
      FieldName::Name => "name",
      FieldName::Email => "email",
      FieldName::Subject => "subject",
      FieldName::Message => "message",
    }
  }
}

/// A single validation failure: which field, and the human-readable message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: FieldName,
  pub message: &'static str,
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message)
  }
}

fn email_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
  })
}

/// Returns true when `email` has the shape `local@domain.tld`
///
/// The shape check is intentionally loose: any non-space, non-`@` runs
/// around a single `@` and at least one `.` in the domain part.
///
/// # Examples
///
/// ```
/// use vitrine::validate::is_valid_email;
///
/// assert!(is_valid_email("jan@example.com"));
/// assert!(!is_valid_email("jan@example"));
/// assert!(!is_valid_email("jan example@x.y"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
  email_pattern().is_match(email)
}

/// Validates a full submission snapshot, collecting every failure
///
/// Failures come back ordered name, email, message. An input invalid in
/// all three validated fields therefore yields exactly three entries.
///
/// # Examples
///
/// ```
/// use vitrine::validate::{validate, FormInput, NAME_REQUIRED};
///
/// let errors = validate(&FormInput {
///   name: "  ".to_string(),
///   email: "jan@example.com".to_string(),
///   subject: String::new(),
///   message: "Hello there!".to_string(),
/// });
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].message, NAME_REQUIRED);
/// ```
pub fn validate(input: &FormInput) -> Vec<FieldError> {
  let mut errors = Vec::new();

  if input.name.trim().is_empty() {
    errors.push(FieldError {
      field: FieldName::Name,
      message: NAME_REQUIRED,
    });
  }

  if input.email.trim().is_empty() {
    errors.push(FieldError {
      field: FieldName::Email,
      message: EMAIL_REQUIRED,
    });
  } else if !is_valid_email(&input.email) {
    errors.push(FieldError {
      field: FieldName::Email,
      message: EMAIL_INVALID,
    });
  }

  let message = input.message.trim();
  if message.is_empty() {
    errors.push(FieldError {
      field: FieldName::Message,
      message: MESSAGE_REQUIRED,
    });
  } else if message.chars().count() < MIN_MESSAGE_CHARS {
    errors.push(FieldError {
      field: FieldName::Message,
      message: MESSAGE_TOO_SHORT,
    });
  }

  errors
}

/// Validates a single field, as the blur handler does
///
/// Applies the same rules as [`validate`] restricted to one field, on the
/// trimmed value. Returns the first applicable failure, or `None` when the
/// field passes (the subject always passes).
pub fn validate_field(field: FieldName, value: &str) -> Option<FieldError> {
  let value = value.trim();
  match field {
    FieldName::Name => value.is_empty().then_some(FieldError {
      field,
      message: NAME_REQUIRED,
    }),
    FieldName::Email => {
      if value.is_empty() {
        Some(FieldError {
          field,
          message: EMAIL_REQUIRED,
        })
      } else if !is_valid_email(value) {
        Some(FieldError {
          field,
          message: EMAIL_INVALID,
        })
      } else {
        None
      }
    }
    FieldName::Message => {
      if value.is_empty() {
        Some(FieldError {
          field,
          message: MESSAGE_REQUIRED,
        })
      } else if value.chars().count() < MIN_MESSAGE_CHARS {
        Some(FieldError {
          field,
          message: MESSAGE_TOO_SHORT,
        })
      } else {
        None
      }
    }
    FieldName::Subject => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_input() -> FormInput {
    FormInput {
      name: "Jan".to_string(),
      email: "jan@example.com".to_string(),
      subject: "Hi".to_string(),
      message: "Hello there!".to_string(),
    }
  }

  #[test]
  fn valid_input_produces_no_errors() {
    assert!(validate(&valid_input()).is_empty());
  }

  #[test]
  fn whitespace_name_is_required() {
    let mut input = valid_input();
    input.name = "   ".to_string();
    let errors = validate(&input);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, NAME_REQUIRED);
  }

  #[test]
  fn empty_email_reports_required_not_format() {
    let mut input = valid_input();
    input.email = String::new();
    let errors = validate(&input);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, EMAIL_REQUIRED);
  }

  #[test]
  fn malformed_email_reports_format_only() {
    for bad in ["bad", "a@b", "a b@c.d", "a@b c.d", "@b.c", "a@.c"] {
      let mut input = valid_input();
      input.email = bad.to_string();
      let errors = validate(&input);
      assert_eq!(errors.len(), 1, "expected one error for {bad:?}");
      assert_eq!(errors[0].message, EMAIL_INVALID, "for {bad:?}");
    }
  }

  #[test]
  fn well_shaped_emails_pass() {
    for good in ["a@b.c", "jan.kowalski@example.co.uk", "x+tag@host.io"] {
      assert!(is_valid_email(good), "expected {good:?} to pass");
    }
  }

  #[test]
  fn message_length_boundary() {
    for (msg, expected) in [
      ("", Some(MESSAGE_REQUIRED)),
      ("         ", Some(MESSAGE_REQUIRED)),
      ("123456789", Some(MESSAGE_TOO_SHORT)),
      ("  123456789  ", Some(MESSAGE_TOO_SHORT)),
      ("1234567890", None),
      ("Hello there!", None),
    ] {
      let mut input = valid_input();
      input.message = msg.to_string();
      let errors = validate(&input);
      match expected {
        Some(message) => {
          assert_eq!(errors.len(), 1, "for {msg:?}");
          assert_eq!(errors[0].message, message, "for {msg:?}");
        }
        None => assert!(errors.is_empty(), "for {msg:?}"),
      }
    }
  }

  #[test]
  fn all_failures_collected_in_field_order() {
    let input = FormInput {
      name: String::new(),
      email: "bad".to_string(),
      subject: String::new(),
      message: "short".to_string(),
    };
    let errors = validate(&input);
    let messages: Vec<&str> = errors.iter().map(|error| error.message).collect();
    assert_eq!(messages, vec![NAME_REQUIRED, EMAIL_INVALID, MESSAGE_TOO_SHORT]);
  }

  #[test]
  fn subject_is_never_validated() {
    assert_eq!(validate_field(FieldName::Subject, ""), None);
    let mut input = valid_input();
    input.subject = String::new();
    assert!(validate(&input).is_empty());
  }

  #[test]
  fn field_validation_matches_full_validation() {
    assert_eq!(
      validate_field(FieldName::Name, " ").map(|error| error.message),
      Some(NAME_REQUIRED)
    );
    assert_eq!(
      validate_field(FieldName::Email, "nope").map(|error| error.message),
      Some(EMAIL_INVALID)
    );
    assert_eq!(
      validate_field(FieldName::Message, "too short").map(|error| error.message),
      Some(MESSAGE_TOO_SHORT)
    );
    assert_eq!(validate_field(FieldName::Email, "jan@example.com"), None);
  }
}

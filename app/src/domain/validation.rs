//! Form validation errors shared by the sign-in, registration, record and
//! lesson-plan inputs.
//!
//! Validation runs before any port is called, so a `ValidationError` always
//! means nothing was sent or stored.

use thiserror::Error;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Rejected user input, named by the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was missing or blank once trimmed.
    #[error("{field} is required")]
    Required {
        /// Form field name.
        field: &'static str,
    },
    /// A field value was shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Form field name.
        field: &'static str,
        /// Minimum length in characters.
        min: usize,
    },
    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// A field value was present but malformed.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Form field name.
        field: &'static str,
        /// What was wrong with the value.
        reason: String,
    },
    /// A period fell outside the timetable.
    #[error("period must be between 1 and {max}")]
    PeriodOutOfRange {
        /// Highest allowed period.
        max: u8,
    },
    /// A list field had too few or too many entries.
    #[error("{field} must have between {min} and {max} entries")]
    EntryCount {
        /// Form field name.
        field: &'static str,
        /// Fewest entries allowed.
        min: usize,
        /// Most entries allowed.
        max: usize,
    },
    /// One entry of a list field was blank.
    #[error("{field} entry {position} must not be empty")]
    BlankEntry {
        /// Form field name.
        field: &'static str,
        /// One-based entry position.
        position: usize,
    },
}

impl ValidationError {
    /// Field the error concerns, if it names one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::Invalid { field, .. }
            | Self::EntryCount { field, .. }
            | Self::BlankEntry { field, .. } => Some(field),
            Self::PasswordMismatch => Some("confirmPassword"),
            Self::PeriodOutOfRange { .. } => Some("period"),
        }
    }
}

/// Trim `value` and reject it when nothing remains.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_owned())
}

/// Trim each entry, rejecting blank entries and counts outside `1..=max`.
pub(crate) fn required_entries(
    field: &'static str,
    entries: &[String],
    max: usize,
) -> Result<Vec<String>, ValidationError> {
    if entries.is_empty() || entries.len() > max {
        return Err(ValidationError::EntryCount { field, min: 1, max });
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                Err(ValidationError::BlankEntry {
                    field,
                    position: index + 1,
                })
            } else {
                Ok(trimmed.to_owned())
            }
        })
        .collect()
}

//! Error types for the mock-data crate.
//!
//! Dataset parsing and synthetic record generation fail with separate
//! `thiserror` enums so callers can tell a broken fixture from a bad
//! generation request.

use thiserror::Error;

/// Errors raised while parsing or validating a mock dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The dataset JSON is malformed or missing required fields.
    #[error("invalid dataset JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The dataset version is not supported.
    #[error("unsupported dataset version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the dataset.
        actual: u32,
    },

    /// The dataset has no subjects to reference.
    #[error("dataset contains no subjects")]
    EmptySubjects,

    /// Two entries in one collection share an identifier.
    #[error("duplicate {collection} id '{id}'")]
    DuplicateId {
        /// Collection holding the duplicate.
        collection: String,
        /// The repeated identifier.
        id: String,
    },

    /// Two users share an email address (compared case-insensitively).
    #[error("duplicate user email '{email}'")]
    DuplicateEmail {
        /// The repeated email address.
        email: String,
    },

    /// An entry references a user that is not in the dataset.
    #[error("entry '{entry_id}' references unknown user '{user_id}'")]
    UnknownUser {
        /// Identifier of the offending entry.
        entry_id: String,
        /// The unknown user identifier.
        user_id: String,
    },

    /// An entry references a subject that is not in the dataset.
    #[error("entry '{entry_id}' references unknown subject '{subject_id}'")]
    UnknownSubject {
        /// Identifier of the offending entry.
        entry_id: String,
        /// The unknown subject identifier.
        subject_id: String,
    },

    /// An entry's denormalized subject name differs from the subject list.
    #[error("entry '{entry_id}' names subject '{actual}' but the subject is '{expected}'")]
    SubjectNameMismatch {
        /// Identifier of the offending entry.
        entry_id: String,
        /// Name held by the subject list.
        expected: String,
        /// Name copied onto the entry.
        actual: String,
    },

    /// A date field is not a `YYYY-MM-DD` calendar date.
    #[error("entry '{entry_id}' has invalid date '{value}'")]
    InvalidDate {
        /// Identifier of the offending entry.
        entry_id: String,
        /// The unparseable date text.
        value: String,
    },

    /// A teaching record period is zero.
    #[error("teaching record '{entry_id}' has period 0; periods start at 1")]
    InvalidPeriod {
        /// Identifier of the offending record.
        entry_id: String,
    },
}

/// Errors raised while generating synthetic teaching records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested owner is not a dataset user.
    #[error("cannot generate records for unknown user '{user_id}'")]
    UnknownUser {
        /// The unknown user identifier.
        user_id: String,
    },

    /// The dataset has no subjects to draw from.
    #[error("dataset contains no subjects to draw from")]
    NoSubjects,

    /// The period range is empty.
    #[error("max period must be at least 1")]
    NoPeriods,

    /// The date window is empty.
    #[error("date span must cover at least one day")]
    EmptyDateSpan,

    /// The date window reaches before the supported calendar range.
    #[error("date span of {span_days} days before {end_date} is out of range")]
    DateOutOfRange {
        /// Last day of the window.
        end_date: String,
        /// Requested window length.
        span_days: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_formats_collection_and_id() {
        let err = DatasetError::DuplicateId {
            collection: "subjects".to_owned(),
            id: "sub1".to_owned(),
        };
        assert_eq!(err.to_string(), "duplicate subjects id 'sub1'");
    }

    #[test]
    fn subject_name_mismatch_names_both_values() {
        let err = DatasetError::SubjectNameMismatch {
            entry_id: "rec9".to_owned(),
            expected: "Art".to_owned(),
            actual: "Arts".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "entry 'rec9' names subject 'Arts' but the subject is 'Art'"
        );
    }

    #[test]
    fn generation_unknown_user_formats_correctly() {
        let err = GenerationError::UnknownUser {
            user_id: "42".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "cannot generate records for unknown user '42'"
        );
    }
}

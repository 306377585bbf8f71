//! Teaching records: one logged lesson per teacher, date and period.
//!
//! Records are immutable once created. The subject name is copied from the
//! catalogue at creation time and never follows later renames.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use super::subject::SubjectId;
use super::user::UserId;
use super::validation::{ValidationError, required_text};

/// Number of timetable periods offered when none is configured.
pub const DEFAULT_MAX_PERIOD: u8 = 8;

/// Error returned when a record id is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record id must not be empty")]
pub struct EmptyRecordIdError;

/// Record identifier assigned by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Validate and construct a [`RecordId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, EmptyRecordIdError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyRecordIdError);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Fresh random identifier for locally created records.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Error returned for period zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("period must be at least 1")]
pub struct ZeroPeriodError;

/// Timetable period, counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period(u8);

impl Period {
    /// Validate and construct a [`Period`].
    pub const fn new(value: u8) -> Result<Self, ZeroPeriodError> {
        if value == 0 {
            return Err(ZeroPeriodError);
        }
        Ok(Self(value))
    }

    /// Numeric period.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text grade attached to a record, such as `A` or `85`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade(String);

impl Grade {
    /// Trim `value`; blank grades count as absent.
    #[must_use]
    pub fn from_text(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Grade {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Field values for [`TeachingRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeachingRecordParts {
    pub id: RecordId,
    pub owner: UserId,
    pub date: NaiveDate,
    pub period: Period,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub description: String,
    pub grade: Option<Grade>,
}

/// One logged lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeachingRecord {
    id: RecordId,
    owner: UserId,
    date: NaiveDate,
    period: Period,
    subject_id: SubjectId,
    subject_name: String,
    description: String,
    grade: Option<Grade>,
}

impl TeachingRecord {
    /// Assemble a record from already-validated parts.
    #[must_use]
    pub fn new(parts: TeachingRecordParts) -> Self {
        let TeachingRecordParts {
            id,
            owner,
            date,
            period,
            subject_id,
            subject_name,
            description,
            grade,
        } = parts;
        Self {
            id,
            owner,
            date,
            period,
            subject_id,
            subject_name,
            description,
            grade,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Teacher who logged the lesson.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    #[must_use]
    pub const fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// Subject name as it was when the record was created.
    #[must_use]
    pub fn subject_name(&self) -> &str {
        self.subject_name.as_str()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    #[must_use]
    pub const fn grade(&self) -> Option<&Grade> {
        self.grade.as_ref()
    }
}

/// Unvalidated "add record" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeachingRecordDraft {
    /// Selected subject, if any.
    pub subject_id: Option<String>,
    /// Selected period, if any.
    pub period: Option<u8>,
    pub description: String,
}

/// Draft that passed [`TeachingRecordDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecordDraft {
    pub subject_id: SubjectId,
    pub period: Period,
    pub description: String,
}

impl TeachingRecordDraft {
    /// Check the form: subject and period chosen, period within
    /// `1..=max_period`, description non-blank.
    pub fn validate(self, max_period: u8) -> Result<ValidRecordDraft, ValidationError> {
        let subject_id = self
            .subject_id
            .as_deref()
            .and_then(|id| SubjectId::new(id).ok())
            .ok_or(ValidationError::Required { field: "subject" })?;
        let raw_period = self
            .period
            .ok_or(ValidationError::Required { field: "period" })?;
        if raw_period > max_period {
            return Err(ValidationError::PeriodOutOfRange { max: max_period });
        }
        let period = Period::new(raw_period)
            .map_err(|_| ValidationError::PeriodOutOfRange { max: max_period })?;
        let description = required_text("description", &self.description)?;
        Ok(ValidRecordDraft {
            subject_id,
            period,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn draft(subject: Option<&str>, period: Option<u8>, description: &str) -> TeachingRecordDraft {
        TeachingRecordDraft {
            subject_id: subject.map(str::to_owned),
            period,
            description: description.to_owned(),
        }
    }

    #[rstest]
    #[case(draft(None, Some(1), "Fractions"), ValidationError::Required { field: "subject" })]
    #[case(draft(Some(" "), Some(1), "Fractions"), ValidationError::Required { field: "subject" })]
    #[case(draft(Some("sub1"), None, "Fractions"), ValidationError::Required { field: "period" })]
    #[case(draft(Some("sub1"), Some(0), "Fractions"), ValidationError::PeriodOutOfRange { max: 8 })]
    #[case(draft(Some("sub1"), Some(9), "Fractions"), ValidationError::PeriodOutOfRange { max: 8 })]
    #[case(draft(Some("sub1"), Some(2), "   "), ValidationError::Required { field: "description" })]
    fn invalid_drafts(#[case] input: TeachingRecordDraft, #[case] expected: ValidationError) {
        assert_eq!(input.validate(DEFAULT_MAX_PERIOD), Err(expected));
    }

    #[rstest]
    #[case(1)]
    #[case(8)]
    fn boundary_periods_are_accepted(#[case] period: u8) {
        let valid = draft(Some("sub1"), Some(period), " Fractions ")
            .validate(DEFAULT_MAX_PERIOD)
            .expect("valid draft");
        assert_eq!(valid.period.get(), period);
        assert_eq!(valid.description, "Fractions");
    }

    #[rstest]
    #[case("", None)]
    #[case("  ", None)]
    #[case(" A ", Some("A"))]
    fn grades_are_trimmed(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            Grade::from_text(raw).as_ref().map(AsRef::as_ref),
            expected
        );
    }
}

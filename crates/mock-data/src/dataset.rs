//! Mock dataset types and JSON parsing.
//!
//! The dataset mirrors the collections a remote backend would hold: users,
//! the subject reference list, teaching records and lesson plans. Parsing
//! validates cross references so adapters can load it without re-checking.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::DatasetError;

/// Current supported dataset version.
const SUPPORTED_VERSION: u32 = 1;

const BUNDLED_DATASET: &str = include_str!("../fixtures/dataset.json");

/// A user account held by the mock dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUser {
    /// Stable user identifier.
    pub id: String,
    /// Login email, unique ignoring case.
    pub email: String,
    /// Plain-text password. Consumers hash it before storing it anywhere.
    pub password: String,
    /// Display name shown on reports.
    pub name: String,
}

/// A subject in the static reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSubject {
    /// Stable subject identifier.
    pub id: String,
    /// Subject name.
    pub name: String,
}

/// One logged lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTeachingRecord {
    /// Stable record identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Calendar date the lesson was taught.
    pub date: NaiveDate,
    /// Timetable period, starting at 1.
    pub period: u8,
    /// Referenced subject.
    pub subject_id: String,
    /// Subject name copied at creation time.
    pub subject_name: String,
    /// Free-text description of the lesson.
    pub description: String,
    /// Optional grade recorded against the lesson.
    pub grade: Option<String>,
}

/// A structured plan prepared before class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockLessonPlan {
    /// Stable plan identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Plan title.
    pub title: String,
    /// Referenced subject.
    pub subject_id: String,
    /// Subject name copied at creation time.
    pub subject_name: String,
    /// Planned lesson date.
    pub date: NaiveDate,
    /// Ordered learning objectives.
    pub objectives: Vec<String>,
    /// Ordered classroom activities.
    pub activities: Vec<String>,
    /// How learning is assessed.
    pub assessment: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Validated mock dataset.
///
/// # Example
///
/// ```
/// use mock_data::MockDataset;
///
/// let dataset = MockDataset::bundled().expect("bundled dataset is valid");
/// assert_eq!(dataset.subjects().len(), 6);
/// assert!(dataset.find_user_by_email("TEACHER1@example.com").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDataset {
    users: Vec<MockUser>,
    subjects: Vec<MockSubject>,
    teaching_records: Vec<MockTeachingRecord>,
    lesson_plans: Vec<MockLessonPlan>,
}

impl MockDataset {
    /// Parses the dataset bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the bundled fixture fails validation.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Parses and validates a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if:
    /// - The JSON is malformed or the version is unsupported
    /// - The subject list is empty
    /// - Identifiers or user emails repeat
    /// - Records or plans reference unknown users or subjects
    /// - A denormalized subject name differs from the subject list
    /// - A date or period is invalid
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json).map_err(|e| DatasetError::ParseError {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDataset) -> Result<Self, DatasetError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(DatasetError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }
        if raw.subjects.is_empty() {
            return Err(DatasetError::EmptySubjects);
        }

        ensure_unique_ids("users", raw.users.iter().map(|user| user.id.as_str()))?;
        ensure_unique_ids(
            "subjects",
            raw.subjects.iter().map(|subject| subject.id.as_str()),
        )?;
        ensure_unique_ids(
            "teachingRecords",
            raw.teaching_records.iter().map(|record| record.id.as_str()),
        )?;
        ensure_unique_ids(
            "lessonPlans",
            raw.lesson_plans.iter().map(|plan| plan.id.as_str()),
        )?;

        let mut emails = HashSet::new();
        for user in &raw.users {
            if !emails.insert(user.email.to_lowercase()) {
                return Err(DatasetError::DuplicateEmail {
                    email: user.email.clone(),
                });
            }
        }

        let users: Vec<MockUser> = raw
            .users
            .into_iter()
            .map(|user| MockUser {
                id: user.id,
                email: user.email,
                password: user.password,
                name: user.name,
            })
            .collect();
        let subjects: Vec<MockSubject> = raw
            .subjects
            .into_iter()
            .map(|subject| MockSubject {
                id: subject.id,
                name: subject.name,
            })
            .collect();

        let references = References {
            users: &users,
            subjects: &subjects,
        };
        let teaching_records = raw
            .teaching_records
            .into_iter()
            .map(|record| references.record(record))
            .collect::<Result<Vec<_>, _>>()?;
        let lesson_plans = raw
            .lesson_plans
            .into_iter()
            .map(|plan| references.plan(plan))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            users,
            subjects,
            teaching_records,
            lesson_plans,
        })
    }

    /// Returns all users.
    pub fn users(&self) -> &[MockUser] {
        &self.users
    }

    /// Returns the subject reference list in declaration order.
    pub fn subjects(&self) -> &[MockSubject] {
        &self.subjects
    }

    /// Returns all teaching records.
    pub fn teaching_records(&self) -> &[MockTeachingRecord] {
        &self.teaching_records
    }

    /// Returns all lesson plans.
    pub fn lesson_plans(&self) -> &[MockLessonPlan] {
        &self.lesson_plans
    }

    /// Finds a user by email, ignoring case.
    pub fn find_user_by_email(&self, email: &str) -> Option<&MockUser> {
        let wanted = email.to_lowercase();
        self.users
            .iter()
            .find(|user| user.email.to_lowercase() == wanted)
    }

    /// Finds a user by identifier.
    pub fn find_user(&self, id: &str) -> Option<&MockUser> {
        self.users.iter().find(|user| user.id == id)
    }
}

struct References<'a> {
    users: &'a [MockUser],
    subjects: &'a [MockSubject],
}

impl References<'_> {
    fn check_owner(&self, entry_id: &str, user_id: &str) -> Result<(), DatasetError> {
        if self.users.iter().any(|user| user.id == user_id) {
            Ok(())
        } else {
            Err(DatasetError::UnknownUser {
                entry_id: entry_id.to_owned(),
                user_id: user_id.to_owned(),
            })
        }
    }

    fn check_subject(
        &self,
        entry_id: &str,
        subject_id: &str,
        subject_name: &str,
    ) -> Result<(), DatasetError> {
        let subject = self
            .subjects
            .iter()
            .find(|subject| subject.id == subject_id)
            .ok_or_else(|| DatasetError::UnknownSubject {
                entry_id: entry_id.to_owned(),
                subject_id: subject_id.to_owned(),
            })?;
        if subject.name != subject_name {
            return Err(DatasetError::SubjectNameMismatch {
                entry_id: entry_id.to_owned(),
                expected: subject.name.clone(),
                actual: subject_name.to_owned(),
            });
        }
        Ok(())
    }

    fn record(&self, raw: RawTeachingRecord) -> Result<MockTeachingRecord, DatasetError> {
        self.check_owner(&raw.id, &raw.user_id)?;
        self.check_subject(&raw.id, &raw.subject_id, &raw.subject_name)?;
        if raw.period == 0 {
            return Err(DatasetError::InvalidPeriod { entry_id: raw.id });
        }
        let date = parse_date(&raw.id, &raw.date)?;
        Ok(MockTeachingRecord {
            id: raw.id,
            user_id: raw.user_id,
            date,
            period: raw.period,
            subject_id: raw.subject_id,
            subject_name: raw.subject_name,
            description: raw.description,
            grade: raw.grade,
        })
    }

    fn plan(&self, raw: RawLessonPlan) -> Result<MockLessonPlan, DatasetError> {
        self.check_owner(&raw.id, &raw.user_id)?;
        self.check_subject(&raw.id, &raw.subject_id, &raw.subject_name)?;
        let date = parse_date(&raw.id, &raw.date)?;
        Ok(MockLessonPlan {
            id: raw.id,
            user_id: raw.user_id,
            title: raw.title,
            subject_id: raw.subject_id,
            subject_name: raw.subject_name,
            date,
            objectives: raw.objectives,
            activities: raw.activities,
            assessment: raw.assessment,
            notes: raw.notes.filter(|notes| !notes.trim().is_empty()),
        })
    }
}

fn parse_date(entry_id: &str, value: &str) -> Result<NaiveDate, DatasetError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DatasetError::InvalidDate {
        entry_id: entry_id.to_owned(),
        value: value.to_owned(),
    })
}

fn ensure_unique_ids<'a>(
    collection: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    version: u32,
    users: Vec<RawUser>,
    subjects: Vec<RawSubject>,
    #[serde(default)]
    teaching_records: Vec<RawTeachingRecord>,
    #[serde(default)]
    lesson_plans: Vec<RawLessonPlan>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    email: String,
    password: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawSubject {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeachingRecord {
    id: String,
    user_id: String,
    date: String,
    period: u8,
    subject_id: String,
    subject_name: String,
    description: String,
    #[serde(default)]
    grade: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLessonPlan {
    id: String,
    user_id: String,
    title: String,
    subject_id: String,
    subject_name: String,
    date: String,
    objectives: Vec<String>,
    activities: Vec<String>,
    assessment: String,
    #[serde(default)]
    notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn dataset_with_record(record: &str) -> String {
        format!(
            r#"{{
                "version": 1,
                "users": [{{"id": "1", "email": "a@example.com", "password": "pw", "name": "A"}}],
                "subjects": [{{"id": "sub1", "name": "Mathematics"}}],
                "teachingRecords": [{record}]
            }}"#
        )
    }

    #[rstest]
    fn bundled_dataset_is_valid() {
        let dataset = MockDataset::bundled().expect("bundled dataset parses");
        assert_eq!(dataset.users().len(), 2);
        assert_eq!(dataset.teaching_records().len(), 3);
        assert_eq!(dataset.lesson_plans().len(), 1);
    }

    #[rstest]
    fn email_lookup_ignores_case() {
        let dataset = MockDataset::bundled().expect("bundled dataset parses");
        let user = dataset
            .find_user_by_email("Teacher2@Example.COM")
            .expect("user found");
        assert_eq!(user.name, "Jane Smith");
    }

    #[rstest]
    #[case::unknown_user(
        r#"{"id": "r1", "userId": "9", "date": "2024-07-15", "period": 1, "subjectId": "sub1", "subjectName": "Mathematics", "description": "x"}"#,
        "references unknown user"
    )]
    #[case::unknown_subject(
        r#"{"id": "r1", "userId": "1", "date": "2024-07-15", "period": 1, "subjectId": "sub9", "subjectName": "Mathematics", "description": "x"}"#,
        "references unknown subject"
    )]
    #[case::renamed_subject(
        r#"{"id": "r1", "userId": "1", "date": "2024-07-15", "period": 1, "subjectId": "sub1", "subjectName": "Maths", "description": "x"}"#,
        "names subject 'Maths'"
    )]
    #[case::bad_date(
        r#"{"id": "r1", "userId": "1", "date": "15/07/2024", "period": 1, "subjectId": "sub1", "subjectName": "Mathematics", "description": "x"}"#,
        "invalid date"
    )]
    #[case::zero_period(
        r#"{"id": "r1", "userId": "1", "date": "2024-07-15", "period": 0, "subjectId": "sub1", "subjectName": "Mathematics", "description": "x"}"#,
        "period 0"
    )]
    fn rejects_inconsistent_records(#[case] record: &str, #[case] expected: &str) {
        let err = MockDataset::from_json(&dataset_with_record(record))
            .expect_err("inconsistent record must fail");
        assert!(
            err.to_string().contains(expected),
            "unexpected error: {err}"
        );
    }

    #[rstest]
    fn rejects_duplicate_emails_ignoring_case() {
        let json = r#"{
            "version": 1,
            "users": [
                {"id": "1", "email": "a@example.com", "password": "pw", "name": "A"},
                {"id": "2", "email": "A@EXAMPLE.com", "password": "pw", "name": "B"}
            ],
            "subjects": [{"id": "sub1", "name": "Mathematics"}]
        }"#;
        let err = MockDataset::from_json(json).expect_err("duplicate email must fail");
        assert!(matches!(err, DatasetError::DuplicateEmail { .. }));
    }

    #[rstest]
    fn rejects_unsupported_version() {
        let json = r#"{"version": 2, "users": [], "subjects": [{"id": "s", "name": "S"}]}"#;
        let err = MockDataset::from_json(json).expect_err("version 2 unsupported");
        assert_eq!(
            err,
            DatasetError::UnsupportedVersion {
                expected: 1,
                actual: 2
            }
        );
    }

    #[rstest]
    fn blank_plan_notes_become_none() {
        let json = r#"{
            "version": 1,
            "users": [{"id": "1", "email": "a@example.com", "password": "pw", "name": "A"}],
            "subjects": [{"id": "sub1", "name": "Mathematics"}],
            "lessonPlans": [{
                "id": "p1", "userId": "1", "title": "T", "subjectId": "sub1",
                "subjectName": "Mathematics", "date": "2024-07-18",
                "objectives": ["o"], "activities": ["a"], "assessment": "quiz",
                "notes": "   "
            }]
        }"#;
        let dataset = MockDataset::from_json(json).expect("dataset parses");
        let plan = dataset.lesson_plans().first().expect("plan present");
        assert!(plan.notes.is_none());
    }
}

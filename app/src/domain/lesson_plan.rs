//! Lesson plans: structured pre-class plans owned by one teacher.

use chrono::NaiveDate;

use super::subject::SubjectId;
use super::user::UserId;
use super::validation::{ValidationError, required_entries, required_text};

/// Most objectives or activities a plan may list.
pub const MAX_PLAN_ENTRIES: usize = 5;

/// Lesson plan identifier assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanId(String);

impl PlanId {
    /// Wrap an identifier from the data store; blank ids are rejected.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let trimmed = id.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for PlanId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Field values for [`LessonPlan::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlanParts {
    pub id: PlanId,
    pub owner: UserId,
    pub title: String,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub date: NaiveDate,
    pub objectives: Vec<String>,
    pub activities: Vec<String>,
    pub assessment: String,
    pub notes: Option<String>,
}

/// A stored lesson plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlan {
    parts: LessonPlanParts,
}

impl LessonPlan {
    /// Assemble a plan from validated parts.
    #[must_use]
    pub const fn new(parts: LessonPlanParts) -> Self {
        Self { parts }
    }

    #[must_use]
    pub const fn id(&self) -> &PlanId {
        &self.parts.id
    }

    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.parts.owner
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.parts.title
    }

    #[must_use]
    pub const fn subject_id(&self) -> &SubjectId {
        &self.parts.subject_id
    }

    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.parts.subject_name
    }

    /// Day the lesson is planned for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.parts.date
    }

    #[must_use]
    pub fn objectives(&self) -> &[String] {
        &self.parts.objectives
    }

    #[must_use]
    pub fn activities(&self) -> &[String] {
        &self.parts.activities
    }

    #[must_use]
    pub fn assessment(&self) -> &str {
        &self.parts.assessment
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.parts.notes.as_deref()
    }
}

/// Unvalidated "create plan" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonPlanDraft {
    pub title: String,
    pub subject_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub objectives: Vec<String>,
    pub activities: Vec<String>,
    pub assessment: String,
    pub notes: Option<String>,
}

/// Draft that passed [`LessonPlanDraft::validate`]; text is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPlanDraft {
    pub title: String,
    pub subject_id: SubjectId,
    pub date: NaiveDate,
    pub objectives: Vec<String>,
    pub activities: Vec<String>,
    pub assessment: String,
    pub notes: Option<String>,
}

impl LessonPlanDraft {
    /// Check required fields and entry counts. Blank notes become `None`.
    pub fn validate(self) -> Result<ValidPlanDraft, ValidationError> {
        let title = required_text("title", &self.title)?;
        let subject_id = self
            .subject_id
            .as_deref()
            .and_then(|id| SubjectId::new(id).ok())
            .ok_or(ValidationError::Required { field: "subject" })?;
        let date = self.date.ok_or(ValidationError::Required { field: "date" })?;
        let objectives = required_entries("objectives", &self.objectives, MAX_PLAN_ENTRIES)?;
        let activities = required_entries("activities", &self.activities, MAX_PLAN_ENTRIES)?;
        let assessment = required_text("assessment", &self.assessment)?;
        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_owned);
        Ok(ValidPlanDraft {
            title,
            subject_id,
            date,
            objectives,
            activities,
            assessment,
            notes,
        })
    }
}

//! Conversion of mock-data entries into validated domain entities.

use mock_data::{MockLessonPlan, MockSubject, MockTeachingRecord, MockUser};

use super::MemoryStoreError;
use crate::domain::{
    Grade, LessonPlan, LessonPlanParts, Period, PlanId, RecordId, Subject, SubjectId,
    TeachingRecord, TeachingRecordParts, User, UserId,
};

fn invalid(id: &str, err: impl ToString) -> MemoryStoreError {
    MemoryStoreError::InvalidEntry {
        id: id.to_owned(),
        message: err.to_string(),
    }
}

pub(super) fn user(mock: &MockUser) -> Result<User, MemoryStoreError> {
    User::try_from_strings(&mock.id, &mock.email, &mock.name).map_err(|err| invalid(&mock.id, err))
}

pub(super) fn subject(mock: &MockSubject) -> Result<Subject, MemoryStoreError> {
    let id = SubjectId::new(&mock.id).map_err(|err| invalid(&mock.id, err))?;
    Subject::new(id, &mock.name).map_err(|err| invalid(&mock.id, err))
}

pub(super) fn teaching_record(mock: &MockTeachingRecord) -> Result<TeachingRecord, MemoryStoreError> {
    let entry = mock.id.as_str();
    Ok(TeachingRecord::new(TeachingRecordParts {
        id: RecordId::new(entry).map_err(|err| invalid(entry, err))?,
        owner: UserId::new(&mock.user_id).map_err(|err| invalid(entry, err))?,
        date: mock.date,
        period: Period::new(mock.period).map_err(|err| invalid(entry, err))?,
        subject_id: SubjectId::new(&mock.subject_id).map_err(|err| invalid(entry, err))?,
        subject_name: mock.subject_name.clone(),
        description: mock.description.clone(),
        grade: mock.grade.as_deref().and_then(Grade::from_text),
    }))
}

pub(super) fn lesson_plan(mock: &MockLessonPlan) -> Result<LessonPlan, MemoryStoreError> {
    let entry = mock.id.as_str();
    Ok(LessonPlan::new(LessonPlanParts {
        id: PlanId::new(entry).ok_or_else(|| invalid(entry, "lesson plan id must not be empty"))?,
        owner: UserId::new(&mock.user_id).map_err(|err| invalid(entry, err))?,
        title: mock.title.clone(),
        subject_id: SubjectId::new(&mock.subject_id).map_err(|err| invalid(entry, err))?,
        subject_name: mock.subject_name.clone(),
        date: mock.date,
        objectives: mock.objectives.clone(),
        activities: mock.activities.clone(),
        assessment: mock.assessment.clone(),
        notes: mock
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_owned),
    }))
}

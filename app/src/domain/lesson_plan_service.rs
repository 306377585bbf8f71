//! Lesson plan service: create and list the signed-in teacher's plans.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::auth::Session;
use super::lesson_plan::{LessonPlan, LessonPlanDraft, LessonPlanParts, PlanId};
use super::ports::{
    LessonPlanRepository, LessonPlanRepositoryError, SubjectCatalogue, SubjectCatalogueError,
};
use super::validation::ValidationError;

/// Failures while creating or listing plans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LessonPlanServiceError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("unknown subject '{subject_id}'")]
    UnknownSubject { subject_id: String },
    #[error(transparent)]
    Catalogue(#[from] SubjectCatalogueError),
    #[error(transparent)]
    Repository(#[from] LessonPlanRepositoryError),
}

pub struct LessonPlanService<P, C> {
    plans: Arc<P>,
    catalogue: Arc<C>,
}

impl<P, C> LessonPlanService<P, C> {
    pub fn new(plans: Arc<P>, catalogue: Arc<C>) -> Self {
        Self { plans, catalogue }
    }
}

impl<P, C> LessonPlanService<P, C>
where
    P: LessonPlanRepository,
    C: SubjectCatalogue,
{
    /// Validate and store a plan for the signed-in teacher.
    pub async fn create(
        &self,
        session: &Session,
        draft: LessonPlanDraft,
    ) -> Result<LessonPlan, LessonPlanServiceError> {
        let valid = draft.validate()?;
        let subject = self
            .catalogue
            .find_subject(&valid.subject_id)
            .await?
            .ok_or_else(|| LessonPlanServiceError::UnknownSubject {
                subject_id: valid.subject_id.to_string(),
            })?;
        let plan = LessonPlan::new(LessonPlanParts {
            id: PlanId::random(),
            owner: session.user().id().clone(),
            title: valid.title,
            subject_id: subject.id().clone(),
            subject_name: subject.name().to_owned(),
            date: valid.date,
            objectives: valid.objectives,
            activities: valid.activities,
            assessment: valid.assessment,
            notes: valid.notes,
        });
        self.plans.add(&plan).await?;
        info!(plan_id = plan.id().as_ref(), date = %plan.date(), "lesson plan created");
        Ok(plan)
    }

    /// The teacher's plans, latest date first.
    pub async fn list(&self, session: &Session) -> Result<Vec<LessonPlan>, LessonPlanServiceError> {
        let mut plans = self.plans.list_for_owner(session.user().id()).await?;
        plans.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(plans)
    }
}

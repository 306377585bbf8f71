//! Port abstraction for lesson plan persistence.
use async_trait::async_trait;

use crate::domain::{LessonPlan, PlanId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by lesson plan repositories.
    pub enum LessonPlanRepositoryError {
        /// A plan with the same id is already stored.
        Duplicate { id: String } => "lesson plan {id} already exists",
        /// The backing storage failed.
        Storage { message: String } => "lesson plan storage failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonPlanRepository: Send + Sync {
    /// Fetch a plan by id.
    async fn get(&self, id: &PlanId) -> Result<Option<LessonPlan>, LessonPlanRepositoryError>;

    /// Store a new plan.
    async fn add(&self, plan: &LessonPlan) -> Result<(), LessonPlanRepositoryError>;

    /// Every plan owned by `owner`, in insertion order.
    async fn list_for_owner(&self, owner: &UserId)
    -> Result<Vec<LessonPlan>, LessonPlanRepositoryError>;
}

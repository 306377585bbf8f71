//! Lesson plan repository over the in-memory collection.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{LessonPlanRepository, LessonPlanRepositoryError};
use crate::domain::{LessonPlan, PlanId, UserId};

fn poisoned() -> LessonPlanRepositoryError {
    LessonPlanRepositoryError::storage("lesson plan collection lock poisoned")
}

#[async_trait]
impl LessonPlanRepository for MemoryStore {
    async fn get(&self, id: &PlanId) -> Result<Option<LessonPlan>, LessonPlanRepositoryError> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        Ok(plans.iter().find(|plan| plan.id() == id).cloned())
    }

    async fn add(&self, plan: &LessonPlan) -> Result<(), LessonPlanRepositoryError> {
        let mut plans = self.plans.write().map_err(|_| poisoned())?;
        if plans.iter().any(|existing| existing.id() == plan.id()) {
            return Err(LessonPlanRepositoryError::duplicate(plan.id().as_ref()));
        }
        plans.push(plan.clone());
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<LessonPlan>, LessonPlanRepositoryError> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        Ok(plans
            .iter()
            .filter(|plan| plan.owner() == owner)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::memory::test_support::bundled_store;

    #[tokio::test]
    async fn bundled_plan_is_listed_for_john() {
        let store = bundled_store();
        let plans = store
            .list_for_owner(&UserId::new("1").expect("id"))
            .await
            .expect("listed");
        assert_eq!(plans.len(), 1);
        let plan = &plans[0];
        assert_eq!(plan.subject_name(), "Mathematics");
        assert_eq!(
            store.get(plan.id()).await.expect("lookup").as_ref(),
            Some(plan)
        );
    }
}

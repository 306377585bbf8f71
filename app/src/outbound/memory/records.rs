//! Teaching record repository and query over the in-memory collection.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{
    TeachingRecordQuery, TeachingRecordQueryError, TeachingRecordRepository,
    TeachingRecordRepositoryError,
};
use crate::domain::{RecordId, TeachingRecord, UserId};

fn poisoned() -> TeachingRecordRepositoryError {
    TeachingRecordRepositoryError::storage("record collection lock poisoned")
}

#[async_trait]
impl TeachingRecordRepository for MemoryStore {
    async fn get(
        &self,
        id: &RecordId,
    ) -> Result<Option<TeachingRecord>, TeachingRecordRepositoryError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn add(&self, record: &TeachingRecord) -> Result<(), TeachingRecordRepositoryError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(TeachingRecordRepositoryError::duplicate(record.id().as_ref()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TeachingRecord>, TeachingRecordRepositoryError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|record| record.owner() == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TeachingRecordQuery for MemoryStore {
    async fn fetch_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TeachingRecord>, TeachingRecordQueryError> {
        TeachingRecordRepository::list_for_owner(self, owner)
            .await
            .map_err(|err| TeachingRecordQueryError::transport(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Period, SubjectId, TeachingRecordParts};
    use crate::outbound::memory::test_support::bundled_store;

    fn new_record(id: &str) -> TeachingRecord {
        TeachingRecord::new(TeachingRecordParts {
            id: RecordId::new(id).expect("id"),
            owner: UserId::new("2").expect("owner"),
            date: NaiveDate::from_ymd_opt(2024, 7, 19).expect("date"),
            period: Period::new(4).expect("period"),
            subject_id: SubjectId::new("sub5").expect("subject"),
            subject_name: "Geography".to_owned(),
            description: "Rivers".to_owned(),
            grade: None,
        })
    }

    #[tokio::test]
    async fn bundled_records_belong_to_john() {
        let store = bundled_store();
        let john = UserId::new("1").expect("id");
        let jane = UserId::new("2").expect("id");
        assert_eq!(store.fetch_for_owner(&john).await.expect("john").len(), 3);
        assert!(store.fetch_for_owner(&jane).await.expect("jane").is_empty());
    }

    #[tokio::test]
    async fn added_record_can_be_fetched_by_id() {
        let store = bundled_store();
        let record = new_record("rec-new");
        store.add(&record).await.expect("added");
        assert_eq!(
            store.get(record.id()).await.expect("lookup"),
            Some(record.clone())
        );
        assert_eq!(
            store.add(&record).await,
            Err(TeachingRecordRepositoryError::duplicate("rec-new"))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_lose_nothing() {
        let store = bundled_store();
        let tasks: Vec<_> = (0..16)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add(&new_record(&format!("rec-{n}"))).await })
            })
            .collect();
        for task in tasks {
            task.await.expect("join").expect("added");
        }
        let jane = UserId::new("2").expect("id");
        let listed = TeachingRecordRepository::list_for_owner(store.as_ref(), &jane)
            .await
            .expect("listed");
        assert_eq!(listed.len(), 16);
    }
}

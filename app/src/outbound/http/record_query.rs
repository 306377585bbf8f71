//! Teaching record listing from the remote API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::TeachingRecordDto;
use super::{ApiEndpoint, body_preview};
use crate::domain::ports::{TeachingRecordQuery, TeachingRecordQueryError};
use crate::domain::{TeachingRecord, UserId};

/// [`TeachingRecordQuery`] backed by `GET api/teaching-records/user/{id}`.
#[derive(Debug, Clone)]
pub struct HttpTeachingRecordQuery {
    endpoint: ApiEndpoint,
}

impl HttpTeachingRecordQuery {
    pub const fn new(endpoint: ApiEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl TeachingRecordQuery for HttpTeachingRecordQuery {
    async fn fetch_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TeachingRecord>, TeachingRecordQueryError> {
        let url = self
            .endpoint
            .url(&["api", "teaching-records", "user", owner.as_ref()]);
        let response = self
            .endpoint
            .client()
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| TeachingRecordQueryError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| TeachingRecordQueryError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(TeachingRecordQueryError::status(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }
        let records = parse_records(body.as_ref())?;
        debug!(owner = owner.as_ref(), records = records.len(), "fetched teaching records");
        Ok(records)
    }
}

/// Decode the record array. Rows that fail validation are skipped so one
/// bad row does not hide the rest.
fn parse_records(body: &[u8]) -> Result<Vec<TeachingRecord>, TeachingRecordQueryError> {
    let rows: Vec<Value> = serde_json::from_slice(body).map_err(|error| {
        TeachingRecordQueryError::decode(format!("invalid records JSON payload: {error}"))
    })?;
    let total = rows.len();
    let records: Vec<TeachingRecord> = rows
        .into_iter()
        .filter_map(|row| {
            serde_json::from_value::<TeachingRecordDto>(row)
                .map_err(|err| err.to_string())
                .and_then(TeachingRecordDto::into_domain)
                .inspect_err(|error| warn!(%error, "skipping malformed teaching record"))
                .ok()
        })
        .collect();
    if records.len() != total {
        warn!(
            dropped = total - records.len(),
            "remote API returned malformed teaching records"
        );
    }
    Ok(records)
}

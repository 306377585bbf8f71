//! Read-side port for teaching records.
//!
//! The remote API only exposes reads, so report generation depends on this
//! narrower port rather than on the full repository.
use async_trait::async_trait;

use crate::domain::{TeachingRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while fetching teaching records.
    pub enum TeachingRecordQueryError {
        /// The request never produced a response.
        Transport { message: String } => "teaching record request failed: {message}",
        /// The source answered with an error status.
        Status { status: u16, message: String } =>
            "teaching record source returned status {status}: {message}",
        /// The response body could not be turned into records.
        Decode { message: String } => "teaching record payload invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeachingRecordQuery: Send + Sync {
    /// Every record belonging to `owner`. Order is unspecified.
    async fn fetch_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<TeachingRecord>, TeachingRecordQueryError>;
}

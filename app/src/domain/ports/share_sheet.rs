//! Port for the platform share action.
use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde::Serialize;

use super::define_port_error;

define_port_error! {
    /// Errors raised by share sheet adapters.
    pub enum ShareSheetError {
        /// No share facility exists.
        Unavailable => "sharing is not available on this device",
        /// The share action was attempted and failed.
        Failed { message: String } => "share action failed: {message}",
    }
}

/// What to share and how to label it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// File to hand over.
    pub file: Utf8PathBuf,
    /// MIME type, e.g. `application/pdf`.
    pub mime_type: String,
    /// Uniform type identifier, e.g. `com.adobe.pdf`.
    pub uti: String,
    /// Share dialog title.
    pub dialog_title: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether sharing can be attempted at all.
    async fn is_available(&self) -> bool;

    /// Hand the file to the share facility.
    async fn share(&self, request: &ShareRequest) -> Result<(), ShareSheetError>;
}

//! Share action that drops the file and a JSON manifest into an outbox
//! directory for another process to pick up.

use std::io;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::info;

use crate::domain::ports::{ShareRequest, ShareSheet, ShareSheetError};
use crate::outbound::storage::atomic::replace_file;

/// Suffix appended to the shared file's name for its manifest.
pub const MANIFEST_SUFFIX: &str = ".share.json";

#[derive(Debug, Clone)]
pub struct OutboxShareSheet {
    outbox_dir: Utf8PathBuf,
}

impl OutboxShareSheet {
    pub fn new(outbox_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
        }
    }

    #[must_use]
    pub fn outbox_dir(&self) -> &Utf8Path {
        &self.outbox_dir
    }
}

#[async_trait]
impl ShareSheet for OutboxShareSheet {
    async fn is_available(&self) -> bool {
        true
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareSheetError> {
        let outbox_dir = self.outbox_dir.clone();
        let request = request.clone();
        let delivered = tokio::task::spawn_blocking(move || deliver(&outbox_dir, request))
            .await
            .map_err(|err| ShareSheetError::failed(err.to_string()))?
            .map_err(|err| ShareSheetError::failed(err.to_string()))?;
        info!(file = %delivered, "report placed in outbox");
        Ok(())
    }
}

/// Copy the file into the outbox, then write its manifest. Returns the copy.
fn deliver(outbox_dir: &Utf8Path, request: ShareRequest) -> io::Result<Utf8PathBuf> {
    let file_name = request
        .file
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{} has no file name", request.file)))?
        .to_owned();
    let source_dir = request
        .file
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let contents = Dir::open_ambient_dir(source_dir, ambient_authority())?.read(&file_name)?;

    Dir::create_ambient_dir_all(outbox_dir, ambient_authority())?;
    let outbox = Dir::open_ambient_dir(outbox_dir, ambient_authority())?;
    replace_file(&outbox, &file_name, &contents)?;

    let delivered = outbox_dir.join(&file_name);
    let manifest = ShareRequest {
        file: delivered.clone(),
        ..request
    };
    let manifest_json = serde_json::to_vec_pretty(&manifest).map_err(io::Error::other)?;
    replace_file(&outbox, &format!("{file_name}{MANIFEST_SUFFIX}"), &manifest_json)?;
    Ok(delivered)
}

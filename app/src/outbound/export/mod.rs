//! Report export adapters: PDF conversion and share actions.

mod outbox;
mod pdf_command;
mod share_command;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use outbox::{MANIFEST_SUFFIX, OutboxShareSheet};
pub use pdf_command::{CommandPdfConverter, DEFAULT_PDF_ARGS, DEFAULT_PDF_COMMAND};
pub use share_command::CommandShareSheet;

use crate::domain::ports::{ShareRequest, ShareSheet, ShareSheetError};

/// The share action chosen at start-up.
#[derive(Debug, Clone)]
pub enum ConfiguredShareSheet {
    Command(CommandShareSheet),
    Outbox(OutboxShareSheet),
    /// No share facility; exports fail with "sharing unavailable".
    Unavailable,
}

#[async_trait]
impl ShareSheet for ConfiguredShareSheet {
    async fn is_available(&self) -> bool {
        match self {
            Self::Command(sheet) => sheet.is_available().await,
            Self::Outbox(sheet) => sheet.is_available().await,
            Self::Unavailable => false,
        }
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareSheetError> {
        match self {
            Self::Command(sheet) => sheet.share(request).await,
            Self::Outbox(sheet) => sheet.share(request).await,
            Self::Unavailable => Err(ShareSheetError::unavailable()),
        }
    }
}

fn command_label(command: &[OsString]) -> String {
    command
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `program` names an existing file, directly or via `PATH`.
async fn program_available(program: &OsStr) -> bool {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return is_file(direct.to_path_buf()).await;
    }
    let Some(search) = std::env::var_os("PATH") else {
        return false;
    };
    for dir in std::env::split_paths(&search) {
        if is_file(dir.join(program)).await {
            return true;
        }
    }
    false
}

async fn is_file(path: PathBuf) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_file())
}

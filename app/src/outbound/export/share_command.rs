//! Share action that hands the file to an opener program such as `xdg-open`.

use std::ffi::OsString;
use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use super::{command_label, program_available};
use crate::domain::ports::{ShareRequest, ShareSheet, ShareSheetError};

/// Share sheet backed by `<program> <args...> <file>`.
#[derive(Debug, Clone)]
pub struct CommandShareSheet {
    command: Vec<OsString>,
}

impl CommandShareSheet {
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        let mut command = vec![program.into()];
        command.extend(args.into_iter().map(Into::into));
        Self { command }
    }
}

#[async_trait]
impl ShareSheet for CommandShareSheet {
    async fn is_available(&self) -> bool {
        match self.command.first() {
            Some(program) => program_available(program).await,
            None => false,
        }
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareSheetError> {
        let Some(program) = self.command.first() else {
            return Err(ShareSheetError::unavailable());
        };
        let label = command_label(&self.command);
        let output = Command::new(program)
            .args(self.command.iter().skip(1))
            .arg(request.file.as_std_path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => ShareSheetError::unavailable(),
                _ => ShareSheetError::failed(format!("{label}: {err}")),
            })?;

        if output.status.success() {
            info!(file = %request.file, title = request.dialog_title, "report handed to opener");
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        warn!(command = label, status = %output.status, "share command failed");
        Err(ShareSheetError::failed(format!(
            "{label} exited with {}: {stderr}",
            output.status
        )))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    fn request() -> ShareRequest {
        ShareRequest {
            file: Utf8PathBuf::from("/tmp/SubjectReport-Science.pdf"),
            mime_type: "application/pdf".to_owned(),
            uti: "com.adobe.pdf".to_owned(),
            dialog_title: "Share Science Report".to_owned(),
        }
    }

    #[tokio::test]
    async fn available_when_program_is_on_path() {
        assert!(CommandShareSheet::new("sh", ["-c", "true"]).is_available().await);
        assert!(
            !CommandShareSheet::new("teaching-buddy-no-such-opener", Vec::<String>::new())
                .is_available()
                .await
        );
    }

    #[tokio::test]
    async fn opener_receives_file_as_last_argument() {
        let sheet = CommandShareSheet::new(
            "sh",
            ["-c", r#"test "$1" = /tmp/SubjectReport-Science.pdf"#, "sh"],
        );
        assert_eq!(sheet.share(&request()).await, Ok(()));
    }

    #[tokio::test]
    async fn non_zero_exit_is_a_share_failure() {
        let sheet = CommandShareSheet::new("sh", ["-c", "echo no display >&2; exit 4", "sh"]);
        let err = sheet.share(&request()).await.expect_err("fails");
        assert!(matches!(err, ShareSheetError::Failed { ref message } if message.contains("no display")));
    }

    #[tokio::test]
    async fn missing_opener_is_unavailable() {
        let sheet = CommandShareSheet::new("teaching-buddy-no-such-opener", Vec::<String>::new());
        assert_eq!(sheet.share(&request()).await, Err(ShareSheetError::Unavailable));
    }
}

//! HTML-to-PDF conversion through an external command.
//!
//! The command receives the HTML on stdin and writes the PDF to a staging
//! file in the export directory. The staging file is renamed to its final
//! name only after the command succeeds and produced a non-empty file.

use std::ffi::OsString;
use std::io;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::command_label;
use crate::domain::RenderedReport;
use crate::domain::ports::{DocumentConversionError, DocumentConverter, ExportedFile};

/// Default converter program.
pub const DEFAULT_PDF_COMMAND: &str = "wkhtmltopdf";

/// Default converter arguments, placed before the input and output operands.
pub const DEFAULT_PDF_ARGS: [&str; 3] = ["--quiet", "--encoding", "utf-8"];

/// Converter backed by a program such as `wkhtmltopdf`.
///
/// Invoked as `<program> <args...> - <output>`.
#[derive(Debug, Clone)]
pub struct CommandPdfConverter {
    command: Vec<OsString>,
    export_dir: Utf8PathBuf,
}

impl CommandPdfConverter {
    /// Build a converter writing into `export_dir`.
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
        export_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        let mut command = vec![program.into()];
        command.extend(args.into_iter().map(Into::into));
        Self {
            command,
            export_dir: export_dir.into(),
        }
    }

    /// Directory receiving converted files.
    #[must_use]
    pub fn export_dir(&self) -> &Utf8Path {
        &self.export_dir
    }

    async fn open_export_dir(&self) -> Result<Arc<Dir>, DocumentConversionError> {
        let root = self.export_dir.clone();
        tokio::task::spawn_blocking(move || {
            Dir::create_ambient_dir_all(&root, ambient_authority())?;
            Dir::open_ambient_dir(&root, ambient_authority())
        })
        .await
        .map_err(|err| DocumentConversionError::failed(err.to_string()))?
        .map(Arc::new)
        .map_err(|err| {
            DocumentConversionError::failed(format!("export directory {}: {err}", self.export_dir))
        })
    }

    async fn run(&self, html: &str, output: &Utf8Path) -> Result<(), DocumentConversionError> {
        let Some(program) = self.command.first() else {
            return Err(DocumentConversionError::failed("converter command is empty"));
        };
        let label = command_label(&self.command);
        let mut child = Command::new(program)
            .args(self.command.iter().skip(1))
            .arg("-")
            .arg(output.as_std_path())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| DocumentConversionError::failed(format!("{label}: {err}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DocumentConversionError::failed(format!("{label}: stdin unavailable")))?;
        let document = html.as_bytes().to_vec();
        let feed = async move {
            stdin.write_all(&document).await?;
            stdin.shutdown().await
        };
        let (fed, finished) = tokio::join!(feed, child.wait_with_output());
        let finished =
            finished.map_err(|err| DocumentConversionError::failed(format!("{label}: {err}")))?;

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr).trim().to_owned();
            return Err(DocumentConversionError::failed(format!(
                "{label} exited with {}: {stderr}",
                finished.status
            )));
        }
        fed.map_err(|err| {
            DocumentConversionError::failed(format!("{label}: writing input: {err}"))
        })
    }
}

#[async_trait]
impl DocumentConverter for CommandPdfConverter {
    async fn convert(
        &self,
        document: &RenderedReport,
        file_name: &str,
    ) -> Result<ExportedFile, DocumentConversionError> {
        if Utf8Path::new(file_name).file_name() != Some(file_name) {
            return Err(DocumentConversionError::failed(format!(
                "'{file_name}' is not a plain file name"
            )));
        }
        let dir = self.open_export_dir().await?;
        let staging_name = format!(".{file_name}.{}.partial", Uuid::new_v4().simple());
        let staging_path = self.export_dir.join(&staging_name);
        debug!(file_name, staging = %staging_path, "converting report");

        let committed: Result<u64, DocumentConversionError> = async {
            self.run(document.as_str(), &staging_path).await?;
            commit_staged(Arc::clone(&dir), staging_name.clone(), file_name.to_owned()).await
        }
        .await;

        match committed {
            Ok(size_bytes) => {
                let path = self.export_dir.join(file_name);
                info!(path = %path, size_bytes, "report converted");
                Ok(ExportedFile { path, size_bytes })
            }
            Err(err) => {
                discard(&dir, &staging_name);
                warn!(error = %err, file_name, "report conversion failed");
                Err(err)
            }
        }
    }
}

async fn commit_staged(
    dir: Arc<Dir>,
    staging: String,
    target: String,
) -> Result<u64, DocumentConversionError> {
    tokio::task::spawn_blocking(move || commit(&dir, &staging, &target))
        .await
        .map_err(|err| DocumentConversionError::failed(err.to_string()))?
        .map_err(|err| DocumentConversionError::failed(err.to_string()))
}

/// Move a non-empty staging file over `target`, returning its size.
fn commit(dir: &Dir, staging: &str, target: &str) -> io::Result<u64> {
    let size = match dir.metadata(staging) {
        Ok(metadata) => metadata.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(io::Error::other("converter produced no output file"));
        }
        Err(err) => return Err(err),
    };
    if size == 0 {
        return Err(io::Error::other("converter produced an empty file"));
    }
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(staging, dir, target)?;
    Ok(size)
}

fn discard(dir: &Dir, staging: &str) {
    match dir.remove_file(staging) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(error = %err, staging, "partial export left behind"),
    }
}

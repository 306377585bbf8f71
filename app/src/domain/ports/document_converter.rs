//! Port for turning a rendered report into a distributable file.
use async_trait::async_trait;
use camino::Utf8PathBuf;

use crate::domain::RenderedReport;

use super::define_port_error;

define_port_error! {
    /// Errors raised by document converters.
    pub enum DocumentConversionError {
        /// Conversion did not produce a file.
        Failed { message: String } => "report conversion failed: {message}",
    }
}

/// A file written by a converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Where the file was written.
    pub path: Utf8PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// HTML-to-PDF conversion.
///
/// Implementations must not leave a partial file behind when they fail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Convert `document` into a file named `file_name`.
    async fn convert(
        &self,
        document: &RenderedReport,
        file_name: &str,
    ) -> Result<ExportedFile, DocumentConversionError>;
}

//! Report export: render, convert to PDF, hand to the share sheet.
//!
//! Only one export runs at a time. The subject being exported is published
//! on a watch channel so inbound adapters can disable their controls while
//! an export is in flight.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ports::{
    DocumentConversionError, DocumentConverter, ExportedFile, ShareRequest, ShareSheet,
    ShareSheetError,
};
use super::report::{
    DateStyle, ReportData, render_report_html, report_file_name, share_dialog_title,
};

/// MIME type of exported reports.
pub const PDF_MIME_TYPE: &str = "application/pdf";
/// Uniform type identifier of exported reports.
pub const PDF_UTI: &str = "com.adobe.pdf";

/// Export failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// No share facility; checked before anything is written.
    #[error("sharing is not available on this device")]
    SharingUnavailable,
    /// The document could not be converted.
    #[error("failed to generate report: {message}")]
    ReportGenerationFailed {
        /// Converter failure description.
        message: String,
    },
    /// The file was produced but the share action failed.
    #[error("failed to share report: {message}")]
    ShareFailed {
        /// Share failure description.
        message: String,
    },
    /// Another export has not finished yet.
    #[error("an export for {subject} is already in progress")]
    ExportInProgress {
        /// Subject currently exporting.
        subject: String,
    },
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Generated PDF.
    pub file: ExportedFile,
    /// Title shown on the share dialog.
    pub dialog_title: String,
}

/// Clears the in-flight marker when the export finishes, however it ends.
struct ExportPermit<'a> {
    in_flight: &'a watch::Sender<Option<String>>,
}

impl Drop for ExportPermit<'_> {
    fn drop(&mut self) {
        self.in_flight.send_replace(None);
    }
}

/// Runs the export pipeline against injected conversion and share ports.
pub struct ReportExporter<C, S> {
    converter: Arc<C>,
    share_sheet: Arc<S>,
    date_style: DateStyle,
    in_flight: watch::Sender<Option<String>>,
}

impl<C, S> ReportExporter<C, S> {
    /// Create an exporter rendering dates in `date_style`.
    pub fn new(converter: Arc<C>, share_sheet: Arc<S>, date_style: DateStyle) -> Self {
        let (in_flight, _) = watch::channel(None);
        Self {
            converter,
            share_sheet,
            date_style,
            in_flight,
        }
    }

    /// Subject currently exporting, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<String> {
        self.in_flight.borrow().clone()
    }

    /// Watch the in-flight subject change.
    #[must_use]
    pub fn subscribe_in_flight(&self) -> watch::Receiver<Option<String>> {
        self.in_flight.subscribe()
    }

    fn begin(&self, subject: &str) -> Result<ExportPermit<'_>, ExportError> {
        let mut busy_with = None;
        let acquired = self.in_flight.send_if_modified(|current| {
            if let Some(active) = current {
                busy_with = Some(active.clone());
                false
            } else {
                *current = Some(subject.to_owned());
                true
            }
        });
        if acquired {
            Ok(ExportPermit {
                in_flight: &self.in_flight,
            })
        } else {
            Err(ExportError::ExportInProgress {
                subject: busy_with.unwrap_or_default(),
            })
        }
    }
}

impl<C, S> ReportExporter<C, S>
where
    C: DocumentConverter,
    S: ShareSheet,
{
    /// Render `report` to PDF and share it.
    ///
    /// Share availability is checked first, so
    /// [`ExportError::SharingUnavailable`] means no file was written.
    pub async fn export(&self, report: &ReportData) -> Result<ExportReceipt, ExportError> {
        let subject = report.subject_name.as_str();
        let _permit = self.begin(subject)?;

        if !self.share_sheet.is_available().await {
            warn!(subject, "sharing unavailable; report not generated");
            return Err(ExportError::SharingUnavailable);
        }

        let document = render_report_html(report, self.date_style);
        let file_name = report_file_name(subject);
        debug!(subject, %file_name, rows = report.rows.len(), "converting report");
        let file = self
            .converter
            .convert(&document, &file_name)
            .await
            .map_err(|err| {
                warn!(subject, error = %err, "report conversion failed");
                let DocumentConversionError::Failed { message } = err;
                ExportError::ReportGenerationFailed { message }
            })?;

        let dialog_title = share_dialog_title(subject);
        let request = ShareRequest {
            file: file.path.clone(),
            mime_type: PDF_MIME_TYPE.to_owned(),
            uti: PDF_UTI.to_owned(),
            dialog_title: dialog_title.clone(),
        };
        self.share_sheet
            .share(&request)
            .await
            .map_err(|err| match err {
                ShareSheetError::Unavailable => ExportError::SharingUnavailable,
                ShareSheetError::Failed { message } => ExportError::ShareFailed { message },
            })?;

        info!(subject, path = %file.path, bytes = file.size_bytes, "report exported");
        Ok(ExportReceipt { file, dialog_title })
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;

//! User-facing notices: the title and message shown for an outcome.

use std::fmt;

use super::auth::AuthError;
use super::export::ExportError;
use super::lesson_plan_service::LessonPlanServiceError;
use super::records_service::RecordServiceError;
use super::report_service::ReportServiceError;
use super::session::SessionError;
use super::validation::ValidationError;

const UNEXPECTED: &str = "An unexpected error occurred.";

/// A dialog-style notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub title: String,
    pub message: String,
}

impl UserNotice {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_owned(),
            message: message.into(),
        }
    }

    /// Notice confirming a completed action.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message)
    }

    fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    fn unexpected(title: &str, detail: &impl fmt::Display) -> Self {
        Self::new(title, format!("{UNEXPECTED} {detail}"))
    }

    /// Notice for a failed sign-in.
    #[must_use]
    pub fn for_sign_in(err: &SessionError) -> Self {
        match err {
            SessionError::Invalid(ValidationError::Required { .. }) => {
                Self::error("Please enter both email and password.")
            }
            SessionError::Invalid(other) => Self::error(sentence(other)),
            SessionError::Auth(AuthError::InvalidCredentials) => {
                Self::new("Login Failed", "Invalid email or password.")
            }
            SessionError::Auth(other) => Self::unexpected("Login Error", other),
            SessionError::Storage(other) => Self::unexpected("Login Error", other),
            SessionError::Unauthenticated => Self::from(err),
        }
    }

    /// Notice for a failed registration.
    #[must_use]
    pub fn for_sign_up(err: &SessionError) -> Self {
        match err {
            SessionError::Invalid(ValidationError::Required { .. }) => {
                Self::error("Please fill in all fields.")
            }
            SessionError::Invalid(ValidationError::PasswordMismatch) => {
                Self::error("Passwords do not match.")
            }
            SessionError::Invalid(ValidationError::TooShort { min, .. }) => Self::error(format!(
                "Password should be at least {min} characters long."
            )),
            SessionError::Invalid(other) => Self::error(sentence(other)),
            SessionError::Auth(AuthError::AlreadyRegistered) => Self::new(
                "Registration Failed",
                "This email is already registered.",
            ),
            SessionError::Auth(other) => Self::unexpected("Registration Error", other),
            SessionError::Storage(other) => Self::unexpected("Registration Error", other),
            SessionError::Unauthenticated => Self::from(err),
        }
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Capitalise an error message and end it with a full stop.
fn sentence(err: &impl fmt::Display) -> String {
    let text = err.to_string();
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}.", first.to_uppercase(), chars.as_str())
    })
}

impl From<&SessionError> for UserNotice {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Unauthenticated => Self::error("You must be logged in."),
            SessionError::Invalid(inner) => Self::error(sentence(inner)),
            SessionError::Auth(inner) => Self::unexpected("Operation Failed", inner),
            SessionError::Storage(inner) => Self::unexpected("Operation Failed", inner),
        }
    }
}

impl From<&RecordServiceError> for UserNotice {
    fn from(err: &RecordServiceError) -> Self {
        match err {
            RecordServiceError::Invalid(ValidationError::Required { .. }) => {
                Self::error("All fields are required.")
            }
            RecordServiceError::Invalid(other) => Self::error(sentence(other)),
            RecordServiceError::UnknownSubject { .. } => Self::error(sentence(err)),
            RecordServiceError::Catalogue(inner) => Self::unexpected("Operation Failed", inner),
            RecordServiceError::Repository(inner) => Self::unexpected("Operation Failed", inner),
        }
    }
}

impl From<&LessonPlanServiceError> for UserNotice {
    fn from(err: &LessonPlanServiceError) -> Self {
        match err {
            LessonPlanServiceError::Invalid(ValidationError::Required {
                field: "title" | "subject" | "date",
            }) => Self::error("Title, Subject, and Date are required."),
            LessonPlanServiceError::Invalid(
                ValidationError::Required { .. } | ValidationError::BlankEntry { .. },
            ) => Self::error("Objectives, Activities, and Assessment cannot be empty."),
            LessonPlanServiceError::Invalid(other) => Self::error(sentence(other)),
            LessonPlanServiceError::UnknownSubject { .. } => Self::error(sentence(err)),
            LessonPlanServiceError::Catalogue(inner) => {
                Self::unexpected("Operation Failed", inner)
            }
            LessonPlanServiceError::Repository(inner) => {
                Self::unexpected("Operation Failed", inner)
            }
        }
    }
}

impl From<&ExportError> for UserNotice {
    fn from(err: &ExportError) -> Self {
        match err {
            ExportError::SharingUnavailable => {
                Self::error("Sharing is not available on this device.")
            }
            ExportError::ExportInProgress { subject } => Self::new(
                "Please Wait",
                format!("The {subject} report is still being generated."),
            ),
            ExportError::ReportGenerationFailed { message }
            | ExportError::ShareFailed { message } => {
                Self::unexpected("Operation Failed", message)
            }
        }
    }
}

impl From<&ReportServiceError> for UserNotice {
    fn from(err: &ReportServiceError) -> Self {
        match err {
            ReportServiceError::SubjectNotFound { .. } => Self::error("Subject data not found."),
            ReportServiceError::Export(inner) => Self::from(inner),
            ReportServiceError::Query(inner) => Self::unexpected("Operation Failed", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        SessionError::Auth(AuthError::InvalidCredentials),
        "Login Failed",
        "Invalid email or password."
    )]
    #[case(
        SessionError::Invalid(ValidationError::Required { field: "password" }),
        "Error",
        "Please enter both email and password."
    )]
    #[case(
        SessionError::Auth(AuthError::network("timed out")),
        "Login Error",
        "An unexpected error occurred. authentication service error: timed out"
    )]
    fn sign_in_notices(#[case] err: SessionError, #[case] title: &str, #[case] message: &str) {
        let notice = UserNotice::for_sign_in(&err);
        assert_eq!((notice.title.as_str(), notice.message.as_str()), (title, message));
    }

    #[rstest]
    #[case(SessionError::Auth(AuthError::AlreadyRegistered), "Registration Failed")]
    #[case(SessionError::Invalid(ValidationError::PasswordMismatch), "Error")]
    fn sign_up_titles(#[case] err: SessionError, #[case] title: &str) {
        assert_eq!(UserNotice::for_sign_up(&err).title, title);
    }

    #[test]
    fn short_password_message_names_minimum() {
        let err = SessionError::Invalid(ValidationError::TooShort {
            field: "password",
            min: 6,
        });
        assert_eq!(
            UserNotice::for_sign_up(&err).message,
            "Password should be at least 6 characters long."
        );
    }

    #[test]
    fn sharing_unavailable_matches_dialog() {
        let notice = UserNotice::from(&ReportServiceError::Export(ExportError::SharingUnavailable));
        assert_eq!(
            notice,
            UserNotice {
                title: "Error".to_owned(),
                message: "Sharing is not available on this device.".to_owned(),
            }
        );
    }

    #[test]
    fn generation_failure_includes_underlying_message() {
        let notice = UserNotice::from(&ExportError::ReportGenerationFailed {
            message: "wkhtmltopdf not found".to_owned(),
        });
        assert_eq!(notice.title, "Operation Failed");
        assert!(notice.message.ends_with("wkhtmltopdf not found"));
    }

    #[test]
    fn plan_field_groups_get_their_own_messages() {
        let missing_title = LessonPlanServiceError::Invalid(ValidationError::Required { field: "title" });
        let blank_activity = LessonPlanServiceError::Invalid(ValidationError::BlankEntry {
            field: "activities",
            position: 1,
        });
        assert_eq!(
            UserNotice::from(&missing_title).message,
            "Title, Subject, and Date are required."
        );
        assert_eq!(
            UserNotice::from(&blank_activity).message,
            "Objectives, Activities, and Assessment cannot be empty."
        );
    }

    #[test]
    fn period_errors_read_as_sentences() {
        let err = RecordServiceError::Invalid(ValidationError::PeriodOutOfRange { max: 8 });
        assert_eq!(UserNotice::from(&err).message, "Period must be between 1 and 8.");
    }
}

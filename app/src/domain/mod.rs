//! Domain primitives, pure report logic and the services driving the ports.
//!
//! Public surface:
//! - users, sessions and form validation (`user`, `auth`, `validation`);
//! - teaching records, lesson plans and subjects;
//! - aggregation and HTML report rendering, both pure;
//! - `ReportExporter`, `SessionManager` and the record, plan and report
//!   services, which depend only on `ports`.

pub mod aggregation;
pub mod auth;
pub mod export;
pub mod lesson_plan;
pub mod lesson_plan_service;
pub mod notice;
pub mod ports;
pub mod records_service;
pub mod report;
pub mod report_service;
pub mod session;
pub mod subject;
pub mod teaching_record;
pub mod user;
pub mod validation;

pub use self::aggregation::{
    ReportMonth, ReportMonthParseError, SubjectRecordGroup, group_by_subject, records_in_month,
    sort_newest_first,
};
pub use self::auth::{
    AuthError, EmptyTokenError, Registration, Session, SessionToken, SignInCredentials,
};
pub use self::export::{ExportError, ExportReceipt, PDF_MIME_TYPE, PDF_UTI, ReportExporter};
pub use self::lesson_plan::{
    LessonPlan, LessonPlanDraft, LessonPlanParts, MAX_PLAN_ENTRIES, PlanId, ValidPlanDraft,
};
pub use self::lesson_plan_service::{LessonPlanService, LessonPlanServiceError};
pub use self::notice::UserNotice;
pub use self::records_service::{RecordServiceError, TeachingRecordService};
pub use self::report::{
    DateStyle, NOT_AVAILABLE, RenderedReport, ReportData, ReportRow, escape_html,
    render_report_html, report_file_name, share_dialog_title,
};
pub use self::report_service::{ReportServiceError, SubjectReportService};
pub use self::session::{SessionError, SessionManager, SessionState};
pub use self::subject::{Subject, SubjectId, SubjectValidationError};
pub use self::teaching_record::{
    DEFAULT_MAX_PERIOD, EmptyRecordIdError, Grade, Period, RecordId, TeachingRecord,
    TeachingRecordDraft, TeachingRecordParts, ValidRecordDraft, ZeroPeriodError,
};
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserValidationError};
pub use self::validation::{MIN_PASSWORD_LENGTH, ValidationError};

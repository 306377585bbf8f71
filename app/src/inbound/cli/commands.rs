//! Runs one parsed command and renders its outcome as text.

use crate::domain::ports::{SubjectCatalogue, TeachingRecordQuery};
use crate::domain::{
    LessonPlan, LessonPlanDraft, RecordServiceError, ReportServiceError, Session, SubjectId,
    SubjectRecordGroup, TeachingRecord, TeachingRecordDraft, UserNotice, sort_newest_first,
};
use crate::settings::DataSource;

use super::wiring::CliServices;
use super::{AddPlanArgs, AddRecordArgs, Command, PlansCommand, RecordsCommand, ReportsCommand};

/// Run `command`, returning the text to print or the notice explaining why
/// it failed.
pub async fn execute(services: &CliServices, command: Command) -> Result<String, UserNotice> {
    match command {
        Command::SignIn { email, password } => {
            let session = services
                .sessions
                .sign_in(&email, &password)
                .await
                .map_err(|err| UserNotice::for_sign_in(&err))?;
            Ok(UserNotice::success(format!("Welcome back, {}!", session.user().name())).to_string())
        }
        Command::SignUp {
            name,
            email,
            password,
            confirm_password,
        } => {
            let session = services
                .sessions
                .sign_up(&name, &email, &password, &confirm_password)
                .await
                .map_err(|err| UserNotice::for_sign_up(&err))?;
            Ok(UserNotice::success(format!(
                "Registration successful! Signed in as {}.",
                session.user().email()
            ))
            .to_string())
        }
        Command::SignOut => {
            services
                .sessions
                .sign_out()
                .await
                .map_err(|err| UserNotice::from(&err))?;
            Ok("Signed out.".to_owned())
        }
        Command::Whoami => {
            let session = signed_in(services).await?;
            let user = session.user();
            Ok(format!("{} <{}> (id {})", user.name(), user.email(), user.id()))
        }
        Command::Subjects => {
            let subjects = services
                .store
                .list_subjects()
                .await
                .map_err(|err| UserNotice::from(&RecordServiceError::Catalogue(err)))?;
            Ok(lines(
                subjects
                    .iter()
                    .map(|subject| format!("{}\t{}", subject.id(), subject.name())),
                "No subjects available.",
            ))
        }
        Command::Records(command) => records(services, command).await,
        Command::Plans(command) => plans(services, command).await,
        Command::Reports(command) => reports(services, command).await,
    }
}

async fn signed_in(services: &CliServices) -> Result<Session, UserNotice> {
    services.sessions.restore().await;
    services
        .sessions
        .require_session()
        .map_err(|err| UserNotice::from(&err))
}

async fn records(services: &CliServices, command: RecordsCommand) -> Result<String, UserNotice> {
    let session = signed_in(services).await?;
    match command {
        RecordsCommand::List => {
            let records = match services.data_source {
                DataSource::Mock => services
                    .records
                    .list(&session)
                    .await
                    .map_err(|err| UserNotice::from(&err))?,
                DataSource::Remote => {
                    let mut records = services
                        .record_source
                        .fetch_for_owner(session.user().id())
                        .await
                        .map_err(|err| UserNotice::from(&ReportServiceError::from(err)))?;
                    sort_newest_first(&mut records);
                    records
                }
            };
            Ok(lines(records.iter().map(record_line), "No teaching records yet."))
        }
        RecordsCommand::Add(AddRecordArgs {
            subject,
            period,
            description,
        }) => {
            let record = services
                .records
                .add(
                    &session,
                    TeachingRecordDraft {
                        subject_id: subject,
                        period,
                        description,
                    },
                )
                .await
                .map_err(|err| UserNotice::from(&err))?;
            Ok(format!(
                "{}\n{}",
                UserNotice::success("Teaching record added successfully."),
                record_line(&record)
            ))
        }
    }
}

async fn plans(services: &CliServices, command: PlansCommand) -> Result<String, UserNotice> {
    let session = signed_in(services).await?;
    match command {
        PlansCommand::List => {
            let plans = services
                .plans
                .list(&session)
                .await
                .map_err(|err| UserNotice::from(&err))?;
            Ok(lines(plans.iter().map(plan_block), "No lesson plans yet."))
        }
        PlansCommand::Add(args) => {
            let AddPlanArgs {
                title,
                subject,
                date,
                objectives,
                activities,
                assessment,
                notes,
            } = args;
            let plan = services
                .plans
                .create(
                    &session,
                    LessonPlanDraft {
                        title,
                        subject_id: subject,
                        date,
                        objectives,
                        activities,
                        assessment,
                        notes,
                    },
                )
                .await
                .map_err(|err| UserNotice::from(&err))?;
            Ok(format!(
                "{}\n{}",
                UserNotice::success("Lesson plan added successfully."),
                plan_block(&plan)
            ))
        }
    }
}

async fn reports(services: &CliServices, command: ReportsCommand) -> Result<String, UserNotice> {
    let session = signed_in(services).await?;
    match command {
        ReportsCommand::List { month } => {
            let groups = services
                .reports
                .subject_groups(&session, month)
                .await
                .map_err(|err| UserNotice::from(&err))?;
            Ok(lines(groups.iter().map(group_block), "No teaching records to report."))
        }
        ReportsCommand::Export { subject, month } => {
            let subject_id =
                SubjectId::new(&subject).map_err(|_| UserNotice::from(&not_found(&subject)))?;
            let receipt = services
                .reports
                .export_subject(&session, &subject_id, month)
                .await
                .map_err(|err| UserNotice::from(&err))?;
            Ok(UserNotice::success(format!(
                "{} ({} bytes) handed to \"{}\".",
                receipt.file.path, receipt.file.size_bytes, receipt.dialog_title
            ))
            .to_string())
        }
    }
}

fn not_found(subject: &str) -> ReportServiceError {
    ReportServiceError::SubjectNotFound {
        subject_id: subject.to_owned(),
    }
}

fn lines(items: impl Iterator<Item = String>, empty: &str) -> String {
    let joined = items.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        empty.to_owned()
    } else {
        joined
    }
}

fn record_line(record: &TeachingRecord) -> String {
    let grade = record
        .grade()
        .map(|grade| format!("\tgrade {}", grade.as_ref()))
        .unwrap_or_default();
    format!(
        "{}\tP{}\t{}\t{}{grade}",
        record.date(),
        record.period(),
        record.subject_name(),
        record.description()
    )
}

fn plan_block(plan: &LessonPlan) -> String {
    let mut block = vec![format!("{}\t{}\t{}", plan.date(), plan.subject_name(), plan.title())];
    block.extend(plan.objectives().iter().map(|item| format!("  objective: {item}")));
    block.extend(plan.activities().iter().map(|item| format!("  activity: {item}")));
    block.push(format!("  assessment: {}", plan.assessment()));
    if let Some(notes) = plan.notes() {
        block.push(format!("  notes: {notes}"));
    }
    block.join("\n")
}

fn group_block(group: &SubjectRecordGroup) -> String {
    let mut block = vec![format!(
        "{} ({}): {} record(s)",
        group.subject_name(),
        group.subject_id(),
        group.records().len()
    )];
    block.extend(group.records().iter().map(|record| format!("  {}", record_line(record))));
    block.join("\n")
}

//! Command-line surface built with clap.
//!
//! [`Cli`] parses arguments, [`CliServices`] wires the configured adapters
//! into the domain services, and [`execute`] runs one command against them.

mod commands;
mod wiring;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::ReportMonth;

pub use commands::execute;
pub use wiring::{CliServices, WiringError};

#[derive(Debug, Parser)]
#[command(name = "teaching-buddy", version, about = "Log lessons, plan classes and export subject reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new teacher account and sign in.
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session.
    SignOut,
    /// Show the signed-in teacher.
    Whoami,
    /// List the subjects records and plans can refer to.
    Subjects,
    /// Daily teaching records.
    #[command(subcommand)]
    Records(RecordsCommand),
    /// Lesson plans.
    #[command(subcommand)]
    Plans(PlansCommand),
    /// Subject reports.
    #[command(subcommand)]
    Reports(ReportsCommand),
}

#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List records, newest first.
    List,
    /// Log a lesson for today.
    Add(AddRecordArgs),
}

#[derive(Debug, Args)]
pub struct AddRecordArgs {
    /// Subject id, e.g. `sub1`.
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub period: Option<u8>,
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Debug, Subcommand)]
pub enum PlansCommand {
    /// List plans, latest date first.
    List,
    /// Create a lesson plan.
    Add(AddPlanArgs),
}

#[derive(Debug, Args)]
pub struct AddPlanArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long)]
    pub subject: Option<String>,
    /// Lesson date as `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Learning objective; repeat for up to five.
    #[arg(long = "objective")]
    pub objectives: Vec<String>,
    /// Class activity; repeat for up to five.
    #[arg(long = "activity")]
    pub activities: Vec<String>,
    #[arg(long, default_value = "")]
    pub assessment: String,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// Show records grouped by subject.
    List {
        /// Restrict to one month, `YYYY-MM`.
        #[arg(long)]
        month: Option<ReportMonth>,
    },
    /// Render one subject's report to PDF and share it.
    Export {
        /// Subject id, e.g. `sub1`.
        #[arg(long)]
        subject: String,
        #[arg(long)]
        month: Option<ReportMonth>,
    },
}

//! Command-line entry point: loads settings, wires adapters and runs one
//! command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use teaching_buddy::inbound::cli::{Cli, CliServices, execute};
use teaching_buddy::settings::AppSettings;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<ExitCode> {
    let settings = AppSettings::load_from_iter([OsString::from("teaching-buddy")])
        .wrap_err("failed to load settings")?;
    let services = CliServices::from_settings(&settings, Arc::new(DefaultClock))
        .wrap_err("failed to initialise services")?;

    match execute(&services, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(notice) => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
    }
}

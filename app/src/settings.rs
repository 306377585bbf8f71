//! Application settings loaded via OrthoConfig.
//!
//! Every field is optional; accessors apply the defaults. Values come from
//! `TEACHING_BUDDY_*` environment variables and OrthoConfig's config files.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DEFAULT_MAX_PERIOD, DateStyle};
use crate::outbound::export::{DEFAULT_PDF_ARGS, DEFAULT_PDF_COMMAND};

/// Remote API used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://teach-buddy-be.vercel.app";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_DIR: &str = ".teaching-buddy/session";
const DEFAULT_MOCK_SEED: u64 = 7;
#[cfg(target_os = "macos")]
const DEFAULT_SHARE_COMMAND: &str = "open";
#[cfg(not(target_os = "macos"))]
const DEFAULT_SHARE_COMMAND: &str = "xdg-open";
/// `share_command` value that turns sharing off.
pub const SHARE_DISABLED: &str = "none";

/// Problems with configured values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown data source '{value}' (expected 'mock' or 'remote')")]
    DataSource { value: String },
    #[error("invalid API base URL '{value}': {message}")]
    BaseUrl { value: String, message: String },
    #[error("{setting} path {path} is not valid UTF-8")]
    NonUtf8Path { setting: &'static str, path: String },
    #[error("max period must be at least 1")]
    MaxPeriod,
}

/// Which back end serves users and records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataSource {
    /// Bundled in-memory data; nothing leaves the process.
    #[default]
    Mock,
    /// The remote HTTP API.
    Remote,
}

impl FromStr for DataSource {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "remote" => Ok(Self::Remote),
            _ => Err(SettingsError::DataSource {
                value: value.to_owned(),
            }),
        }
    }
}

/// Where exported reports are handed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareTarget {
    /// Launch `program args... <file>`.
    Command { program: String, args: Vec<String> },
    /// Copy into a directory alongside a JSON manifest.
    Outbox(Utf8PathBuf),
    Disabled,
}

/// Configuration values for the Teaching Buddy client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TEACHING_BUDDY")]
pub struct AppSettings {
    /// `mock` or `remote`.
    pub data_source: Option<String>,
    /// Base URL of the remote API.
    pub api_base_url: Option<String>,
    /// Per-request timeout for the remote API, in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Directory holding the persisted session.
    pub session_dir: Option<PathBuf>,
    /// Directory receiving converted reports.
    pub export_dir: Option<PathBuf>,
    /// Outbox directory; used for sharing when no share command is set.
    pub outbox_dir: Option<PathBuf>,
    /// Opener command line, or `none` to disable sharing.
    pub share_command: Option<String>,
    /// HTML-to-PDF program.
    pub pdf_command: Option<String>,
    /// Whitespace-separated arguments for the PDF program.
    pub pdf_args: Option<String>,
    /// Locale tag such as `en_GB.UTF-8`, used for report dates.
    pub locale: Option<String>,
    /// Highest selectable lesson period.
    pub max_period: Option<u8>,
    /// Seed for generated mock records.
    pub mock_seed: Option<u64>,
    /// Extra mock records to generate for each bundled teacher.
    pub mock_record_count: Option<usize>,
}

fn utf8_path(setting: &'static str, path: PathBuf) -> Result<Utf8PathBuf, SettingsError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| SettingsError::NonUtf8Path {
        setting,
        path: path.to_string_lossy().into_owned(),
    })
}

impl AppSettings {
    /// Configured data source, defaulting to mock data.
    pub fn data_source(&self) -> Result<DataSource, SettingsError> {
        self.data_source
            .as_deref()
            .map_or(Ok(DataSource::default()), DataSource::from_str)
    }

    /// Remote API base URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::BaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn session_dir(&self) -> Result<Utf8PathBuf, SettingsError> {
        self.session_dir
            .clone()
            .map_or_else(|| Ok(Utf8PathBuf::from(DEFAULT_SESSION_DIR)), |path| {
                utf8_path("session", path)
            })
    }

    /// Export directory, defaulting to a folder under the system temp dir.
    pub fn export_dir(&self) -> Result<Utf8PathBuf, SettingsError> {
        let path = self
            .export_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("teaching-buddy-exports"));
        utf8_path("export", path)
    }

    /// PDF program and its arguments.
    #[must_use]
    pub fn pdf_command(&self) -> (String, Vec<String>) {
        let program = self
            .pdf_command
            .clone()
            .unwrap_or_else(|| DEFAULT_PDF_COMMAND.to_owned());
        let args = self.pdf_args.as_deref().map_or_else(
            || DEFAULT_PDF_ARGS.map(str::to_owned).to_vec(),
            |raw| raw.split_whitespace().map(str::to_owned).collect(),
        );
        (program, args)
    }

    /// Share target: an explicit command wins over an outbox directory;
    /// with neither, the platform opener is used.
    pub fn share_target(&self) -> Result<ShareTarget, SettingsError> {
        let command_line = match (&self.share_command, &self.outbox_dir) {
            (Some(command), _) => command.as_str(),
            (None, Some(outbox)) => {
                return utf8_path("outbox", outbox.clone()).map(ShareTarget::Outbox);
            }
            (None, None) => DEFAULT_SHARE_COMMAND,
        };
        let mut words = command_line.split_whitespace().map(str::to_owned);
        Ok(match words.next() {
            Some(program) if program.eq_ignore_ascii_case(SHARE_DISABLED) => ShareTarget::Disabled,
            Some(program) => ShareTarget::Command {
                program,
                args: words.collect(),
            },
            None => ShareTarget::Disabled,
        })
    }

    /// Locale tag from settings, then `LC_ALL`, `LC_TIME` and `LANG`.
    #[must_use]
    pub fn locale(&self) -> Option<String> {
        self.locale.clone().or_else(|| {
            ["LC_ALL", "LC_TIME", "LANG"]
                .into_iter()
                .filter_map(|name| std::env::var(name).ok())
                .find(|value| !value.trim().is_empty())
        })
    }

    #[must_use]
    pub fn date_style(&self) -> DateStyle {
        self.locale()
            .map_or_else(DateStyle::default, |tag| DateStyle::for_locale(&tag))
    }

    pub fn max_period(&self) -> Result<u8, SettingsError> {
        match self.max_period {
            Some(0) => Err(SettingsError::MaxPeriod),
            Some(max) => Ok(max),
            None => Ok(DEFAULT_MAX_PERIOD),
        }
    }

    #[must_use]
    pub fn mock_seed(&self) -> u64 {
        self.mock_seed.unwrap_or(DEFAULT_MOCK_SEED)
    }

    #[must_use]
    pub fn mock_record_count(&self) -> usize {
        self.mock_record_count.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 13] = [
        "TEACHING_BUDDY_DATA_SOURCE",
        "TEACHING_BUDDY_API_BASE_URL",
        "TEACHING_BUDDY_HTTP_TIMEOUT_SECS",
        "TEACHING_BUDDY_SESSION_DIR",
        "TEACHING_BUDDY_EXPORT_DIR",
        "TEACHING_BUDDY_OUTBOX_DIR",
        "TEACHING_BUDDY_SHARE_COMMAND",
        "TEACHING_BUDDY_PDF_COMMAND",
        "TEACHING_BUDDY_PDF_ARGS",
        "TEACHING_BUDDY_LOCALE",
        "TEACHING_BUDDY_MAX_PERIOD",
        "TEACHING_BUDDY_MOCK_SEED",
        "TEACHING_BUDDY_MOCK_RECORD_COUNT",
    ];

    /// Every settings and locale variable, unset unless listed in `set`.
    fn env_with(set: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.into_iter()
            .chain(["LC_ALL", "LC_TIME", "LANG"])
            .map(|name| {
                let value = set
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_owned());
                (name, value)
            })
            .collect()
    }

    fn blank() -> AppSettings {
        AppSettings {
            data_source: None,
            api_base_url: None,
            http_timeout_secs: None,
            session_dir: None,
            export_dir: None,
            outbox_dir: None,
            share_command: None,
            pdf_command: None,
            pdf_args: None,
            locale: None,
            max_period: None,
            mock_seed: None,
            mock_record_count: None,
        }
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("teaching-buddy")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.data_source(), Ok(DataSource::Mock));
        assert_eq!(
            settings.api_base_url().expect("url").as_str(),
            "https://teach-buddy-be.vercel.app/"
        );
        assert_eq!(settings.http_timeout(), Duration::from_secs(30));
        assert_eq!(
            settings.session_dir(),
            Ok(Utf8PathBuf::from(".teaching-buddy/session"))
        );
        assert_eq!(settings.max_period(), Ok(8));
        assert_eq!(settings.date_style(), DateStyle::MonthFirst);
        assert_eq!(
            settings.pdf_command(),
            (
                "wkhtmltopdf".to_owned(),
                vec!["--quiet".to_owned(), "--encoding".to_owned(), "utf-8".to_owned()]
            )
        );
        assert_eq!(settings.mock_record_count(), 0);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("TEACHING_BUDDY_DATA_SOURCE", "Remote"),
            ("TEACHING_BUDDY_API_BASE_URL", "http://localhost:3000"),
            ("TEACHING_BUDDY_HTTP_TIMEOUT_SECS", "5"),
            ("TEACHING_BUDDY_SESSION_DIR", "/tmp/tb-session"),
            ("TEACHING_BUDDY_PDF_ARGS", "--page-size A4"),
            ("TEACHING_BUDDY_LOCALE", "en_GB.UTF-8"),
            ("TEACHING_BUDDY_MAX_PERIOD", "6"),
            ("TEACHING_BUDDY_MOCK_RECORD_COUNT", "40"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.data_source(), Ok(DataSource::Remote));
        assert_eq!(
            settings.api_base_url().expect("url").as_str(),
            "http://localhost:3000/"
        );
        assert_eq!(settings.http_timeout(), Duration::from_secs(5));
        assert_eq!(settings.session_dir(), Ok(Utf8PathBuf::from("/tmp/tb-session")));
        assert_eq!(settings.pdf_command().1, ["--page-size", "A4"]);
        assert_eq!(settings.date_style(), DateStyle::DayFirst);
        assert_eq!(settings.max_period(), Ok(6));
        assert_eq!(settings.mock_record_count(), 40);
    }

    #[rstest]
    fn lang_is_used_when_no_locale_is_configured() {
        let _guard = lock_env(env_with(&[("LANG", "ja_JP.UTF-8")]));
        assert_eq!(load_from_empty_args().date_style(), DateStyle::YearFirst);
    }

    #[rstest]
    #[case(blank(), ShareTarget::Command {
        program: DEFAULT_SHARE_COMMAND.to_owned(),
        args: Vec::new(),
    })]
    #[case(
        AppSettings { share_command: Some("none".to_owned()), ..blank() },
        ShareTarget::Disabled
    )]
    #[case(
        AppSettings { outbox_dir: Some(PathBuf::from("/srv/outbox")), ..blank() },
        ShareTarget::Outbox(Utf8PathBuf::from("/srv/outbox"))
    )]
    #[case(
        AppSettings {
            share_command: Some("gio open".to_owned()),
            outbox_dir: Some(PathBuf::from("/srv/outbox")),
            ..blank()
        },
        ShareTarget::Command { program: "gio".to_owned(), args: vec!["open".to_owned()] }
    )]
    fn share_target_precedence(#[case] settings: AppSettings, #[case] expected: ShareTarget) {
        assert_eq!(settings.share_target(), Ok(expected));
    }

    #[rstest]
    #[case("mock", Ok(DataSource::Mock))]
    #[case(" REMOTE ", Ok(DataSource::Remote))]
    #[case("sqlite", Err(SettingsError::DataSource { value: "sqlite".to_owned() }))]
    fn data_source_parsing(#[case] raw: &str, #[case] expected: Result<DataSource, SettingsError>) {
        assert_eq!(raw.parse::<DataSource>(), expected);
    }

    #[test]
    fn zero_max_period_is_rejected() {
        let settings = AppSettings {
            max_period: Some(0),
            ..blank()
        };
        assert_eq!(settings.max_period(), Err(SettingsError::MaxPeriod));
    }
}

//! Wire DTOs for the remote API.
//!
//! Responses decode into these first, then map into domain types in one
//! pass. Mapping failures are plain strings; the calling adapter wraps them
//! in its port error.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    Grade, Period, RecordId, Registration, Session, SessionToken, SignInCredentials, SubjectId,
    TeachingRecord, TeachingRecordParts, User, UserId,
};

#[derive(Debug, Serialize)]
pub(super) struct SignInRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a SignInCredentials> for SignInRequestDto<'a> {
    fn from(credentials: &'a SignInCredentials) -> Self {
        Self {
            email: credentials.email().as_ref(),
            password: credentials.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SignUpRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) name: &'a str,
}

impl<'a> From<&'a Registration> for SignUpRequestDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            email: registration.email().as_ref(),
            password: registration.password(),
            name: registration.name().as_ref(),
        }
    }
}

/// Identifiers arrive as strings from some deployments and numbers from
/// others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdDto {
    Text(String),
    Number(i64),
}

impl IdDto {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    #[serde(alias = "_id")]
    pub(super) id: IdDto,
    pub(super) email: String,
    pub(super) name: String,
}

impl UserDto {
    fn into_domain(self) -> Result<User, String> {
        User::try_from_strings(&self.id.into_string(), &self.email, &self.name)
            .map_err(|err| format!("invalid user: {err}"))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthResponseDto {
    pub(super) user: UserDto,
    pub(super) token: String,
}

impl AuthResponseDto {
    pub(super) fn into_session(self) -> Result<Session, String> {
        let user = self.user.into_domain()?;
        let token = SessionToken::new(self.token).map_err(|err| err.to_string())?;
        Ok(Session::new(user, token))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TeachingRecordDto {
    #[serde(alias = "_id")]
    pub(super) id: IdDto,
    pub(super) user_id: IdDto,
    pub(super) date: String,
    pub(super) period: u8,
    pub(super) subject_id: IdDto,
    pub(super) subject_name: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) grade: Option<Value>,
}

impl TeachingRecordDto {
    pub(super) fn into_domain(self) -> Result<TeachingRecord, String> {
        let id = self.id.into_string();
        let context = |detail: String| format!("record '{id}': {detail}");
        let parts = TeachingRecordParts {
            id: RecordId::new(&id).map_err(|err| context(err.to_string()))?,
            owner: UserId::new(self.user_id.into_string())
                .map_err(|err| context(err.to_string()))?,
            date: parse_record_date(&self.date).map_err(context)?,
            period: Period::new(self.period).map_err(|err| context(err.to_string()))?,
            subject_id: SubjectId::new(self.subject_id.into_string())
                .map_err(|err| context(err.to_string()))?,
            subject_name: self.subject_name,
            description: self.description,
            grade: parse_grade(self.grade).map_err(context)?,
        };
        Ok(TeachingRecord::new(parts))
    }
}

/// `YYYY-MM-DD`, or the calendar date of an RFC 3339 timestamp.
pub(super) fn parse_record_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|stamp| stamp.date_naive()))
        .map_err(|_| format!("unrecognised date '{trimmed}'"))
}

pub(super) fn parse_grade(raw: Option<Value>) -> Result<Option<Grade>, String> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Grade::from_text(&text)),
        Some(Value::Number(number)) => Ok(Grade::from_text(&number.to_string())),
        Some(other) => Err(format!("unsupported grade value {other}")),
    }
}

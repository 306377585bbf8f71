//! Subjects taught, a static read-only reference list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a subject id or name is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectValidationError {
    #[error("subject id must not be empty")]
    EmptyId,
    #[error("subject name must not be empty")]
    EmptyName,
}

/// Subject identifier such as `sub1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Validate and construct a [`SubjectId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, SubjectValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SubjectValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SubjectId> for String {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl TryFrom<String> for SubjectId {
    type Error = SubjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A subject from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: SubjectId,
    name: String,
}

impl Subject {
    /// Build a subject; the name is trimmed and must not be blank.
    pub fn new(id: SubjectId, name: impl AsRef<str>) -> Result<Self, SubjectValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(SubjectValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name: name.to_owned(),
        })
    }

    /// Catalogue identifier.
    #[must_use]
    pub const fn id(&self) -> &SubjectId {
        &self.id
    }

    /// Display name, copied onto records and plans at creation.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

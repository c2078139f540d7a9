//! Validated narrative fields carried by every task.

use super::ScheduleDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Required task name, trimmed and bounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Longest accepted task name, in characters.
    pub const MAX_CHARS: usize = 50;

    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyTaskName`] when the value is empty
    /// after trimming, or [`ScheduleDomainError::TaskNameTooLong`] when it
    /// exceeds [`Self::MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ScheduleDomainError::EmptyTaskName);
        }
        let length = normalized.chars().count();
        if length > Self::MAX_CHARS {
            return Err(ScheduleDomainError::TaskNameTooLong(length));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional free-form task description, bounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Longest accepted description, in characters.
    pub const MAX_CHARS: usize = 200;

    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::DescriptionTooLong`] when the value
    /// exceeds [`Self::MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length > Self::MAX_CHARS {
            return Err(ScheduleDomainError::DescriptionTooLong(length));
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

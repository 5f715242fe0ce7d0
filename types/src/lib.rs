//! Core domain types for Taskdeck.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque task identifier assigned by the remote store on creation.
///
/// Ids are never minted locally; the only way a `TaskId` enters the system
/// is from a store response, and it is immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A task display name guaranteed to be non-blank (after trimming).
///
/// The raw string is preserved untrimmed: validation trims, storage does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

#[derive(Debug, Error)]
#[error("task name must not be empty")]
pub struct BlankNameError;

impl TaskName {
    pub fn new(value: impl Into<String>) -> Result<Self, BlankNameError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(BlankNameError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TaskName {
    type Error = BlankNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TaskName {
    type Error = BlankNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskName> for String {
    fn from(value: TaskName) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named to-do item with store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: TaskName,
}

impl Task {
    #[must_use]
    pub fn new(id: TaskId, name: TaskName) -> Self {
        Self { id, name }
    }
}

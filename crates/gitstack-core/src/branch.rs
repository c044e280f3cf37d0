//! Branch records shared by the stack, the store, and the git adapter

use std::fmt;

use crate::error::GitStackError;

/// A single branch as seen by the stack
///
/// Two records are equal when their names match; the `current` flag is
/// ignored so a stored name compares equal to the live branch it refers to.
#[derive(Debug, Clone, Eq)]
pub struct BranchRecord {
    name: String,
    current: bool,
}

impl BranchRecord {
    /// Create a non-current record, rejecting names that cannot be stored
    pub fn new(name: impl Into<String>) -> Result<Self, GitStackError> {
        let name = name.into();
        if name.trim().is_empty() || name.contains(['\n', '\r']) {
            return Err(GitStackError::InvalidBranchName(name));
        }
        Ok(Self {
            name,
            current: false,
        })
    }

    /// Create a record flagged as the checked-out branch
    pub fn current(name: impl Into<String>) -> Result<Self, GitStackError> {
        Ok(Self::new(name)?.with_current(true))
    }

    /// Set the current flag
    pub fn with_current(mut self, current: bool) -> Self {
        self.current = current;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_current(&self) -> bool {
        self.current
    }
}

impl PartialEq for BranchRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for BranchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

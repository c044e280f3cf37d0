//! Error types for gitstack operations

use thiserror::Error;

/// Core error type for gitstack operations
#[derive(Error, Debug)]
pub enum GitStackError {
    // === Stack errors (E001-E004) ===
    /// E001: Branch is not known to the repository
    #[error("E001: branch does not exist: {name}")]
    BranchNotFound { name: String },

    /// E002: Branch is already on the stack
    #[error("E002: branch already tracked: {name}")]
    DuplicateBranch { name: String },

    /// E003: Position outside the stack
    #[error("E003: no stack entry at index {index} (stack has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },

    /// E004: Current branch is not on the stack
    #[error("E004: not tracking branch: {name}")]
    NotTracked { name: String },

    // === Repository errors (E005-E006) ===
    /// E005: Zero or several branches reported as checked out
    #[error("E005: expected exactly one current branch, found {found}")]
    AmbiguousCurrentBranch { found: usize },

    /// E006: git could not be invoked or refused to list branches
    #[error("E006: version control unavailable: {reason}")]
    VcsUnavailable { reason: String },

    // === Input errors (E007-E009) ===
    /// E007: Bad positional argument
    #[error("E007: {0}")]
    InvalidArgument(String),

    /// E008: Unknown command word
    #[error("E008: unrecognised command \"{command}\" | available commands: {available}")]
    UnrecognizedCommand { command: String, available: String },

    /// E009: Branch name cannot be stored
    #[error("E009: invalid branch name: {0:?}")]
    InvalidBranchName(String),

    // === IO and system errors ===
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl GitStackError {
    /// Get the error code (e.g., "E001", "E002")
    pub fn code(&self) -> &'static str {
        match self {
            GitStackError::BranchNotFound { .. } => "E001",
            GitStackError::DuplicateBranch { .. } => "E002",
            GitStackError::IndexOutOfRange { .. } => "E003",
            GitStackError::NotTracked { .. } => "E004",
            GitStackError::AmbiguousCurrentBranch { .. } => "E005",
            GitStackError::VcsUnavailable { .. } => "E006",
            GitStackError::InvalidArgument(_) => "E007",
            GitStackError::UnrecognizedCommand { .. } => "E008",
            GitStackError::InvalidBranchName(_) => "E009",
            GitStackError::Io(_) => "E010",
            GitStackError::Config(_) => "E011",
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            GitStackError::BranchNotFound { .. }
            | GitStackError::DuplicateBranch { .. }
            | GitStackError::IndexOutOfRange { .. }
            | GitStackError::NotTracked { .. } => 1, // Stack errors

            GitStackError::InvalidArgument(_)
            | GitStackError::UnrecognizedCommand { .. }
            | GitStackError::InvalidBranchName(_) => 2, // Usage errors

            GitStackError::AmbiguousCurrentBranch { .. }
            | GitStackError::VcsUnavailable { .. } => 3, // Repository errors

            GitStackError::Io(_) => 4,

            GitStackError::Config(_) => 5,
        }
    }
}

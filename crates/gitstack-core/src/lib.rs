//! gitstack-core: Core library for the gitstack branch bookmark manager
//!
//! This crate holds the branch stack, the ports it talks through, and their
//! git and flat-file adapters.

/// Core error types for gitstack operations
pub mod error;

/// Configuration handling
pub mod config;

/// Branch records
pub mod branch;

/// Version control port and git adapter
pub mod vcs;

/// Stack persistence port and file adapter
pub mod store;

/// The stack and its session lifecycle
pub mod stack;

// Re-exports for convenience
pub use branch::BranchRecord;
pub use config::Config;
pub use error::GitStackError;
pub use stack::{Closed, Session, Stack, StackLine, render_view};
pub use store::{FileStore, StackPersistence, StackStore};
pub use vcs::{GitCli, VersionControl};

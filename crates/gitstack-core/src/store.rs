//! Persistence of the stack as a flat file of branch names

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::branch::BranchRecord;
use crate::error::GitStackError;

/// Separator between stored branch names
pub const SEPARATOR: &str = "\n";

/// Durable storage for an ordered list of branch names
pub trait StackPersistence {
    /// The stored names in order; empty when nothing has been stored yet
    fn read(&self) -> Result<Vec<String>, GitStackError>;

    /// Replace the stored names wholesale
    fn write(&self, names: &[String]) -> Result<(), GitStackError>;
}

impl<P: StackPersistence + ?Sized> StackPersistence for &P {
    fn read(&self) -> Result<Vec<String>, GitStackError> {
        (**self).read()
    }

    fn write(&self, names: &[String]) -> Result<(), GitStackError> {
        (**self).write(names)
    }
}

/// Split stored text into names, dropping blank lines
pub fn parse_names(raw: &str) -> Vec<String> {
    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// File-backed store, one branch name per line
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "stack".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StackPersistence for FileStore {
    fn read(&self) -> Result<Vec<String>, GitStackError> {
        if !self.path.exists() {
            debug!("no stack file at {}", self.path.display());
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(parse_names(&raw))
    }

    fn write(&self, names: &[String]) -> Result<(), GitStackError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = names.join(SEPARATOR);
        let tmp = self.temp_path();
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!("wrote {} names to {}", names.len(), self.path.display());
        Ok(())
    }
}

/// Converts between stored names and branch records
#[derive(Debug, Clone)]
pub struct StackStore<P> {
    persistence: P,
}

impl<P: StackPersistence> StackStore<P> {
    pub fn new(persistence: P) -> Self {
        Self { persistence }
    }

    /// Load the stored stack, skipping names that cannot form a record
    pub fn load(&self) -> Result<Vec<BranchRecord>, GitStackError> {
        Ok(self
            .persistence
            .read()?
            .into_iter()
            .filter_map(|name| BranchRecord::new(name).ok())
            .collect())
    }

    /// Replace the stored stack with `branches`, in order
    pub fn save(&self, branches: &[BranchRecord]) -> Result<(), GitStackError> {
        let names: Vec<String> = branches.iter().map(|b| b.name().to_string()).collect();
        self.persistence.write(&names)
    }
}

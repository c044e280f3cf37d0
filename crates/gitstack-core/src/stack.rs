//! The branch stack and the session that loads, reconciles, and persists it

use serde::Serialize;
use tracing::{debug, warn};

use crate::branch::BranchRecord;
use crate::error::GitStackError;
use crate::store::{StackPersistence, StackStore};
use crate::vcs::VersionControl;

/// Marker for the checked-out branch in the rendered view
pub const CURRENT_MARKER: char = '├';

/// Marker for every other tracked branch
pub const TRACKED_MARKER: char = '│';

/// One displayed stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackLine {
    pub index: usize,
    pub name: String,
    pub current: bool,
}

impl StackLine {
    /// Render as `<marker> <index>: <name>` with the index right-aligned
    pub fn render(&self) -> String {
        let marker = if self.current {
            CURRENT_MARKER
        } else {
            TRACKED_MARKER
        };
        format!("{} {:>3}: {}", marker, self.index, self.name)
    }
}

/// Join rendered lines with newlines, no trailing separator
pub fn render_view(lines: &[StackLine]) -> String {
    lines
        .iter()
        .map(StackLine::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ordered, name-unique list of tracked branches
pub struct Stack<V, P> {
    vcs: V,
    store: StackStore<P>,
    entries: Vec<BranchRecord>,
}

impl<V: VersionControl, P: StackPersistence> Stack<V, P> {
    /// Create an empty, unloaded stack
    pub fn new(vcs: V, store: StackStore<P>) -> Self {
        Self {
            vcs,
            store,
            entries: Vec::new(),
        }
    }

    /// Replace the in-memory entries with the stored stack
    pub fn load(&mut self) -> Result<(), GitStackError> {
        let mut entries: Vec<BranchRecord> = Vec::new();
        for branch in self.store.load()? {
            if !entries.contains(&branch) {
                entries.push(branch);
            }
        }
        debug!("loaded {} stack entries", entries.len());
        self.entries = entries;
        Ok(())
    }

    pub fn entries(&self) -> &[BranchRecord] {
        &self.entries
    }

    /// Track `name` at the end of the stack
    pub fn add(&mut self, name: &str) -> Result<(), GitStackError> {
        let branch = BranchRecord::new(name)?;

        if !self.vcs.branch_exists(branch.name())? {
            return Err(GitStackError::BranchNotFound {
                name: name.to_string(),
            });
        }

        if self.entries.contains(&branch) {
            return Err(GitStackError::DuplicateBranch {
                name: name.to_string(),
            });
        }

        debug!("tracking {}", branch);
        self.entries.push(branch);
        Ok(())
    }

    /// Track the checked-out branch
    pub fn add_current(&mut self) -> Result<(), GitStackError> {
        let current = self.vcs.current_branch()?;
        self.add(current.name())
    }

    /// Remove the entry at `index` and persist immediately
    ///
    /// When the write fails the in-memory stack is restored, so it keeps
    /// matching the stored file.
    pub fn drop(&mut self, index: i64) -> Result<BranchRecord, GitStackError> {
        let position = self.position(index)?;
        let previous = self.entries.clone();
        let removed = self.entries.remove(position);
        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }
        debug!("dropped {} from position {}", removed, position);
        Ok(removed)
    }

    /// Remove the checked-out branch from the stack
    pub fn drop_current(&mut self) -> Result<BranchRecord, GitStackError> {
        let current = self.vcs.current_branch()?;
        let position = self
            .entries
            .iter()
            .position(|b| *b == current)
            .ok_or_else(|| GitStackError::NotTracked {
                name: current.name().to_string(),
            })?;
        self.drop(position as i64)
    }

    /// Check out the entry at `index`, returning whether git reported success
    pub fn select(&self, index: i64) -> Result<bool, GitStackError> {
        let position = self.position(index)?;
        let branch = &self.entries[position];
        let switched = self.vcs.checkout(branch)?;
        if !switched {
            debug!("checkout of {} did not succeed", branch);
        }
        Ok(switched)
    }

    /// Live tracked branches in stack order, flagged with the current branch
    pub fn view(&self) -> Result<Vec<StackLine>, GitStackError> {
        let mut tracked: Vec<(usize, BranchRecord)> = self
            .vcs
            .list_branches()?
            .into_iter()
            .filter_map(|live| {
                let position = self.entries.iter().position(|b| *b == live)?;
                Some((position, live))
            })
            .collect();
        tracked.sort_by_key(|(position, _)| *position);

        Ok(tracked
            .into_iter()
            .enumerate()
            .map(|(index, (_, branch))| StackLine {
                index,
                name: branch.name().to_string(),
                current: branch.is_current(),
            })
            .collect())
    }

    /// Render the current view
    pub fn show(&self) -> Result<String, GitStackError> {
        Ok(render_view(&self.view()?))
    }

    /// Drop entries whose branch no longer exists, keeping order
    pub fn prune(&mut self) -> Result<(), GitStackError> {
        let live = self.vcs.list_branches()?;
        let before = self.entries.len();
        self.entries.retain(|b| live.contains(b));
        if self.entries.len() != before {
            debug!("pruned {} stale entries", before - self.entries.len());
        }
        Ok(())
    }

    /// Prune, then write the stack back to the store
    pub fn persist(&mut self) -> Result<(), GitStackError> {
        self.prune()?;
        self.store.save(&self.entries)
    }

    fn position(&self, index: i64) -> Result<usize, GitStackError> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.entries.len())
            .ok_or(GitStackError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}

/// Outcome of closing a session
pub struct Closed<V, P> {
    /// The reconciled stack, still usable for rendering
    pub stack: Stack<V, P>,
    /// Result of the final prune and write
    pub persisted: Result<(), GitStackError>,
}

/// One load, operate, reconcile, persist cycle
///
/// Closing persists the stack. A session dropped without being closed
/// persists on drop, logging rather than returning any failure.
pub struct Session<V: VersionControl, P: StackPersistence> {
    stack: Option<Stack<V, P>>,
}

impl<V: VersionControl, P: StackPersistence> Session<V, P> {
    /// Load the stored stack
    pub fn open(vcs: V, persistence: P) -> Result<Self, GitStackError> {
        let mut stack = Stack::new(vcs, StackStore::new(persistence));
        stack.load()?;
        Ok(Self { stack: Some(stack) })
    }

    pub fn stack(&self) -> &Stack<V, P> {
        self.stack
            .as_ref()
            .unwrap_or_else(|| unreachable!("stack is present until close"))
    }

    pub fn stack_mut(&mut self) -> &mut Stack<V, P> {
        self.stack
            .as_mut()
            .unwrap_or_else(|| unreachable!("stack is present until close"))
    }

    /// Prune and persist, handing back the stack for rendering
    pub fn close(mut self) -> Closed<V, P> {
        let mut stack = self
            .stack
            .take()
            .unwrap_or_else(|| unreachable!("stack is present until close"));
        let persisted = stack.persist();
        Closed { stack, persisted }
    }
}

impl<V: VersionControl, P: StackPersistence> Drop for Session<V, P> {
    fn drop(&mut self) {
        if let Some(stack) = self.stack.as_mut() {
            if let Err(e) = stack.persist() {
                warn!("failed to persist stack: {}", e);
            }
        }
    }
}

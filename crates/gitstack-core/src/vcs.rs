//! Version control port and its git CLI adapter

use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::branch::BranchRecord;
use crate::error::GitStackError;

/// Operations the stack needs from the underlying version control tool
pub trait VersionControl {
    /// Every branch in the repository, with the checked-out one flagged current
    fn list_branches(&self) -> Result<Vec<BranchRecord>, GitStackError>;

    /// Switch the working copy to `branch`, returning whether the tool reported success
    fn checkout(&self, branch: &BranchRecord) -> Result<bool, GitStackError>;

    /// The single branch flagged current
    fn current_branch(&self) -> Result<BranchRecord, GitStackError> {
        let mut current: Vec<BranchRecord> = self
            .list_branches()?
            .into_iter()
            .filter(BranchRecord::is_current)
            .collect();

        if current.len() != 1 {
            return Err(GitStackError::AmbiguousCurrentBranch {
                found: current.len(),
            });
        }

        Ok(current.remove(0))
    }

    /// Whether a branch with this name exists
    fn branch_exists(&self, name: &str) -> Result<bool, GitStackError> {
        Ok(self.list_branches()?.iter().any(|b| b.name() == name))
    }
}

impl<V: VersionControl + ?Sized> VersionControl for &V {
    fn list_branches(&self) -> Result<Vec<BranchRecord>, GitStackError> {
        (**self).list_branches()
    }

    fn checkout(&self, branch: &BranchRecord) -> Result<bool, GitStackError> {
        (**self).checkout(branch)
    }
}

/// `for-each-ref` format: `*` or space for HEAD, a space, the short branch name
const BRANCH_FORMAT: &str = "--format=%(HEAD) %(refname:lstrip=2)";

/// One line of branch listing output: marker column, space, branch name
static BRANCH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<marker>[* ]) (?P<name>\S+)$").expect("valid regex"));

/// Parse the output of `git for-each-ref` run with `BRANCH_FORMAT`
///
/// Lines that do not name a branch are skipped.
pub fn parse_branch_list(output: &str) -> Vec<BranchRecord> {
    output
        .lines()
        .filter_map(|line| {
            let caps = BRANCH_LINE.captures(line.trim_end())?;
            let branch = BranchRecord::new(&caps["name"]).ok()?;
            Some(branch.with_current(&caps["marker"] == "*"))
        })
        .collect()
}

/// Git CLI wrapper
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Path to the git binary
    pub git_path: String,
    /// Working copy to run against (`git -C`), or the process directory
    pub repo_root: Option<PathBuf>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            git_path: "git".to_string(),
            repo_root: None,
        }
    }
}

impl GitCli {
    /// Create a new GitCli with the specified binary and working copy
    pub fn new(git_path: impl Into<String>, repo_root: Option<PathBuf>) -> Self {
        Self {
            git_path: git_path.into(),
            repo_root,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git_path);
        if let Some(root) = &self.repo_root {
            cmd.arg("-C").arg(root);
        }
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> GitStackError {
        if e.kind() == std::io::ErrorKind::NotFound {
            GitStackError::VcsUnavailable {
                reason: format!("{} not found", self.git_path),
            }
        } else {
            GitStackError::VcsUnavailable {
                reason: format!("failed to run {}: {}", self.git_path, e),
            }
        }
    }
}

impl VersionControl for GitCli {
    fn list_branches(&self) -> Result<Vec<BranchRecord>, GitStackError> {
        debug!("listing branches with {}", self.git_path);
        let output = self
            .command()
            .args(["for-each-ref", BRANCH_FORMAT, "refs/heads/"])
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitStackError::VcsUnavailable {
                reason: format!("git for-each-ref failed: {}", stderr.trim()),
            });
        }

        let branches = parse_branch_list(&String::from_utf8_lossy(&output.stdout));
        debug!("found {} branches", branches.len());
        Ok(branches)
    }

    fn checkout(&self, branch: &BranchRecord) -> Result<bool, GitStackError> {
        debug!("checking out {}", branch);
        let output = self
            .command()
            .args(["checkout", branch.name()])
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            debug!("git checkout: {}", stderr.trim());
        } else {
            warn!("git checkout {} failed: {}", branch, stderr.trim());
        }
        Ok(output.status.success())
    }
}

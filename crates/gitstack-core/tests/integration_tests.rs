//! Integration tests for gitstack-core
//!
//! These run whole sessions against a file-backed store and an in-memory
//! repository, one session per simulated invocation.

use std::cell::RefCell;
use std::fs;

use gitstack_core::{
    BranchRecord, FileStore, GitStackError, Session, StackPersistence, VersionControl,
};

/// Repository whose branch list can change between sessions
struct MemoryRepo {
    branches: RefCell<Vec<BranchRecord>>,
    checkouts: RefCell<Vec<String>>,
}

impl MemoryRepo {
    fn new(current: &str, others: &[&str]) -> Self {
        let repo = Self {
            branches: RefCell::new(Vec::new()),
            checkouts: RefCell::new(Vec::new()),
        };
        repo.reset(current, others);
        repo
    }

    fn reset(&self, current: &str, others: &[&str]) {
        let mut branches = vec![BranchRecord::current(current).unwrap()];
        branches.extend(others.iter().map(|n| BranchRecord::new(*n).unwrap()));
        *self.branches.borrow_mut() = branches;
    }
}

impl VersionControl for MemoryRepo {
    fn list_branches(&self) -> Result<Vec<BranchRecord>, GitStackError> {
        Ok(self.branches.borrow().clone())
    }

    fn checkout(&self, branch: &BranchRecord) -> Result<bool, GitStackError> {
        let name = branch.name().to_string();
        self.checkouts.borrow_mut().push(name.clone());
        let mut branches = self.branches.borrow_mut();
        for b in branches.iter_mut() {
            *b = b.clone().with_current(b.name() == name);
        }
        Ok(true)
    }
}

/// Repository that cannot be reached
struct Unavailable;

impl VersionControl for Unavailable {
    fn list_branches(&self) -> Result<Vec<BranchRecord>, GitStackError> {
        Err(GitStackError::VcsUnavailable {
            reason: "offline".to_string(),
        })
    }

    fn checkout(&self, _branch: &BranchRecord) -> Result<bool, GitStackError> {
        Err(GitStackError::VcsUnavailable {
            reason: "offline".to_string(),
        })
    }
}

fn show(repo: &MemoryRepo, store: &FileStore) -> String {
    let session = Session::open(repo, store).unwrap();
    let closed = session.close();
    closed.persisted.unwrap();
    closed.stack.show().unwrap()
}

#[test]
fn test_first_run_without_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    let repo = MemoryRepo::new("main", &["feature-a"]);

    assert_eq!(show(&repo, &store), "");
}

#[test]
fn test_tracked_branches_render_in_stack_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    fs::write(store.path(), "main\nfeature-a\n").unwrap();
    let repo = MemoryRepo::new("main", &["feature-a", "feature-b"]);

    let view = show(&repo, &store);
    let lines: Vec<&str> = view.lines().collect();
    assert_eq!(lines, vec!["├   0: main", "│   1: feature-a"]);
}

#[test]
fn test_add_is_persisted_at_session_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    let repo = MemoryRepo::new("main", &["feature-a"]);

    let mut session = Session::open(&repo, &store).unwrap();
    session.stack_mut().add("feature-a").unwrap();
    session.stack_mut().add_current().unwrap();
    assert!(store.read().unwrap().is_empty());
    session.close().persisted.unwrap();

    assert_eq!(store.read().unwrap(), vec!["feature-a", "main"]);
    assert!(show(&repo, &store).contains("feature-a"));
}

#[test]
fn test_drop_is_persisted_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    store
        .write(&["main".to_string(), "a".to_string(), "b".to_string()])
        .unwrap();
    let repo = MemoryRepo::new("main", &["a", "b"]);

    let mut session = Session::open(&repo, &store).unwrap();
    session.stack_mut().drop(0).unwrap();
    assert_eq!(store.read().unwrap(), vec!["a", "b"]);

    assert!(matches!(
        session.stack_mut().drop(5),
        Err(GitStackError::IndexOutOfRange { index: 5, len: 2 })
    ));
    drop(session);
    assert_eq!(store.read().unwrap(), vec!["a", "b"]);
}

#[test]
fn test_deleted_branch_is_pruned_on_close() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    fs::write(store.path(), "old-deleted-branch").unwrap();
    let repo = MemoryRepo::new("main", &[]);

    assert_eq!(show(&repo, &store), "");
    assert!(store.read().unwrap().is_empty());

    // A second pass over the pruned stack changes nothing
    assert_eq!(show(&repo, &store), "");
    assert!(store.read().unwrap().is_empty());
}

#[test]
fn test_branch_deleted_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    let repo = MemoryRepo::new("main", &["a", "b"]);

    let mut session = Session::open(&repo, &store).unwrap();
    for name in ["a", "main", "b"] {
        session.stack_mut().add(name).unwrap();
    }
    session.close().persisted.unwrap();

    repo.reset("main", &["b"]);
    let session = Session::open(&repo, &store).unwrap();
    let names: Vec<&str> = session.stack().entries().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["a", "main", "b"]);
    session.close().persisted.unwrap();

    assert_eq!(store.read().unwrap(), vec!["main", "b"]);
}

#[test]
fn test_select_switches_current_marker() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    fs::write(store.path(), "main\nfeature-a").unwrap();
    let repo = MemoryRepo::new("main", &["feature-a"]);

    let session = Session::open(&repo, &store).unwrap();
    assert!(session.stack().select(1).unwrap());
    assert!(matches!(
        session.stack().select(2),
        Err(GitStackError::IndexOutOfRange { .. })
    ));
    let closed = session.close();

    assert_eq!(*repo.checkouts.borrow(), vec!["feature-a"]);
    assert_eq!(closed.stack.show().unwrap(), "│   0: main\n├   1: feature-a");
}

#[test]
fn test_unreachable_repository_keeps_stored_stack() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("stack.txt"));
    fs::write(store.path(), "main\nfeature-a").unwrap();

    let mut session = Session::open(Unavailable, &store).unwrap();
    assert!(matches!(
        session.stack_mut().add("main"),
        Err(GitStackError::VcsUnavailable { .. })
    ));
    let closed = session.close();

    assert!(matches!(
        closed.persisted,
        Err(GitStackError::VcsUnavailable { .. })
    ));
    assert_eq!(store.read().unwrap(), vec!["main", "feature-a"]);
}

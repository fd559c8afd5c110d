//! Per-execution state shared between the run configuration and observers.
use crate::metadata::FailureMetadata;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Handle to the metadata record owned by one session.
pub type SharedMetadata = Rc<RefCell<FailureMetadata>>;

/// One execution of the engine: where the project lives and what the run
/// has recorded so far.
///
/// Cloning yields another handle onto the same record.
#[derive(Debug, Clone)]
pub struct RunSession {
    project_root: PathBuf,
    metadata: SharedMetadata,
}

impl RunSession {
    /// Fresh session with no flags and no recorded failures.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            metadata: Rc::new(RefCell::new(FailureMetadata::new())),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn metadata_handle(&self) -> SharedMetadata {
        Rc::clone(&self.metadata)
    }

    /// Snapshot of the current record.
    pub fn metadata(&self) -> FailureMetadata {
        self.metadata.borrow().clone()
    }

    /// Record a flag from the invocation. Must happen before the suite ends.
    pub fn add_flag(&self, name: impl Into<String>, value: impl Into<String>) {
        self.metadata.borrow_mut().add_flag(name, value);
    }

    /// Replace all recorded flags with `flags`.
    pub fn set_flags(&self, flags: BTreeMap<String, String>) {
        self.metadata.borrow_mut().flags = flags;
    }
}

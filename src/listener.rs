//! Records failed scenarios when a suite finishes.
//!
//! The listener trusts the run configuration to have stored the invocation
//! flags in the session before the suite ends; it never parses flags itself.
use crate::event::{EventKind, EventRegistry, ExecutionEvent, Observer};
use crate::metadata::compute_failure_metadata;
use crate::result::SuiteResult;
use crate::session::{RunSession, SharedMetadata};
use crate::writer::write_failed_metadata;
use anyhow::Result;
use std::path::PathBuf;

/// Whether the listener is waiting for a suite end or recording one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Reacting,
}

/// Observer that turns a suite result into `.gauge/failures.json`.
pub struct FailedScenariosListener {
    project_root: PathBuf,
    metadata: SharedMetadata,
    state: ListenerState,
}

impl FailedScenariosListener {
    pub fn new(session: &RunSession) -> Self {
        Self {
            project_root: session.project_root().to_path_buf(),
            metadata: session.metadata_handle(),
            state: ListenerState::Idle,
        }
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    fn record(&self, result: &SuiteResult) -> Result<PathBuf> {
        let flags = self.metadata.borrow().flags.clone();
        let meta = compute_failure_metadata(&self.project_root, &flags, &result.spec_results);
        let failed = meta.failed_scenarios.len();
        *self.metadata.borrow_mut() = meta.clone();
        let path = write_failed_metadata(&self.project_root, &meta)?;
        tracing::info!(failed, path = %path.display(), "failed scenarios persisted");
        Ok(path)
    }
}

impl Observer for FailedScenariosListener {
    fn handle(&mut self, event: &ExecutionEvent) -> Result<()> {
        if event.kind != EventKind::SuiteEnd {
            return Ok(());
        }
        debug_assert_eq!(self.state, ListenerState::Idle);
        let Some(result) = event.result.as_ref() else {
            tracing::warn!("suite end event without a suite result; nothing recorded");
            return Ok(());
        };
        self.state = ListenerState::Reacting;
        let outcome = self.record(result);
        self.state = ListenerState::Idle;
        outcome.map(|_| ())
    }
}

/// Subscribe a [`FailedScenariosListener`] for `session` to suite-end events.
pub fn listen_failed_scenarios(registry: &mut EventRegistry, session: &RunSession) {
    registry.register(
        EventKind::SuiteEnd,
        Box::new(FailedScenariosListener::new(session)),
    );
}

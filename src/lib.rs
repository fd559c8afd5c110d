//! Failed-scenario bookkeeping for "rerun failed" executions.
//!
//! A [`listener::FailedScenariosListener`] subscribed to the engine's
//! [`event::EventRegistry`] writes `.gauge/failures.json` when a suite ends;
//! [`rerun::RerunPlan`] reads it back to filter the next execution.
pub mod config;
pub mod event;
pub mod listener;
pub mod metadata;
pub mod paths;
pub mod rerun;
pub mod result;
pub mod session;
pub mod writer;

pub use event::{EventKind, EventRegistry, ExecutionEvent, Observer};
pub use listener::{listen_failed_scenarios, FailedScenariosListener};
pub use metadata::{compute_failure_metadata, FailureMetadata};
pub use rerun::RerunPlan;
pub use result::{SpecResult, SuiteResult};
pub use session::RunSession;
pub use writer::{load_failed_metadata, persist};

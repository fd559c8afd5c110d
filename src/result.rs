//! Execution results handed over by the engine once a suite finishes.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one spec file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecResult {
    /// Absolute path of the spec file.
    pub file_name: PathBuf,
    #[serde(default)]
    pub is_failed: bool,
    /// Row indices of the failed scenarios, as reported by the engine.
    #[serde(default)]
    pub failed_scenario_indices: Vec<usize>,
}

impl SpecResult {
    /// Spec whose scenarios all passed.
    pub fn passed(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            is_failed: false,
            failed_scenario_indices: Vec::new(),
        }
    }

    /// Failed spec with the given failed scenario rows.
    pub fn failed(file_name: impl Into<PathBuf>, rows: impl IntoIterator<Item = usize>) -> Self {
        Self {
            file_name: file_name.into(),
            is_failed: true,
            failed_scenario_indices: rows.into_iter().collect(),
        }
    }
}

/// Outcome of a whole suite, specs in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteResult {
    #[serde(default)]
    pub spec_results: Vec<SpecResult>,
}

impl SuiteResult {
    pub fn new(spec_results: Vec<SpecResult>) -> Self {
        Self { spec_results }
    }
}

//! Rerun mode: restrict the next execution to the last run's failures.
use crate::metadata::FailureMetadata;
use crate::paths::{parse_scenario_id, relativize};
use crate::writer::load_failed_metadata;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Flags and scenario filter reconstructed from the persisted metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerunPlan {
    pub flags: BTreeMap<String, String>,
    pub scenarios: Vec<String>,
}

impl RerunPlan {
    pub fn from_metadata(meta: FailureMetadata) -> Result<Self> {
        if meta.failed_scenarios.is_empty() {
            bail!("no failed scenarios found in last run");
        }
        Ok(Self {
            flags: meta.flags,
            scenarios: meta.failed_scenarios,
        })
    }

    /// Load the plan for the project's last recorded run.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::from_metadata(load_failed_metadata(project_root)?)
    }

    /// Arguments for the rerun: `NAME=VALUE` flags in name order, then the
    /// scenario identifiers in the order they failed.
    pub fn args(&self) -> Vec<String> {
        self.flags
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .chain(self.scenarios.iter().cloned())
            .collect()
    }

    /// Whether row `row` of `spec_path` failed last time.
    pub fn matches(&self, project_root: &Path, spec_path: &Path, row: usize) -> bool {
        let rel = relativize(project_root, spec_path);
        self.scenarios
            .iter()
            .filter_map(|id| parse_scenario_id(id.as_str()))
            .any(|(path, failed_row)| failed_row == row && path == rel)
    }
}

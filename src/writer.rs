//! Persistence of failure metadata under the project's `.gauge/` directory.
//!
//! Each write replaces the previous run's file; nothing is merged.
use crate::metadata::FailureMetadata;
use crate::paths::ProjectPaths;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write serialized metadata to `<root>/.gauge/failures.json`.
///
/// The state directory is created if missing. Returns the written path.
pub fn persist(project_root: &Path, serialized: &str) -> Result<PathBuf> {
    let paths = ProjectPaths::new(project_root.to_path_buf());
    let dir = paths.state_dir();
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    let path = paths.failed_file();
    fs::write(&path, serialized.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = serialized.len(), "failure metadata written");
    Ok(path)
}

/// Serialize and persist in one step.
pub fn write_failed_metadata(project_root: &Path, meta: &FailureMetadata) -> Result<PathBuf> {
    let text = meta.to_json()?;
    persist(project_root, &text)
}

/// Load the metadata written by the last run.
pub fn load_failed_metadata(project_root: &Path) -> Result<FailureMetadata> {
    let path = ProjectPaths::new(project_root.to_path_buf()).failed_file();
    let text = fs::read_to_string(&path)
        .with_context(|| format!("read last run information from {}", path.display()))?;
    FailureMetadata::from_json(&text).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_creates_state_dir_and_writes_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        assert!(!root.join(".gauge").exists());

        let path = persist(root, "hello world").expect("persist");

        assert_eq!(path, root.join(".gauge").join("failures.json"));
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "hello world");
    }

    #[test]
    fn persist_overwrites_previous_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();

        persist(root, "first run with a much longer body").expect("persist first");
        let path = persist(root, "second").expect("persist second");

        assert_eq!(fs::read_to_string(path).expect("read back"), "second");
    }

    #[test]
    fn persist_reports_error_when_state_dir_is_a_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        fs::write(root.join(".gauge"), "not a directory").expect("write blocker");

        let err = persist(root, "{}").expect_err("persist should fail");

        assert!(format!("{err:#}").contains(".gauge"));
    }

    #[test]
    fn load_round_trips_written_metadata() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut meta = FailureMetadata::new();
        meta.add_flag("-env", "ci");
        meta.failed_scenarios.push("a.spec:1".to_string());

        write_failed_metadata(temp.path(), &meta).expect("write");

        assert_eq!(load_failed_metadata(temp.path()).expect("load"), meta);
    }

    #[test]
    fn load_without_previous_run_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_failed_metadata(temp.path()).expect_err("nothing persisted");
        assert!(format!("{err:#}").contains("read last run information"));
    }
}

//! Typed paths into a project's hidden state directory.
//!
//! The rerun consumer and the listener agree on this layout, so every path
//! into `.gauge/` is built here.
use std::path::{Path, PathBuf};

/// Hidden state directory created directly under the project root.
pub const DOT_GAUGE: &str = ".gauge";

/// File inside [`DOT_GAUGE`] holding the last run's failure metadata.
pub const FAILED_FILE: &str = "failures.json";

/// Convenience wrapper for locating state files under a project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Create a new path helper rooted at the project root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Return the `.gauge/` directory path.
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(DOT_GAUGE)
    }

    /// Return the `.gauge/failures.json` path.
    pub fn failed_file(&self) -> PathBuf {
        self.state_dir().join(FAILED_FILE)
    }
}

/// Strip the project root from an absolute spec path.
///
/// The host separator is preserved. Paths outside the root are returned
/// unchanged; callers only pass specs that live under the project.
pub fn relativize(project_root: &Path, spec_path: &Path) -> String {
    spec_path
        .strip_prefix(project_root)
        .unwrap_or(spec_path)
        .to_string_lossy()
        .to_string()
}

/// Compose the `<relative-path>:<row>` identifier for one failed scenario.
pub fn scenario_id(project_root: &Path, spec_path: &Path, row: usize) -> String {
    format!("{}:{row}", relativize(project_root, spec_path))
}

/// Split an identifier back into its spec path and row index.
///
/// Splits on the last `:` so drive letters and colons in directory names
/// stay in the path part.
pub fn parse_scenario_id(id: &str) -> Option<(&str, usize)> {
    let (path, row) = id.rsplit_once(':')?;
    if path.is_empty() {
        return None;
    }
    let row = row.parse().ok()?;
    Some((path, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_root() -> PathBuf {
        std::env::temp_dir().join("gauge-rerun-project")
    }

    #[test]
    fn relativize_strips_root_and_keeps_host_separator() {
        let root = project_root();
        let spec = root.join("specs").join("nested").join("example.spec");
        let expected = format!(
            "specs{sep}nested{sep}example.spec",
            sep = std::path::MAIN_SEPARATOR
        );
        assert_eq!(relativize(&root, &spec), expected);
    }

    #[test]
    fn relativized_path_rejoins_to_original() {
        let root = project_root();
        for rel in ["a.spec", "specs/b.spec", "specs/deep/dir/c.spec"] {
            let spec = root.join(rel);
            let back = root.join(relativize(&root, &spec));
            assert_eq!(back, spec);
        }
    }

    #[test]
    fn relativize_outside_root_returns_path_unchanged() {
        let root = project_root();
        let other = std::env::temp_dir().join("elsewhere").join("x.spec");
        assert_eq!(relativize(&root, &other), other.to_string_lossy());
    }

    #[test]
    fn scenario_id_appends_row_index() {
        let root = project_root();
        let spec = root.join("example.spec");
        assert_eq!(scenario_id(&root, &spec, 2), "example.spec:2");
        assert_eq!(scenario_id(&root, &spec, 0), "example.spec:0");
    }

    #[test]
    fn parse_scenario_id_splits_on_last_colon() {
        assert_eq!(
            parse_scenario_id("specs/example.spec:12"),
            Some(("specs/example.spec", 12))
        );
        assert_eq!(
            parse_scenario_id(r"C:\proj\specs\a.spec:3"),
            Some((r"C:\proj\specs\a.spec", 3))
        );
        assert_eq!(parse_scenario_id("specs/example.spec"), None);
        assert_eq!(parse_scenario_id("specs/example.spec:x"), None);
        assert_eq!(parse_scenario_id(":4"), None);
    }

    #[test]
    fn state_paths_live_under_hidden_dir() {
        let root = project_root();
        let paths = ProjectPaths::new(root.clone());
        assert_eq!(paths.state_dir(), root.join(".gauge"));
        assert_eq!(paths.failed_file(), root.join(".gauge").join("failures.json"));
    }
}

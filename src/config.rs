//! Run configuration: where the project lives and how the run was invoked.
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the project root when no flag is given.
pub const PROJECT_ROOT_ENV: &str = "GAUGE_PROJECT_ROOT";

/// Resolve the project root: explicit path, then `GAUGE_PROJECT_ROOT`, then
/// the current directory. The result is always absolute.
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir().context("read current directory")?;
    Ok(resolve_project_root_from(
        explicit,
        env::var_os(PROJECT_ROOT_ENV),
        &cwd,
    ))
}

fn resolve_project_root_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    cwd: &Path,
) -> PathBuf {
    let candidate = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| cwd.to_path_buf());
    if candidate.is_absolute() {
        candidate
    } else {
        cwd.join(candidate)
    }
}

/// Parse one `NAME=VALUE` flag; a leading `-` is added to bare names.
pub fn parse_flag(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("flag {raw:?} must be NAME=VALUE"))?;
    let name = name.trim();
    if name.trim_start_matches('-').is_empty() {
        return Err(anyhow!("flag {raw:?} has an empty name"));
    }
    let name = if name.starts_with('-') {
        name.to_string()
    } else {
        format!("-{name}")
    };
    Ok((name, value.to_string()))
}

/// Parse repeated flags; later values win for the same name.
pub fn parse_flags<S: AsRef<str>>(raw: &[S]) -> Result<BTreeMap<String, String>> {
    let mut flags = BTreeMap::new();
    for entry in raw {
        let (name, value) = parse_flag(entry.as_ref())?;
        flags.insert(name, value);
    }
    Ok(flags)
}

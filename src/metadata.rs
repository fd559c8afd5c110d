//! Failure metadata recorded at the end of a suite.
//!
//! The document is read back by a later rerun invocation, so its shape is
//! fixed: sorted `Flags` followed by `FailedScenarios` in execution order.
use crate::paths::scenario_id;
use crate::result::SpecResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Flags used to invoke a run plus the scenarios that failed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMetadata {
    /// Flag name (leading dash included) to value.
    #[serde(rename = "Flags", default, deserialize_with = "null_as_default")]
    pub flags: BTreeMap<String, String>,
    /// `<relative-spec-path>:<row>` identifiers.
    #[serde(
        rename = "FailedScenarios",
        default,
        deserialize_with = "null_as_default"
    )]
    pub failed_scenarios: Vec<String>,
}

impl FailureMetadata {
    /// Empty record: no flags, no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation flag, replacing any earlier value.
    pub fn add_flag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.flags.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.failed_scenarios.is_empty()
    }

    /// Render the record as the pretty-printed JSON document stored on disk.
    ///
    /// `&`, `<` and `>` inside strings are written as `\uXXXX` escapes, the
    /// form the rerun consumer's encoder produces.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter::new());
        self.serialize(&mut ser)
            .context("serialize failure metadata")?;
        String::from_utf8(buf).context("failure metadata is not UTF-8")
    }

    /// Parse a document produced by [`FailureMetadata::to_json`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse failure metadata JSON")
    }
}

/// Build the metadata for a finished suite.
///
/// Every failed row of every failed spec contributes one identifier, in spec
/// order then row order. Duplicate rows are kept as reported.
pub fn compute_failure_metadata(
    project_root: &Path,
    flags: &BTreeMap<String, String>,
    spec_results: &[SpecResult],
) -> FailureMetadata {
    let failed_scenarios = spec_results
        .iter()
        .filter(|spec| spec.is_failed)
        .flat_map(|spec| {
            spec.failed_scenario_indices
                .iter()
                .map(|row| scenario_id(project_root, &spec.file_name, *row))
        })
        .collect();
    FailureMetadata {
        flags: flags.clone(),
        failed_scenarios,
    }
}

/// Two-space pretty printer that also escapes HTML-sensitive characters.
struct HtmlSafeFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl HtmlSafeFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::new(),
        }
    }
}

fn html_escape(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("\\u0026"),
        '<' => Some("\\u003c"),
        '>' => Some("\\u003e"),
        '\u{2028}' => Some("\\u2028"),
        '\u{2029}' => Some("\\u2029"),
        _ => None,
    }
}

impl Formatter for HtmlSafeFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            let Some(escaped) = html_escape(ch) else {
                continue;
            };
            writer.write_all(fragment[start..idx].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

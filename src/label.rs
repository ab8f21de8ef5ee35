//! Document label and the file names derived from it.

use std::path::{Path, PathBuf};

use crate::error::{InkshedError, Result};

/// Extension of the editable source file.
pub const SOURCE_EXTENSION: &str = "md";
/// Extension of the converted document.
pub const OUTPUT_EXTENSION: &str = "docx";

/// A validated, non-empty label naming one writing session.
///
/// The label is used verbatim. Characters the filesystem rejects are left
/// for the write to report, so nothing is ever truncated or substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

impl Label {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(invalid(raw, "label is empty"));
        }
        if raw.chars().any(is_path_separator) {
            return Err(invalid(raw, "label must not contain a path separator"));
        }
        // The label is echoed into the title line.
        if raw.contains(['\n', '\r']) {
            return Err(invalid(raw, "label must not contain a line break"));
        }
        Ok(Label(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid(raw: &str, reason: &'static str) -> InkshedError {
    InkshedError::InvalidLabel {
        label: raw.to_string(),
        reason,
    }
}

fn is_path_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}

/// The source and output paths of one session.
///
/// Both share the stem `<prefix>.<label>` and differ only in extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl DocumentPaths {
    pub fn new(directory: &Path, prefix: &str, label: &Label) -> Self {
        let stem = base_name(prefix, label);
        Self {
            source: directory.join(format!("{}.{}", stem, SOURCE_EXTENSION)),
            output: directory.join(format!("{}.{}", stem, OUTPUT_EXTENSION)),
        }
    }
}

/// `<prefix>.<label>`, or just the label when no prefix is configured.
pub fn base_name(prefix: &str, label: &Label) -> String {
    if prefix.is_empty() {
        label.to_string()
    } else {
        format!("{}.{}", prefix, label)
    }
}

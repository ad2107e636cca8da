//! `.rules` files: pre- and post-processing tasks around a tool run.
//!
//! Rules files are TOML. Every string may contain `${Section:key}` references,
//! which are expanded against the job's configuration when the task runs:
//!
//! ```toml
//! [[pre.copy]]
//! source = "lib/altera/fifo_cc.qip"
//! destination = "${SPECIAL:OutputDir}/fifo_cc.qip"
//!
//! [[post.replace]]
//! file = "${SPECIAL:OutputDir}/fifo_cc.vho"
//! search = "^-- Date:.*$"
//! replace = ""
//! multi_line = true
//!
//! [[post.delete]]
//! file = "${SPECIAL:OutputDir}/fifo_cc.map.rpt"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ProjectError;

/// All tasks declared by one or more rules files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    /// Tasks run before the tool.
    #[serde(default)]
    pub pre: PreProcessRules,
    /// Tasks run after a successful tool run.
    #[serde(default)]
    pub post: PostProcessRules,
}

/// Tasks that stage inputs before the tool runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreProcessRules {
    /// Files copied into place.
    #[serde(default)]
    pub copy: Vec<CopyRule>,
    /// Regex substitutions applied to files.
    #[serde(default)]
    pub replace: Vec<ReplaceRule>,
}

/// Tasks that collect and clean up outputs after the tool runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostProcessRules {
    /// Files copied out of the working directory.
    #[serde(default)]
    pub copy: Vec<CopyRule>,
    /// Regex substitutions applied to files.
    #[serde(default)]
    pub replace: Vec<ReplaceRule>,
    /// Files removed at the end.
    #[serde(default)]
    pub delete: Vec<DeleteRule>,
}

/// Copies `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyRule {
    /// File to copy.
    pub source: String,
    /// Target file path.
    pub destination: String,
}

/// Replaces every match of the regex `search` in `file` with `replace`.
///
/// `replace` may refer to capture groups as `$1` or `${name}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceRule {
    /// File to rewrite in place.
    pub file: String,
    /// Regular expression to search for.
    pub search: String,
    /// Replacement text.
    pub replace: String,
    /// Match letters case-insensitively.
    #[serde(default)]
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    #[serde(default)]
    pub multi_line: bool,
    /// `.` also matches newlines.
    #[serde(default)]
    pub dot_all: bool,
}

/// Removes `file`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteRule {
    /// File to remove.
    pub file: String,
}

impl RulesFile {
    /// Appends all tasks of `other`, keeping declaration order.
    pub fn merge(&mut self, other: RulesFile) {
        self.pre.copy.extend(other.pre.copy);
        self.pre.replace.extend(other.pre.replace);
        self.post.copy.extend(other.post.copy);
        self.post.replace.extend(other.post.replace);
        self.post.delete.extend(other.post.delete);
    }

    /// Returns `true` if no task is declared.
    pub fn is_empty(&self) -> bool {
        self == &RulesFile::default()
    }
}

/// Reads and parses a rules file.
pub fn load_rules(path: &Path) -> Result<RulesFile, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&content, path)
}

/// Parses rules from a string; `path` is only used in error messages.
pub fn parse_rules(content: &str, path: &Path) -> Result<RulesFile, ProjectError> {
    toml::from_str(content).map_err(|e| ProjectError::InvalidRules {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

//! The in-memory project assembled for one netlist.

use std::path::{Path, PathBuf};

use crate::error::ProjectError;
use crate::files_file::{parse_files_file, SourceFile};
use crate::rules::{load_rules, RulesFile};

/// Source files and processing rules collected for one top-level module.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    root: PathBuf,
    files: Vec<SourceFile>,
    rules: RulesFile,
}

impl Project {
    /// Creates an empty project; relative paths in inputs resolve against `root`.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            files: Vec::new(),
            rules: RulesFile::default(),
        }
    }

    /// Returns the project (top-level module) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the collected source files in declaration order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Returns the merged processing rules.
    pub fn rules(&self) -> &RulesFile {
        &self.rules
    }

    /// Adds every source file listed in a `.files` file.
    ///
    /// A file already present in the project is not added twice.
    pub fn add_file_list_file(&mut self, path: &Path) -> Result<(), ProjectError> {
        for file in parse_files_file(path, &self.root)? {
            if !self.files.iter().any(|f| f.path == file.path) {
                self.files.push(file);
            }
        }
        Ok(())
    }

    /// Adds the tasks of a `.rules` file after any already present.
    pub fn add_rules_file(&mut self, path: &Path) -> Result<(), ProjectError> {
        let rules = load_rules(path)?;
        self.rules.merge(rules);
        Ok(())
    }
}

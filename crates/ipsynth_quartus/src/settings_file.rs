//! Writer for Quartus project-settings files (`.qsf`).
//!
//! The file is regenerated from scratch on every run, so unchanged inputs
//! produce byte-identical output:
//!
//! ```text
//! set_global_assignment -name FAMILY "Cyclone V"
//! set_global_assignment -name DEVICE 5CSEMA5F31C6
//! set_global_assignment -name TOP_LEVEL_ENTITY fifo_cc
//! set_global_assignment -name VHDL_INPUT_VERSION VHDL_2008
//!
//! set_global_assignment -name VHDL_FILE /work/src/fifo/fifo_cc.vhdl -library poc
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use ipsynth_project::{Project, SourceFile, SourceKind};

use crate::error::QuartusError;

/// File extension of Quartus project-settings files.
pub const PROJECT_FILE_EXTENSION: &str = "qsf";

/// An in-memory Quartus project-settings file.
#[derive(Clone, Debug)]
pub struct QuartusSettingsFile {
    path: PathBuf,
    global_assignments: Vec<(String, String)>,
    source_files: Vec<SourceFile>,
}

impl QuartusSettingsFile {
    /// Creates an empty settings file to be written at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            global_assignments: Vec::new(),
            source_files: Vec::new(),
        }
    }

    /// Returns the on-disk location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets a global assignment. Re-setting a name replaces its value in place.
    ///
    /// `value` is written verbatim; callers quote values containing spaces.
    pub fn set_global_assignment(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.global_assignments.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.global_assignments.push((name, value)),
        }
    }

    /// Returns the value of a global assignment.
    pub fn global_assignment(&self, name: &str) -> Option<&str> {
        self.global_assignments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Appends every source file of `project` in project order.
    pub fn copy_source_files_from_project(&mut self, project: &Project) {
        self.source_files.extend(project.files().iter().cloned());
    }

    /// Returns the source files that will be written.
    pub fn source_files(&self) -> &[SourceFile] {
        &self.source_files
    }

    /// Renders the file contents.
    ///
    /// Every source file must exist; a missing one aborts rendering.
    pub fn render(&self) -> Result<String, QuartusError> {
        let mut out = String::new();
        for (name, value) in &self.global_assignments {
            let _ = writeln!(out, "set_global_assignment -name {name} {value}");
        }
        if !self.source_files.is_empty() {
            out.push('\n');
        }
        for file in &self.source_files {
            if !file.path.is_file() {
                return Err(QuartusError::SourceFileMissing {
                    path: file.path.clone(),
                });
            }
            let path = quote_path(&file.path);
            let _ = match &file.kind {
                SourceKind::Vhdl { library } => writeln!(
                    out,
                    "set_global_assignment -name VHDL_FILE {path} -library {library}"
                ),
                SourceKind::Verilog => {
                    writeln!(out, "set_global_assignment -name VERILOG_FILE {path}")
                }
                SourceKind::SystemVerilog => {
                    writeln!(out, "set_global_assignment -name SYSTEMVERILOG_FILE {path}")
                }
                SourceKind::Sdc => writeln!(out, "set_global_assignment -name SDC_FILE {path}"),
            };
        }
        Ok(out)
    }

    /// Renders and writes the file, replacing any previous content.
    pub fn write(&self) -> Result<(), QuartusError> {
        let content = self.render()?;
        log::debug!("Writing Quartus settings file '{}'", self.path.display());
        std::fs::write(&self.path, content).map_err(|source| QuartusError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Quartus expects `/` separators; paths with whitespace are quoted.
fn quote_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    if text.chars().any(char::is_whitespace) {
        format!("\"{text}\"")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fifo_project(dir: &Path) -> Project {
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src/fifo_cc.vhdl"), "entity fifo_cc is end;").unwrap();
        fs::write(dir.join("src/sync.v"), "module sync; endmodule").unwrap();
        fs::write(
            dir.join("fifo_cc.files"),
            "vhdl poc \"src/fifo_cc.vhdl\"\nverilog \"src/sync.v\"\n",
        )
        .unwrap();
        let mut project = Project::new("fifo_cc", dir);
        project
            .add_file_list_file(&dir.join("fifo_cc.files"))
            .unwrap();
        project
    }

    fn fifo_settings(dir: &Path, project: &Project) -> QuartusSettingsFile {
        let mut qsf = QuartusSettingsFile::new(dir.join("fifo_cc.qsf"));
        qsf.set_global_assignment("FAMILY", "\"Cyclone V\"");
        qsf.set_global_assignment("DEVICE", "5CSEMA5F31C6");
        qsf.set_global_assignment("TOP_LEVEL_ENTITY", "fifo_cc");
        qsf.set_global_assignment("VHDL_INPUT_VERSION", "VHDL_2008");
        qsf.copy_source_files_from_project(project);
        qsf
    }

    #[test]
    fn renders_fifo_scenario() {
        let dir = TempDir::new().unwrap();
        let project = fifo_project(dir.path());
        let text = fifo_settings(dir.path(), &project).render().unwrap();
        let root = dir.path().to_string_lossy().replace('\\', "/");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "set_global_assignment -name FAMILY \"Cyclone V\"");
        assert_eq!(lines[1], "set_global_assignment -name DEVICE 5CSEMA5F31C6");
        assert_eq!(lines[2], "set_global_assignment -name TOP_LEVEL_ENTITY fifo_cc");
        assert_eq!(lines[3], "set_global_assignment -name VHDL_INPUT_VERSION VHDL_2008");
        assert_eq!(lines[4], "");
        assert_eq!(
            lines[5],
            format!("set_global_assignment -name VHDL_FILE {root}/src/fifo_cc.vhdl -library poc")
        );
        assert_eq!(
            lines[6],
            format!("set_global_assignment -name VERILOG_FILE {root}/src/sync.v")
        );
    }

    #[test]
    fn reassignment_replaces_in_place() {
        let mut qsf = QuartusSettingsFile::new("x.qsf");
        qsf.set_global_assignment("DEVICE", "EP4CE22F17C6");
        qsf.set_global_assignment("TOP_LEVEL_ENTITY", "top");
        qsf.set_global_assignment("DEVICE", "5CSEMA5F31C6");
        assert_eq!(qsf.global_assignment("DEVICE"), Some("5CSEMA5F31C6"));
        let text = qsf.render().unwrap();
        assert!(text.starts_with("set_global_assignment -name DEVICE 5CSEMA5F31C6\n"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn write_overwrites_and_is_stable() {
        let dir = TempDir::new().unwrap();
        let project = fifo_project(dir.path());
        let qsf = fifo_settings(dir.path(), &project);
        fs::write(qsf.path(), "stale content\n").unwrap();

        qsf.write().unwrap();
        let first = fs::read(qsf.path()).unwrap();
        qsf.write().unwrap();
        let second = fs::read(qsf.path()).unwrap();

        assert_eq!(first, second);
        assert!(!String::from_utf8(first).unwrap().contains("stale"));
    }

    #[test]
    fn missing_source_file() {
        let dir = TempDir::new().unwrap();
        let project = fifo_project(dir.path());
        fs::remove_file(dir.path().join("src/sync.v")).unwrap();
        let err = fifo_settings(dir.path(), &project).render().unwrap_err();
        match err {
            QuartusError::SourceFileMissing { path } => assert!(path.ends_with("src/sync.v")),
            other => panic!("expected SourceFileMissing, got {other:?}"),
        }
    }

    #[test]
    fn quotes_paths_with_spaces() {
        assert_eq!(quote_path(Path::new("/a b/c.vhdl")), "\"/a b/c.vhdl\"");
        assert_eq!(quote_path(Path::new("/ab/c.vhdl")), "/ab/c.vhdl");
    }
}

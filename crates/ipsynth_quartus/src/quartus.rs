//! The Quartus installation handle and the `quartus_map` executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::QuartusError;
use crate::output::{classify_line, MapReport};

/// Host platform, which decides executable file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other Unix-like hosts.
    Linux,
    /// Windows hosts (`.exe` suffix).
    Windows,
}

impl Platform {
    /// Detects the platform this binary runs on.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Returns the file name of the executable `base` on this platform.
    pub fn executable_name(&self, base: &str) -> String {
        match self {
            Platform::Linux => base.to_string(),
            Platform::Windows => format!("{base}.exe"),
        }
    }
}

/// A located Quartus installation.
#[derive(Clone, Debug)]
pub struct Quartus {
    platform: Platform,
    binary_directory: PathBuf,
    version: String,
}

impl Quartus {
    /// Creates a handle for the installation in `binary_directory`.
    pub fn new(platform: Platform, binary_directory: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            platform,
            binary_directory: binary_directory.into(),
            version: version.into(),
        }
    }

    /// Returns the directory holding the Quartus binaries.
    pub fn binary_directory(&self) -> &Path {
        &self.binary_directory
    }

    /// Returns the configured Quartus version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the Analysis & Synthesis executable of this installation.
    pub fn map(&self) -> QuartusMap {
        QuartusMap {
            program: self
                .binary_directory
                .join(self.platform.executable_name(QuartusMap::NAME)),
            project_file: None,
            show_logs: false,
        }
    }
}

/// `quartus_map`, Quartus Analysis & Synthesis.
///
/// Takes the project-settings file as its only required argument and runs
/// in the project file's directory.
#[derive(Clone, Debug)]
pub struct QuartusMap {
    program: PathBuf,
    project_file: Option<PathBuf>,
    show_logs: bool,
}

impl QuartusMap {
    /// Base name of the executable.
    pub const NAME: &'static str = "quartus_map";

    /// Returns the full path of the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Sets the project-settings file to synthesize.
    pub fn set_project_file(&mut self, path: impl Into<PathBuf>) {
        self.project_file = Some(path.into());
    }

    /// Logs informational tool messages at `info` instead of `trace`.
    pub fn set_show_logs(&mut self, show_logs: bool) {
        self.show_logs = show_logs;
    }

    /// Builds the command line without running it.
    pub fn command(&self) -> Result<Command, QuartusError> {
        let project_file = self
            .project_file
            .as_ref()
            .ok_or_else(|| QuartusError::NoProjectFile(Self::NAME.to_string()))?;

        let mut command = Command::new(&self.program);
        command.arg(project_file);
        if let Some(dir) = project_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        Ok(command)
    }

    /// Runs the executable to completion and classifies its output.
    ///
    /// Blocks until the process exits. A non-zero exit status is reported as
    /// [`QuartusError::ToolFailed`] carrying the tool's error messages.
    pub fn compile(&self) -> Result<MapReport, QuartusError> {
        let mut command = self.command()?;
        log::debug!("Running command: {:?}", command);

        let output = command.output().map_err(|source| QuartusError::Launch {
            program: self.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut report = MapReport::default();
        for line in stdout.lines().chain(stderr.lines()) {
            match classify_line(line) {
                Some(message) => {
                    message.log(self.show_logs);
                    report.messages.push(message);
                }
                None if self.show_logs => log::info!("quartus_map: {line}"),
                None => log::trace!("quartus_map: {line}"),
            }
        }

        if !output.status.success() {
            return Err(QuartusError::ToolFailed {
                program: Self::NAME.to_string(),
                code: output.status.code(),
                errors: report.errors().map(|m| m.text.clone()).collect(),
            });
        }

        log::debug!(
            "quartus_map finished: {} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
        Ok(report)
    }
}

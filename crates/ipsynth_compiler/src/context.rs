//! Per-job compilation context.
//!
//! Every job gets its own copy of the configuration with the device-context
//! section (`SPECIAL`) written into it. The shared configuration the compiler
//! was built from is never modified, so nothing from one job's device leaks
//! into the next.

use std::path::{Path, PathBuf};

use ipsynth_common::Device;
use ipsynth_config::{
    interpolate, posix_path, Config, DirectoryLayout, Section, DEVICE_CONTEXT_SECTION,
};

use crate::error::CompilationError;

/// User options that change how a job runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Log the tool invocation instead of running it.
    pub dry_run: bool,
    /// Show informational tool output at the default log level.
    pub show_logs: bool,
    /// Print the synthesis summary report after a successful run.
    pub show_report: bool,
    /// Keep intermediate files; post-delete tasks are skipped.
    pub no_cleanup: bool,
}

/// Writes the device-context section, replacing whatever it held before.
///
/// Afterwards the section contains exactly `Device`, `DeviceSeries` and
/// `OutputDir`.
pub fn write_device_context(config: &mut Config, device: &Device, output_dir: &Path) {
    let mut section = Section::new();
    section.insert("Device".to_string(), device.short_name().to_string());
    section.insert("DeviceSeries".to_string(), device.series().to_string());
    section.insert("OutputDir".to_string(), posix_path(output_dir));
    config.replace_section(DEVICE_CONTEXT_SECTION, section);
}

/// Everything one job needs: its configuration copy, device and directories.
#[derive(Debug, Clone)]
pub struct JobContext {
    config: Config,
    device: Device,
    directories: DirectoryLayout,
    destination: PathBuf,
    options: CompilerOptions,
}

impl JobContext {
    /// Builds the context for a job targeting `device`.
    ///
    /// The output directory is `<netlist>/<device short name>`.
    pub fn new(
        shared: &Config,
        directories: &DirectoryLayout,
        device: &Device,
        options: CompilerOptions,
    ) -> Self {
        let mut config = shared.clone();
        write_device_context(&mut config, device, &directories.working);
        Self {
            config,
            device: device.clone(),
            destination: directories.netlist.join(device.short_name()),
            directories: directories.clone(),
            options,
        }
    }

    /// The job's configuration, device context included.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The target device.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.directories.root
    }

    /// The tool's working directory, which receives the project file.
    pub fn working_dir(&self) -> &Path {
        &self.directories.working
    }

    /// The per-device netlist output directory.
    pub fn destination_dir(&self) -> &Path {
        &self.destination
    }

    /// The job's options.
    pub fn options(&self) -> CompilerOptions {
        self.options
    }

    /// Creates the working and destination directories.
    pub fn prepare_directories(&self) -> Result<(), CompilationError> {
        for dir in [self.working_dir(), self.destination_dir()] {
            log::debug!("Creating directory '{}'", dir.display());
            std::fs::create_dir_all(dir).map_err(|e| CompilationError::io(dir, e))?;
        }
        Ok(())
    }

    /// Interpolates `text` against the job's configuration.
    pub fn expand(&self, text: &str) -> Result<String, CompilationError> {
        Ok(interpolate(&self.config, text, None)?)
    }

    /// Interpolates `text` as a path; relative results are joined to the root.
    pub fn expand_path(&self, text: &str) -> Result<PathBuf, CompilationError> {
        let path = PathBuf::from(self.expand(text)?);
        Ok(if path.is_relative() {
            self.root().join(path)
        } else {
            path
        })
    }
}

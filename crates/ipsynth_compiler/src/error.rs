//! Error types for netlist compilation.

use std::path::PathBuf;

use ipsynth_config::ConfigError;
use ipsynth_project::ProjectError;
use ipsynth_quartus::QuartusError;

/// A failure of one netlist job.
///
/// Batch runs record this error per job and continue with the next one.
#[derive(Debug, thiserror::Error)]
pub enum CompilationError {
    /// Reading a configuration value or interpolating a task string failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The file list or rules file could not be loaded.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Writing the project file or running the tool failed.
    #[error(transparent)]
    Tool(#[from] QuartusError),

    /// A filesystem operation of the pipeline failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A replace task carries an invalid search pattern.
    #[error("invalid search pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern after interpolation.
        pattern: String,
        /// The regex compiler's error.
        source: regex::Error,
    },

    /// A copy task names a source that does not exist.
    #[error("copy source not found: {path}")]
    MissingCopySource {
        /// The missing source file.
        path: PathBuf,
    },
}

impl CompilationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// The toolchain could not be located from the configuration.
#[derive(Debug, thiserror::Error)]
#[error("cannot prepare {tool}: {source}")]
pub struct ToolchainPreparationError {
    /// Display name of the toolchain.
    pub tool: &'static str,
    /// The configuration problem.
    #[source]
    pub source: ConfigError,
}

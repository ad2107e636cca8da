//! Error types for Quartus project generation and tool runs.

use std::path::PathBuf;

/// Errors raised while writing Quartus inputs or running Quartus tools.
#[derive(Debug, thiserror::Error)]
pub enum QuartusError {
    /// A source file listed in the project does not exist.
    #[error("source file not found: {path}")]
    SourceFileMissing {
        /// The missing file.
        path: PathBuf,
    },

    /// Reading or writing a Quartus file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The executable was run without a project file.
    #[error("no project file set for {0}")]
    NoProjectFile(String),

    /// The executable could not be started.
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// Path of the executable.
        program: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The executable exited unsuccessfully.
    #[error("{program} failed with {}: {} error(s)", exit_description(.code), .errors.len())]
    ToolFailed {
        /// Executable name.
        program: String,
        /// Exit code, or `None` if terminated by a signal.
        code: Option<i32>,
        /// Error messages reported by the tool.
        errors: Vec<String>,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

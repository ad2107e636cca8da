//! Error types for project input files.

use std::path::PathBuf;

/// Errors that can occur while reading `.files` and `.rules` inputs.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// An input file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A `.files` line could not be parsed.
    #[error("{path}:{line}: {message}")]
    Syntax {
        /// The file containing the bad line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// A `.files` file includes itself, directly or transitively.
    #[error("include cycle through {path}")]
    IncludeCycle {
        /// The file that was included a second time.
        path: PathBuf,
    },

    /// A `.rules` file is not valid.
    #[error("invalid rules file {path}: {reason}")]
    InvalidRules {
        /// The rules file.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },
}

//! Error types for configuration loading, interpolation and resolution.

use ipsynth_common::ParseDeviceError;

/// Errors that can occur when loading or querying an `ipsynth.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required section is absent.
    #[error("missing configuration section [{0}]")]
    MissingSection(String),

    /// A required key is absent, given as `section:key`.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// No `BOARD.<name>` section exists for the requested board.
    #[error("unknown board '{0}'")]
    UnknownBoard(String),

    /// A board names a part number that is not a recognized device.
    #[error("board '{board}' has an invalid FPGA: {source}")]
    InvalidDevice {
        /// The board whose `FPGA` key failed to parse.
        board: String,
        /// The underlying parse error.
        source: ParseDeviceError,
    },

    /// No netlist in the catalog matches the requested name or wildcard.
    #[error("no netlist matches '{0}'")]
    UnknownNetlist(String),

    /// An interpolation refers to a `section:key` that does not exist.
    #[error("interpolation refers to unknown key '{0}'")]
    UnknownReference(String),

    /// Interpolation recursed too deeply, usually because of a reference cycle.
    #[error("interpolation depth exceeded while expanding '{0}'")]
    InterpolationDepth(String),

    /// A value contains malformed interpolation syntax.
    #[error("bad interpolation syntax in '{text}': {reason}")]
    BadInterpolation {
        /// The offending value.
        text: String,
        /// Description of the syntax problem.
        reason: &'static str,
    },
}

//! Thin handle around an Intel Quartus installation.
//!
//! Provides the [`Quartus`] toolchain handle and its [`QuartusMap`]
//! executable, the [`QuartusSettingsFile`] (`.qsf`) writer, and
//! classification of Quartus console messages. Synthesis itself happens in
//! the external `quartus_map` process.

#![warn(missing_docs)]

pub mod error;
pub mod output;
pub mod quartus;
pub mod settings_file;

pub use error::QuartusError;
pub use output::{classify_line, MapReport, MessageSeverity, ToolMessage};
pub use quartus::{Platform, Quartus, QuartusMap};
pub use settings_file::{QuartusSettingsFile, PROJECT_FILE_EXTENSION};

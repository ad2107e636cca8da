//! In-memory representation of an IP core project.
//!
//! A [`Project`] is seeded from a `.files` source list (see [`files_file`])
//! and an optional `.rules` file of pre/post processing tasks (see
//! [`rules`]). Vendor backends read the collected source files to generate
//! their own project-settings format.

#![warn(missing_docs)]

pub mod error;
pub mod files_file;
pub mod project;
pub mod rules;

pub use error::ProjectError;
pub use files_file::{parse_files_file, SourceFile, SourceKind};
pub use project::Project;
pub use rules::{
    load_rules, parse_rules, CopyRule, DeleteRule, PostProcessRules, PreProcessRules,
    ReplaceRule, RulesFile,
};

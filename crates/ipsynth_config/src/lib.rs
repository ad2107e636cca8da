//! Parsing, interpolation and resolution of `ipsynth.toml` configuration files.
//!
//! The configuration is a sectioned key/value store. Sections name the
//! toolchain installation, directory layout, boards and the netlist catalog;
//! values may reference each other with `${Section:key}`. The resolvers in
//! [`resolve`] turn raw sections into strongly-typed values.

#![warn(missing_docs)]

pub mod error;
pub mod interpolate;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use interpolate::interpolate;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{
    expand_netlist, netlist_catalog, resolve_board, resolve_directories, resolve_netlists,
    resolve_quartus_install, DirectoryLayout, QuartusInstall,
};
pub use types::*;

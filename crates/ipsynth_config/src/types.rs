//! The sectioned key/value configuration store.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::interpolate::interpolate;

/// Runtime section describing the project itself.
pub const PROJECT_SECTION: &str = "PROJECT";
/// Key under [`PROJECT_SECTION`] holding the root directory.
pub const ROOT_DIRECTORY_KEY: &str = "RootDirectory";
/// Section holding the Quartus installation settings.
pub const QUARTUS_INSTALL_SECTION: &str = "INSTALL.Altera.Quartus";
/// Section holding the directory names used for outputs.
pub const DIRECTORY_NAMES_SECTION: &str = "CONFIG.DirectoryNames";
/// Runtime section carrying the device context of the job being compiled.
pub const DEVICE_CONTEXT_SECTION: &str = "SPECIAL";
/// Prefix of board sections (`BOARD.<name>`).
pub const BOARD_PREFIX: &str = "BOARD.";
/// Prefix of netlist catalog sections (`NETLIST.<fqn>`).
pub const NETLIST_PREFIX: &str = "NETLIST.";

/// The keys and values of one configuration section.
pub type Section = BTreeMap<String, String>;

/// A configuration: a mapping of section name to key/value pairs.
///
/// Every TOML table in `ipsynth.toml` becomes one section. Section names may
/// contain dots (`"INSTALL.Altera.Quartus"`), so they are written as quoted
/// table headers. Values are stored raw; use [`Config::interpolated`] to
/// expand `${...}` references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Config {
    sections: BTreeMap<String, Section>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the named section, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns the named section or a [`ConfigError::MissingSection`].
    pub fn require_section(&self, name: &str) -> Result<&Section, ConfigError> {
        self.section(name)
            .ok_or_else(|| ConfigError::MissingSection(name.to_string()))
    }

    /// Returns the raw (uninterpolated) value of `section:key`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// Returns the raw value of `section:key`, or an error naming what is missing.
    pub fn require(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.require_section(section)?
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingField(format!("{section}:{key}")))
    }

    /// Returns the value of `section:key` with all references expanded.
    pub fn interpolated(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        let raw = self.require(section, key)?;
        interpolate(self, raw, Some(section))
    }

    /// Like [`Config::interpolated`], but an absent key yields `Ok(None)`.
    pub fn interpolated_opt(&self, section: &str, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(section, key) {
            Some(raw) => interpolate(self, raw, Some(section)).map(Some),
            None => Ok(None),
        }
    }

    /// Sets a single value, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Replaces a whole section, returning its previous content.
    ///
    /// Keys of the old section that are absent from `section` do not survive.
    pub fn replace_section(&mut self, name: &str, section: Section) -> Option<Section> {
        self.sections.insert(name.to_string(), section)
    }

    /// Iterates over all sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the sections whose name starts with `prefix`, yielding
    /// the name with the prefix stripped.
    pub fn sections_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Section)> + 'a {
        self.sections
            .iter()
            .filter_map(move |(name, section)| Some((name.strip_prefix(prefix)?, section)))
    }

    /// Returns the project root directory published by the loader.
    pub fn root_directory(&self) -> Result<&Path, ConfigError> {
        self.require(PROJECT_SECTION, ROOT_DIRECTORY_KEY).map(Path::new)
    }
}

/// Renders a path with `/` separators, as interpolated values are written.
pub fn posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

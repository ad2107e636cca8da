//! Configuration file loading and validation.

use std::path::Path;

use ipsynth_common::EntitySpec;

use crate::error::ConfigError;
use crate::types::{posix_path, Config, BOARD_PREFIX, NETLIST_PREFIX, PROJECT_SECTION, ROOT_DIRECTORY_KEY};

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "ipsynth.toml";

/// Loads and validates a configuration.
///
/// `path` is either the configuration file itself or a directory containing
/// `ipsynth.toml`. The file's directory becomes the root directory.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let (file, root) = if path.is_dir() {
        (path.join(CONFIG_FILE_NAME), path.to_path_buf())
    } else {
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        (path.to_path_buf(), root)
    };
    let content = std::fs::read_to_string(&file)?;
    load_config_from_str(&content, &root)
}

/// Parses and validates a configuration from a string.
///
/// `root` is published as `PROJECT:RootDirectory` so that values can build
/// paths with `${PROJECT:RootDirectory}`.
pub fn load_config_from_str(content: &str, root: &Path) -> Result<Config, ConfigError> {
    let mut config: Config =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.set(PROJECT_SECTION, ROOT_DIRECTORY_KEY, posix_path(root));
    validate_config(&config)?;
    Ok(config)
}

/// Validates that board and netlist sections carry their required keys.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    for (board, section) in config.sections_with_prefix(BOARD_PREFIX) {
        if !section.contains_key("FPGA") {
            return Err(ConfigError::MissingField(format!("{BOARD_PREFIX}{board}:FPGA")));
        }
    }

    for (fqn, section) in config.sections_with_prefix(NETLIST_PREFIX) {
        match fqn.parse::<EntitySpec>() {
            Ok(EntitySpec::Concrete(_)) => {}
            Ok(EntitySpec::WildCard(_)) => {
                return Err(ConfigError::ValidationError(format!(
                    "netlist section '{NETLIST_PREFIX}{fqn}' must not be a wildcard"
                )))
            }
            Err(e) => return Err(ConfigError::ValidationError(e.to_string())),
        }
        for key in ["ModuleName", "FilesFile"] {
            match section.get(key) {
                Some(v) if !v.trim().is_empty() => {}
                _ => {
                    return Err(ConfigError::MissingField(format!(
                        "{NETLIST_PREFIX}{fqn}:{key}"
                    )))
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FULL: &str = r#"
["INSTALL.Altera.Quartus"]
BinaryDirectory = "/opt/altera/16.0/quartus/bin"
Version = "16.0"

["CONFIG.DirectoryNames"]
TemporaryFiles = "temp"
QuartusSynthesisFiles = "quartus"
NetlistFiles = "netlist"

["BOARD.DE1-SoC"]
FPGA = "5CSEMA5F31C6"

["NETLIST.PoC.fifo.cc"]
ModuleName = "fifo_cc"
FilesFile = "src/fifo/fifo_cc.files"
RulesFile = "src/fifo/fifo_cc.rules"
"#;

    #[test]
    fn parse_full_config() {
        let config = load_config_from_str(FULL, Path::new("/work/poc")).unwrap();
        assert_eq!(config.get("INSTALL.Altera.Quartus", "Version"), Some("16.0"));
        assert_eq!(config.get("BOARD.DE1-SoC", "FPGA"), Some("5CSEMA5F31C6"));
        assert_eq!(config.get("NETLIST.PoC.fifo.cc", "ModuleName"), Some("fifo_cc"));
        assert_eq!(config.get("PROJECT", "RootDirectory"), Some("/work/poc"));
    }

    #[test]
    fn empty_config_is_valid() {
        let config = load_config_from_str("", Path::new(".")).unwrap();
        assert_eq!(config.sections().count(), 1);
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}", Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn non_string_value_errors() {
        let toml = r#"
["CONFIG.DirectoryNames"]
NetlistFiles = 42
"#;
        let err = load_config_from_str(toml, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn board_without_fpga_errors() {
        let toml = r#"
["BOARD.DE0"]
Name = "Terasic DE0"
"#;
        let err = load_config_from_str(toml, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "BOARD.DE0:FPGA"));
    }

    #[test]
    fn netlist_without_files_file_errors() {
        let toml = r#"
["NETLIST.PoC.fifo.cc"]
ModuleName = "fifo_cc"
"#;
        let err = load_config_from_str(toml, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "NETLIST.PoC.fifo.cc:FilesFile"));
    }

    #[test]
    fn wildcard_netlist_section_errors() {
        let toml = r#"
["NETLIST.PoC.fifo.*"]
ModuleName = "fifo_cc"
FilesFile = "a.files"
"#;
        let err = load_config_from_str(toml, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), FULL).unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(
            config.root_directory().unwrap(),
            Path::new(&posix_path(dir.path()))
        );
    }

    #[test]
    fn load_from_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.toml");
        fs::write(&file, FULL).unwrap();
        let config = load_config(&file).unwrap();
        assert_eq!(config.get("CONFIG.DirectoryNames", "NetlistFiles"), Some("netlist"));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir/ipsynth.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}

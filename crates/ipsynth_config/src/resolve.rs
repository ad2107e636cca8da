//! Resolution of raw configuration sections into typed values.

use std::path::{Path, PathBuf};

use ipsynth_common::{Board, Device, EntitySpec, Netlist};

use crate::error::ConfigError;
use crate::interpolate::interpolate;
use crate::types::{
    Config, Section, BOARD_PREFIX, DIRECTORY_NAMES_SECTION, NETLIST_PREFIX,
    QUARTUS_INSTALL_SECTION,
};

/// Location and version of a Quartus installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuartusInstall {
    /// Directory containing `quartus_map` and the other Quartus binaries.
    pub binary_directory: PathBuf,
    /// Installed version string (e.g., "16.0").
    pub version: String,
}

/// Reads the Quartus installation settings.
///
/// Both `BinaryDirectory` and `Version` must be present and non-empty.
pub fn resolve_quartus_install(config: &Config) -> Result<QuartusInstall, ConfigError> {
    let binary_directory = non_empty(config, QUARTUS_INSTALL_SECTION, "BinaryDirectory")?;
    let version = non_empty(config, QUARTUS_INSTALL_SECTION, "Version")?;
    Ok(QuartusInstall {
        binary_directory: PathBuf::from(binary_directory),
        version,
    })
}

/// Directory layout derived from `CONFIG.DirectoryNames`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    /// Project root directory.
    pub root: PathBuf,
    /// Scratch directory for all tools (`<root>/<TemporaryFiles>`).
    pub temp: PathBuf,
    /// Quartus working directory (`<temp>/<QuartusSynthesisFiles>`).
    pub working: PathBuf,
    /// Root of the per-device netlist output (`<root>/<NetlistFiles>`).
    pub netlist: PathBuf,
}

/// Computes the directory layout from the root directory and directory names.
pub fn resolve_directories(config: &Config) -> Result<DirectoryLayout, ConfigError> {
    let root = config.root_directory()?.to_path_buf();
    let temp = root.join(non_empty(config, DIRECTORY_NAMES_SECTION, "TemporaryFiles")?);
    let working = temp.join(non_empty(config, DIRECTORY_NAMES_SECTION, "QuartusSynthesisFiles")?);
    let netlist = root.join(non_empty(config, DIRECTORY_NAMES_SECTION, "NetlistFiles")?);
    Ok(DirectoryLayout {
        root,
        temp,
        working,
        netlist,
    })
}

/// Looks up a board by name and parses its FPGA part number.
pub fn resolve_board(config: &Config, name: &str) -> Result<Board, ConfigError> {
    let section = format!("{BOARD_PREFIX}{name}");
    if config.section(&section).is_none() {
        return Err(ConfigError::UnknownBoard(name.to_string()));
    }
    let part = config.interpolated(&section, "FPGA")?;
    let device: Device = part.parse().map_err(|source| ConfigError::InvalidDevice {
        board: name.to_string(),
        source,
    })?;
    Ok(Board::new(name, device))
}

/// Returns every netlist in the catalog, ordered by FQN.
///
/// Values are returned uninterpolated. See [`expand_netlist`].
pub fn netlist_catalog(config: &Config) -> Vec<Netlist> {
    config
        .sections_with_prefix(NETLIST_PREFIX)
        .map(|(fqn, section)| raw_netlist(fqn, section))
        .collect()
}

/// Expands a job specification into the netlists it selects, ordered by FQN.
///
/// A concrete name yields exactly one netlist; a wildcard yields every
/// netlist below its prefix. Selecting nothing is an error.
///
/// Only names are matched here. `ModuleName`, `FilesFile` and `RulesFile`
/// may refer to the device context, which does not exist until a job runs,
/// so they are kept raw.
pub fn resolve_netlists(config: &Config, spec: &EntitySpec) -> Result<Vec<Netlist>, ConfigError> {
    let netlists: Vec<Netlist> = config
        .sections_with_prefix(NETLIST_PREFIX)
        .filter(|(fqn, _)| spec.matches(fqn))
        .map(|(fqn, section)| raw_netlist(fqn, section))
        .collect();

    if netlists.is_empty() {
        return Err(ConfigError::UnknownNetlist(spec.to_string()));
    }
    Ok(netlists)
}

/// Interpolates a netlist's module name and input paths against `config`.
///
/// Bare `${key}` references resolve inside the netlist's own catalog
/// section. Relative paths are joined to `root`. An empty `RulesFile`
/// means no rules file.
pub fn expand_netlist(
    config: &Config,
    root: &Path,
    netlist: &Netlist,
) -> Result<Netlist, ConfigError> {
    let section = format!("{NETLIST_PREFIX}{}", netlist.fqn);
    let scope = config.section(&section).map(|_| section.as_str());
    let expand = |key: &str, text: &str| -> Result<String, ConfigError> {
        let value = interpolate(config, text, scope)?;
        if value.trim().is_empty() && key != "RulesFile" {
            return Err(ConfigError::MissingField(format!("{section}:{key}")));
        }
        Ok(value)
    };

    let module_name = expand("ModuleName", &netlist.module_name)?;
    let files_file = root.join(expand("FilesFile", &netlist.files_file.to_string_lossy())?);
    let rules_file = match &netlist.rules_file {
        Some(raw) => {
            let rules = expand("RulesFile", &raw.to_string_lossy())?;
            (!rules.trim().is_empty()).then(|| root.join(rules))
        }
        None => None,
    };
    Ok(Netlist {
        fqn: netlist.fqn.clone(),
        module_name,
        files_file,
        rules_file,
        project_file: netlist.project_file.clone(),
    })
}

fn raw_netlist(fqn: &str, section: &Section) -> Netlist {
    let field = |key: &str| section.get(key).cloned().unwrap_or_default();
    let mut netlist = Netlist::new(fqn, field("ModuleName"), field("FilesFile"));
    if let Some(rules) = section.get("RulesFile").filter(|r| !r.trim().is_empty()) {
        netlist.rules_file = Some(PathBuf::from(rules));
    }
    netlist
}

fn non_empty(config: &Config, section: &str, key: &str) -> Result<String, ConfigError> {
    let value = config.interpolated(section, key)?;
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{section}:{key} must not be empty"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    const CONFIG: &str = r#"
["INSTALL.Altera.Quartus"]
BinaryDirectory = "/opt/altera/16.0/quartus/bin"
Version = "16.0"

["CONFIG.DirectoryNames"]
TemporaryFiles = "temp"
QuartusSynthesisFiles = "quartus"
NetlistFiles = "netlist"

["BOARD.DE1-SoC"]
FPGA = "5CSEMA5F31C6"

["BOARD.Broken"]
FPGA = "xc7a35t"

["NETLIST.PoC.fifo.cc"]
ModuleName = "fifo_cc"
FilesFile = "src/fifo/${ModuleName}.files"
RulesFile = "src/fifo/${ModuleName}.rules"

["NETLIST.PoC.fifo.ic_got"]
ModuleName = "fifo_ic_got"
FilesFile = "src/fifo/fifo_ic_got.files"

["NETLIST.PoC.mem.ocram.sdp"]
ModuleName = "ocram_sdp"
FilesFile = "src/mem/ocram_sdp.files"
"#;

    fn config() -> Config {
        load_config_from_str(CONFIG, Path::new("/work/poc")).unwrap()
    }

    #[test]
    fn quartus_install() {
        let install = resolve_quartus_install(&config()).unwrap();
        assert_eq!(
            install.binary_directory,
            PathBuf::from("/opt/altera/16.0/quartus/bin")
        );
        assert_eq!(install.version, "16.0");
    }

    #[test]
    fn quartus_install_missing_section() {
        let config = load_config_from_str("", Path::new(".")).unwrap();
        let err = resolve_quartus_install(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(_)));
    }

    #[test]
    fn quartus_install_empty_version() {
        let toml = r#"
["INSTALL.Altera.Quartus"]
BinaryDirectory = "/opt/quartus/bin"
Version = ""
"#;
        let config = load_config_from_str(toml, Path::new(".")).unwrap();
        let err = resolve_quartus_install(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn directory_layout() {
        let dirs = resolve_directories(&config()).unwrap();
        assert_eq!(dirs.root, PathBuf::from("/work/poc"));
        assert_eq!(dirs.temp, PathBuf::from("/work/poc/temp"));
        assert_eq!(dirs.working, PathBuf::from("/work/poc/temp/quartus"));
        assert_eq!(dirs.netlist, PathBuf::from("/work/poc/netlist"));
    }

    #[test]
    fn board_lookup() {
        let board = resolve_board(&config(), "DE1-SoC").unwrap();
        assert_eq!(board.name, "DE1-SoC");
        assert_eq!(board.device.short_name(), "5CSEMA5F31C6");
        assert_eq!(board.device.series(), "Cyclone V");
    }

    #[test]
    fn unknown_board_errors() {
        let err = resolve_board(&config(), "KC705").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBoard(_)));
    }

    #[test]
    fn invalid_board_device_errors() {
        let err = resolve_board(&config(), "Broken").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDevice { .. }));
    }

    #[test]
    fn concrete_netlist_is_raw() {
        let spec: EntitySpec = "PoC.fifo.cc".parse().unwrap();
        let netlists = resolve_netlists(&config(), &spec).unwrap();
        assert_eq!(netlists.len(), 1);
        let n = &netlists[0];
        assert_eq!(n.module_name, "fifo_cc");
        assert_eq!(n.files_file, PathBuf::from("src/fifo/${ModuleName}.files"));
        assert_eq!(
            n.rules_file,
            Some(PathBuf::from("src/fifo/${ModuleName}.rules"))
        );
    }

    #[test]
    fn expand_uses_netlist_section() {
        let config = config();
        let spec: EntitySpec = "PoC.fifo.cc".parse().unwrap();
        let raw = resolve_netlists(&config, &spec).unwrap().remove(0);

        let n = expand_netlist(&config, Path::new("/work/poc"), &raw).unwrap();

        assert_eq!(n.files_file, PathBuf::from("/work/poc/src/fifo/fifo_cc.files"));
        assert_eq!(
            n.rules_file,
            Some(PathBuf::from("/work/poc/src/fifo/fifo_cc.rules"))
        );
    }

    #[test]
    fn resolution_defers_device_references() {
        let toml = r#"
["NETLIST.PoC.fifo.cc"]
ModuleName = "fifo_cc"
FilesFile = "fifo_cc.files"
RulesFile = "rules/${SPECIAL:Device}.rules"
"#;
        let mut config = load_config_from_str(toml, Path::new("/work/poc")).unwrap();
        let spec: EntitySpec = "PoC.fifo.cc".parse().unwrap();
        let raw = resolve_netlists(&config, &spec).unwrap().remove(0);

        assert!(expand_netlist(&config, Path::new("/work/poc"), &raw).is_err());
        config.set("SPECIAL", "Device", "5CSEMA5F31C6");
        let n = expand_netlist(&config, Path::new("/work/poc"), &raw).unwrap();
        assert_eq!(
            n.rules_file,
            Some(PathBuf::from("/work/poc/rules/5CSEMA5F31C6.rules"))
        );
    }

    #[test]
    fn expand_rejects_empty_module_name() {
        let mut config = config();
        config.set("EMPTY", "Name", "");
        let raw = Netlist::new("PoC.fifo.cc", "${EMPTY:Name}", "a.files");
        let err = expand_netlist(&config, Path::new("/work/poc"), &raw).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField(f) if f == "NETLIST.PoC.fifo.cc:ModuleName"
        ));
    }

    #[test]
    fn wildcard_expands_in_fqn_order() {
        let spec: EntitySpec = "PoC.fifo.*".parse().unwrap();
        let netlists = resolve_netlists(&config(), &spec).unwrap();
        let names: Vec<&str> = netlists.iter().map(|n| n.fqn.as_str()).collect();
        assert_eq!(names, vec!["PoC.fifo.cc", "PoC.fifo.ic_got"]);
        assert!(netlists[1].rules_file.is_none());
    }

    #[test]
    fn top_level_wildcard_selects_everything() {
        let spec: EntitySpec = "PoC.*".parse().unwrap();
        assert_eq!(resolve_netlists(&config(), &spec).unwrap().len(), 3);
    }

    #[test]
    fn unmatched_spec_errors() {
        let spec: EntitySpec = "PoC.arith.*".parse().unwrap();
        let err = resolve_netlists(&config(), &spec).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetlist(s) if s == "PoC.arith.*"));
    }

    #[test]
    fn catalog_lists_all() {
        let catalog = netlist_catalog(&config());
        let modules: Vec<&str> = catalog.iter().map(|n| n.module_name.as_str()).collect();
        assert_eq!(modules, vec!["fifo_cc", "fifo_ic_got", "ocram_sdp"]);
    }
}

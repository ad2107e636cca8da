//! Configuration discovery shared by the commands.

use std::path::{Path, PathBuf};

use ipsynth_config::{load_config, Config, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Walks up from `start` to the first directory containing `ipsynth.toml`
/// and returns the path of that file.
pub fn find_config_file(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Returns the configuration path from `--config`, or discovers it.
pub fn resolve_config_path(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref path) => Ok(PathBuf::from(path)),
        None => find_config_file(&std::env::current_dir()?),
    }
}

/// Loads and validates the project configuration.
pub fn load_project_config(global: &GlobalArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let path = resolve_config_path(global)?;
    log::debug!("Loading configuration from '{}'", path.display());
    Ok(load_config(&path)?)
}

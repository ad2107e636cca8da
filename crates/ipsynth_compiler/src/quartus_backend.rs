//! Intel Quartus backend: QSF generation and `quartus_map`.

use std::path::Path;

use ipsynth_common::Netlist;
use ipsynth_config::{resolve_quartus_install, Config};
use ipsynth_project::Project;
use ipsynth_quartus::{
    Platform, Quartus, QuartusError, QuartusMap, QuartusSettingsFile, PROJECT_FILE_EXTENSION,
};

use crate::backend::SynthesisBackend;
use crate::context::JobContext;
use crate::error::{CompilationError, ToolchainPreparationError};

const TOOL_NAME: &str = "Quartus Map";

/// HDL standard Quartus parses VHDL sources with.
const VHDL_INPUT_VERSION: &str = "VHDL_2008";

/// Synthesizes netlists with Quartus Analysis & Synthesis.
#[derive(Debug, Clone)]
pub struct QuartusBackend {
    quartus: Quartus,
}

impl QuartusBackend {
    /// Locates the Quartus installation from `INSTALL.Altera.Quartus`.
    ///
    /// Only the configuration is checked here; a missing executable shows up
    /// as a failed job.
    pub fn prepare(config: &Config) -> Result<Self, ToolchainPreparationError> {
        log::debug!("Preparing {} ({}).", TOOL_NAME, QuartusMap::NAME);
        let install = resolve_quartus_install(config).map_err(|source| {
            ToolchainPreparationError {
                tool: TOOL_NAME,
                source,
            }
        })?;
        log::debug!(
            "Quartus {} in '{}'",
            install.version,
            install.binary_directory.display()
        );
        Ok(Self::new(Quartus::new(
            Platform::current(),
            install.binary_directory,
            install.version,
        )))
    }

    /// Wraps an already located installation.
    pub fn new(quartus: Quartus) -> Self {
        Self { quartus }
    }

    /// The installation handle.
    pub fn quartus(&self) -> &Quartus {
        &self.quartus
    }

    fn show_report(&self, ctx: &JobContext, netlist: &Netlist) {
        let report = ctx
            .working_dir()
            .join(format!("{}.map.summary", netlist.module_name));
        match std::fs::read_to_string(&report) {
            Ok(content) => {
                log::info!("Synthesis report '{}':", report.display());
                for line in content.lines() {
                    log::info!("  {line}");
                }
            }
            Err(e) => log::warn!("Cannot read report '{}': {}", report.display(), e),
        }
    }
}

impl SynthesisBackend for QuartusBackend {
    fn tool_name(&self) -> &'static str {
        TOOL_NAME
    }

    fn project_extension(&self) -> &'static str {
        PROJECT_FILE_EXTENSION
    }

    fn write_project(
        &self,
        ctx: &JobContext,
        netlist: &Netlist,
        project: &Project,
        path: &Path,
    ) -> Result<(), CompilationError> {
        let mut settings = QuartusSettingsFile::new(path);
        settings.set_global_assignment("FAMILY", format!("\"{}\"", ctx.device().series()));
        settings.set_global_assignment("DEVICE", ctx.device().short_name());
        settings.set_global_assignment("TOP_LEVEL_ENTITY", netlist.module_name.as_str());
        settings.set_global_assignment("VHDL_INPUT_VERSION", VHDL_INPUT_VERSION);
        settings.copy_source_files_from_project(project);
        settings.write()?;
        Ok(())
    }

    fn compile_stage(&self, ctx: &JobContext, netlist: &Netlist) -> Result<(), CompilationError> {
        let project_file = netlist
            .project_file
            .as_ref()
            .ok_or_else(|| QuartusError::NoProjectFile(QuartusMap::NAME.to_string()))?;

        let mut map = self.quartus.map();
        map.set_project_file(project_file);
        map.set_show_logs(ctx.options().show_logs);

        if ctx.options().dry_run {
            log::info!("Dry run, not executing: {:?}", map.command()?);
            return Ok(());
        }

        let report = map.compile()?;
        log::info!(
            "{} finished with {} warning(s)",
            QuartusMap::NAME,
            report.warning_count()
        );
        if ctx.options().show_report {
            self.show_report(ctx, netlist);
        }
        Ok(())
    }
}

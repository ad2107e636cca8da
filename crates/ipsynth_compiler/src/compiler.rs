//! The netlist compiler: batch driver and single-job pipeline.

use std::path::{Path, PathBuf};

use ipsynth_common::{Board, Device, EntitySpec, Netlist};
use ipsynth_config::{
    expand_netlist, resolve_directories, resolve_netlists, Config, ConfigError, DirectoryLayout,
};
use ipsynth_project::Project;
use serde::Serialize;

use crate::backend::SynthesisBackend;
use crate::context::{CompilerOptions, JobContext};
use crate::error::{CompilationError, ToolchainPreparationError};
use crate::quartus_backend::QuartusBackend;

/// Compiles IP cores to netlists with a synthesis backend.
///
/// Jobs run one at a time in the order given. Each job works on its own copy
/// of the configuration, so the compiler itself is never mutated by a run.
#[derive(Debug)]
pub struct NetlistCompiler<B = QuartusBackend> {
    config: Config,
    directories: DirectoryLayout,
    backend: B,
    options: CompilerOptions,
}

impl NetlistCompiler<QuartusBackend> {
    /// Creates a compiler for the Quartus installation named in `config`.
    pub fn new(config: Config, options: CompilerOptions) -> Result<Self, ToolchainPreparationError> {
        let backend = QuartusBackend::prepare(&config)?;
        Self::with_backend(config, backend, options)
    }
}

impl<B: SynthesisBackend> NetlistCompiler<B> {
    /// Creates a compiler driving `backend`.
    ///
    /// Fails if `CONFIG.DirectoryNames` does not describe the working and
    /// netlist directories.
    pub fn with_backend(
        config: Config,
        backend: B,
        options: CompilerOptions,
    ) -> Result<Self, ToolchainPreparationError> {
        let directories =
            resolve_directories(&config).map_err(|source| ToolchainPreparationError {
                tool: backend.tool_name(),
                source,
            })?;
        log::debug!("Working directory: '{}'", directories.working.display());
        log::debug!("Netlist directory: '{}'", directories.netlist.display());
        Ok(Self {
            config,
            directories,
            backend,
            options,
        })
    }

    /// The shared configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The resolved directory layout.
    pub fn directories(&self) -> &DirectoryLayout {
        &self.directories
    }

    /// The synthesis backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compiles every netlist selected by `specs` for `board`.
    ///
    /// All specifications are resolved before the first job starts, so an
    /// unknown netlist name fails the batch without running anything. After
    /// that, a failing job is recorded in the result and the batch moves on.
    pub fn run_many(&self, specs: &[EntitySpec], board: &Board) -> Result<BatchResult, ConfigError> {
        let mut jobs = Vec::new();
        for spec in specs {
            let netlists = resolve_netlists(&self.config, spec)?;
            if spec.is_wildcard() {
                log::debug!("'{}' selects {} netlist(s)", spec, netlists.len());
            }
            jobs.extend(netlists);
        }

        let mut result = BatchResult {
            device: Some(board.device.clone()),
            jobs: Vec::with_capacity(jobs.len()),
        };
        for mut netlist in jobs {
            let outcome = self.run_one(&mut netlist, board);
            if let Err(err) = &outcome {
                log::error!("Compiling '{}' failed: {}", netlist.fqn, err);
            }
            result.jobs.push(JobOutcome {
                netlist,
                result: outcome,
            });
        }
        Ok(result)
    }

    /// Compiles one netlist for `board` and returns the project-file path.
    ///
    /// The netlist's module name and input paths are interpolated against
    /// the job's configuration, so they may refer to the device context.
    /// The expanded values and the project-file path are stored back into
    /// `netlist`.
    pub fn run_one(
        &self,
        netlist: &mut Netlist,
        board: &Board,
    ) -> Result<PathBuf, CompilationError> {
        log::info!("IP core: {}", netlist.fqn);

        log::info!("Preparing synthesis environment...");
        let ctx = JobContext::new(&self.config, &self.directories, &board.device, self.options);
        *netlist = expand_netlist(ctx.config(), ctx.root(), netlist)?;
        log::debug!("Files file: '{}'", netlist.files_file.display());
        ctx.prepare_directories()?;

        let mut project = Project::new(&netlist.module_name, ctx.root());
        project.add_file_list_file(&netlist.files_file)?;
        if let Some(rules_file) = &netlist.rules_file {
            project.add_rules_file(rules_file)?;
        }

        let project_file = project_file_path(
            ctx.working_dir(),
            &netlist.module_name,
            self.backend.project_extension(),
        );
        netlist.project_file = Some(project_file.clone());
        self.backend
            .write_project(&ctx, netlist, &project, &project_file)?;

        // A dry run writes the project file but runs no rule tasks.
        let dry_run = self.options.dry_run;
        if dry_run {
            log::info!("Dry run, skipping pre-processing tasks");
        } else {
            log::info!("Executing pre-processing tasks...");
            self.backend.pre_stage(&ctx, &project)?;
        }

        log::info!("Running {}...", self.backend.tool_name());
        self.backend.compile_stage(&ctx, netlist)?;

        if dry_run {
            log::info!("Dry run, skipping post-processing tasks");
        } else {
            log::info!("Executing post-processing tasks...");
            self.backend.post_stage(&ctx, &project)?;
        }
        Ok(project_file)
    }
}

/// `<working>/<module>.<extension>`
fn project_file_path(working: &Path, module_name: &str, extension: &str) -> PathBuf {
    working.join(format!("{module_name}.{extension}"))
}

/// The outcome of one job in a batch.
#[derive(Debug)]
pub struct JobOutcome {
    /// The job, with its project file filled in if it got that far.
    pub netlist: Netlist,
    /// The project file on success, the failure otherwise.
    pub result: Result<PathBuf, CompilationError>,
}

impl JobOutcome {
    /// Returns `true` if the job succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-job outcomes of [`NetlistCompiler::run_many`], in execution order.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// The device every job targeted.
    pub device: Option<Device>,
    /// One entry per job that was attempted.
    pub jobs: Vec<JobOutcome>,
}

impl BatchResult {
    /// Number of jobs that succeeded.
    pub fn succeeded(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_success()).count()
    }

    /// Number of jobs that failed.
    pub fn failed(&self) -> usize {
        self.jobs.len() - self.succeeded()
    }

    /// Returns `true` if every job succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.jobs.iter().all(JobOutcome::is_success)
    }

    /// Iterates over the failed jobs and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Netlist, &CompilationError)> {
        self.jobs
            .iter()
            .filter_map(|j| j.result.as_ref().err().map(|e| (&j.netlist, e)))
    }

    /// A serializable summary of the batch.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            device: self.device.clone(),
            succeeded: self.succeeded(),
            failed: self.failed(),
            jobs: self
                .jobs
                .iter()
                .map(|job| JobSummary {
                    fqn: job.netlist.fqn.clone(),
                    module: job.netlist.module_name.clone(),
                    status: if job.is_success() {
                        JobStatus::Succeeded
                    } else {
                        JobStatus::Failed
                    },
                    project_file: job.netlist.project_file.clone(),
                    error: job.result.as_ref().err().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// Whether a job succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// The job ran to completion.
    Succeeded,
    /// The job stopped with a compilation error.
    Failed,
}

/// Report entry for one job.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    /// Fully-qualified netlist name.
    pub fqn: String,
    /// Top-level module name.
    pub module: String,
    /// Outcome.
    pub status: JobStatus,
    /// Generated project file, if the job got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_file: Option<PathBuf>,
    /// Error message of a failed job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report of a whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Target device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    /// Number of successful jobs.
    pub succeeded: usize,
    /// Number of failed jobs.
    pub failed: usize,
    /// Per-job entries in execution order.
    pub jobs: Vec<JobSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipsynth_quartus::QuartusError;

    fn outcome(fqn: &str, result: Result<PathBuf, CompilationError>) -> JobOutcome {
        JobOutcome {
            netlist: Netlist::new(fqn, fqn.rsplit('.').next().unwrap(), "x.files"),
            result,
        }
    }

    #[test]
    fn project_file_is_named_after_module() {
        assert_eq!(
            project_file_path(Path::new("/work/temp/quartus"), "fifo_cc", "qsf"),
            PathBuf::from("/work/temp/quartus/fifo_cc.qsf")
        );
    }

    #[test]
    fn batch_counts() {
        let batch = BatchResult {
            jobs: vec![
                outcome("PoC.fifo.cc", Ok(PathBuf::from("cc.qsf"))),
                outcome(
                    "PoC.fifo.ic",
                    Err(QuartusError::NoProjectFile("quartus_map".to_string()).into()),
                ),
            ],
            ..BatchResult::default()
        };
        assert_eq!(batch.succeeded(), 1);
        assert_eq!(batch.failed(), 1);
        assert!(!batch.all_succeeded());
        let failures: Vec<_> = batch.failures().map(|(n, _)| n.fqn.as_str()).collect();
        assert_eq!(failures, vec!["PoC.fifo.ic"]);
    }

    #[test]
    fn empty_batch_succeeds() {
        let batch = BatchResult::default();
        assert!(batch.all_succeeded());
        assert!(serde_json::to_value(batch.summary()).unwrap().get("device").is_none());
    }

    #[test]
    fn summary_serializes() {
        let batch = BatchResult {
            device: Some("5CSEMA5F31C6".parse().unwrap()),
            jobs: vec![outcome(
                "PoC.fifo.ic",
                Err(QuartusError::NoProjectFile("quartus_map".to_string()).into()),
            )],
        };
        let json = serde_json::to_value(batch.summary()).unwrap();
        assert_eq!(json["device"]["short_name"], "5CSEMA5F31C6");
        assert_eq!(json["device"]["family"], "CycloneV");
        assert_eq!(json["failed"], 1);
        assert_eq!(json["jobs"][0]["fqn"], "PoC.fifo.ic");
        assert_eq!(json["jobs"][0]["status"], "failed");
        assert_eq!(json["jobs"][0]["error"], "no project file set for quartus_map");
        assert!(json["jobs"][0].get("project_file").is_none());
    }
}

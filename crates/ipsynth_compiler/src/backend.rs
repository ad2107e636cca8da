//! The stage interface a synthesis toolchain implements.

use std::path::Path;

use ipsynth_common::Netlist;
use ipsynth_project::Project;

use crate::context::JobContext;
use crate::error::CompilationError;
use crate::tasks::{run_copy, run_delete, run_replace};

/// A vendor toolchain driven by [`NetlistCompiler`](crate::NetlistCompiler).
///
/// The compiler calls the stages in a fixed order for each job:
/// `write_project`, `pre_stage`, `compile_stage`, `post_stage`. A failing
/// stage ends the job, so `post_stage` never runs after a failed compile.
pub trait SynthesisBackend {
    /// Display name used in log lines, e.g. `"Quartus Map"`.
    fn tool_name(&self) -> &'static str;

    /// Extension of the generated project file, without the dot.
    fn project_extension(&self) -> &'static str;

    /// Writes the vendor project file for `netlist` to `path`.
    fn write_project(
        &self,
        ctx: &JobContext,
        netlist: &Netlist,
        project: &Project,
        path: &Path,
    ) -> Result<(), CompilationError>;

    /// Runs the pre-processing copy and replace tasks.
    fn pre_stage(&self, ctx: &JobContext, project: &Project) -> Result<(), CompilationError> {
        run_pre_tasks(ctx, project)
    }

    /// Runs the external tool on the project file stored in `netlist`.
    fn compile_stage(&self, ctx: &JobContext, netlist: &Netlist) -> Result<(), CompilationError>;

    /// Runs the post-processing copy, replace and delete tasks.
    fn post_stage(&self, ctx: &JobContext, project: &Project) -> Result<(), CompilationError> {
        run_post_tasks(ctx, project)
    }
}

/// The default pre stage: the project's `pre` copy tasks, then its replace tasks.
pub fn run_pre_tasks(ctx: &JobContext, project: &Project) -> Result<(), CompilationError> {
    let rules = &project.rules().pre;
    run_copy(ctx, &rules.copy)?;
    run_replace(ctx, &rules.replace)
}

/// The default post stage: copy, replace, then delete.
///
/// Delete tasks are skipped when the job keeps intermediate files.
pub fn run_post_tasks(ctx: &JobContext, project: &Project) -> Result<(), CompilationError> {
    let rules = &project.rules().post;
    run_copy(ctx, &rules.copy)?;
    run_replace(ctx, &rules.replace)?;
    if ctx.options().no_cleanup {
        if !rules.delete.is_empty() {
            log::debug!("Skipping {} delete task(s)", rules.delete.len());
        }
        return Ok(());
    }
    run_delete(ctx, &rules.delete)
}

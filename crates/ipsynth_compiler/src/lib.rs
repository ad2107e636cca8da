//! Compiles IP cores to netlists with a vendor synthesis toolchain.
//!
//! [`NetlistCompiler`] resolves the netlists selected by a list of names
//! (wildcards included), and runs each through a fixed pipeline: prepare
//! directories, write the device context into a per-job configuration,
//! build the project, write the vendor project file, then drive the
//! [`SynthesisBackend`] stages. Batch runs collect per-job outcomes in a
//! [`BatchResult`] instead of stopping at the first failure.

#![warn(missing_docs)]

pub mod backend;
pub mod compiler;
pub mod context;
pub mod error;
pub mod quartus_backend;
pub mod tasks;

pub use backend::{run_post_tasks, run_pre_tasks, SynthesisBackend};
pub use compiler::{BatchResult, BatchSummary, JobOutcome, JobStatus, JobSummary, NetlistCompiler};
pub use context::{write_device_context, CompilerOptions, JobContext};
pub use error::{CompilationError, ToolchainPreparationError};
pub use quartus_backend::QuartusBackend;

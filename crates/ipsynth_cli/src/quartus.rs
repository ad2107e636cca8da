//! `ipsynth quartus`: synthesize netlists with Intel Quartus.

use ipsynth_common::{Board, Device, EntitySpec};
use ipsynth_compiler::{BatchResult, CompilerOptions, NetlistCompiler};
use ipsynth_config::{resolve_board, Config};

use crate::pipeline::load_project_config;
use crate::{GlobalArgs, QuartusArgs, ReportFormat};

/// Runs the batch and prints its report.
///
/// Returns exit code 0 if every job succeeded, 1 otherwise.
pub fn run(args: &QuartusArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_project_config(global)?;
    let board = select_board(&config, args)?;
    let specs = args
        .netlists
        .iter()
        .map(|name| name.parse::<EntitySpec>())
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Target: {} ({})", board, board.device.series());
    let options = CompilerOptions {
        dry_run: args.dry_run,
        show_logs: args.show_logs,
        show_report: args.show_report,
        no_cleanup: args.no_cleanup,
    };
    let compiler = NetlistCompiler::new(config, options)?;
    let batch = compiler.run_many(&specs, &board)?;

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                print!("{}", render_text(&batch));
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&batch.summary())?);
        }
    }

    Ok(if batch.all_succeeded() { 0 } else { 1 })
}

/// Resolves `--board` through the configuration, or wraps a bare `--device`.
fn select_board(config: &Config, args: &QuartusArgs) -> Result<Board, Box<dyn std::error::Error>> {
    match (&args.board, &args.device) {
        (Some(name), _) => Ok(resolve_board(config, name)?),
        (None, Some(part)) => Ok(Board::for_device(part.parse::<Device>()?)),
        (None, None) => Err("either --board or --device is required".into()),
    }
}

fn render_text(batch: &BatchResult) -> String {
    let mut out = String::new();
    for job in &batch.jobs {
        match &job.result {
            Ok(path) => out.push_str(&format!(
                "  ok      {}  ({})\n",
                job.netlist.fqn,
                path.display()
            )),
            Err(e) => out.push_str(&format!("  FAILED  {}: {}\n", job.netlist.fqn, e)),
        }
    }
    out.push_str(&format!(
        "\n{} netlist(s): {} succeeded, {} failed\n",
        batch.jobs.len(),
        batch.succeeded(),
        batch.failed()
    ));
    out
}

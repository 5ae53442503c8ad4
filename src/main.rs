//! gcode-clean - drop redundant G1 moves from slicer output.
//!
//! Writes `<name>.clean.<ext>` next to the input. To see why each line went:
//!
//! ```text
//! gcode-clean part.gcode --verbose
//! diff -u part.gcode part.clean.gcode
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gcode_clean::{CleanOptions, CleanReport, load_and_rewrite};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Remove G1 moves that lie on a straight line or span almost nothing
#[derive(Parser, Debug)]
#[command(name = "gcode-clean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// G-code file to clean
    input: PathBuf,

    /// Keep removed lines as comments explaining why they were removed
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&cli) {
        Ok(report) => {
            info!(
                "{} -> {} ({} of {} motion commands removed)",
                cli.input.display(),
                report.output.display(),
                report.stats.removed,
                report.stats.motion_commands
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<CleanReport> {
    let options = CleanOptions { verbose: cli.verbose };
    load_and_rewrite(&cli.input, options)
        .with_context(|| format!("Failed to clean {}", cli.input.display()))
}

// Entry point for the `webp-batch` CLI.
// All pipeline logic lives in the library crate; this file wires up logging,
// argument parsing, backend selection and the process exit code.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use webp_batch_lib::cli::{BackendKind, Cli};
use webp_batch_lib::{RunConfig, RunSummary, run_pipeline, write_report};

/// Every matched file converted, or nothing to do.
const EXIT_OK: u8 = 0;
/// The run finished but at least one file failed.
const EXIT_PARTIAL_FAILURE: u8 = 1;
/// Setup failed before any file was processed.
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let cli = Cli::parse();
    let config = cli.run_config();

    let summary = match run(&cli, &config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let report_written = match &cli.common().report {
        Some(report) => match write_report(&summary, report).await {
            Ok(()) => {
                info!("Report written to {}", report.display());
                true
            }
            Err(e) => {
                error!("Failed to write report {}: {}", report.display(), e);
                false
            }
        },
        None => true,
    };

    ExitCode::from(exit_status(&summary, report_written))
}

/// A requested report that could not be written counts as a failure.
fn exit_status(summary: &RunSummary, report_written: bool) -> u8 {
    if summary.has_failures() || !report_written {
        EXIT_PARTIAL_FAILURE
    } else {
        EXIT_OK
    }
}

async fn run(cli: &Cli, config: &RunConfig) -> anyhow::Result<RunSummary> {
    match cli.common().backend {
        BackendKind::Raster => {
            let backend = Arc::new(webp_batch_lib::RasterBackend::new());
            run_pipeline(config, backend).await.context("batch aborted")
        }
        #[cfg(feature = "libvips")]
        BackendKind::Vips => {
            let backend = Arc::new(webp_batch_lib::VipsBackend::new()?);
            run_pipeline(config, backend).await.context("batch aborted")
        }
        #[cfg(not(feature = "libvips"))]
        BackendKind::Vips => {
            anyhow::bail!("the vips backend is not available; rebuild with `--features libvips`")
        }
    }
}

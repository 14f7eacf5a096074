//! The batch pipeline shared by the `convert` and `thumbnails` subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::core::{RunConfig, RunSummary};
use crate::processing::{BatchExecutor, ImageBackend, list_source_images, plan_tasks};
use crate::utils::{ConvertError, ConvertResult, resolve_directories, validate_config};

/// Runs one full batch: resolve directories, enumerate, dispatch, aggregate.
///
/// Returns `Err` only for setup failures (invalid settings, missing source,
/// destination not creatable). Per-file failures are reported inside the
/// returned [`RunSummary`].
///
/// # Arguments
/// * `config` - Directories, transform profile and worker bound
/// * `backend` - Codec used for every file
pub async fn run_pipeline<B: ImageBackend>(
    config: &RunConfig,
    backend: Arc<B>,
) -> ConvertResult<RunSummary> {
    validate_config(config).inspect_err(|e| error!("{}", e))?;

    let profile = config.profile;
    let start = Instant::now();

    info!("{}", profile.start_banner());
    info!("Reading from: {}", config.source_dir.display());
    info!("Saving to: {}", config.output_dir.display());

    resolve_directories(&config.source_dir, &config.output_dir)
        .await
        .inspect_err(|e| error!("{}", e))?;

    let sources = list_source_images(&config.source_dir)
        .await
        .inspect_err(|e| error!("{}", e))?;

    if sources.is_empty() {
        warn!("No image files found in source folder.");
        return Ok(RunSummary::new(config, Vec::new(), elapsed_ms(start)));
    }

    info!("Found {} images to process.", sources.len());

    let plan = plan_tasks(sources, &config.output_dir);
    let executor = BatchExecutor::new(backend, config.workers);
    let mut outcomes = executor.execute_batch(plan.tasks, profile).await;
    outcomes.extend(plan.rejected);

    let summary = RunSummary::new(config, outcomes, elapsed_ms(start));

    info!("{}", profile.completion_banner());
    if summary.has_failures() {
        warn!(
            "{} of {} images failed ({} succeeded) in {} ms",
            summary.failed, summary.matched, summary.succeeded, summary.elapsed_ms
        );
    } else {
        info!(
            "{} of {} images succeeded in {} ms",
            summary.succeeded, summary.matched, summary.elapsed_ms
        );
    }

    Ok(summary)
}

/// Writes `summary` as pretty-printed JSON to `path`.
pub async fn write_report(summary: &RunSummary, path: &Path) -> ConvertResult<()> {
    let json = serde_json::to_vec_pretty(summary)
        .map_err(|e| ConvertError::IO(format!("Failed to serialise run summary: {e}")))?;
    tokio::fs::write(path, json).await?;
    debug!("Run summary written to {}", path.display());
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

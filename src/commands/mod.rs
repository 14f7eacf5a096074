//! Command handlers for the CLI.
//!
//! - [`run_pipeline`]: Resolve, enumerate, transform and aggregate one batch
//! - [`write_report`]: Persist a [`RunSummary`](crate::core::RunSummary) as JSON

mod pipeline;

pub use pipeline::{run_pipeline, write_report};

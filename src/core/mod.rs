//! Core run types.
//!
//! - [`TransformProfile`]: The image operation applied to every file
//! - [`RunConfig`]: Directories, profile and worker bound for one run
//! - [`FileTask`]: One matched source file and its destination
//! - [`FileOutcome`] / [`RunSummary`]: Per-file and aggregate results

mod types;
mod task;

pub use types::{
    CoverBox, FileOutcome, ProfileKind, RunConfig, RunSummary, TaskStatus, TransformProfile,
    default_workers,
};
pub use task::FileTask;

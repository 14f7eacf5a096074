// Module declarations in dependency order
pub mod cli;
pub mod commands;
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use self::core::{FileOutcome, FileTask, RunConfig, RunSummary, TaskStatus, TransformProfile};
pub use processing::{ImageBackend, RasterBackend};
#[cfg(feature = "libvips")]
pub use processing::VipsBackend;
pub use utils::{ConvertError, ConvertResult};
pub use commands::*;

// The binary entry point lives in main.rs; this file is the library surface
// used by it and by the integration tests.

//! Image processing: enumeration, codec backends and the bounded executor.

mod backend;
mod executor;
mod scan;
pub mod raster;
#[cfg(feature = "libvips")]
pub mod libvips;

pub use backend::{ImageBackend, render};
pub use executor::BatchExecutor;
pub use scan::{BatchPlan, list_source_images, plan_tasks};
pub use raster::RasterBackend;
#[cfg(feature = "libvips")]
pub use self::libvips::VipsBackend;

// src/processing/libvips/mod.rs

//! Native image processing via libvips-rs.
//!
//! Mirrors the raster backend operation for operation, but lets libvips do
//! shrink-on-load, SVG rendering (via librsvg) and WebP encoding. Only built
//! with the `libvips` cargo feature.
//!
//! - [`resize`]: Cover-fit through `ops::thumbnail_image_with_opts`.
//! - [`formats`]: WebP save options through `ops::webpsave_buffer_with_opts`.

mod formats;
mod resize;

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use libvips::VipsImage;

use crate::processing::ImageBackend;
use crate::utils::{ConvertError, ConvertResult};

/// Thread-safe guard for the libvips `VipsApp` lifecycle.
///
/// `VipsApp` initializes the libvips thread pool and global state on creation
/// and shuts it down on drop. Wrapping in Arc ensures exactly one shutdown
/// call when the last reference is released.
struct VipsAppGuard(libvips::VipsApp);

// libvips is designed for concurrent use; individual VipsImage instances must
// not be shared between threads, but concurrent creation on separate threads is safe.
unsafe impl Send for VipsAppGuard {}
unsafe impl Sync for VipsAppGuard {}

/// Backend that keeps libvips initialized for as long as any clone exists.
#[derive(Clone)]
pub struct VipsBackend {
    _vips: Arc<VipsAppGuard>,
}

impl VipsBackend {
    /// Initializes libvips; fails if the shared library cannot start.
    pub fn new() -> ConvertResult<Self> {
        let vips = libvips::VipsApp::default("webp-batch")
            .map_err(|e| ConvertError::worker(format!("Failed to initialize libvips: {e}")))?;
        // 0 = let libvips decide based on available CPU cores
        vips.concurrency_set(0);
        debug!("libvips initialized (concurrency: {})", vips.concurency_get());

        Ok(Self {
            _vips: Arc::new(VipsAppGuard(vips)),
        })
    }
}

impl ImageBackend for VipsBackend {
    type Image = VipsImage;

    fn name(&self) -> &'static str {
        "libvips"
    }

    fn decode(&self, path: &Path) -> ConvertResult<VipsImage> {
        let path_str = path
            .to_str()
            .ok_or_else(|| ConvertError::decode(format!("Path is not valid UTF-8: {}", path.display())))?;

        VipsImage::new_from_file(path_str)
            .map_err(|e| ConvertError::decode(format!("Failed to load '{path_str}': {e}")))
    }

    fn resize_cover(&self, image: VipsImage, width: u32, height: u32) -> ConvertResult<VipsImage> {
        resize::cover(image, width, height)
    }

    fn encode_webp(&self, image: &VipsImage, quality: u8, effort: u8) -> ConvertResult<Vec<u8>> {
        formats::webp_buffer(image, quality, effort)
    }

    fn dimensions(&self, image: &VipsImage) -> (u32, u32) {
        (
            u32::try_from(image.get_width()).unwrap_or(0),
            u32::try_from(image.get_height()).unwrap_or(0),
        )
    }
}

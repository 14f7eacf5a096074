//! Codec capability used by the pipeline.
//!
//! Pixel work (decode, resample, WebP compression) is never done here; a
//! backend wraps an image library and the pipeline only sequences the calls.

use std::path::Path;
use tracing::debug;

use crate::core::TransformProfile;
use crate::utils::{ConvertResult, extract_filename};

/// Decode / cover-resize / WebP-encode capability.
///
/// Implementations must be shareable across blocking worker threads.
/// `Image` itself never crosses threads: each file is decoded, resized and
/// encoded on the same worker.
pub trait ImageBackend: Send + Sync + 'static {
    type Image;

    /// Short name for log output.
    fn name(&self) -> &'static str;

    /// Reads and decodes `path`, sniffing the content rather than trusting the extension.
    fn decode(&self, path: &Path) -> ConvertResult<Self::Image>;

    /// Scales `image` to fill `width`×`height` and crops the overflow around the centre.
    fn resize_cover(&self, image: Self::Image, width: u32, height: u32) -> ConvertResult<Self::Image>;

    /// Encodes `image` as lossy WebP.
    fn encode_webp(&self, image: &Self::Image, quality: u8, effort: u8) -> ConvertResult<Vec<u8>>;

    /// Pixel dimensions, for debug logging.
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);
}

/// Runs one profile against one source file and returns the encoded WebP bytes.
///
/// Blocking; call from a worker thread.
pub fn render<B: ImageBackend>(
    backend: &B,
    source: &Path,
    profile: &TransformProfile,
) -> ConvertResult<Vec<u8>> {
    let image = backend.decode(source)?;
    let (width, height) = backend.dimensions(&image);
    debug!("Loaded '{}': {}×{}", extract_filename(source), width, height);

    let image = match profile.resize {
        Some(cover) => backend.resize_cover(image, cover.width, cover.height)?,
        None => image,
    };

    backend.encode_webp(&image, profile.quality, profile.effort)
}

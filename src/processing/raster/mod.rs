//! Pure-Rust codec backend: `image` for bitmaps, `resvg` for SVG, libwebp for output.

mod decode;
mod encode;

use std::path::Path;
use image::DynamicImage;
use image::imageops::FilterType;

use crate::processing::ImageBackend;
use crate::utils::{ConvertError, ConvertResult};

pub use decode::{decode_file, rasterize_svg};
pub use encode::encode_webp;

/// Default backend; needs no system libraries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RasterBackend {
    type Image = DynamicImage;

    fn name(&self) -> &'static str {
        "raster"
    }

    fn decode(&self, path: &Path) -> ConvertResult<DynamicImage> {
        decode_file(path)
    }

    fn resize_cover(&self, image: DynamicImage, width: u32, height: u32) -> ConvertResult<DynamicImage> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ConvertError::resize("Source image has no pixels"));
        }
        // resize_to_fill scales to cover the box and crops the centre
        Ok(image.resize_to_fill(width, height, FilterType::Lanczos3))
    }

    fn encode_webp(&self, image: &DynamicImage, quality: u8, effort: u8) -> ConvertResult<Vec<u8>> {
        encode_webp(image, quality, effort)
    }

    fn dimensions(&self, image: &DynamicImage) -> (u32, u32) {
        (image.width(), image.height())
    }
}

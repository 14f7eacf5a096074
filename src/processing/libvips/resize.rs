// src/processing/libvips/resize.rs

//! Cover-fit resize mapped onto libvips' thumbnail operation.

use libvips::{ops, VipsImage};
use crate::utils::{ConvertError, ConvertResult};

/// Scales `image` to cover `width`×`height` and crops the centre.
///
/// `Size::Both` allows upscaling so small sources still fill the box.
pub fn cover(image: VipsImage, width: u32, height: u32) -> ConvertResult<VipsImage> {
    use ops::{Interesting, Size, ThumbnailImageOptions};

    let width = i32::try_from(width).map_err(|_| ConvertError::resize("Width is too large"))?;
    let height = i32::try_from(height).map_err(|_| ConvertError::resize("Height is too large"))?;

    let opts = ThumbnailImageOptions {
        height,
        size: Size::Both,
        crop: Interesting::Centre,
        ..ThumbnailImageOptions::default()
    };

    ops::thumbnail_image_with_opts(&image, width, &opts)
        .map_err(|e| ConvertError::resize(format!("Resize (cover) failed: {e}")))
}

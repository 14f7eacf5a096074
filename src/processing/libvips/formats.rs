// src/processing/libvips/formats.rs

//! WebP save options for libvips.

use libvips::ops::{self, ForeignKeep};
use libvips::VipsImage;
use crate::utils::{ConvertError, ConvertResult};

/// Encodes `image` as lossy WebP in memory, stripping metadata.
pub fn webp_buffer(image: &VipsImage, quality: u8, effort: u8) -> ConvertResult<Vec<u8>> {
    let q = i32::from(quality);

    let opts = ops::WebpsaveBufferOptions {
        q,
        lossless: false,
        alpha_q: 100,
        effort: i32::from(effort),
        smart_subsample: false,
        keep: ForeignKeep::None,
        ..ops::WebpsaveBufferOptions::default()
    };

    ops::webpsave_buffer_with_opts(image, &opts)
        .map_err(|e| ConvertError::encode(format!("WebP save failed: {e}")))
}

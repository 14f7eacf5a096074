//! Lossy WebP encoding through libwebp.

use image::DynamicImage;
use libwebp_sys::WebPConfig;
use webp::Encoder;

use crate::utils::{ConvertError, ConvertResult};

/// Encodes `image` as lossy WebP; `effort` maps onto libwebp's `method`.
///
/// Images without an alpha channel are encoded as RGB so no alpha plane is
/// written.
pub fn encode_webp(image: &DynamicImage, quality: u8, effort: u8) -> ConvertResult<Vec<u8>> {
    let mut config = WebPConfig::new()
        .map_err(|_| ConvertError::encode("libwebp rejected the default encoder config"))?;
    config.lossless = 0;
    config.quality = f32::from(quality);
    config.method = i32::from(effort);

    let (width, height) = (image.width(), image.height());
    let memory = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        Encoder::from_rgba(rgba.as_raw(), width, height).encode_advanced(&config)
    } else {
        let rgb = image.to_rgb8();
        Encoder::from_rgb(rgb.as_raw(), width, height).encode_advanced(&config)
    }
    .map_err(|e| ConvertError::encode(format!("WebP encoding failed: {e:?}")))?;

    Ok(memory.to_vec())
}

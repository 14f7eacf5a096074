//! Source decoding: bitmap formats through `image`, SVG through `resvg`.

use std::path::Path;
use std::sync::{Arc, OnceLock};
use image::{DynamicImage, ImageReader, RgbaImage};
use resvg::{tiny_skia, usvg};
use resvg::usvg::fontdb::{Database, Family, Query};
use tracing::debug;

use crate::utils::{ConvertError, ConvertResult, is_svg};

/// Decodes any allow-listed source into a `DynamicImage`.
pub fn decode_file(path: &Path) -> ConvertResult<DynamicImage> {
    if is_svg(path) {
        let data = std::fs::read(path)?;
        return rasterize_svg(&data);
    }

    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| ConvertError::decode(format!("Failed to probe '{}': {e}", path.display())))?;

    reader
        .decode()
        .map_err(|e| ConvertError::decode(format!("Failed to load '{}': {e}", path.display())))
}

/// System fonts for SVG `<text>`, loaded once per process.
struct SvgFonts {
    db: Arc<Database>,
    default_family: Option<String>,
}

fn svg_fonts() -> &'static SvgFonts {
    static FONTS: OnceLock<SvgFonts> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} font faces for SVG text", db.len());

        // fontdb maps the generic families to Windows font names; point any
        // that are missing here at a face that is actually installed
        let fallback = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
        let mut default_family = None;
        if let Some(fallback) = fallback {
            let missing = |db: &Database, family: Family<'_>| {
                db.query(&Query { families: &[family], ..Query::default() }).is_none()
            };
            if missing(&db, Family::SansSerif) {
                db.set_sans_serif_family(fallback.clone());
            }
            if missing(&db, Family::Serif) {
                db.set_serif_family(fallback.clone());
            }
            if missing(&db, Family::Monospace) {
                db.set_monospace_family(fallback.clone());
            }
            let preferred = usvg::Options::default().font_family;
            if missing(&db, Family::Name(&preferred)) {
                default_family = Some(fallback);
            }
        }

        SvgFonts { db: Arc::new(db), default_family }
    })
}

fn svg_options() -> usvg::Options<'static> {
    let fonts = svg_fonts();
    let mut options = usvg::Options {
        fontdb: Arc::clone(&fonts.db),
        ..usvg::Options::default()
    };
    if let Some(family) = &fonts.default_family {
        options.font_family = family.clone();
    }
    options
}

/// Renders SVG markup at its intrinsic size, including `<text>` and
/// embedded raster `<image>` content.
pub fn rasterize_svg(data: &[u8]) -> ConvertResult<DynamicImage> {
    let tree = usvg::Tree::from_data(data, &svg_options())
        .map_err(|e| ConvertError::decode(format!("Failed to parse SVG: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ConvertError::decode(format!(
            "SVG has unusable dimensions {}×{}",
            size.width(),
            size.height()
        )))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| ConvertError::decode("SVG raster buffer has the wrong length"))
}

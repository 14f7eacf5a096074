use std::ffi::OsString;
use std::path::Path;

/// File extensions (lowercase, without the dot) accepted as source images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tiff", "gif", "avif", "svg"];

/// Extension given to every output file.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Get file extension as lowercase string
pub fn get_extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if the path carries one of the allow-listed image extensions.
pub fn is_supported_image(path: impl AsRef<Path>) -> bool {
    get_extension(path)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Returns `true` when the path should be rasterised as vector art.
pub fn is_svg(path: impl AsRef<Path>) -> bool {
    get_extension(path).as_deref() == Some("svg")
}

/// Derives the destination file name: source stem with `.webp` appended.
///
/// `photo.final.JPG` becomes `photo.final.webp`; a dotfile without an
/// extension such as `.png` keeps its whole name as the stem.
pub fn output_file_name(source: impl AsRef<Path>) -> OsString {
    let stem = source
        .as_ref()
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let mut name = stem;
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    name
}

/// Extracts the file name component of a path for log output.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_case_insensitive() {
        for name in ["a.jpg", "b.JPEG", "c.Png", "d.webp", "e.TIFF", "f.gif", "g.avif", "h.svg"] {
            assert!(is_supported_image(name), "{name} should match");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["notes.txt", "archive.tar.gz", "Makefile", "image.bmp", "photo.tif"] {
            assert!(!is_supported_image(name), "{name} should not match");
        }
    }

    #[test]
    fn output_name_replaces_only_last_extension() {
        assert_eq!(output_file_name("a.jpg"), OsString::from("a.webp"));
        assert_eq!(output_file_name("dir/photo.final.PNG"), OsString::from("photo.final.webp"));
        assert_eq!(output_file_name("already.webp"), OsString::from("already.webp"));
    }

    #[test]
    fn svg_detection() {
        assert!(is_svg("logo.SVG"));
        assert!(!is_svg("logo.png"));
    }
}

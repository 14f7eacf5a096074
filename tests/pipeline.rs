use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;
use webp_batch_lib::{
    ConvertError, RasterBackend, RunConfig, TaskStatus, TransformProfile, run_pipeline,
    write_report,
};

fn save_rgb(path: &Path, width: u32, height: u32, format: ImageFormat) {
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]))
        .save_with_format(path, format)
        .unwrap();
}

fn setup(profile: TransformProfile) -> (TempDir, RunConfig) {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let output = temp.path().join(profile.default_output_dir());
    let config = RunConfig::new(profile)
        .with_source_dir(source)
        .with_output_dir(output)
        .with_workers(2);
    (temp, config)
}

fn webp_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn backend() -> Arc<RasterBackend> {
    Arc::new(RasterBackend::new())
}

#[tokio::test]
async fn transcode_converts_images_and_ignores_other_files() {
    let (_temp, config) = setup(TransformProfile::transcode());
    save_rgb(&config.source_dir.join("a.jpg"), 800, 600, ImageFormat::Jpeg);
    save_rgb(&config.source_dir.join("b.png"), 300, 300, ImageFormat::Png);
    std::fs::write(config.source_dir.join("notes.txt"), "hello").unwrap();

    let summary = run_pipeline(&config, backend()).await.unwrap();

    assert_eq!((summary.matched, summary.succeeded, summary.failed), (2, 2, 0));
    assert_eq!(webp_names(&config.output_dir), ["a.webp", "b.webp"]);

    let a = image::open(config.output_dir.join("a.webp")).unwrap();
    assert_eq!(a.dimensions(), (800, 600));
    let b = std::fs::read(config.output_dir.join("b.webp")).unwrap();
    assert_eq!(image::guess_format(&b).unwrap(), ImageFormat::WebP);
}

#[tokio::test]
async fn thumbnails_are_always_500_by_720() {
    let (_temp, config) = setup(TransformProfile::thumbnail());
    save_rgb(&config.source_dir.join("wide.jpg"), 1600, 400, ImageFormat::Jpeg);
    save_rgb(&config.source_dir.join("tall.png"), 120, 900, ImageFormat::Png);
    save_rgb(&config.source_dir.join("tiny.gif"), 10, 10, ImageFormat::Gif);
    RgbaImage::from_pixel(50, 40, Rgba([10, 20, 30, 128]))
        .save_with_format(config.source_dir.join("alpha.webp"), ImageFormat::WebP)
        .unwrap();
    std::fs::write(
        config.source_dir.join("logo.svg"),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64"><circle cx="32" cy="32" r="30" fill="#0a0"/></svg>"##,
    )
    .unwrap();

    let summary = run_pipeline(&config, backend()).await.unwrap();
    assert_eq!(summary.succeeded, 5, "{:#?}", summary.outcomes);

    for name in ["wide", "tall", "tiny", "alpha", "logo"] {
        let thumb = image::open(config.output_dir.join(format!("{name}.webp"))).unwrap();
        assert_eq!(thumb.dimensions(), (500, 720), "{name}");
    }
}

#[tokio::test]
async fn corrupt_file_fails_alone() {
    let (_temp, config) = setup(TransformProfile::transcode());
    std::fs::write(config.source_dir.join("corrupt.png"), b"not really a png").unwrap();
    save_rgb(&config.source_dir.join("good.jpg"), 64, 64, ImageFormat::Jpeg);

    let summary = run_pipeline(&config, backend()).await.unwrap();

    assert_eq!((summary.matched, summary.succeeded, summary.failed), (2, 1, 1));
    assert!(summary.has_failures());
    let corrupt = &summary.outcomes[0];
    assert!(corrupt.source_path.ends_with("corrupt.png"));
    assert_eq!(corrupt.status, TaskStatus::Failed);
    assert!(corrupt.error.as_deref().unwrap().starts_with("Decode error"));

    assert_eq!(webp_names(&config.output_dir), ["good.webp"]);
}

#[tokio::test]
async fn failed_transform_leaves_existing_output_untouched() {
    let (_temp, config) = setup(TransformProfile::transcode());
    std::fs::write(config.source_dir.join("broken.jpg"), b"garbage").unwrap();
    std::fs::create_dir_all(&config.output_dir).unwrap();
    std::fs::write(config.output_dir.join("broken.webp"), b"previous run").unwrap();

    let summary = run_pipeline(&config, backend()).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(std::fs::read(config.output_dir.join("broken.webp")).unwrap(), b"previous run");
}

#[tokio::test]
async fn missing_source_aborts_without_creating_output() {
    let temp = TempDir::new().unwrap();
    let config = RunConfig::new(TransformProfile::transcode())
        .with_source_dir(temp.path().join("nowhere"))
        .with_output_dir(temp.path().join("converted"));

    let err = run_pipeline(&config, backend()).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("nowhere"));
    assert!(!temp.path().join("converted").exists());
}

#[tokio::test]
async fn invalid_settings_abort_before_touching_disk() {
    let (temp, mut config) = setup(TransformProfile::transcode());
    config.profile.quality = 0;

    let err = run_pipeline(&config, backend()).await.unwrap_err();

    assert!(matches!(err, ConvertError::Validation(_)));
    assert!(!temp.path().join("converted").exists());
}

#[tokio::test]
async fn no_matching_files_is_a_quiet_success() {
    let (_temp, config) = setup(TransformProfile::thumbnail());
    std::fs::write(config.source_dir.join("readme.md"), "# nothing").unwrap();
    std::fs::create_dir(config.source_dir.join("album.jpg")).unwrap();

    let summary = run_pipeline(&config, backend()).await.unwrap();

    assert_eq!(summary.matched, 0);
    assert!(!summary.has_failures());
    assert!(webp_names(&config.output_dir).is_empty());
}

#[tokio::test]
async fn base_name_collision_is_reported_not_overwritten() {
    let (_temp, config) = setup(TransformProfile::transcode());
    save_rgb(&config.source_dir.join("a.jpg"), 40, 40, ImageFormat::Jpeg);
    save_rgb(&config.source_dir.join("a.png"), 20, 10, ImageFormat::Png);

    let summary = run_pipeline(&config, backend()).await.unwrap();

    assert_eq!((summary.succeeded, summary.failed), (1, 1));
    let rejected = summary
        .outcomes
        .iter()
        .find(|o| o.source_path.ends_with("a.png"))
        .unwrap();
    assert!(rejected.error.as_deref().unwrap().contains("already claimed by a.jpg"));

    // Output comes from a.jpg (40×40), not a.png
    let output = image::open(config.output_dir.join("a.webp")).unwrap();
    assert_eq!(output.dimensions(), (40, 40));
}

#[tokio::test]
async fn rerun_produces_identical_output() {
    let (_temp, config) = setup(TransformProfile::thumbnail());
    save_rgb(&config.source_dir.join("photo.jpg"), 640, 480, ImageFormat::Jpeg);

    run_pipeline(&config, backend()).await.unwrap();
    let first = std::fs::read(config.output_dir.join("photo.webp")).unwrap();
    run_pipeline(&config, backend()).await.unwrap();
    let second = std::fs::read(config.output_dir.join("photo.webp")).unwrap();

    assert_eq!(first, second);
    assert_eq!(webp_names(&config.output_dir), ["photo.webp"]);
}

#[tokio::test]
async fn report_serialises_the_summary() {
    let (temp, config) = setup(TransformProfile::transcode());
    save_rgb(&config.source_dir.join("x.png"), 8, 8, ImageFormat::Png);
    std::fs::write(config.source_dir.join("y.tiff"), b"nope").unwrap();

    let summary = run_pipeline(&config, backend()).await.unwrap();
    let report: PathBuf = temp.path().join("report.json");
    write_report(&summary, &report).await.unwrap();

    let json: serde_json::Value = serde_json::from_slice(&std::fs::read(&report).unwrap()).unwrap();
    assert_eq!(json["matched"], 2);
    assert_eq!(json["succeeded"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["outcomes"][0]["status"], "succeeded");
    assert_eq!(json["outcomes"][1]["status"], "failed");
}

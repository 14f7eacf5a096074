//! Core types for transform profiles, run configuration and results.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Which of the two pipelines a profile drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Re-encode as WebP without touching dimensions
    Transcode,
    /// Cover-fit into a fixed box, then encode as WebP
    Thumbnail,
}

/// Target box for cover-fit resizing, cropped around the centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverBox {
    pub width: u32,
    pub height: u32,
}

/// One image operation applied to every matched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformProfile {
    pub kind: ProfileKind,
    /// Cover-fit box; `None` keeps the source dimensions
    pub resize: Option<CoverBox>,
    /// Lossy WebP quality (1-100)
    pub quality: u8,
    /// Compression effort (0 = fastest, 6 = smallest output)
    pub effort: u8,
}

impl TransformProfile {
    pub const TRANSCODE_QUALITY: u8 = 90;
    pub const TRANSCODE_EFFORT: u8 = 6;
    pub const THUMBNAIL_WIDTH: u32 = 500;
    pub const THUMBNAIL_HEIGHT: u32 = 720;
    pub const THUMBNAIL_QUALITY: u8 = 80;
    /// Encoder default effort
    pub const THUMBNAIL_EFFORT: u8 = 4;

    /// Plain WebP re-encode at maximum effort.
    pub fn transcode() -> Self {
        Self {
            kind: ProfileKind::Transcode,
            resize: None,
            quality: Self::TRANSCODE_QUALITY,
            effort: Self::TRANSCODE_EFFORT,
        }
    }

    /// 500×720 centre-cropped thumbnail.
    pub fn thumbnail() -> Self {
        Self {
            kind: ProfileKind::Thumbnail,
            resize: Some(CoverBox {
                width: Self::THUMBNAIL_WIDTH,
                height: Self::THUMBNAIL_HEIGHT,
            }),
            quality: Self::THUMBNAIL_QUALITY,
            effort: Self::THUMBNAIL_EFFORT,
        }
    }

    /// Directory (relative to the working directory) the pipeline writes to by default.
    pub fn default_output_dir(&self) -> &'static str {
        match self.kind {
            ProfileKind::Transcode => "converted",
            ProfileKind::Thumbnail => "result",
        }
    }

    pub fn start_banner(&self) -> &'static str {
        match self.kind {
            ProfileKind::Transcode => "Starting image conversion to WebP...",
            ProfileKind::Thumbnail => "Starting thumbnail generation...",
        }
    }

    pub fn completion_banner(&self) -> &'static str {
        match self.kind {
            ProfileKind::Transcode => "All conversions completed!",
            ProfileKind::Thumbnail => "All operations completed!",
        }
    }

    /// Verb used on per-file success lines.
    pub fn success_verb(&self) -> &'static str {
        match self.kind {
            ProfileKind::Transcode => "Converted",
            ProfileKind::Thumbnail => "Processed",
        }
    }
}

/// Settings for one run; fixed at startup.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Directory scanned (non-recursively) for source images
    pub source_dir: PathBuf,
    /// Directory receiving the `.webp` files
    pub output_dir: PathBuf,
    pub profile: TransformProfile,
    /// Upper bound on transforms in flight
    pub workers: usize,
}

const DEFAULT_WORKERS: usize = 4;

impl RunConfig {
    /// `./source` → profile default directory, one worker per core.
    pub fn new(profile: TransformProfile) -> Self {
        Self {
            source_dir: PathBuf::from("source"),
            output_dir: PathBuf::from(profile.default_output_dir()),
            profile,
            workers: default_workers(),
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Number of workers used when none is requested.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_WORKERS)
}

/// Terminal state of a file task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Succeeded,
    Failed,
}

/// Result of transforming one source file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub status: TaskStatus,
    /// Error message if the transform failed
    pub error: Option<String>,
    /// Size of the written WebP in bytes
    pub output_size: Option<u64>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

/// Aggregate of a completed run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub profile: ProfileKind,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Files whose extension is on the allow-list
    pub matched: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    /// One entry per matched file, ordered by source name
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn new(config: &RunConfig, mut outcomes: Vec<FileOutcome>, elapsed_ms: u64) -> Self {
        outcomes.sort_by(|a, b| a.source_path.cmp(&b.source_path));
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            profile: config.profile.kind,
            source_dir: config.source_dir.clone(),
            output_dir: config.output_dir.clone(),
            matched: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            elapsed_ms,
            outcomes,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_carry_fixed_parameters() {
        let transcode = TransformProfile::transcode();
        assert_eq!(transcode.resize, None);
        assert_eq!((transcode.quality, transcode.effort), (90, 6));
        assert_eq!(transcode.default_output_dir(), "converted");

        let thumbnail = TransformProfile::thumbnail();
        assert_eq!(thumbnail.resize, Some(CoverBox { width: 500, height: 720 }));
        assert_eq!(thumbnail.quality, 80);
        assert_eq!(thumbnail.default_output_dir(), "result");
    }

    #[test]
    fn run_config_defaults() {
        let config = RunConfig::new(TransformProfile::thumbnail());
        assert_eq!(config.source_dir, PathBuf::from("source"));
        assert_eq!(config.output_dir, PathBuf::from("result"));
        assert!(config.workers >= 1);
    }

    #[test]
    fn summary_counts_and_orders_outcomes() {
        let config = RunConfig::new(TransformProfile::transcode());
        let outcome = |name: &str, status| FileOutcome {
            source_path: PathBuf::from(name),
            output_path: PathBuf::from("out.webp"),
            status,
            error: None,
            output_size: None,
        };
        let summary = RunSummary::new(
            &config,
            vec![outcome("b.png", TaskStatus::Failed), outcome("a.jpg", TaskStatus::Succeeded)],
            12,
        );

        assert_eq!((summary.matched, summary.succeeded, summary.failed), (2, 1, 1));
        assert!(summary.has_failures());
        assert_eq!(summary.outcomes[0].source_path, PathBuf::from("a.jpg"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["profile"], "transcode");
        assert_eq!(json["outcomes"][1]["status"], "failed");
    }
}

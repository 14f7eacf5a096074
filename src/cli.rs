use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::{CoverBox, ProfileKind, RunConfig, TransformProfile, default_workers};

/// Batch-convert a directory of images to WebP
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Re-encode every image in the source directory as WebP
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        common: CommonArgs,

        /// WebP quality (1-100)
        #[arg(short, long, default_value_t = TransformProfile::TRANSCODE_QUALITY)]
        quality: u8,

        /// Compression effort (0-6)
        #[arg(short, long, default_value_t = TransformProfile::TRANSCODE_EFFORT)]
        effort: u8,
    },

    /// Cover-crop every image to a fixed box and encode it as WebP
    #[command(visible_alias = "t")]
    Thumbnails {
        #[command(flatten)]
        common: CommonArgs,

        /// Thumbnail width in pixels
        #[arg(long, default_value_t = TransformProfile::THUMBNAIL_WIDTH)]
        width: u32,

        /// Thumbnail height in pixels
        #[arg(long, default_value_t = TransformProfile::THUMBNAIL_HEIGHT)]
        height: u32,

        /// WebP quality (1-100)
        #[arg(short, long, default_value_t = TransformProfile::THUMBNAIL_QUALITY)]
        quality: u8,

        /// Compression effort (0-6)
        #[arg(short, long, default_value_t = TransformProfile::THUMBNAIL_EFFORT)]
        effort: u8,
    },
}

/// Options shared by both pipelines.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory to read images from
    #[arg(short, long, default_value = "source", value_hint = clap::ValueHint::DirPath)]
    pub source: PathBuf,

    /// Directory to write WebP files to [default: converted | result]
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Maximum images processed at once [default: number of CPUs]
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Write a JSON run summary to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,

    /// Codec backend
    #[arg(long, value_enum, default_value_t = BackendKind::Raster)]
    pub backend: BackendKind,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// image + resvg + libwebp, no system libraries
    Raster,
    /// libvips (requires the `libvips` build feature)
    Vips,
}

impl Cli {
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Commands::Convert { common, .. } | Commands::Thumbnails { common, .. } => common,
        }
    }

    pub fn profile(&self) -> TransformProfile {
        match self.command {
            Commands::Convert { quality, effort, .. } => TransformProfile {
                kind: ProfileKind::Transcode,
                resize: None,
                quality,
                effort,
            },
            Commands::Thumbnails { width, height, quality, effort, .. } => TransformProfile {
                kind: ProfileKind::Thumbnail,
                resize: Some(CoverBox { width, height }),
                quality,
                effort,
            },
        }
    }

    /// Builds the run configuration, filling unset options with profile defaults.
    pub fn run_config(&self) -> RunConfig {
        let profile = self.profile();
        let common = self.common();
        let mut config = RunConfig::new(profile)
            .with_source_dir(common.source.clone())
            .with_workers(common.workers.unwrap_or_else(default_workers));
        if let Some(output) = &common.output {
            config = config.with_output_dir(output.clone());
        }
        config
    }
}

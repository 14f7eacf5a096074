//! File task definition and outcome construction.

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::core::{FileOutcome, TaskStatus};
use crate::utils::{ConvertError, extract_filename, output_file_name};

/// One matched source file and the `.webp` path it will be written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTask {
    /// Path to the source image file
    pub source_path: PathBuf,
    /// Path where the WebP output will be written
    pub output_path: PathBuf,
}

impl FileTask {
    /// Derives the output path from the source stem inside `output_dir`.
    pub fn new(source_path: PathBuf, output_dir: &Path) -> Self {
        let output_path = output_dir.join(output_file_name(&source_path));
        Self {
            source_path,
            output_path,
        }
    }

    pub fn source_name(&self) -> String {
        extract_filename(&self.source_path)
    }

    pub fn output_name(&self) -> String {
        extract_filename(&self.output_path)
    }

    pub fn succeeded(&self, output_size: u64) -> FileOutcome {
        FileOutcome {
            source_path: self.source_path.clone(),
            output_path: self.output_path.clone(),
            status: TaskStatus::Succeeded,
            error: None,
            output_size: Some(output_size),
        }
    }

    pub fn failed(&self, error: &ConvertError) -> FileOutcome {
        FileOutcome {
            source_path: self.source_path.clone(),
            output_path: self.output_path.clone(),
            status: TaskStatus::Failed,
            error: Some(error.to_string()),
            output_size: None,
        }
    }
}

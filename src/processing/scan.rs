//! Source directory enumeration and task planning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::core::{FileOutcome, FileTask};
use crate::utils::{ConvertError, ConvertResult, PathError, is_supported_image, output_file_name};

/// Lists the direct children of `source_dir` that are regular files with an
/// allow-listed extension, sorted by file name.
pub async fn list_source_images(source_dir: &Path) -> ConvertResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(source_dir)
        .await
        .map_err(|e| PathError::io(source_dir, e))?;

    let mut images = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PathError::io(source_dir, e))?
    {
        let path = entry.path();
        if !is_supported_image(&path) {
            continue;
        }
        // metadata() follows symlinks; a directory named `x.png` is skipped
        match fs::metadata(&path).await {
            Ok(m) if m.is_file() => images.push(path),
            Ok(_) => debug!("Skipping non-file entry: {}", path.display()),
            Err(e) => warn!("Skipping unreadable entry {}: {}", path.display(), e),
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Tasks to run plus sources rejected before any work was attempted.
#[derive(Debug, Default)]
pub struct BatchPlan {
    pub tasks: Vec<FileTask>,
    pub rejected: Vec<FileOutcome>,
}

/// Builds one task per source, rejecting later sources whose output name is
/// already claimed by an earlier one (`a.jpg` and `a.png` both want `a.webp`).
///
/// Names are compared case-insensitively since `A.webp` and `a.webp` are the
/// same file on macOS and Windows.
pub fn plan_tasks(sources: Vec<PathBuf>, output_dir: &Path) -> BatchPlan {
    let mut claimed: HashMap<String, String> = HashMap::new();
    let mut plan = BatchPlan::default();

    for source in sources {
        let task = FileTask::new(source, output_dir);
        let key = output_file_name(&task.source_path)
            .to_string_lossy()
            .to_lowercase();

        if let Some(owner) = claimed.get(&key) {
            let err = ConvertError::Collision {
                destination: task.output_name(),
                claimed_by: owner.clone(),
            };
            warn!("Skipping {}: {}", task.source_name(), err);
            plan.rejected.push(task.failed(&err));
            continue;
        }

        claimed.insert(key, task.source_name());
        plan.tasks.push(task);
    }

    plan
}

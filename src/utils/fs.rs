use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use crate::utils::{PathError, ValidationError, ConvertResult};

/// Checks that `source` is an existing directory and makes sure `destination`
/// exists, creating missing parents.
///
/// The source is checked first so a missing source never leaves an empty
/// destination directory behind.
pub async fn resolve_directories(source: &Path, destination: &Path) -> ConvertResult<()> {
    validate_source_dir(source).await?;
    create_dir_all(destination).await?;
    Ok(())
}

/// Fails unless `path` exists and is a readable directory.
pub async fn validate_source_dir(path: &Path) -> ConvertResult<()> {
    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::source_not_found(path).into());
        }
        Err(e) => return Err(PathError::io(path, e).into()),
    };

    if !metadata.is_dir() {
        return Err(ValidationError::not_a_directory(path).into());
    }

    // Opening the listing is the readability check
    let _listing = fs::read_dir(path).await.map_err(|e| PathError::io(path, e))?;
    Ok(())
}

/// Creates `path` and all missing parents; a no-op if it already exists.
pub async fn create_dir_all(path: &Path) -> ConvertResult<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| PathError::io(path, e))?;
    debug!("Destination directory ready: {}", path.display());
    Ok(())
}

/// Writes `bytes` to `destination` via a sibling `.part` file and a rename.
///
/// A failed write leaves any existing destination untouched.
pub async fn write_atomic(destination: &Path, bytes: &[u8]) -> ConvertResult<()> {
    let staging = staging_path(destination);
    if let Err(e) = fs::write(&staging, bytes).await {
        let _ = fs::remove_file(&staging).await;
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&staging, destination).await {
        let _ = fs::remove_file(&staging).await;
        return Err(e.into());
    }
    Ok(())
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

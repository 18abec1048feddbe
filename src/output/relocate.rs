//! Moving HyPhy's JSON result to its final location.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Move `from` to `to`, returning the final path.
///
/// If `to` is an existing directory the file keeps its name inside it.
/// Missing parent directories are created. When a plain rename fails
/// (e.g. across filesystems) the file is copied and the original removed.
///
/// # Errors
///
/// Returns [`Error::ArtifactMissing`] if `from` does not exist, or
/// [`Error::ArtifactMove`] if the move fails.
pub fn move_artifact(from: &Path, to: &Path) -> Result<PathBuf> {
    if !from.is_file() {
        return Err(Error::ArtifactMissing {
            path: from.to_path_buf(),
        });
    }

    let move_error = |source| Error::ArtifactMove {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let dest = match from.file_name() {
        Some(name) if to.is_dir() => to.join(name),
        _ => to.to_path_buf(),
    };

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(move_error)?;
    }

    if let Err(e) = std::fs::rename(from, &dest) {
        debug!("Rename failed ({e}), falling back to copy");
        std::fs::copy(from, &dest).map_err(move_error)?;
        std::fs::remove_file(from).map_err(move_error)?;
    }

    debug!("Moved {} to {}", from.display(), dest.display());
    Ok(dest)
}

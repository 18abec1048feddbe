//! Executable search on the `PATH`.
//!
//! HyPhy installs a handful of binaries (`HYPHYMP`, `HYPHYMPI`, `hyphy`).
//! A bare executable name is resolved the way a shell would, by scanning
//! the `PATH` directories in order; a name with a directory component is
//! checked as-is.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the executable search paths from the `PATH` environment variable.
///
/// Empty entries are skipped. Returns an empty vector when `PATH` is unset.
pub fn get_executable_search_paths() -> Vec<PathBuf> {
    match std::env::var_os("PATH") {
        Some(path_env) => std::env::split_paths(&path_env)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => {
            debug!("PATH environment variable not set");
            Vec::new()
        }
    }
}

/// Find an executable by bare name in the given directories.
///
/// On Windows the platform executable suffix (`.exe`) is also tried.
///
/// # Returns
///
/// The first matching executable file, or `None`.
pub fn find_executable(paths: &[PathBuf], name: &str) -> Option<PathBuf> {
    let candidates = candidate_names(name);

    for path in paths {
        // Skip invalid paths (non-existent directories from env vars)
        if !path.is_dir() {
            debug!("Skipping non-directory search path: {}", path.display());
            continue;
        }

        for candidate in &candidates {
            let exe_path = path.join(candidate);
            if is_executable_file(&exe_path) {
                debug!("Found executable: {}", exe_path.display());
                return Some(exe_path);
            }
        }
    }
    None
}

/// Resolve an executable to an absolute path.
///
/// A value containing a directory component must point at an existing
/// executable file. A bare name is looked up in `search_paths`.
///
/// # Errors
///
/// Returns [`Error::ExecutableNotFound`] if nothing matches.
pub fn resolve_executable(executable: &Path, search_paths: &[PathBuf]) -> Result<PathBuf> {
    let not_found = || Error::ExecutableNotFound {
        name: executable.display().to_string(),
    };

    if has_directory_component(executable) {
        if !is_executable_file(executable) {
            return Err(not_found());
        }
        return std::path::absolute(executable).map_err(Error::from);
    }

    let name = executable.to_str().ok_or_else(not_found)?;
    let found = find_executable(search_paths, name).ok_or_else(not_found)?;
    std::path::absolute(found).map_err(Error::from)
}

fn has_directory_component(path: &Path) -> bool {
    path.is_absolute() || path.components().count() > 1
}

fn candidate_names(name: &str) -> Vec<String> {
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() || name.ends_with(suffix) {
        vec![name.to_string()]
    } else {
        vec![name.to_string(), format!("{name}{suffix}")]
    }
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

//! Validated HyPhy installation.

use super::locate::{get_executable_search_paths, resolve_executable};
use crate::constants::{DEFAULT_EXECUTABLE, DEFAULT_LIBPATH, layout};
use crate::error::{Error, Result};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tracing::debug;

/// A located HyPhy executable and its library path.
///
/// Built through [`HyPhyBuilder`], which checks that every path exists.
/// Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyPhy {
    executable: PathBuf,
    libpath: PathBuf,
    cpu: Option<u32>,
    quiet: bool,
}

impl HyPhy {
    /// Start configuring a HyPhy installation.
    pub fn builder() -> HyPhyBuilder {
        HyPhyBuilder::default()
    }

    /// Locate the canonical installation (`HYPHYMP` on the `PATH`).
    ///
    /// # Errors
    ///
    /// Returns an error if the executable cannot be found.
    pub fn locate() -> Result<Self> {
        Self::builder().build()
    }

    /// Absolute path to the executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// HyPhy resource/library directory.
    pub fn libpath(&self) -> &Path {
        &self.libpath
    }

    /// Maximum number of CPUs per analysis, if capped.
    pub const fn cpu(&self) -> Option<u32> {
        self.cpu
    }

    /// Whether HyPhy's screen output is suppressed.
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    /// Directory holding batch files, relative to the library path.
    pub fn batch_dir(&self, relative: &str) -> PathBuf {
        self.libpath.join(relative)
    }

    /// Arguments placed between the executable and the batch file.
    ///
    /// `LIBPATH=<dir>/` always, followed by `CPU=<n>` when capped.
    pub fn invocation_args(&self) -> Vec<String> {
        let mut args = vec![format!(
            "LIBPATH={}",
            with_trailing_separator(&self.libpath)
        )];
        if let Some(cpu) = self.cpu {
            args.push(format!("CPU={cpu}"));
        }
        args
    }
}

/// Builder for [`HyPhy`].
#[derive(Debug, Clone)]
pub struct HyPhyBuilder {
    executable: String,
    build_path: Option<PathBuf>,
    install_path: Option<PathBuf>,
    cpu: Option<u32>,
    quiet: bool,
    search_paths: Option<Vec<PathBuf>>,
}

impl Default for HyPhyBuilder {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            build_path: None,
            install_path: None,
            cpu: None,
            quiet: false,
            search_paths: None,
        }
    }
}

impl HyPhyBuilder {
    /// Executable name (e.g. `HYPHYMPI`) or path.
    #[must_use]
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Use a local build directory where `make install` was not run.
    #[must_use]
    pub fn build_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_path = Some(path.into());
        self
    }

    /// Use an install prefix other than `/usr/local`.
    #[must_use]
    pub fn install_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_path = Some(path.into());
        self
    }

    /// Cap the number of CPUs HyPhy may use.
    #[must_use]
    pub const fn cpu(mut self, cpu: Option<u32>) -> Self {
        self.cpu = cpu;
        self
    }

    /// Suppress HyPhy's screen output.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Directories to search for a bare executable name instead of `PATH`.
    #[must_use]
    pub fn search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Validate paths and resolve the executable.
    ///
    /// A build path takes precedence over an install path.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing path if the build or install
    /// directory is incomplete, if the executable cannot be resolved, or if
    /// the CPU cap is zero.
    pub fn build(self) -> Result<HyPhy> {
        if self.cpu == Some(0) {
            return Err(Error::OutOfRange {
                name: "cpu",
                value: "0".to_string(),
                min: "1".to_string(),
                max: u32::MAX.to_string(),
            });
        }

        let (executable, libpath) = if let Some(build_path) = &self.build_path {
            if !build_path.exists() {
                return Err(Error::BuildPathNotFound {
                    path: build_path.clone(),
                });
            }
            let build_path = std::path::absolute(build_path)?;
            let libpath = build_path.join(layout::BUILD_LIBDIR);
            if !libpath.is_dir() {
                return Err(Error::InvalidBuildPath { libpath });
            }
            (build_path.join(&self.executable), libpath)
        } else if let Some(install_path) = &self.install_path {
            if !install_path.exists() {
                return Err(Error::InstallPathNotFound {
                    path: install_path.clone(),
                });
            }
            let install_path = std::path::absolute(install_path)?;
            let libpath = install_path.join(layout::INSTALL_LIBDIR);
            if !libpath.is_dir() {
                return Err(Error::InvalidInstallPath { libpath });
            }
            (
                install_path
                    .join(layout::INSTALL_BINDIR)
                    .join(&self.executable),
                libpath,
            )
        } else {
            (
                PathBuf::from(&self.executable),
                PathBuf::from(DEFAULT_LIBPATH),
            )
        };

        let search_paths = self
            .search_paths
            .unwrap_or_else(get_executable_search_paths);
        let executable = resolve_executable(&executable, &search_paths)?;

        debug!(
            "Using HyPhy executable {} with LIBPATH {}",
            executable.display(),
            libpath.display()
        );

        Ok(HyPhy {
            executable,
            libpath,
            cpu: self.cpu,
            quiet: self.quiet,
        })
    }
}

/// HyPhy concatenates `LIBPATH` with relative batch file paths, so the
/// directory must end in a separator.
fn with_trailing_separator(path: &Path) -> String {
    let mut rendered = path.display().to_string();
    if !rendered.ends_with(MAIN_SEPARATOR) {
        rendered.push(MAIN_SEPARATOR);
    }
    rendered
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn make_executable(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[test]
    fn test_build_path_layout() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("res")).unwrap();
        make_executable(&dir.path().join("HYPHYMP"));

        let hyphy = HyPhy::builder().build_path(dir.path()).build().unwrap();
        assert_eq!(hyphy.executable(), dir.path().join("HYPHYMP"));
        assert_eq!(hyphy.libpath(), dir.path().join("res"));
    }

    #[test]
    fn test_build_path_missing() {
        let result = HyPhy::builder()
            .build_path("/nonexistent/hyphy/build")
            .build();
        assert!(matches!(result, Err(Error::BuildPathNotFound { .. })));
    }

    #[test]
    fn test_build_path_without_res_dir() {
        let dir = tempdir().unwrap();
        make_executable(&dir.path().join("HYPHYMP"));

        let result = HyPhy::builder().build_path(dir.path()).build();
        assert!(matches!(result, Err(Error::InvalidBuildPath { .. })));
    }

    #[test]
    fn test_install_path_layout() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lib/hyphy")).unwrap();
        make_executable(&dir.path().join("bin/HYPHYMPI"));

        let hyphy = HyPhy::builder()
            .executable("HYPHYMPI")
            .install_path(dir.path())
            .build()
            .unwrap();
        assert_eq!(hyphy.executable(), dir.path().join("bin/HYPHYMPI"));
        assert_eq!(hyphy.libpath(), dir.path().join("lib/hyphy"));
    }

    #[test]
    fn test_install_path_without_lib_dir() {
        let dir = tempdir().unwrap();
        make_executable(&dir.path().join("bin/HYPHYMP"));

        let result = HyPhy::builder().install_path(dir.path()).build();
        assert!(matches!(result, Err(Error::InvalidInstallPath { .. })));
    }

    #[test]
    fn test_build_path_wins_over_install_path() {
        let build = tempdir().unwrap();
        fs::create_dir(build.path().join("res")).unwrap();
        make_executable(&build.path().join("HYPHYMP"));

        let hyphy = HyPhy::builder()
            .build_path(build.path())
            .install_path("/nonexistent/prefix")
            .build()
            .unwrap();
        assert_eq!(hyphy.libpath(), build.path().join("res"));
    }

    #[test]
    fn test_default_install_searches_path() {
        let dir = tempdir().unwrap();
        make_executable(&dir.path().join("HYPHYMP"));

        let hyphy = HyPhy::builder()
            .search_paths(vec![dir.path().to_path_buf()])
            .build()
            .unwrap();
        assert_eq!(hyphy.executable(), dir.path().join("HYPHYMP"));
        assert_eq!(hyphy.libpath(), Path::new(DEFAULT_LIBPATH));
    }

    #[test]
    fn test_default_install_not_found() {
        let dir = tempdir().unwrap();
        let result = HyPhy::builder()
            .search_paths(vec![dir.path().to_path_buf()])
            .build();
        assert!(matches!(result, Err(Error::ExecutableNotFound { .. })));
    }

    #[test]
    fn test_invocation_args_with_cpu() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("res")).unwrap();
        make_executable(&dir.path().join("HYPHYMP"));

        let hyphy = HyPhy::builder()
            .build_path(dir.path())
            .cpu(Some(4))
            .build()
            .unwrap();
        let args = hyphy.invocation_args();
        assert_eq!(args.len(), 2);
        assert!(args[0].starts_with("LIBPATH="));
        assert!(args[0].ends_with(MAIN_SEPARATOR));
        assert_eq!(args[1], "CPU=4");
    }

    #[test]
    fn test_zero_cpu_rejected() {
        let result = HyPhy::builder().cpu(Some(0)).build();
        assert!(matches!(result, Err(Error::OutOfRange { name: "cpu", .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_trailing_separator_not_doubled() {
        let rendered = with_trailing_separator(Path::new(DEFAULT_LIBPATH));
        assert_eq!(rendered, DEFAULT_LIBPATH);
    }
}

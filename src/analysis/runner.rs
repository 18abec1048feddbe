//! Launching HyPhy and collecting its JSON result.

use super::{Analysis, AnalysisCommand, Method};
use crate::error::{Error, Result};
use crate::hyphy::HyPhy;
use crate::output::{move_artifact, progress};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a run or dry run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Method that was run.
    pub method: Method,
    /// Shell-quoted command line.
    pub command: String,
    /// Where the JSON result is (or would be) after the run.
    pub output_file: PathBuf,
    /// Whether HyPhy was actually launched.
    pub dry_run: bool,
    /// Wall-clock run time, absent for dry runs.
    pub elapsed: Option<Duration>,
}

/// Runs analyses against one HyPhy installation.
#[derive(Debug, Clone)]
pub struct Runner<'a> {
    hyphy: &'a HyPhy,
    show_progress: bool,
}

impl<'a> Runner<'a> {
    /// Create a runner. The spinner is shown by default while a quiet
    /// run is in progress.
    pub const fn new(hyphy: &'a HyPhy) -> Self {
        Self {
            hyphy,
            show_progress: true,
        }
    }

    /// Enable or disable the progress spinner.
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Build the command `analysis` would run, without launching HyPhy.
    pub fn plan(&self, analysis: &dyn Analysis) -> RunSummary {
        let command = analysis.build_command(self.hyphy);
        RunSummary {
            method: analysis.method(),
            command: command.display_with(self.hyphy),
            output_file: final_location(analysis),
            dry_run: true,
            elapsed: None,
        }
    }

    /// Run `analysis` to completion and move its JSON result into place.
    ///
    /// HyPhy's output streams are inherited unless the installation is
    /// quiet, in which case they are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HyphyLaunch`] if the process cannot be started,
    /// [`Error::HyphyFailed`] on a non-zero exit (nothing is moved), and
    /// [`Error::ArtifactMissing`] if HyPhy exited cleanly without writing
    /// its result.
    pub fn run(&self, analysis: &dyn Analysis) -> Result<RunSummary> {
        let method = analysis.method();
        let command = analysis.build_command(self.hyphy);
        let rendered = command.display_with(self.hyphy);
        info!("Running {method}");
        debug!("Command: {rendered}");

        let start = Instant::now();
        self.execute(method, &command)?;
        let elapsed = start.elapsed();

        let default_path = analysis.default_json_path();
        let output_file = match analysis.output() {
            Some(dest) => move_artifact(&default_path, dest)?,
            None if default_path.is_file() => default_path,
            None => return Err(Error::ArtifactMissing { path: default_path }),
        };

        info!(
            "{method} finished in {:.1}s, results in {}",
            elapsed.as_secs_f64(),
            output_file.display()
        );

        Ok(RunSummary {
            method,
            command: rendered,
            output_file,
            dry_run: false,
            elapsed: Some(elapsed),
        })
    }

    fn execute(&self, method: Method, command: &AnalysisCommand) -> Result<()> {
        let mut process = Command::new(self.hyphy.executable());
        process.args(command.argv(self.hyphy));
        if self.hyphy.quiet() {
            process.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let spinner = progress::create_run_spinner(
            &method.to_string(),
            self.show_progress && self.hyphy.quiet(),
        );

        let status = process.status();
        progress::finish_spinner(spinner, &format!("{method} done"));

        let status = status.map_err(|source| Error::HyphyLaunch {
            executable: self.hyphy.executable().to_path_buf(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::HyphyFailed {
                status: status.to_string(),
            })
        }
    }
}

fn final_location(analysis: &dyn Analysis) -> PathBuf {
    let default_path = analysis.default_json_path();
    match analysis.output() {
        Some(dest) if dest.is_dir() => match default_path.file_name() {
            Some(name) => dest.join(name),
            None => dest.to_path_buf(),
        },
        Some(dest) => dest.to_path_buf(),
        None => default_path,
    }
}

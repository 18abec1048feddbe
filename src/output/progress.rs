//! Spinner shown while a silenced HyPhy run is in progress.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for a running analysis.
///
/// Returns `None` when disabled. indicatif hides the spinner itself when
/// stderr is not a terminal.
pub fn create_run_spinner(label: &str, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Running {label}"));
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Finish a spinner with a message.
pub fn finish_spinner(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

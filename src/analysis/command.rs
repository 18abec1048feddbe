//! Positional command lines for HyPhy batch files.

use crate::hyphy::HyPhy;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The batch file plus its positional answers, in order.
///
/// Built once per run by an [`Analysis`](super::Analysis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCommand {
    batch_file: PathBuf,
    arguments: Vec<String>,
}

impl AnalysisCommand {
    /// Create a command for `batch_file` with positional `arguments`.
    pub fn new(batch_file: PathBuf, arguments: Vec<String>) -> Self {
        Self {
            batch_file,
            arguments,
        }
    }

    /// Batch file HyPhy executes.
    pub fn batch_file(&self) -> &Path {
        &self.batch_file
    }

    /// Positional arguments following the batch file.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Batch file followed by the positional arguments.
    pub fn tokens(&self) -> Vec<String> {
        std::iter::once(self.batch_file.display().to_string())
            .chain(self.arguments.iter().cloned())
            .collect()
    }

    /// Everything after the executable: `LIBPATH=`, `CPU=`, batch file,
    /// positional arguments.
    pub fn argv(&self, hyphy: &HyPhy) -> Vec<OsString> {
        hyphy
            .invocation_args()
            .into_iter()
            .map(OsString::from)
            .chain(std::iter::once(self.batch_file.clone().into_os_string()))
            .chain(self.arguments.iter().map(OsString::from))
            .collect()
    }

    /// Shell-quoted rendering of the full invocation, for logs and dry runs.
    pub fn display_with(&self, hyphy: &HyPhy) -> String {
        std::iter::once(hyphy.executable().display().to_string())
            .chain(hyphy.invocation_args())
            .chain(self.tokens())
            .map(|token| shell_quote(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote a token for POSIX shells when it contains anything unsafe.
fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

//! Error types for hyphy-run.

use std::path::PathBuf;

/// Result type alias for hyphy-run operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for hyphy-run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// HyPhy executable could not be resolved.
    #[error(
        "HyPhy executable '{name}' not found; ensure it is installed or in your provided path"
    )]
    ExecutableNotFound {
        /// Executable name or path that was searched for.
        name: String,
    },

    /// Local build directory does not exist.
    #[error("build path does not exist: {path}")]
    BuildPathNotFound {
        /// Path to the build directory.
        path: PathBuf,
    },

    /// Local build directory has no `res/` library directory.
    #[error("build path does not contain a correctly built HyPhy (missing '{libpath}')")]
    InvalidBuildPath {
        /// Expected library path.
        libpath: PathBuf,
    },

    /// Install prefix does not exist.
    #[error("install path does not exist: {path}")]
    InstallPathNotFound {
        /// Path to the install prefix.
        path: PathBuf,
    },

    /// Install prefix has no `lib/hyphy/` library directory.
    #[error("install path does not contain a correctly installed HyPhy (missing '{libpath}')")]
    InvalidInstallPath {
        /// Expected library path.
        libpath: PathBuf,
    },

    /// Alignment file does not exist.
    #[error("alignment file not found: {path}")]
    AlignmentNotFound {
        /// Path to the missing alignment.
        path: PathBuf,
    },

    /// Tree file does not exist.
    #[error("tree file not found: {path}")]
    TreeNotFound {
        /// Path to the missing tree file.
        path: PathBuf,
    },

    /// Alignment given without a tree.
    #[error("a tree must be provided together with the alignment")]
    TreeRequired,

    /// Combined data file does not exist.
    #[error("data file not found: {path}")]
    DataNotFound {
        /// Path to the missing data file.
        path: PathBuf,
    },

    /// Neither or both input modes were supplied.
    #[error("invalid input: {message}")]
    InvalidInputMode {
        /// Description of the problem.
        message: String,
    },

    /// No usable tree could be extracted.
    #[error("malformed tree in input data '{path}'")]
    MalformedTree {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// Genetic code name or number not in the table.
    #[error("invalid genetic code '{value}' (use a name or a number between 1 and 19)")]
    InvalidGeneticCode {
        /// The rejected value.
        value: String,
    },

    /// Branch selection is neither a shared keyword nor a tree label.
    #[error("bad branch selection '{value}'; must be one of: {allowed}")]
    InvalidBranchSelection {
        /// The rejected value.
        value: String,
        /// Comma-separated, quoted list of allowed values.
        allowed: String,
    },

    /// Numeric parameter outside its inclusive range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Inclusive lower bound.
        min: String,
        /// Inclusive upper bound.
        max: String,
    },

    /// Substitution model not supported by the analysis.
    #[error("{kind} model '{value}' is unavailable; choose one of: {allowed}")]
    InvalidModel {
        /// Model family ("protein" or "nucleotide").
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Comma-separated list of allowed models.
        allowed: String,
    },

    /// RELAX analysis type is not `All` or `Minimal`.
    #[error("incorrect analysis type '{value}'; provide either 'All' or 'Minimal'")]
    InvalidAnalysisType {
        /// The rejected value.
        value: String,
    },

    /// A branch label required by the analysis is missing from the tree.
    #[error("{message}")]
    MissingLabel {
        /// Description of what is missing.
        message: String,
    },

    /// HyPhy exited unsuccessfully.
    #[error("HyPhy failed to run ({status})")]
    HyphyFailed {
        /// Exit status description.
        status: String,
    },

    /// HyPhy could not be started.
    #[error("failed to launch HyPhy '{executable}'")]
    HyphyLaunch {
        /// Executable that failed to start.
        executable: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// HyPhy finished but the expected JSON artifact is absent.
    #[error("expected HyPhy output not found: {path}")]
    ArtifactMissing {
        /// Conventional artifact path.
        path: PathBuf,
    },

    /// Moving the artifact to its final location failed.
    #[error("failed to move '{from}' to '{to}'")]
    ArtifactMove {
        /// Conventional artifact path.
        from: PathBuf,
        /// Requested destination.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON output")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Stable `snake_case` identifier reported in JSON error events.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::ConfigDirNotFound => "config_dir_not_found",
            Self::ConfigRead { .. } => "config_read",
            Self::ConfigParse { .. } => "config_parse",
            Self::ConfigWrite { .. } => "config_write",
            Self::ConfigSerialize { .. } => "config_serialize",
            Self::ConfigValidation { .. } => "config_validation",
            Self::ExecutableNotFound { .. } => "executable_not_found",
            Self::BuildPathNotFound { .. } => "build_path_not_found",
            Self::InvalidBuildPath { .. } => "invalid_build_path",
            Self::InstallPathNotFound { .. } => "install_path_not_found",
            Self::InvalidInstallPath { .. } => "invalid_install_path",
            Self::AlignmentNotFound { .. } => "alignment_not_found",
            Self::TreeNotFound { .. } => "tree_not_found",
            Self::TreeRequired => "tree_required",
            Self::DataNotFound { .. } => "data_not_found",
            Self::InvalidInputMode { .. } => "invalid_input_mode",
            Self::MalformedTree { .. } => "malformed_tree",
            Self::InvalidGeneticCode { .. } => "invalid_genetic_code",
            Self::InvalidBranchSelection { .. } => "invalid_branch_selection",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidModel { .. } => "invalid_model",
            Self::InvalidAnalysisType { .. } => "invalid_analysis_type",
            Self::MissingLabel { .. } => "missing_label",
            Self::HyphyFailed { .. } => "hyphy_failed",
            Self::HyphyLaunch { .. } => "hyphy_launch",
            Self::ArtifactMissing { .. } => "artifact_missing",
            Self::ArtifactMove { .. } => "artifact_move",
            Self::JsonSerialize { .. } => "json_serialize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::TreeRequired.code(), "tree_required");
        assert_eq!(
            Error::HyphyFailed {
                status: "exit status: 1".to_string(),
            }
            .code(),
            "hyphy_failed"
        );
        assert_eq!(Error::Io(std::io::Error::other("disk")).code(), "io");
    }
}

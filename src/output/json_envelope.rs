//! JSON envelope types for CLI output.
//!
//! With `--output-mode json` every result is printed as one envelope so
//! hyphy-run can be driven from pipelines and workflow managers.

use crate::analysis::runner::RunSummary;
use crate::analysis::{GeneticCode, Method};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Version of the JSON envelope format.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T> {
    /// API specification version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Final result.
    Result,
    /// Command failed.
    Error,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Analysis run (or dry run).
    Analysis,
    /// Branch labels found in a tree.
    Labels,
    /// Genetic code table.
    GeneticCodes,
    /// Configuration display.
    Config,
}

/// Payload for an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Method that was run.
    pub method: Method,
    /// Whether HyPhy was actually launched.
    pub dry_run: bool,
    /// Shell-quoted command line.
    pub command: String,
    /// Final location of the JSON result.
    pub output_file: PathBuf,
    /// Wall-clock run time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
}

impl From<&RunSummary> for AnalysisPayload {
    fn from(summary: &RunSummary) -> Self {
        Self {
            result_type: ResultType::Analysis,
            method: summary.method,
            dry_run: summary.dry_run,
            command: summary.command.clone(),
            output_file: summary.output_file.clone(),
            elapsed_seconds: summary.elapsed.map(|elapsed| elapsed.as_secs_f64()),
        }
    }
}

/// Payload for the `labels` command.
#[derive(Debug, Clone, Serialize)]
pub struct LabelsPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// The tree that was scanned.
    pub tree: String,
    /// Labels in first-appearance order.
    pub labels: Vec<String>,
}

/// Payload for the `codes` command.
#[derive(Debug, Clone, Serialize)]
pub struct GeneticCodesPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// All supported codes.
    pub codes: Vec<GeneticCode>,
}

/// Payload for config show result.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// The configuration contents (as JSON value for flexibility).
    pub config: serde_json::Value,
}

/// Payload for error events.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    /// Error code (`snake_case` identifier).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl From<&Error> for ErrorPayload {
    fn from(error: &Error) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Serialize a result payload inside an envelope.
///
/// # Errors
///
/// Returns [`Error::JsonSerialize`] if serialization fails.
pub fn to_json_result<T: Serialize>(payload: &T) -> Result<String> {
    let envelope = JsonEnvelope::new(EventType::Result, payload);
    serde_json::to_string(&envelope).map_err(|source| Error::JsonSerialize { source })
}

/// Print a result payload inside an envelope on stdout.
///
/// # Errors
///
/// Returns [`Error::JsonSerialize`] if serialization fails.
pub fn emit_json_result<T: Serialize>(payload: &T) -> Result<()> {
    println!("{}", to_json_result(payload)?);
    Ok(())
}

/// Serialize an error inside an envelope.
///
/// # Errors
///
/// Returns [`Error::JsonSerialize`] if serialization fails.
pub fn to_json_error(error: &Error) -> Result<String> {
    let envelope = JsonEnvelope::new(EventType::Error, ErrorPayload::from(error));
    serde_json::to_string(&envelope).map_err(|source| Error::JsonSerialize { source })
}

/// Print an error inside an envelope on stdout.
///
/// # Errors
///
/// Returns [`Error::JsonSerialize`] if serialization fails.
pub fn emit_json_error(error: &Error) -> Result<()> {
    println!("{}", to_json_error(error)?);
    Ok(())
}

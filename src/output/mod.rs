//! Result relocation, progress display and structured output.

mod json_envelope;
pub mod progress;
mod relocate;

pub use json_envelope::{
    AnalysisPayload, ConfigPayload, ErrorPayload, EventType, GeneticCodesPayload, JsonEnvelope,
    LabelsPayload, ResultType, SPEC_VERSION, emit_json_error, emit_json_result, to_json_error,
    to_json_result,
};
pub use relocate::move_artifact;

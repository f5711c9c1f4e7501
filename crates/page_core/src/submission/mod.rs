//! Contact form submission: external services and the pipeline that drives them.

mod pipeline;
mod service;

pub use pipeline::{PipelinePhase, SubmissionError, SubmissionPipeline, SubmitOutcome};
pub use service::{HttpSubmissionService, SimulatedSubmissionService, SubmissionService};

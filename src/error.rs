// Pipeline error taxonomy
//
// Three failure classes reach the top level: the model produced
// unusable output, a step's worker dispatch failed, or the run never
// converged within its transition cap. None are recovered internally.

use thiserror::Error;

/// The structured generation call returned nothing usable.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model request itself failed (transport, auth, timeout).
    #[error("model request failed: {0:#}")]
    Request(anyhow::Error),

    /// The model returned an empty response.
    #[error("model returned no usable output")]
    Empty,

    /// The model returned text that does not parse as the requested shape.
    #[error("model output did not match the requested schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Fatal conditions observed by the orchestrator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The tool-augmented dispatch for a step failed. The step index is
    /// not advanced, so a restarted run would retry this exact step.
    #[error("dispatch for step {step} failed: {reason:#}")]
    ToolDispatch { step: usize, reason: anyhow::Error },

    /// The transition cap was exhausted before the run reached DONE.
    /// No single call failed; the pipeline simply did not converge.
    #[error("transition cap of {cap} exhausted after {transitions} transitions")]
    StepLimitExceeded { cap: usize, transitions: usize },
}

// Project-wide constants
//
// Centralised here so defaults have one source of truth.

/// Default model for every generation call.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default maximum tokens per model request.
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

/// Directory the generated project is written into when no
/// `--workspace` override is given.
pub const DEFAULT_WORKSPACE_DIR: &str = "generated_project";

/// Default bound on pipeline transitions before a run is aborted.
pub const DEFAULT_TRANSITION_CAP: usize = 100;

/// Default bound on tool turns within one step's worker dispatch.
pub const DEFAULT_WORKER_TURN_CAP: usize = 25;

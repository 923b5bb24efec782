// Configuration structs

use std::path::PathBuf;

use super::constants::{
    DEFAULT_MODEL, DEFAULT_TRANSITION_CAP, DEFAULT_WORKER_TURN_CAP, DEFAULT_WORKSPACE_DIR,
};

#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the model provider
    pub api_key: String,

    /// Model identifier used for every generation call
    pub model: String,

    /// Directory the generated project is written into
    pub workspace_dir: PathBuf,

    /// Upper bound on pipeline transitions before the run is aborted
    pub transition_cap: usize,

    /// Upper bound on tool turns within one step's worker dispatch
    pub worker_turn_cap: usize,
}

impl Config {
    /// Config with defaults for everything but the API key.
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            workspace_dir: PathBuf::from(DEFAULT_WORKSPACE_DIR),
            transition_cap: DEFAULT_TRANSITION_CAP,
            worker_turn_cap: DEFAULT_WORKER_TURN_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_api_key("key".to_string());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.transition_cap, 100);
        assert_eq!(config.workspace_dir, PathBuf::from("generated_project"));
    }
}

// Configuration loader
// Loads the API key from ~/.bowerbird/config.toml or the environment

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::Config;

/// Load configuration from the config file or environment.
pub fn load_config() -> Result<Config> {
    // Try ~/.bowerbird/config.toml first
    if let Some(path) = config_file_path() {
        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return config_from_toml(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()));
        }
    }

    // Fall back to environment variable
    if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
        if !api_key.is_empty() {
            return Ok(Config::with_api_key(api_key));
        }
    }

    bail!(
        "No configuration found. Create ~/.bowerbird/config.toml with an\n\
         api_key entry, or set the environment variable:\n\
         export ANTHROPIC_API_KEY=\"sk-ant-...\""
    );
}

fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bowerbird/config.toml"))
}

/// Parse a config file, applying defaults for anything unset.
fn config_from_toml(contents: &str) -> Result<Config> {
    #[derive(serde::Deserialize)]
    struct TomlConfig {
        api_key: String,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        workspace_dir: Option<PathBuf>,
        #[serde(default)]
        transition_cap: Option<usize>,
        #[serde(default)]
        worker_turn_cap: Option<usize>,
    }

    let parsed: TomlConfig = toml::from_str(contents).context("Invalid config file")?;

    let mut config = Config::with_api_key(parsed.api_key);
    if let Some(model) = parsed.model {
        config.model = model;
    }
    if let Some(workspace_dir) = parsed.workspace_dir {
        config.workspace_dir = workspace_dir;
    }
    if let Some(transition_cap) = parsed.transition_cap {
        config.transition_cap = transition_cap;
    }
    if let Some(worker_turn_cap) = parsed.worker_turn_cap {
        config.worker_turn_cap = worker_turn_cap;
    }
    Ok(config)
}

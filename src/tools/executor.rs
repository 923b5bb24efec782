// Tool execution engine
//
// Dispatches the worker's tool calls against the registry. A tool's own
// failure is reported back to the model as an error result rather than
// aborting the dispatch.

use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ToolDefinition, ToolResult, ToolUse};
use anyhow::{Context, Result};
use tracing::{debug, error, instrument};

pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Execute a single tool use
    #[instrument(skip(self, tool_use), fields(tool = %tool_use.name, id = %tool_use.id))]
    pub async fn execute_tool(&self, tool_use: &ToolUse) -> Result<ToolResult> {
        debug!("Executing tool");

        let tool = self
            .registry
            .get(&tool_use.name)
            .context(format!("Tool '{}' not found", tool_use.name))?;

        match tool.execute(tool_use.input.clone()).await {
            Ok(output) => {
                debug!("Tool executed successfully");
                Ok(ToolResult::success(tool_use.id.clone(), output))
            }
            Err(e) => {
                error!("Tool execution failed: {}", e);
                Ok(ToolResult::error(
                    tool_use.id.clone(),
                    format!("Execution error: {}", e),
                ))
            }
        }
    }

    /// Definitions for every registered tool
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }
}

// get_current_directory tool - report the workspace root

use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use crate::tools::workspace::Workspace;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct CurrentDirectoryTool {
    workspace: Arc<Workspace>,
}

impl CurrentDirectoryTool {
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for CurrentDirectoryTool {
    fn name(&self) -> &str {
        "get_current_directory"
    }

    fn description(&self) -> &str {
        "Return the absolute path of the project root directory."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![])
    }

    async fn execute(&self, _input: Value) -> Result<String> {
        Ok(self.workspace.root().display().to_string())
    }
}

// write_file tool - create or overwrite a file in the workspace

use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use crate::tools::workspace::Workspace;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct WriteFileTool {
    workspace: Arc<Workspace>,
}

impl WriteFileTool {
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file in the project, creating it if it doesn't exist or \
         overwriting it if it does. Always provide the complete file content."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![
            (
                "path",
                "Path of the file to write, relative to the project root",
            ),
            ("content", "The complete file content to write"),
        ])
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let path = input["path"].as_str().context("Missing path parameter")?;
        let content = input["content"]
            .as_str()
            .context("Missing content parameter")?;
        self.workspace.write(path, content)
    }
}

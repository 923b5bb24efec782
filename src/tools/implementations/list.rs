// list_files tool - list a directory in the workspace

use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use crate::tools::workspace::Workspace;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ListFilesTool {
    workspace: Arc<Workspace>,
}

impl ListFilesTool {
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List the entries of a directory in the project. Without a path, lists the \
         project root. Directories are marked with a trailing slash."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: serde_json::json!({
                "path": {
                    "type": "string",
                    "description": "Directory to list, relative to the project root (optional)"
                }
            }),
            required: vec![],
        }
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let entries = self.workspace.list(input["path"].as_str())?;
        if entries.is_empty() {
            return Ok("(empty)".to_string());
        }
        Ok(entries.join("\n"))
    }
}

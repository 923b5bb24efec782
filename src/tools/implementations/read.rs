// read_file tool - reads file contents from the workspace
//
// An absent file reads as empty so a first edit to a new file looks
// like an edit to an empty one.

use crate::tools::registry::Tool;
use crate::tools::types::ToolInputSchema;
use crate::tools::workspace::Workspace;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct ReadFileTool {
    workspace: Arc<Workspace>,
}

impl ReadFileTool {
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file in the project. Returns empty content if the \
         file does not exist yet."
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![(
            "path",
            "Path of the file to read, relative to the project root",
        )])
    }

    async fn execute(&self, input: Value) -> Result<String> {
        let path = input["path"].as_str().context("Missing path parameter")?;
        self.workspace.read(path)
    }
}

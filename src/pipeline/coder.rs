// Coder worker stage - executes one implementation step per invocation
//
// The worker decides WHAT to write; this stage only selects the step,
// reads the target file fresh, dispatches the tool-augmented worker,
// and advances the cursor once the dispatch returns.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use super::prompts::{coder_system_prompt, coder_task_brief};
use super::types::{CoderState, ImplementationTask, TaskPlan};
use crate::error::PipelineError;
use crate::llm::types::{ContentBlock, Message, MessageRequest};
use crate::llm::LanguageModel;
use crate::tools::{
    CurrentDirectoryTool, ListFilesTool, ReadFileTool, ToolExecutor, ToolRegistry, Workspace,
    WriteFileTool,
};

/// Outcome of one coder worker invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    InProgress,
    Done,
}

pub struct CoderWorker {
    model: Arc<dyn LanguageModel>,
    executor: ToolExecutor,
    workspace: Arc<Workspace>,
    max_turns: usize,
}

impl CoderWorker {
    pub fn new(model: Arc<dyn LanguageModel>, workspace: Arc<Workspace>, max_turns: usize) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(ReadFileTool::new(workspace.clone())));
        registry.register(Box::new(WriteFileTool::new(workspace.clone())));
        registry.register(Box::new(ListFilesTool::new(workspace.clone())));
        registry.register(Box::new(CurrentDirectoryTool::new(workspace.clone())));

        Self {
            model,
            executor: ToolExecutor::new(registry),
            workspace,
            max_turns,
        }
    }

    /// Execute at most one pending step, advancing the cursor on success.
    ///
    /// A `None` state is replaced with a fresh cursor over `task_plan`
    /// (constructed exactly once per run). When every step is consumed
    /// this returns `Done` without touching the model or the workspace,
    /// so it is safe to call again after completion.
    pub async fn advance(
        &self,
        state: &mut Option<CoderState>,
        task_plan: &TaskPlan,
    ) -> Result<StepStatus, PipelineError> {
        let state = state.get_or_insert_with(|| CoderState::new(task_plan.clone()));

        if state.is_complete() {
            debug!(
                steps = state.task_plan.implementation_steps.len(),
                "All steps consumed"
            );
            return Ok(StepStatus::Done);
        }

        let step = state.current_step_idx;
        let task = state.task_plan.implementation_steps[step].clone();

        // Fresh read per step: a later step targeting the same path sees
        // the earlier step's output.
        let existing = self
            .workspace
            .read(&task.file_path)
            .map_err(|reason| PipelineError::ToolDispatch { step, reason })?;
        state.current_file_content = Some(existing.clone());

        info!(step, file = %task.file_path, "Dispatching implementation step");
        self.dispatch(&task, &existing)
            .await
            .map_err(|reason| PipelineError::ToolDispatch { step, reason })?;

        state.current_step_idx += 1;
        Ok(StepStatus::InProgress)
    }

    /// One tool-augmented worker run for one step.
    ///
    /// The worker issues zero or more tool calls and terminates with a
    /// plain reply; which calls it made is its own business. Transport
    /// failure or exhausting the turn bound fails the dispatch.
    async fn dispatch(&self, task: &ImplementationTask, existing_content: &str) -> Result<()> {
        let system = coder_system_prompt(self.workspace.root());
        let tool_defs = self.executor.definitions();
        let mut messages = vec![Message::user(&coder_task_brief(task, existing_content))];

        for _ in 0..self.max_turns {
            let request = MessageRequest {
                model: self.model.model().to_string(),
                max_tokens: crate::config::constants::DEFAULT_MAX_TOKENS,
                messages: messages.clone(),
                system: Some(system.clone()),
                tools: Some(tool_defs.clone()),
            };

            let response = self
                .model
                .send_message(&request)
                .await
                .context("Worker model request failed")?;

            if !response.has_tool_uses() {
                let text = response.text();
                if !text.is_empty() {
                    debug!(summary = %text, "Worker finished step");
                }
                return Ok(());
            }

            messages.push(response.to_message());
            let mut result_blocks = Vec::new();

            for tool_use in response.tool_uses() {
                let (content, is_error) = match self.executor.execute_tool(&tool_use).await {
                    Ok(result) => (result.content, result.is_error),
                    Err(e) => (format!("Error: {e:#}"), true),
                };
                result_blocks.push(ContentBlock::tool_result(
                    tool_use.id,
                    content,
                    is_error.then_some(true),
                ));
            }

            messages.push(Message::with_content("user", result_blocks));
        }

        bail!(
            "Worker did not finish within {} tool turns",
            self.max_turns
        )
    }
}

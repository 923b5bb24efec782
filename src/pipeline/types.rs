// Pipeline data contracts - Plan, TaskPlan, CoderState
//
// These are the values handed between the three stages. A Plan and a
// TaskPlan are created exactly once per run and never mutated afterward
// (the TaskPlan's provenance attachment excepted); CoderState is the
// single mutable cursor and lives only for the duration of the run.

use serde::{Deserialize, Serialize};

/// One file the generated project should contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSpec {
    /// Path of the file, relative to the project root
    pub path: String,
    /// What the file is for (e.g. "application entry point")
    pub purpose: String,
}

/// The structured project description produced from the user's request.
///
/// Created once by the planner and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub description: String,
    /// Free-text stack summary (e.g. "python, flask, sqlite")
    pub tech_stack: String,
    pub features: Vec<String>,
    pub files: Vec<FileSpec>,
}

/// One unit of work: change this file in this way.
///
/// Position within `implementation_steps` is the execution order; later
/// steps may depend on earlier ones having modified a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationTask {
    pub file_path: String,
    pub task_description: String,
}

/// The ordered list of file-level edit instructions derived from a Plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    #[serde(alias = "ImplementationSteps")]
    pub implementation_steps: Vec<ImplementationTask>,

    /// The Plan this TaskPlan was derived from. Not part of the
    /// generation schema; the architect attaches it after generation so
    /// later stages keep full context without refetching it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

/// Mutable progress cursor over a TaskPlan for one run.
///
/// `current_step_idx` is incremented by exactly 1 after each
/// successfully dispatched step, by the coder worker and no one else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoderState {
    pub task_plan: TaskPlan,
    pub current_step_idx: usize,
    /// Contents of the file read for the step currently being dispatched
    pub current_file_content: Option<String>,
}

impl CoderState {
    pub fn new(task_plan: TaskPlan) -> Self {
        Self {
            task_plan,
            current_step_idx: 0,
            current_file_content: None,
        }
    }

    /// The remaining-work check used by the worker's termination guard.
    pub fn is_complete(&self) -> bool {
        self.current_step_idx >= self.task_plan.implementation_steps.len()
    }

    /// The step the next invocation would dispatch, if any.
    pub fn current_step(&self) -> Option<&ImplementationTask> {
        self.task_plan
            .implementation_steps
            .get(self.current_step_idx)
    }
}

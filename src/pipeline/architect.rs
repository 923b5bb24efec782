// Architect stage - Plan to TaskPlan
//
// The generation call fills only the implementation steps; the
// originating Plan is attached afterward as an explicit provenance
// step, so later stages keep full context without refetching it.

use std::sync::Arc;
use tracing::info;

use super::prompts::architect_prompt;
use super::types::{Plan, TaskPlan};
use crate::error::GenerationError;
use crate::llm::{generate_structured, LanguageModel};

pub struct Architect {
    model: Arc<dyn LanguageModel>,
}

impl Architect {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn architect(&self, plan: &Plan) -> Result<TaskPlan, GenerationError> {
        let mut task_plan =
            generate_structured::<TaskPlan>(self.model.as_ref(), &architect_prompt(plan)).await?;

        task_plan.plan = Some(plan.clone());

        info!(
            steps = task_plan.implementation_steps.len(),
            "Task plan generated"
        );
        Ok(task_plan)
    }
}

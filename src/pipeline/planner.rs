// Planner stage - user prompt to Plan

use std::sync::Arc;
use tracing::info;

use super::prompts::planner_prompt;
use super::types::Plan;
use crate::error::GenerationError;
use crate::llm::{generate_structured, LanguageModel};

pub struct Planner {
    model: Arc<dyn LanguageModel>,
}

impl Planner {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// One structured generation call; the parsed Plan is returned
    /// unmodified. A schema failure propagates - the run halts.
    pub async fn plan(&self, user_prompt: &str) -> Result<Plan, GenerationError> {
        let plan =
            generate_structured::<Plan>(self.model.as_ref(), &planner_prompt(user_prompt)).await?;
        info!(name = %plan.name, files = plan.files.len(), "Plan generated");
        Ok(plan)
    }
}

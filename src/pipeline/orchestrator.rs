// Orchestrator - the pipeline state machine
//
// Planner runs once, architect runs once, then the coder worker is
// re-invoked until it reports DONE. Every transition counts against a
// caller-supplied cap; exhausting the cap is its own terminal outcome,
// distinct from a stage failure.

use serde::Serialize;
use tracing::{error, info, warn};

use super::architect::Architect;
use super::coder::{CoderWorker, StepStatus};
use super::planner::Planner;
use super::types::{CoderState, Plan, TaskPlan};
use crate::error::PipelineError;

/// Machine states of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Start,
    Planned,
    Architected,
    Coding,
    Done,
    Failed,
    StepLimitExceeded,
}

/// Final snapshot of a run, printed by the CLI regardless of outcome.
///
/// On failure the snapshot shows exactly how far execution progressed:
/// whichever of plan/task_plan/coder_state were produced, and a
/// partially advanced `current_step_idx` inside the coder state.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub state: RunState,
    pub transitions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_plan: Option<TaskPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coder_state: Option<CoderState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            state: RunState::Start,
            transitions: 0,
            plan: None,
            task_plan: None,
            coder_state: None,
            error: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.state {
            RunState::Done => 0,
            RunState::StepLimitExceeded => 2,
            _ => 1,
        }
    }
}

pub struct Orchestrator {
    planner: Planner,
    architect: Architect,
    coder: CoderWorker,
    transition_cap: usize,
}

impl Orchestrator {
    pub fn new(
        planner: Planner,
        architect: Architect,
        coder: CoderWorker,
        transition_cap: usize,
    ) -> Self {
        Self {
            planner,
            architect,
            coder,
            transition_cap,
        }
    }

    /// Drive one run to a terminal state. Never panics, never loses the
    /// partial snapshot: the report carries whatever was produced.
    pub async fn run(&self, user_prompt: &str) -> RunReport {
        let mut report = RunReport::new();

        // START --(run planner)--> PLANNED
        if self.capped(&mut report) {
            return report;
        }
        let plan = match self.planner.plan(user_prompt).await {
            Ok(plan) => plan,
            Err(e) => return Self::failed(report, PipelineError::from(e)),
        };
        report.plan = Some(plan.clone());
        report.state = RunState::Planned;
        report.transitions += 1;

        // PLANNED --(run architect)--> ARCHITECTED
        if self.capped(&mut report) {
            return report;
        }
        let task_plan = match self.architect.architect(&plan).await {
            Ok(task_plan) => task_plan,
            Err(e) => return Self::failed(report, PipelineError::from(e)),
        };
        report.task_plan = Some(task_plan.clone());
        report.state = RunState::Architected;
        report.transitions += 1;

        // ARCHITECTED --> CODING --> ... --> DONE
        let mut coder_state: Option<CoderState> = None;
        loop {
            if self.capped(&mut report) {
                report.coder_state = coder_state;
                return report;
            }
            let status = match self.coder.advance(&mut coder_state, &task_plan).await {
                Ok(status) => status,
                Err(e) => {
                    report.coder_state = coder_state;
                    return Self::failed(report, e);
                }
            };
            report.state = RunState::Coding;
            report.transitions += 1;

            if status == StepStatus::Done {
                report.state = RunState::Done;
                break;
            }
        }

        report.coder_state = coder_state;
        info!(transitions = report.transitions, "Pipeline run complete");
        report
    }

    /// Check the transition cap; on exhaustion mark the report terminal.
    fn capped(&self, report: &mut RunReport) -> bool {
        if report.transitions < self.transition_cap {
            return false;
        }
        let err = PipelineError::StepLimitExceeded {
            cap: self.transition_cap,
            transitions: report.transitions,
        };
        warn!(cap = self.transition_cap, "Transition cap exhausted");
        report.state = RunState::StepLimitExceeded;
        report.error = Some(err.to_string());
        true
    }

    fn failed(mut report: RunReport, err: PipelineError) -> RunReport {
        error!(state = ?report.state, "Pipeline run failed: {err}");
        report.state = RunState::Failed;
        report.error = Some(err.to_string());
        report
    }
}

// End-to-end pipeline tests against a scripted model
//
// The model is the only fake; planner, architect, coder worker, tool
// executor, and workspace are the real components wired the way main
// wires them.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use bowerbird::llm::types::{ContentBlock, MessageRequest, MessageResponse};
use bowerbird::llm::LanguageModel;
use bowerbird::pipeline::{Architect, CoderWorker, Orchestrator, Planner, RunState};
use bowerbird::tools::Workspace;

struct ScriptedModel {
    script: Mutex<VecDeque<Result<MessageResponse>>>,
}

impl ScriptedModel {
    fn new(script: Vec<Result<MessageResponse>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn send_message(&self, _request: &MessageRequest) -> Result<MessageResponse> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
    }
}

fn response(content: Vec<ContentBlock>, stop_reason: &str) -> Result<MessageResponse> {
    Ok(MessageResponse {
        id: "msg".to_string(),
        response_type: "message".to_string(),
        role: "assistant".to_string(),
        content,
        model: "scripted".to_string(),
        stop_reason: Some(stop_reason.to_string()),
    })
}

fn text(text: &str) -> Result<MessageResponse> {
    response(vec![ContentBlock::text(text)], "end_turn")
}

fn write_file(path: &str, content: &str) -> Result<MessageResponse> {
    response(
        vec![ContentBlock::ToolUse {
            id: format!("toolu_{path}"),
            name: "write_file".to_string(),
            input: serde_json::json!({"path": path, "content": content}),
        }],
        "tool_use",
    )
}

const PLAN_JSON: &str = r#"{
    "name": "greeter",
    "description": "A greeting CLI",
    "tech_stack": "python",
    "features": ["greet the user"],
    "files": [
        {"path": "app.py", "purpose": "entry point"},
        {"path": "README.md", "purpose": "usage notes"}
    ]
}"#;

const TASK_PLAN_JSON: &str = r#"{
    "implementation_steps": [
        {"file_path": "app.py", "task_description": "add a hello-world entry point"},
        {"file_path": "README.md", "task_description": "document how to run the app"}
    ]
}"#;

fn build_orchestrator(
    model: Arc<ScriptedModel>,
    workspace: Arc<Workspace>,
    cap: usize,
) -> Orchestrator {
    let model: Arc<dyn LanguageModel> = model;
    Orchestrator::new(
        Planner::new(model.clone()),
        Architect::new(model.clone()),
        CoderWorker::new(model, workspace, 10),
        cap,
    )
}

#[tokio::test]
async fn full_run_builds_every_file() {
    let dir = TempDir::new().unwrap();
    let workspace = Arc::new(Workspace::new(dir.path()).unwrap());

    let model = ScriptedModel::new(vec![
        // planner
        text(PLAN_JSON),
        // architect (fenced output still parses)
        text(&format!("```json\n{TASK_PLAN_JSON}\n```")),
        // step 0: write then summarize
        write_file("app.py", "print('hello world')\n"),
        text("Entry point added."),
        // step 1
        write_file("README.md", "# greeter\n\nRun: python app.py\n"),
        text("Documented."),
    ]);

    let orchestrator = build_orchestrator(model, workspace.clone(), 100);
    let report = orchestrator.run("build me a greeting CLI").await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.exit_code(), 0);
    // planner + architect + two working coder calls + terminal coder call
    assert_eq!(report.transitions, 5);

    // Both steps reached the workspace
    assert_eq!(workspace.read("app.py").unwrap(), "print('hello world')\n");
    assert!(workspace.read("README.md").unwrap().contains("python app.py"));

    // The task plan carries its originating plan by value
    let task_plan = report.task_plan.unwrap();
    let plan = report.plan.unwrap();
    assert_eq!(task_plan.plan.as_ref(), Some(&plan));
    assert_eq!(plan.name, "greeter");

    let coder_state = report.coder_state.unwrap();
    assert_eq!(coder_state.current_step_idx, 2);
}

#[tokio::test]
async fn worker_can_read_before_writing() {
    let dir = TempDir::new().unwrap();
    let workspace = Arc::new(Workspace::new(dir.path()).unwrap());
    workspace.write("config.py", "DEBUG = False\n").unwrap();

    let single_step = r#"{"implementation_steps": [
        {"file_path": "app.py", "task_description": "wire the app to config.py"}
    ]}"#;

    let model = ScriptedModel::new(vec![
        text(PLAN_JSON),
        text(single_step),
        // worker inspects the project before writing
        response(
            vec![ContentBlock::ToolUse {
                id: "toolu_read".to_string(),
                name: "read_file".to_string(),
                input: serde_json::json!({"path": "config.py"}),
            }],
            "tool_use",
        ),
        write_file("app.py", "import config\n"),
        text("Wired up."),
    ]);

    let orchestrator = build_orchestrator(model, workspace.clone(), 100);
    let report = orchestrator.run("build me an app").await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(workspace.read("app.py").unwrap(), "import config\n");
    // The pre-existing file was not disturbed
    assert_eq!(workspace.read("config.py").unwrap(), "DEBUG = False\n");
}

#[tokio::test]
async fn architect_garbage_fails_run_without_touching_workspace() {
    let dir = TempDir::new().unwrap();
    let workspace = Arc::new(Workspace::new(dir.path()).unwrap());

    let model = ScriptedModel::new(vec![
        text(PLAN_JSON),
        text("I would suggest starting with the backend."),
    ]);

    let orchestrator = build_orchestrator(model, workspace.clone(), 100);
    let report = orchestrator.run("build me an app").await;

    assert_eq!(report.state, RunState::Failed);
    assert_eq!(report.exit_code(), 1);
    assert!(report.plan.is_some());
    assert!(report.task_plan.is_none());
    assert!(workspace.list(None).unwrap().is_empty());
}

#[tokio::test]
async fn step_limit_reports_partial_progress() {
    let dir = TempDir::new().unwrap();
    let workspace = Arc::new(Workspace::new(dir.path()).unwrap());

    let model = ScriptedModel::new(vec![
        text(PLAN_JSON),
        text(TASK_PLAN_JSON),
        write_file("app.py", "print('hello world')\n"),
        text("Entry point added."),
    ]);

    // Cap of 3: planner, architect, one coder step of two
    let orchestrator = build_orchestrator(model, workspace.clone(), 3);
    let report = orchestrator.run("build me a greeting CLI").await;

    assert_eq!(report.state, RunState::StepLimitExceeded);
    assert_eq!(report.exit_code(), 2);
    assert_eq!(report.coder_state.unwrap().current_step_idx, 1);
    // The first step's write landed before the cap hit
    assert_eq!(workspace.read("app.py").unwrap(), "print('hello world')\n");
    assert_eq!(workspace.read("README.md").unwrap(), "");
}

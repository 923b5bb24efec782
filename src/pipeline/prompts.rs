// Prompt builders for the three stages

use std::path::Path;

use super::types::{ImplementationTask, Plan};

/// Prompt instructing the model to emit a Plan as bare JSON.
pub fn planner_prompt(user_prompt: &str) -> String {
    format!(
        "You are a software project planner. A user wants the following \
         application built:\n\n{user_prompt}\n\n\
         Produce a concrete project plan. Respond with ONLY a JSON object, \
         no prose and no code fences, with exactly these keys:\n\
         - \"name\": short name of the app\n\
         - \"description\": what the app does, in detail\n\
         - \"tech_stack\": the technologies to use (e.g. \"python, flask, sqlite\")\n\
         - \"features\": array of feature strings\n\
         - \"files\": array of objects with \"path\" and \"purpose\", one per \
         file the project needs, paths relative to the project root"
    )
}

/// Prompt instructing the model to decompose a Plan into ordered steps.
pub fn architect_prompt(plan: &Plan) -> String {
    let files = plan
        .files
        .iter()
        .map(|f| format!("- {} ({})", f.path, f.purpose))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a software architect. Break the following project plan into \
         an ordered sequence of file-level implementation tasks.\n\n\
         Project: {name}\n\
         Description: {description}\n\
         Tech stack: {tech_stack}\n\
         Features:\n{features}\n\
         Files:\n{files}\n\n\
         Every file in the plan must be covered. Order the tasks so that \
         anything a later task depends on is built by an earlier one. Each \
         task description must be specific enough to implement on its own: \
         name the functions, routes, or structures to create and how they \
         integrate with the other files.\n\n\
         Respond with ONLY a JSON object, no prose and no code fences, of \
         the shape:\n\
         {{\"implementation_steps\": [{{\"file_path\": \"...\", \
         \"task_description\": \"...\"}}]}}",
        name = plan.name,
        description = plan.description,
        tech_stack = plan.tech_stack,
        features = plan
            .features
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n"),
        files = files,
    )
}

/// System prompt for the tool-augmented coder worker.
pub fn coder_system_prompt(project_root: &Path) -> String {
    format!(
        "You are an expert software engineer implementing one task of a larger \
         project. You work inside a sandboxed project directory and have these \
         tools: read_file, write_file, list_files, get_current_directory.\n\n\
         - Read related files before writing, so your code integrates with what \
         already exists\n\
         - Write the COMPLETE file content when you save; partial files are not \
         merged\n\
         - Commit exactly one coherent change to the target file with write_file\n\
         - When the task is done, reply with a short summary and stop calling tools\n\n\
         Project root: {}",
        project_root.display()
    )
}

/// Task brief handed to the worker for one implementation step.
pub fn coder_task_brief(task: &ImplementationTask, existing_content: &str) -> String {
    format!(
        "Task: {}\nFile: {}\nExisting content:\n{}\n\
         Use write_file(path, content) to save your changes.",
        task.task_description, task.file_path, existing_content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::FileSpec;

    #[test]
    fn test_planner_prompt_embeds_request() {
        let prompt = planner_prompt("a todo app");
        assert!(prompt.contains("a todo app"));
        assert!(prompt.contains("\"files\""));
    }

    #[test]
    fn test_architect_prompt_lists_every_file() {
        let plan = Plan {
            name: "todo".to_string(),
            description: "todo app".to_string(),
            tech_stack: "python".to_string(),
            features: vec!["add".to_string()],
            files: vec![
                FileSpec {
                    path: "app.py".to_string(),
                    purpose: "entry".to_string(),
                },
                FileSpec {
                    path: "models.py".to_string(),
                    purpose: "data".to_string(),
                },
            ],
        };
        let prompt = architect_prompt(&plan);
        assert!(prompt.contains("app.py"));
        assert!(prompt.contains("models.py"));
        assert!(prompt.contains("implementation_steps"));
    }

    #[test]
    fn test_coder_brief_carries_existing_content() {
        let task = ImplementationTask {
            file_path: "app.py".to_string(),
            task_description: "add a hello-world entry point".to_string(),
        };
        let brief = coder_task_brief(&task, "# existing\n");
        assert!(brief.contains("app.py"));
        assert!(brief.contains("# existing"));
        assert!(brief.contains("write_file"));
    }
}

//! Automation front end: flag-driven, one structured event per step

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;
use uuid::Uuid;

use djinit_core::{
    BootstrapError, Directive, ShellRunner, StepOutcome, StepPlan, Templates, VenvAction,
    VenvDirective, Workspace, load_config,
};

use crate::cli::{AgentArgs, VenvChoice, YesNo};
use crate::output::EventSink;

/// Marker: the failing step already emitted its error event
struct StepFailed;

enum RunError {
    /// A step raised; its error event is already out
    Step,
    /// Failure outside any step (config load, cwd lookup)
    Fatal(BootstrapError),
}

impl From<StepFailed> for RunError {
    fn from(_: StepFailed) -> Self {
        RunError::Step
    }
}

impl From<BootstrapError> for RunError {
    fn from(err: BootstrapError) -> Self {
        RunError::Fatal(err)
    }
}

/// Run the flag-driven bootstrap.
///
/// Exit code 0 with a final `done` event on success; exit code 1 after an
/// `error` event otherwise. Handled failures are not propagated as `Err` —
/// the event stream is the error channel here.
pub fn run_agent(args: &AgentArgs) -> Result<i32> {
    let sink = EventSink::new(args.json);

    match bootstrap(args, &sink) {
        Ok(root) => {
            sink.emit(
                "done",
                "success",
                "Project initialization completed",
                json!({"project_root": root.display().to_string()}),
                None,
            );
            Ok(0)
        }
        Err(RunError::Step) => Ok(1),
        Err(RunError::Fatal(err)) => {
            sink.emit_error("error", &err);
            Ok(1)
        }
    }
}

fn bootstrap(args: &AgentArgs, sink: &EventSink) -> Result<PathBuf, RunError> {
    let root = std::env::current_dir().map_err(BootstrapError::Io)?;
    let config = load_config(&root)?;
    let templates = Templates::discover(&config);
    let ws = Workspace::new(root.clone(), templates, ShellRunner::new());
    let plan = plan_from_args(args);

    sink.emit(
        "start",
        "success",
        "Bootstrap started",
        json!({
            "cwd": root.display().to_string(),
            "run_id": Uuid::new_v4().to_string(),
        }),
        None,
    );

    // 1. Virtual environment
    match plan.venv.resolve(ws.venv_exists()) {
        VenvAction::Recreate => {
            step(sink, "virtualenv", ws.recreate_virtualenv())?;
        }
        VenvAction::Reuse if ws.venv_exists() => {
            step(sink, "virtualenv", ws.create_virtualenv())?;
        }
        VenvAction::Reuse | VenvAction::Skip => {
            sink.emit(
                "virtualenv",
                "skipped",
                "Skipped virtual environment setup",
                json!({}),
                None,
            );
        }
    }

    // 2. Dependencies
    if plan.install_deps.should_run() {
        let requested = plan
            .django_version
            .clone()
            .unwrap_or_else(|| config.defaults.django_version.clone());
        step(sink, "dependencies", ws.install_dependencies(&requested))?;
    } else {
        sink.emit(
            "dependencies",
            "skipped",
            "Dependency installation skipped",
            json!({}),
            None,
        );
    }

    // 3. Git: an existing repository reports success-without-action even
    // when the directive says no
    if ws.git_exists() || plan.git_init.should_run() {
        step(sink, "git", ws.initialize_git())?;
    } else {
        sink.emit(
            "git",
            "skipped",
            "Git initialization skipped",
            json!({}),
            None,
        );
    }

    // 4. Django project, with everything else nested under it
    let project_ready = if ws.project_exists() || plan.project.should_run() {
        step(sink, "project", ws.start_django_project())?;
        true
    } else {
        sink.emit(
            "project",
            "skipped",
            "Skipped Django project creation",
            json!({}),
            None,
        );
        false
    };

    let app_name = plan
        .app_name
        .clone()
        .unwrap_or_else(|| config.defaults.app_name.clone());

    if project_ready {
        step(sink, "requirements", ws.copy_requirements())?;

        if ws.settings_exists() || plan.settings.should_run() {
            step(sink, "settings", ws.create_settings_package())?;
        } else {
            sink.emit(
                "settings",
                "skipped",
                "Skipped settings package creation",
                json!({}),
                None,
            );
        }

        if ws.app_exists(&app_name) || plan.app_create.should_run() {
            step(sink, "app", ws.create_app(&app_name))?;
        } else {
            sink.emit(
                "app",
                "skipped",
                &format!("Skipped creation of app '{app_name}'"),
                json!({"name": app_name}),
                None,
            );
        }

        if plan.migrate.should_run() {
            step(sink, "migrations", ws.apply_migrations())?;
        } else {
            sink.emit("migrations", "skipped", "Skipped migrations", json!({}), None);
        }

        if ws.readme_exists() || plan.readme.should_run() {
            step(sink, "readme", ws.create_readme())?;
        } else {
            sink.emit("readme", "skipped", "Skipped README creation", json!({}), None);
        }

        if ws.env_file_exists() || plan.env_file.should_run() {
            step(sink, "env_file", ws.create_env_file())?;
        } else {
            sink.emit("env_file", "skipped", "Skipped .env creation", json!({}), None);
        }
    } else {
        // Every step still emits exactly one event
        for name in ["requirements", "settings", "app", "migrations", "readme", "env_file"] {
            sink.emit(
                name,
                "skipped",
                "Skipped (project not scaffolded)",
                json!({}),
                None,
            );
        }
    }

    Ok(root)
}

/// Emit the step's event and convert failures into an early return.
fn step(
    sink: &EventSink,
    name: &str,
    result: Result<StepOutcome, BootstrapError>,
) -> Result<StepOutcome, StepFailed> {
    match result {
        Ok(outcome) => {
            sink.emit_outcome(name, &outcome);
            Ok(outcome)
        }
        Err(err) => {
            sink.emit_error(name, &err);
            Err(StepFailed)
        }
    }
}

fn plan_from_args(args: &AgentArgs) -> StepPlan {
    StepPlan {
        venv: venv_directive(args.venv),
        install_deps: directive(args.install_deps),
        django_version: args.django_version.clone(),
        git_init: directive(args.git_init),
        project: directive(args.project),
        settings: directive(args.settings),
        app_name: args.app_name.clone(),
        app_create: directive(args.app_create),
        migrate: directive(args.migrate),
        readme: directive(args.readme),
        env_file: directive(args.env_file),
    }
}

fn directive(flag: Option<YesNo>) -> Directive {
    match flag {
        Some(YesNo::Yes) => Directive::Do,
        Some(YesNo::No) => Directive::Skip,
        None => Directive::Unspecified,
    }
}

fn venv_directive(flag: Option<VenvChoice>) -> VenvDirective {
    match flag {
        Some(VenvChoice::Reuse) => VenvDirective::Reuse,
        Some(VenvChoice::Recreate) => VenvDirective::Recreate,
        Some(VenvChoice::Skip) => VenvDirective::Skip,
        None => VenvDirective::Unspecified,
    }
}

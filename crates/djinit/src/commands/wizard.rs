//! Interactive front end: sequential prompts over the step library

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use djinit_core::{
    BootstrapError, ShellRunner, StepOutcome, StepStatus, Templates, Workspace, load_config,
};

use crate::prompts;

/// Run the interactive bootstrap wizard.
///
/// Step order is fixed: environment, dependencies, version control, project
/// scaffold, then the nested block (requirements, settings, app, migrations,
/// README, .env) whenever the scaffold exists or was just created.
pub fn run_wizard() -> Result<i32> {
    prompts::require_tty()?;
    prompts::setup_ctrl_c_handler();

    let root = std::env::current_dir().context("failed to get current directory")?;
    let config = load_config(&root)?;
    let templates = Templates::discover(&config);
    let ws = Workspace::new(root.clone(), templates, ShellRunner::new());

    println!("{}", "djinit — interactive Django bootstrap".cyan().bold());

    // 1. Virtual environment
    step_header("Step 1: Virtual environment");
    if ws.venv_exists() {
        let choice = prompts::choose(
            "What do you want to do about the virtual environment (.venv)?",
            &["Reuse existing .venv", "Recreate .venv", "Skip this step"],
            0,
        )?;
        match choice {
            0 => report(&ws.create_virtualenv()?),
            1 => report(&run_step("Recreating .venv", || ws.recreate_virtualenv())?),
            _ => skip_notice("Skipping virtual environment setup."),
        }
    } else {
        let choice = prompts::choose(
            ".venv not found. What do you want to do?",
            &["Create new .venv", "Skip this step"],
            0,
        )?;
        match choice {
            0 => report(&run_step("Creating .venv", || ws.create_virtualenv())?),
            _ => skip_notice("Skipping virtual environment setup."),
        }
    }

    // 2. Dependencies
    step_header("Step 2: Install dependencies");
    let choice = prompts::choose(
        "Which dependencies do you want to install?",
        &[
            "Install Django plus the standard bundle (DRF, env config, Postgres driver, quality tools)",
            "Skip this step",
        ],
        0,
    )?;
    if choice == 0 {
        let version = prompts::input(
            "Django version to install",
            &config.defaults.django_version,
        )?;
        report(&run_step("Installing dependencies", || {
            ws.install_dependencies(&version)
        })?);
    } else {
        skip_notice("Skipping dependency installation.");
    }

    // 3. Git
    step_header("Step 3: Git repository");
    if ws.git_exists() {
        info("Git repository already initialized.");
    } else {
        let choice = prompts::choose(
            "Git repository setup",
            &["Initialize git repository", "Skip this step"],
            0,
        )?;
        if choice == 0 {
            report(&run_step("Initializing git", || ws.initialize_git())?);
        } else {
            skip_notice("Skipping git initialization.");
        }
    }

    // 4. Django project, with everything else nested under it
    step_header("Step 4: Django project");
    let project_ready = if ws.project_exists() {
        info("Django project already exists in this folder.");
        true
    } else {
        let choice = prompts::choose(
            "Django project setup",
            &["Create Django project (config)", "Skip this step"],
            0,
        )?;
        if choice == 0 {
            report(&run_step("Creating Django project", || {
                ws.start_django_project()
            })?);
            true
        } else {
            skip_notice("Skipping Django project creation.");
            false
        }
    };

    if project_ready {
        report(&ws.copy_requirements()?);

        // 5. Settings package
        step_header("Step 5: Settings package");
        if ws.settings_exists() {
            info("Settings package already exists.");
        } else {
            let choice = prompts::choose(
                "Settings package setup",
                &["Create settings package (config/settings)", "Skip this step"],
                0,
            )?;
            if choice == 0 {
                report(&ws.create_settings_package()?);
            } else {
                skip_notice("Skipping settings package creation.");
            }
        }

        // 6. First app
        step_header("Step 6: First app");
        let app_name =
            prompts::input_app_name("Name of the first app (e.g., users)", &config.defaults.app_name)?;
        if ws.app_exists(&app_name) {
            info(&format!("App '{}' already exists.", app_name));
        } else {
            let create = format!("Create app '{}'", app_name);
            let choice = prompts::choose("App creation", &[create.as_str(), "Skip this step"], 0)?;
            if choice == 0 {
                report(&run_step("Creating app", || ws.create_app(&app_name))?);
            } else {
                skip_notice(&format!("Skipping creation of app '{}'.", app_name));
            }
        }

        // 7. Migrations
        step_header("Step 7: Migrations");
        let choice = prompts::choose(
            "Run migrations",
            &["Run initial migrations", "Skip this step"],
            0,
        )?;
        if choice == 0 {
            report(&run_step("Applying migrations", || ws.apply_migrations())?);
        } else {
            skip_notice("Skipping migrations.");
        }

        // 8. README
        step_header("Step 8: README");
        if ws.readme_exists() {
            info("README.md already exists.");
        } else {
            let choice = prompts::choose(
                "Create README.md from template?",
                &["Create file", "Skip this step"],
                0,
            )?;
            if choice == 0 {
                report(&ws.create_readme()?);
            } else {
                skip_notice("Skipping README creation.");
            }
        }

        // 9. Env file
        step_header("Step 9: Environment file");
        if ws.env_file_exists() {
            info(".env already exists.");
        } else {
            let choice = prompts::choose(
                "Create .env from the env template?",
                &["Create file", "Skip this step"],
                0,
            )?;
            if choice == 0 {
                report(&ws.create_env_file()?);
            } else {
                skip_notice("Skipping .env creation.");
            }
        }
    }

    println!();
    println!(
        "{} {}",
        "✓".green(),
        format!(
            "Project initialization completed in {}",
            root.display()
        )
        .green()
    );

    Ok(0)
}

/// Run a step that shells out, with a spinner while it works.
fn run_step<F>(label: &str, f: F) -> Result<StepOutcome, BootstrapError>
where
    F: FnOnce() -> Result<StepOutcome, BootstrapError>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .expect("valid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(label.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    result
}

fn report(outcome: &StepOutcome) {
    match outcome.status {
        StepStatus::Warning => {
            println!("{} {}", "⚠".yellow(), outcome.message.yellow());
        }
        StepStatus::Skipped => {
            println!("{}", outcome.message.dimmed());
        }
        _ => {
            println!("{} {}", "✓".green(), outcome.message.green());
        }
    }
}

fn info(message: &str) {
    println!("{}", message);
}

fn skip_notice(message: &str) {
    println!("{}", message.dimmed());
}

fn step_header(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

//! The bootstrap step library
//!
//! One method per step, shared by both front ends. Every step checks for its
//! target artifact first and reports success-without-action instead of
//! re-executing, which is what makes re-running the tool safe.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::error::BootstrapError;
use crate::outcome::StepOutcome;
use crate::plan::validate_app_name;
use crate::shell::ShellRunner;
use crate::templates::{Template, Templates};
use crate::version::{VersionResolution, pip_requirement, resolve_django_version};

/// Ignore-file template fetched during git initialization
pub const GITIGNORE_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/github/gitignore/main/Python.gitignore";

/// Companion packages installed alongside Django
const COMPANION_PACKAGES: &[&str] = &[
    "djangorestframework",
    "django-environ",
    "psycopg[binary]",
    "gunicorn",
    "whitenoise",
    "pytest-django",
    "black",
    "isort",
    "pre-commit",
];

/// Step-library context: project root, venv path, templates, shell runner.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    venv: PathBuf,
    templates: Templates,
    runner: ShellRunner,
}

impl Workspace {
    pub fn new(root: PathBuf, templates: Templates, runner: ShellRunner) -> Self {
        let venv = root.join(".venv");
        Self {
            root,
            venv,
            templates,
            runner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn venv(&self) -> &Path {
        &self.venv
    }

    pub fn venv_exists(&self) -> bool {
        self.venv.exists()
    }

    pub fn git_exists(&self) -> bool {
        self.root.join(".git").exists()
    }

    /// `manage.py` is the durable marker for a scaffolded project
    pub fn project_exists(&self) -> bool {
        self.root.join("manage.py").exists()
    }

    pub fn settings_exists(&self) -> bool {
        self.settings_dir().exists()
    }

    pub fn app_exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    pub fn readme_exists(&self) -> bool {
        self.root.join("README.md").exists()
    }

    pub fn env_file_exists(&self) -> bool {
        self.root.join(".env").exists()
    }

    fn settings_dir(&self) -> PathBuf {
        self.root.join("config").join("settings")
    }

    fn venv_bin(&self, tool: &str) -> PathBuf {
        self.venv.join("bin").join(tool)
    }

    /// Create `.venv` and upgrade its installer. Success-without-action if
    /// the directory already exists.
    pub fn create_virtualenv(&self) -> Result<StepOutcome, BootstrapError> {
        if self.venv_exists() {
            return Ok(StepOutcome::success("Using existing .venv")
                .with_data(json!({"path": self.venv.display().to_string()})));
        }

        self.runner.run(&self.root, "python3", &["-m", "venv", ".venv"])?;
        self.upgrade_installer()?;

        Ok(StepOutcome::success(".venv created")
            .with_data(json!({"path": self.venv.display().to_string()})))
    }

    /// Remove any existing `.venv`, then create a fresh one.
    pub fn recreate_virtualenv(&self) -> Result<StepOutcome, BootstrapError> {
        if self.venv_exists() {
            fs::remove_dir_all(&self.venv)?;
        }

        self.runner.run(&self.root, "python3", &["-m", "venv", ".venv"])?;
        self.upgrade_installer()?;

        Ok(StepOutcome::success(".venv recreated")
            .with_data(json!({"path": self.venv.display().to_string()})))
    }

    fn upgrade_installer(&self) -> Result<(), BootstrapError> {
        let pip = self.venv_bin("pip").display().to_string();
        self.runner
            .run(&self.root, &pip, &["install", "--upgrade", "pip", "wheel"])
    }

    /// Install Django at the requested version plus the companion bundle.
    ///
    /// An unparseable or pre-3 version falls back to the default and the
    /// outcome is downgraded to a warning; the install still proceeds.
    pub fn install_dependencies(&self, requested: &str) -> Result<StepOutcome, BootstrapError> {
        let resolution = resolve_django_version(requested);
        let version = resolution.resolved().to_string();
        let django_req = pip_requirement(&version);

        let pip = self.venv_bin("pip").display().to_string();
        let mut args = vec!["install", django_req.as_str()];
        args.extend_from_slice(COMPANION_PACKAGES);
        self.runner.run(&self.root, &pip, &args)?;

        let data = json!({"django": version});
        match resolution {
            VersionResolution::Fallback { requested } => Ok(StepOutcome::warning(format!(
                "Django version '{requested}' too old or invalid; installed default {version}"
            ))
            .with_data(data)),
            VersionResolution::Accepted(_) => {
                Ok(StepOutcome::success("Dependencies installed").with_data(data))
            }
        }
    }

    /// `git init`, fetch the ignore-file template, stage and commit.
    /// Success-without-action if `.git/` already exists.
    pub fn initialize_git(&self) -> Result<StepOutcome, BootstrapError> {
        if self.git_exists() {
            return Ok(StepOutcome::success("Git repository already initialized"));
        }

        self.runner.run(&self.root, "git", &["init"])?;
        self.runner.run(
            &self.root,
            "curl",
            &["-fsSL", GITIGNORE_TEMPLATE_URL, "-o", ".gitignore"],
        )?;
        self.runner.run(&self.root, "git", &["add", "."])?;
        self.runner
            .run(&self.root, "git", &["commit", "-m", "bootstrap"])?;

        Ok(StepOutcome::success("Git initialized"))
    }

    /// Scaffold the base project layout (`django-admin startproject config .`).
    ///
    /// Fails with `DjangoAdminMissing` when the generator is not installed
    /// in the venv: scaffolding requires the dependency step to have run.
    pub fn start_django_project(&self) -> Result<StepOutcome, BootstrapError> {
        if self.project_exists() {
            return Ok(StepOutcome::success("Django project already exists"));
        }

        let admin = self.venv_bin("django-admin");
        if !admin.exists() {
            return Err(BootstrapError::DjangoAdminMissing { path: admin });
        }

        let admin = admin.display().to_string();
        self.runner
            .run(&self.root, &admin, &["startproject", "config", "."])?;

        Ok(StepOutcome::success("Django project created")
            .with_data(json!({"path": self.root.display().to_string()})))
    }

    /// Copy the requirements template into the project root.
    pub fn copy_requirements(&self) -> Result<StepOutcome, BootstrapError> {
        let target = self.root.join("requirements.txt");
        if target.exists() {
            return Ok(StepOutcome::success("requirements.txt already exists"));
        }

        match self.templates.contents(Template::Requirements) {
            Ok(content) => {
                fs::write(&target, content)?;
                Ok(StepOutcome::success("requirements.txt created from template")
                    .with_data(json!({"path": target.display().to_string()})))
            }
            Err(BootstrapError::TemplateMissing { .. }) => {
                Ok(StepOutcome::skipped("requirements.txt template not found"))
            }
            Err(e) => Err(e),
        }
    }

    /// Create `config/settings/{base,dev,prod}.py`, an `__init__.py`
    /// re-exporting the dev variant, and point `config/wsgi.py` at it.
    pub fn create_settings_package(&self) -> Result<StepOutcome, BootstrapError> {
        let settings_dir = self.settings_dir();
        if settings_dir.exists() {
            return Ok(StepOutcome::success("Settings package already exists")
                .with_data(json!({"path": settings_dir.display().to_string()})));
        }

        fs::create_dir_all(&settings_dir)?;
        for (template, fname) in [
            (Template::SettingsBase, "base.py"),
            (Template::SettingsDev, "dev.py"),
            (Template::SettingsProd, "prod.py"),
        ] {
            fs::write(settings_dir.join(fname), self.templates.contents(template)?)?;
        }
        fs::write(
            settings_dir.join("__init__.py"),
            "from .dev import *  # default to dev\n",
        )?;

        let wsgi_path = self.root.join("config").join("wsgi.py");
        let wsgi = fs::read_to_string(&wsgi_path)?;
        fs::write(
            &wsgi_path,
            wsgi.replace("config.settings", "config.settings.dev"),
        )?;

        Ok(StepOutcome::success("Settings package created")
            .with_data(json!({"path": settings_dir.display().to_string()})))
    }

    /// Generate an application module via `manage.py startapp`.
    pub fn create_app(&self, name: &str) -> Result<StepOutcome, BootstrapError> {
        validate_app_name(name)?;

        if self.app_exists(name) {
            return Ok(StepOutcome::success(format!("App '{name}' already exists"))
                .with_data(json!({"name": name})));
        }

        let python = self.venv_bin("python").display().to_string();
        self.runner
            .run(&self.root, &python, &["manage.py", "startapp", name])?;

        Ok(StepOutcome::success(format!("App '{name}' created"))
            .with_data(json!({"name": name})))
    }

    /// Apply initial schema migrations via `manage.py migrate`.
    pub fn apply_migrations(&self) -> Result<StepOutcome, BootstrapError> {
        let python = self.venv_bin("python").display().to_string();
        self.runner.run(&self.root, &python, &["manage.py", "migrate"])?;

        Ok(StepOutcome::success("Initial migrations applied"))
    }

    /// Copy the README template. Success-without-action if present.
    pub fn create_readme(&self) -> Result<StepOutcome, BootstrapError> {
        let target = self.root.join("README.md");
        if target.exists() {
            return Ok(StepOutcome::success("README.md already exists"));
        }

        let content = self.templates.contents(Template::Readme)?;
        fs::write(&target, content)?;

        Ok(StepOutcome::success("README.md created from template")
            .with_data(json!({"path": target.display().to_string()})))
    }

    /// Copy the env-file template to `.env`. Success-without-action if present.
    pub fn create_env_file(&self) -> Result<StepOutcome, BootstrapError> {
        let target = self.root.join(".env");
        if target.exists() {
            return Ok(StepOutcome::success(".env already exists"));
        }

        let content = self.templates.contents(Template::EnvExample)?;
        fs::write(&target, content)?;

        Ok(StepOutcome::success(".env file created from template")
            .with_data(json!({"path": target.display().to_string()})))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::StepStatus;
    use tempfile::TempDir;

    fn workspace(temp: &TempDir) -> Workspace {
        Workspace::new(
            temp.path().to_path_buf(),
            Templates::embedded(),
            ShellRunner::new(),
        )
    }

    /// Lay down the durable markers of a scaffolded project
    fn scaffold_fake_project(temp: &TempDir) {
        fs::write(temp.path().join("manage.py"), "#!/usr/bin/env python\n").unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(
            temp.path().join("config").join("wsgi.py"),
            "import os\n\nos.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"config.settings\")\n",
        )
        .unwrap();
    }

    #[test]
    fn test_create_virtualenv_reuses_existing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".venv")).unwrap();

        let outcome = workspace(&temp).create_virtualenv().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        assert!(outcome.message.contains("existing"));
    }

    #[test]
    fn test_start_project_requires_django_admin() {
        let temp = TempDir::new().unwrap();

        let err = workspace(&temp).start_django_project().unwrap_err();
        assert_eq!(err.code(), "MISSING_DEPENDENCY");
        assert!(err.to_string().contains("Install dependencies first"));
    }

    #[test]
    fn test_start_project_noop_when_manage_py_exists() {
        let temp = TempDir::new().unwrap();
        scaffold_fake_project(&temp);

        let outcome = workspace(&temp).start_django_project().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        assert!(outcome.message.contains("already exists"));
    }

    #[test]
    fn test_initialize_git_noop_when_repo_exists() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let outcome = workspace(&temp).initialize_git().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        assert!(outcome.message.contains("already initialized"));
    }

    #[test]
    fn test_copy_requirements_creates_and_then_noops() {
        let temp = TempDir::new().unwrap();
        let ws = workspace(&temp);

        let outcome = ws.copy_requirements().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        let content = fs::read_to_string(temp.path().join("requirements.txt")).unwrap();
        assert!(content.contains("django"));

        let outcome = ws.copy_requirements().unwrap();
        assert!(outcome.message.contains("already exists"));
    }

    #[test]
    fn test_create_settings_package() {
        let temp = TempDir::new().unwrap();
        scaffold_fake_project(&temp);

        let outcome = workspace(&temp).create_settings_package().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);

        let settings_dir = temp.path().join("config").join("settings");
        for fname in ["base.py", "dev.py", "prod.py"] {
            assert!(settings_dir.join(fname).is_file(), "{fname} missing");
        }

        let init = fs::read_to_string(settings_dir.join("__init__.py")).unwrap();
        assert!(init.contains("from .dev import *"));

        let wsgi = fs::read_to_string(temp.path().join("config").join("wsgi.py")).unwrap();
        assert!(wsgi.contains("config.settings.dev"));
        assert!(!wsgi.contains("\"config.settings\""));
    }

    #[test]
    fn test_create_settings_package_idempotent() {
        let temp = TempDir::new().unwrap();
        scaffold_fake_project(&temp);
        let ws = workspace(&temp);

        ws.create_settings_package().unwrap();
        let outcome = ws.create_settings_package().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        assert!(outcome.message.contains("already exists"));
    }

    #[test]
    fn test_create_app_rejects_invalid_name() {
        let temp = TempDir::new().unwrap();

        let err = workspace(&temp).create_app("My-App").unwrap_err();
        assert_eq!(err.code(), "INVALID_APP_NAME");
    }

    #[test]
    fn test_create_app_noop_when_dir_exists() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("users")).unwrap();

        let outcome = workspace(&temp).create_app("users").unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        assert!(outcome.message.contains("already exists"));
    }

    #[test]
    fn test_create_readme_and_env_file() {
        let temp = TempDir::new().unwrap();
        let ws = workspace(&temp);

        let outcome = ws.create_readme().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        assert!(temp.path().join("README.md").is_file());

        let outcome = ws.create_env_file().unwrap();
        assert_eq!(outcome.status, StepStatus::Success);
        let env = fs::read_to_string(temp.path().join(".env")).unwrap();
        assert!(env.contains("SECRET_KEY"));

        // Second invocation must not rewrite anything
        fs::write(temp.path().join(".env"), "SENTINEL=1\n").unwrap();
        let outcome = ws.create_env_file().unwrap();
        assert!(outcome.message.contains("already exists"));
        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "SENTINEL=1\n"
        );
    }
}

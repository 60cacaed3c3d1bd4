//! CLI argument parsing with clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// djinit - Bootstrap Django projects with an environment-split layout
#[derive(Parser)]
#[command(name = "djinit")]
#[command(version = VERSION)]
#[command(about = "Bootstrap Django projects with an environment-split layout")]
#[command(
    long_about = "djinit walks through the bootstrap of a Django project: virtual environment, dependency bundle, git, project scaffold, per-environment settings, first app, migrations, README, and .env.\n\nRun without a subcommand for the interactive wizard, or use `djinit agent` for flag-driven automation with JSON Lines output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Non-interactive bootstrap driven by flags, for agents and CI
    ///
    /// Emits one structured event per step; `--json` switches to JSON Lines.
    #[command(
        long_about = "Non-interactive bootstrap driven by flags.\n\nEach step takes a tri-state directive: an explicit yes runs it, an explicit no skips it, and an unset flag falls back to the default policy (keep an existing .venv or create a missing one; skip every other step).\n\nOne event is emitted per step; the run ends with a `done` event on success or the failing step's `error` event and exit code 1."
    )]
    Agent(AgentArgs),
}

#[derive(Args)]
pub struct AgentArgs {
    /// Emit output as JSON Lines (agent/CI friendly)
    #[arg(long)]
    pub json: bool,

    /// Virtual environment handling
    #[arg(long, value_enum)]
    pub venv: Option<VenvChoice>,

    /// Install Django plus the companion bundle
    #[arg(long, value_enum)]
    pub install_deps: Option<YesNo>,

    /// Django version to install (default from .djinit.toml, else 5.2.3)
    #[arg(long)]
    pub django_version: Option<String>,

    /// Initialize a git repository with a Python .gitignore
    #[arg(long, value_enum)]
    pub git_init: Option<YesNo>,

    /// Scaffold the Django project (config package)
    #[arg(long, value_enum)]
    pub project: Option<YesNo>,

    /// Partition settings into base/dev/prod modules
    #[arg(long, value_enum)]
    pub settings: Option<YesNo>,

    /// Name of the first app (default from .djinit.toml, else "users")
    #[arg(long)]
    pub app_name: Option<String>,

    /// Create the first app
    #[arg(long, value_enum)]
    pub app_create: Option<YesNo>,

    /// Run initial migrations
    #[arg(long, value_enum)]
    pub migrate: Option<YesNo>,

    /// Create README.md from the template
    #[arg(long, value_enum)]
    pub readme: Option<YesNo>,

    /// Create .env from the template
    #[arg(long, value_enum)]
    pub env_file: Option<YesNo>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvChoice {
    Reuse,
    Recreate,
    Skip,
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}

//! djinit-core: the shared bootstrap step library
//!
//! Both front ends (interactive wizard, flag-driven agent mode) are pure
//! callers of this crate; no step logic lives in the binary.

/// Error types for bootstrap operations
pub mod error;

/// Step outcome reporting
pub mod outcome;

/// Per-step directives and default resolution
pub mod plan;

/// Project configuration (`.djinit.toml`)
pub mod config;

/// Template discovery and embedding
pub mod templates;

/// External command execution
pub mod shell;

/// Django version validation
pub mod version;

/// The bootstrap steps themselves
pub mod steps;

// Re-exports for convenience
pub use config::{CONFIG_FILE_NAME, Config, load_config};
pub use error::BootstrapError;
pub use outcome::{StepOutcome, StepStatus};
pub use plan::{Directive, StepPlan, VenvAction, VenvDirective, validate_app_name};
pub use shell::ShellRunner;
pub use steps::Workspace;
pub use templates::{TEMPLATES_DIR_ENV_VAR, Template, Templates};
pub use version::{DEFAULT_DJANGO_VERSION, VersionResolution, resolve_django_version};

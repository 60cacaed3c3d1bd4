//! Per-step directives and default resolution for the automation front end

use std::sync::LazyLock;

use regex::Regex;

use crate::error::BootstrapError;

/// Tri-state instruction for a yes/no step.
///
/// Modeled as an explicit enum rather than `Option<bool>` so the default
/// policy stays exhaustive and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    /// Explicit "yes": run the operation
    Do,
    /// Explicit "no": skip and report it
    Skip,
    /// Not supplied: resolves to skip
    #[default]
    Unspecified,
}

impl Directive {
    /// Whether the step should run. Unspecified defaults to skip.
    pub fn should_run(self) -> bool {
        matches!(self, Directive::Do)
    }
}

/// Four-state instruction for the virtual-environment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenvDirective {
    Reuse,
    Recreate,
    Skip,
    #[default]
    Unspecified,
}

/// Resolved virtual-environment action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvAction {
    Reuse,
    Recreate,
    Skip,
}

impl VenvDirective {
    /// Resolve against the filesystem: unspecified keeps an existing `.venv`
    /// and creates one when absent.
    pub fn resolve(self, venv_exists: bool) -> VenvAction {
        match self {
            VenvDirective::Reuse => VenvAction::Reuse,
            VenvDirective::Recreate => VenvAction::Recreate,
            VenvDirective::Skip => VenvAction::Skip,
            VenvDirective::Unspecified => {
                if venv_exists {
                    VenvAction::Reuse
                } else {
                    VenvAction::Recreate
                }
            }
        }
    }
}

/// The full set of step directives for one automation run
#[derive(Debug, Clone, Default)]
pub struct StepPlan {
    pub venv: VenvDirective,
    pub install_deps: Directive,
    pub django_version: Option<String>,
    pub git_init: Directive,
    pub project: Directive,
    pub settings: Directive,
    pub app_name: Option<String>,
    pub app_create: Directive,
    pub migrate: Directive,
    pub readme: Directive,
    pub env_file: Directive,
}

static APP_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z_][a-z0-9_]*$").expect("valid pattern"));

/// Validate a Django app name (lowercase Python identifier).
pub fn validate_app_name(name: &str) -> Result<(), BootstrapError> {
    if APP_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(BootstrapError::InvalidAppName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_defaults_to_skip() {
        assert!(Directive::Do.should_run());
        assert!(!Directive::Skip.should_run());
        assert!(!Directive::Unspecified.should_run());
        assert_eq!(Directive::default(), Directive::Unspecified);
    }

    #[test]
    fn test_venv_unspecified_keeps_existing() {
        assert_eq!(
            VenvDirective::Unspecified.resolve(true),
            VenvAction::Reuse
        );
        assert_eq!(
            VenvDirective::Unspecified.resolve(false),
            VenvAction::Recreate
        );
    }

    #[test]
    fn test_venv_explicit_directives_win() {
        assert_eq!(VenvDirective::Skip.resolve(true), VenvAction::Skip);
        assert_eq!(VenvDirective::Skip.resolve(false), VenvAction::Skip);
        assert_eq!(VenvDirective::Recreate.resolve(true), VenvAction::Recreate);
        assert_eq!(VenvDirective::Reuse.resolve(false), VenvAction::Reuse);
    }

    #[test]
    fn test_default_plan_skips_everything_but_venv() {
        let plan = StepPlan::default();
        assert!(!plan.install_deps.should_run());
        assert!(!plan.project.should_run());
        assert!(!plan.env_file.should_run());
        assert_eq!(plan.venv, VenvDirective::Unspecified);
    }

    #[test]
    fn test_app_name_validation() {
        assert!(validate_app_name("users").is_ok());
        assert!(validate_app_name("api_v2").is_ok());
        assert!(validate_app_name("_private").is_ok());
        assert!(validate_app_name("My-App").is_err());
        assert!(validate_app_name("9lives").is_err());
        assert!(validate_app_name("").is_err());
    }
}

//! Error types for bootstrap operations

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for bootstrap operations
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// External command exited non-zero (or could not be started)
    #[error("command failed ({status}): {command}{}", fmt_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Project scaffold requested before dependencies were installed
    #[error("django-admin not found at {}. Install dependencies first", .path.display())]
    DjangoAdminMissing { path: PathBuf },

    /// App name fails the lowercase-identifier rule
    #[error("invalid app name: {name} (must match ^[a-z_][a-z0-9_]*$)")]
    InvalidAppName { name: String },

    /// Template missing from the override directory
    #[error("template not found: {name} (looked in {})", .dir.display())]
    TemplateMissing { name: String, dir: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

fn fmt_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

impl BootstrapError {
    /// Stable error code for JSON events
    pub fn code(&self) -> &'static str {
        match self {
            BootstrapError::CommandFailed { .. } => "TOOL_INVOCATION_FAILED",
            BootstrapError::DjangoAdminMissing { .. } => "MISSING_DEPENDENCY",
            BootstrapError::InvalidAppName { .. } => "INVALID_APP_NAME",
            BootstrapError::TemplateMissing { .. } => "TEMPLATE_MISSING",
            BootstrapError::Io(_) => "IO_ERROR",
            BootstrapError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = BootstrapError::CommandFailed {
            command: "git init".to_string(),
            status: "exit code 128".to_string(),
            stderr: "fatal: not a work tree\n".to_string(),
        };
        assert_eq!(err.code(), "TOOL_INVOCATION_FAILED");
        let msg = err.to_string();
        assert!(msg.contains("git init"));
        assert!(msg.contains("exit code 128"));
        assert!(msg.contains("fatal: not a work tree"));
    }

    #[test]
    fn test_command_failed_display_without_stderr() {
        let err = BootstrapError::CommandFailed {
            command: "git init".to_string(),
            status: "exit code 1".to_string(),
            stderr: "  \n".to_string(),
        };
        assert!(!err.to_string().ends_with(": "));
    }

    #[test]
    fn test_django_admin_missing_mentions_dependencies() {
        let err = BootstrapError::DjangoAdminMissing {
            path: PathBuf::from(".venv/bin/django-admin"),
        };
        assert_eq!(err.code(), "MISSING_DEPENDENCY");
        let msg = err.to_string();
        assert!(msg.contains("django-admin not found"));
        assert!(msg.contains("Install dependencies first"));
    }

    #[test]
    fn test_invalid_app_name() {
        let err = BootstrapError::InvalidAppName {
            name: "My-App".to_string(),
        };
        assert_eq!(err.code(), "INVALID_APP_NAME");
        assert!(err.to_string().contains("My-App"));
    }
}

//! External command execution
//!
//! All bootstrap steps shell out through `ShellRunner`, which captures
//! stdout/stderr and converts non-zero exits into `CommandFailed`.

use std::path::Path;
use std::process::Command;

use crate::error::BootstrapError;

/// Runs external commands with captured output.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `program args..` in `cwd`, discarding output on success.
    ///
    /// Returns `CommandFailed` when the command cannot be started or exits
    /// non-zero, carrying the rendered command line and captured stderr.
    pub fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<(), BootstrapError> {
        let rendered = render_command(program, args);

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| BootstrapError::CommandFailed {
                command: rendered.clone(),
                status: format!("failed to start: {e}"),
                stderr: String::new(),
            })?;

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            return Err(BootstrapError::CommandFailed {
                command: rendered,
                status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

/// Render a command line for error messages and event payloads.
fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        if arg.contains(char::is_whitespace) {
            rendered.push('\'');
            rendered.push_str(arg);
            rendered.push('\'');
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command_quotes_whitespace() {
        assert_eq!(render_command("git", &["init"]), "git init");
        assert_eq!(
            render_command("git", &["commit", "-m", "first commit"]),
            "git commit -m 'first commit'"
        );
    }

    #[test]
    fn test_missing_program_is_command_failed() {
        let runner = ShellRunner::new();
        let err = runner
            .run(Path::new("."), "djinit-no-such-binary", &[])
            .unwrap_err();
        match err {
            BootstrapError::CommandFailed { command, status, .. } => {
                assert_eq!(command, "djinit-no-such-binary");
                assert!(status.contains("failed to start"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_nonzero_exit_captures_stderr() {
        let runner = ShellRunner::new();
        // `false` is POSIX and exits 1 with no output
        let err = runner.run(Path::new("."), "false", &[]).unwrap_err();
        match err {
            BootstrapError::CommandFailed { status, .. } => {
                assert_eq!(status, "exit code 1");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }
}

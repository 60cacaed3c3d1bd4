//! Interactive prompt helpers using dialoguer
//!
//! Numbered choices are rendered through a custom theme; a global flag set
//! by the Ctrl+C handler makes cancellation visible between prompts.

use std::fmt::Write as FmtWrite;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow, bail};
use console::Style;
use dialoguer::theme::Theme;
use dialoguer::{Input, Select};

/// Global flag to track if Ctrl+C was pressed
static CANCELLED: AtomicBool = AtomicBool::new(false);

/// Set up the global Ctrl+C handler
pub fn setup_ctrl_c_handler() {
    static HANDLER_SET: AtomicBool = AtomicBool::new(false);

    if HANDLER_SET.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = ctrlc::set_handler(move || {
        CANCELLED.store(true, Ordering::SeqCst);
        eprintln!();
    }) {
        eprintln!("Warning: Could not set Ctrl+C handler: {}", e);
    }
}

fn check_cancelled() -> Result<()> {
    if CANCELLED.load(Ordering::SeqCst) {
        bail!("cancelled");
    }
    Ok(())
}

/// The wizard cannot run without a terminal on stdin.
pub fn require_tty() -> Result<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        bail!("interactive mode requires a terminal; use `djinit agent` for non-interactive runs")
    }
}

/// Theme with a cyan prompt and indented choice items
struct WizardTheme {
    prompt_style: Style,
    active_style: Style,
    inactive_style: Style,
    hint_style: Style,
}

impl WizardTheme {
    fn new() -> Self {
        Self {
            prompt_style: Style::new().cyan().bold(),
            active_style: Style::new().cyan(),
            inactive_style: Style::new(),
            hint_style: Style::new().dim(),
        }
    }
}

impl Theme for WizardTheme {
    fn format_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(f, "{}", self.prompt_style.apply_to(format!("? {}", prompt)))
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        default: Option<&str>,
    ) -> std::fmt::Result {
        match default {
            Some(d) => write!(
                f,
                "{} {}",
                self.prompt_style.apply_to(format!("? {}", prompt)),
                self.hint_style.apply_to(format!("({})", d))
            ),
            None => write!(f, "{}", self.prompt_style.apply_to(format!("? {}", prompt))),
        }
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        sel: &str,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.active_style.apply_to(sel)
        )
    }

    fn format_select_prompt(&self, f: &mut dyn FmtWrite, prompt: &str) -> std::fmt::Result {
        write!(f, "{}", self.prompt_style.apply_to(format!("? {}", prompt)))
    }

    fn format_select_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        sel: &str,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.active_style.apply_to(sel)
        )
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn FmtWrite,
        text: &str,
        active: bool,
    ) -> std::fmt::Result {
        writeln!(f)?;
        if active {
            write!(
                f,
                "  {} {}",
                self.active_style.apply_to(">"),
                self.active_style.apply_to(text)
            )
        } else {
            write!(f, "    {}", self.inactive_style.apply_to(text))
        }
    }
}

/// Present a numbered choice with a default option.
pub fn choose(prompt: &str, options: &[&str], default: usize) -> Result<usize> {
    check_cancelled()?;

    let theme = WizardTheme::new();
    println!();

    Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()
        .map_err(|e| anyhow!("prompt failed: {e}"))
}

/// Ask for a free-text value with a default.
pub fn input(prompt: &str, default: &str) -> Result<String> {
    check_cancelled()?;

    let theme = WizardTheme::new();

    Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .map_err(|e| anyhow!("prompt failed: {e}"))
}

/// Ask for an app name, re-prompting until it passes the identifier rule.
pub fn input_app_name(prompt: &str, default: &str) -> Result<String> {
    check_cancelled()?;

    let theme = WizardTheme::new();

    Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .validate_with(|name: &String| {
            djinit_core::validate_app_name(name).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| anyhow!("prompt failed: {e}"))
}

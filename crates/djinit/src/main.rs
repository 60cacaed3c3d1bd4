//! djinit CLI - bootstrap Django projects with an environment-split layout

mod cli;
mod commands;
mod output;
mod prompts;

use std::process::ExitCode;

use cli::Commands;

fn main() -> ExitCode {
    let cli = cli::parse();

    let result = match cli.command {
        Some(Commands::Agent(args)) => commands::run_agent(&args),
        None => commands::run_wizard(),
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

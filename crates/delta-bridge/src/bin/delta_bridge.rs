//! `delta-bridge` — convert rich-text content between delta and mdelta.
//!
//! Usage:
//!   delta-bridge supplement [FILE] [--pretty]
//!   delta-bridge convert --to <web|mobile> [FILE] [--pretty]
//!   delta-bridge template <TEXT>
//!
//! Input is read from FILE, or stdin when FILE is omitted.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use delta_bridge::cli::{exit_code, run_convert, run_supplement, run_template, Cli, Command};
use delta_bridge::ConvertError;
use tracing_subscriber::EnvFilter;

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let out = match cli.command {
        Command::Supplement { file, pretty } => {
            let input = read_input(file.as_deref())?;
            run_supplement(&input, pretty)?
        }
        Command::Convert { to, file, pretty } => {
            let input = read_input(file.as_deref())?;
            run_convert(&input, to, pretty)?
        }
        Command::Template { text } => run_template(&text),
    };
    Ok(out)
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(out) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{out}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e:#}");
            let code = e.downcast_ref::<ConvertError>().map(exit_code).unwrap_or(1);
            std::process::exit(code);
        }
    }
}

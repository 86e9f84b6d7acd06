mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use customclean::project;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn clean(project_root: &Path, dry_run: bool) -> Result<(), String> {
    let outcome = project::run(project_root, dry_run).map_err(|e| e.to_string())?;
    write_report(&mut io::stdout().lock(), &outcome.report)
}

fn write_report(out: &mut impl Write, report: &str) -> Result<(), String> {
    out.write_all(report.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| format!("failed to write report: {e}"))
}

fn init(project_root: &Path, force: bool) -> Result<(), String> {
    let path = project::init_config(project_root, force).map_err(|e| e.to_string())?;
    println!("   {} `{}`", "Created".green(), path.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Clean {
            project_root,
            dry_run,
        } => clean(&project_root, dry_run),
        Commands::Init {
            project_root,
            force,
        } => init(&project_root, force),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

mod cli;
mod open;
mod prompt;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SKETCHBOOK_LOG";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = cli::Cli::parse();

    if let Some(command) = cli.command {
        return cli::run_command(command);
    }

    cli::Cli::command().print_help()?;
    println!();
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

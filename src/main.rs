//! Main entry point for tabcmp CLI

use clap::Parser;
use tabcmp::cli::Cli;
use tabcmp::commands::execute;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet || cli.json {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match execute(&cli) {
        Ok(verdict) if verdict.passed() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

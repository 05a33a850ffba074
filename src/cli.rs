//! Command-line interface for tabcmp

use crate::compare::Tolerance;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tabcmp")]
#[command(about = "Compare pipeline output against trusted reference data")]
#[command(version)]
pub struct Cli {
    /// Input data file
    #[arg(value_parser = existing_file)]
    pub filename: PathBuf,

    /// Tolerance for errors. The check fails if both the relative and absolute errors exceed it
    #[arg(long, default_value = "1e-10", value_parser = parse_tolerance)]
    pub tolerance: Tolerance,

    /// Reference data for comparison (defaults to expected/<flavor>/<filename>)
    #[arg(long, value_parser = existing_file)]
    pub reference: Option<PathBuf>,

    /// Override the directory searched for reference data
    #[arg(long)]
    pub expected_dir: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,

    /// Only report through the exit status
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Reject paths that are not regular files
fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{} is not a file.", s))
    }
}

/// Parse a tolerance, which must be a non-negative number
fn parse_tolerance(s: &str) -> Result<Tolerance, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("Invalid tolerance: '{}'. Must be a number.", s))?;
    Tolerance::new(value).map_err(|e| e.to_string())
}

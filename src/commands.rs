//! Command implementation for the tabcmp CLI

use crate::cli::Cli;
use crate::config::CompareOptions;
use crate::error::Result;
use crate::loader::{header_kinds, read_header, read_table};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::reference::{default_expected_root, reference_path, Flavor};
use crate::report::{compare_tables, ComparisonVerdict};
use crate::schema::{Schema, SchemaMismatch};
use std::path::{Path, PathBuf};

/// Run the comparison described by `cli` and print its verdict
pub fn execute(cli: &Cli) -> Result<ComparisonVerdict> {
    let options = CompareOptions::new(Schema::detected_sources(), cli.tolerance);
    let reference = resolve_reference(cli)?;
    log::info!(
        "Comparing {} against {}",
        cli.filename.display(),
        reference.display()
    );

    let mut progress = if cli.quiet || cli.json {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_compare()
    };
    let verdict = compare_files(&cli.filename, &reference, &options, &mut progress)?;
    drop(progress);

    if cli.json {
        println!("{}", JsonFormatter::format_verdict(&verdict, &cli.filename, &reference)?);
    } else if !cli.quiet {
        PrettyPrinter::print_verdict(&verdict);
    }

    Ok(verdict)
}

/// Explicit `--reference`, else the flavor-specific expected file
fn resolve_reference(cli: &Cli) -> Result<PathBuf> {
    if let Some(reference) = &cli.reference {
        return Ok(reference.clone());
    }

    let root = match &cli.expected_dir {
        Some(dir) => dir.clone(),
        None => default_expected_root()?,
    };
    reference_path(&root, Flavor::detect()?, &cli.filename)
}

/// Load two files and compare them.
///
/// Files whose headers disagree produce an aborted verdict. Headers that agree
/// with each other but not with `options.schema` are an error.
pub fn compare_files(
    input: &Path,
    reference: &Path,
    options: &CompareOptions,
    progress: &mut ProgressReporter,
) -> Result<ComparisonVerdict> {
    let input_header = read_header(input)?;
    let reference_header = read_header(reference)?;
    if input_header != reference_header {
        let mismatch = SchemaMismatch::between(
            &header_kinds(&reference_header, &options.schema),
            &header_kinds(&input_header, &options.schema),
        )
        .unwrap_or_default();
        return Ok(ComparisonVerdict::aborted(mismatch, options.tolerance));
    }

    let reference_table = read_table(reference, &options.schema)?;
    let input_table = read_table(input, &options.schema)?;
    progress.finish_loading(&format!("Loaded {} rows", input_table.row_count()));

    let verdict = compare_tables(&reference_table, &input_table, options.tolerance)?;
    progress.finish_compare(if verdict.passed() { "No differences" } else { "Differences found" });

    Ok(verdict)
}

//! Output formatting utilities

use crate::compare::{ColumnFailure, FailureDetail};
use crate::error::Result;
use crate::report::{ComparisonVerdict, Outcome};
use crate::schema::SchemaMismatch;
use crate::writer::format_g;
use std::path::Path;

/// Precision of printf's bare `%g`
const DIAGNOSTIC_PRECISION: usize = 6;

fn g(value: f64) -> String {
    format_g(value, DIAGNOSTIC_PRECISION)
}

/// Pretty printer for comparison verdicts
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a verdict to stdout
    pub fn print_verdict(verdict: &ComparisonVerdict) {
        for line in Self::verdict_lines(verdict) {
            println!("{}", line);
        }
    }

    /// Lines describing a verdict, ending in `Ok.` when it passed
    pub fn verdict_lines(verdict: &ComparisonVerdict) -> Vec<String> {
        match verdict.outcome() {
            Outcome::Passed => vec!["Ok.".to_string()],
            Outcome::Aborted(mismatch) => Self::mismatch_lines(mismatch),
            Outcome::Failed(failures) => {
                let tolerance = verdict.tolerance().value();
                let mut lines: Vec<String> = failures
                    .iter()
                    .flat_map(|failure| Self::failure_lines(failure, tolerance))
                    .collect();
                lines.push(format!(
                    "{} of {} columns failed over {} rows.",
                    failures.len(),
                    verdict.columns_compared(),
                    verdict.rows_compared()
                ));
                lines
            }
        }
    }

    fn failure_lines(failure: &ColumnFailure, tolerance: f64) -> Vec<String> {
        match &failure.failures {
            FailureDetail::Numeric(rows) => rows
                .iter()
                .map(|row| {
                    format!(
                        "Failed (absolute difference {}, relative difference {} over tolerance {}) in column {}.",
                        g(row.absolute),
                        g(row.relative),
                        g(tolerance),
                        failure.column
                    )
                })
                .collect(),
            FailureDetail::Categorical(_) => vec![format!(
                "Failed ({} of {} flags do not match) in column {}.",
                failure.failure_count, failure.total, failure.column
            )],
        }
    }

    fn mismatch_lines(mismatch: &SchemaMismatch) -> Vec<String> {
        let mut details = Vec::new();
        if !mismatch.missing.is_empty() {
            details.push(format!("Missing columns: {}", mismatch.missing.join(", ")));
        }
        if !mismatch.unexpected.is_empty() {
            details.push(format!("Unexpected columns: {}", mismatch.unexpected.join(", ")));
        }
        for change in &mismatch.kind_changes {
            details.push(format!("{}: {} → {}", change.column, change.reference, change.candidate));
        }
        for moved in &mismatch.moved {
            details.push(format!(
                "{}: position {} → {}",
                moved.column, moved.reference, moved.candidate
            ));
        }
        if let Some((reference, candidate)) = mismatch.row_counts {
            details.push(format!("Rows: {} in reference, {} in input", reference, candidate));
        }

        let mut lines = vec!["Files do not contain the same columns.".to_string()];
        for (i, detail) in details.iter().enumerate() {
            let prefix = if i == details.len() - 1 { "└─" } else { "├─" };
            lines.push(format!("{} {}", prefix, detail));
        }
        lines
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a verdict with the files it was computed from.
    ///
    /// Infinite differences serialize as `null`.
    pub fn format_verdict(verdict: &ComparisonVerdict, input: &Path, reference: &Path) -> Result<String> {
        let json = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "input": input.display().to_string(),
            "reference": reference.display().to_string(),
            "passed": verdict.passed(),
            "verdict": verdict,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

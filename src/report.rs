//! Comparison driver producing a single verdict

use crate::compare::{compare_columns, ColumnFailure, Tolerance};
use crate::error::Result;
use crate::schema::{validate_schema, SchemaMismatch};
use crate::table::Table;
use serde::Serialize;

/// Terminal state of a comparison run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "details", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed(Vec<ColumnFailure>),
    Aborted(SchemaMismatch),
}

/// Result of comparing a candidate table against a reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonVerdict {
    outcome: Outcome,
    tolerance: Tolerance,
    rows_compared: usize,
    columns_compared: usize,
}

impl ComparisonVerdict {
    /// Verdict for tables that could not be compared column by column
    pub fn aborted(mismatch: SchemaMismatch, tolerance: Tolerance) -> Self {
        log::warn!("Files do not contain the same columns: {}", mismatch);
        Self {
            outcome: Outcome::Aborted(mismatch),
            tolerance,
            rows_compared: 0,
            columns_compared: 0,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Failing columns in schema order; empty unless the outcome is `Failed`
    pub fn column_failures(&self) -> &[ColumnFailure] {
        match &self.outcome {
            Outcome::Failed(failures) => failures,
            _ => &[],
        }
    }

    pub fn schema_mismatch(&self) -> Option<&SchemaMismatch> {
        match &self.outcome {
            Outcome::Aborted(mismatch) => Some(mismatch),
            _ => None,
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Rows compared per column, zero when aborted
    pub fn rows_compared(&self) -> usize {
        self.rows_compared
    }

    pub fn columns_compared(&self) -> usize {
        self.columns_compared
    }
}

/// Compare `candidate` against `reference`.
///
/// A layout or row-count mismatch aborts before any values are looked at.
/// Disagreeing values are reported in the verdict, not as errors.
pub fn compare_tables(reference: &Table, candidate: &Table, tolerance: Tolerance) -> Result<ComparisonVerdict> {
    log::info!(
        "Comparing {} columns x {} rows at tolerance {}",
        reference.column_count(),
        reference.row_count(),
        tolerance
    );

    if let Err(mismatch) = validate_schema(reference, candidate) {
        return Ok(ComparisonVerdict::aborted(mismatch, tolerance));
    }
    if reference.row_count() != candidate.row_count() {
        let mismatch = SchemaMismatch::row_count(reference.row_count(), candidate.row_count());
        return Ok(ComparisonVerdict::aborted(mismatch, tolerance));
    }

    let failures = compare_columns(reference, candidate, tolerance)?;
    for failure in &failures {
        log::warn!(
            "Column {} failed: {} of {} rows",
            failure.column,
            failure.failure_count,
            failure.total
        );
    }

    let outcome = if failures.is_empty() {
        Outcome::Passed
    } else {
        Outcome::Failed(failures)
    };

    Ok(ComparisonVerdict {
        outcome,
        tolerance,
        rows_compared: reference.row_count(),
        columns_compared: reference.column_count(),
    })
}

//! Per-column comparison of two tables with identical layouts

use crate::difference::difference;
use crate::error::{CompareError, Result};
use crate::schema::ColumnKind;
use crate::table::{Column, ColumnData, Table};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when none is given
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// A non-negative comparison threshold
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(f64);

impl Tolerance {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value < 0.0 {
            return Err(CompareError::InvalidTolerance { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A float row outside tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowFailure {
    pub row: usize,
    pub absolute: f64,
    pub relative: f64,
}

/// A categorical row whose tokens differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMismatch {
    pub row: usize,
    pub reference: String,
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "lowercase")]
pub enum FailureDetail {
    Numeric(Vec<RowFailure>),
    Categorical(Vec<TokenMismatch>),
}

/// Every failing row of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFailure {
    pub column: String,
    pub kind: ColumnKind,
    pub failure_count: usize,
    pub total: usize,
    pub failures: FailureDetail,
}

impl ColumnFailure {
    /// Indices of the failing rows, ascending
    pub fn rows(&self) -> Vec<usize> {
        match &self.failures {
            FailureDetail::Numeric(rows) => rows.iter().map(|r| r.row).collect(),
            FailureDetail::Categorical(rows) => rows.iter().map(|r| r.row).collect(),
        }
    }

    /// Largest absolute difference among failing rows, `None` for categorical columns
    pub fn max_absolute(&self) -> Option<f64> {
        match &self.failures {
            FailureDetail::Numeric(rows) => rows.iter().map(|r| r.absolute).reduce(f64::max),
            FailureDetail::Categorical(_) => None,
        }
    }

    /// Largest relative difference among failing rows, `None` for categorical columns
    pub fn max_relative(&self) -> Option<f64> {
        match &self.failures {
            FailureDetail::Numeric(rows) => rows.iter().map(|r| r.relative).reduce(f64::max),
            FailureDetail::Categorical(_) => None,
        }
    }
}

/// Compare one column pair.
///
/// Float rows fail only when both the relative and the absolute difference
/// exceed `tolerance`. Categorical rows fail on any byte difference.
/// Returns `None` when every row matches.
pub fn compare_column(reference: &Column, candidate: &Column, tolerance: Tolerance) -> Result<Option<ColumnFailure>> {
    if reference.len() != candidate.len() {
        return Err(CompareError::invalid_input(format!(
            "Column '{}' has {} reference rows but {} candidate rows",
            reference.name,
            reference.len(),
            candidate.len()
        )));
    }

    let failures = match (&reference.data, &candidate.data) {
        (ColumnData::Float(a), ColumnData::Float(b)) => {
            let t = tolerance.value();
            let rows: Vec<RowFailure> = a
                .iter()
                .zip(b)
                .enumerate()
                .filter_map(|(row, (&x, &y))| {
                    let d = difference(x, y);
                    d.exceeds(t).then_some(RowFailure {
                        row,
                        absolute: d.absolute,
                        relative: d.relative,
                    })
                })
                .collect();
            (!rows.is_empty()).then_some(FailureDetail::Numeric(rows))
        }
        (ColumnData::Categorical(a), ColumnData::Categorical(b)) => {
            let rows: Vec<TokenMismatch> = a
                .iter()
                .zip(b)
                .enumerate()
                .filter(|(_, (x, y))| x != y)
                .map(|(row, (x, y))| TokenMismatch {
                    row,
                    reference: x.clone(),
                    candidate: y.clone(),
                })
                .collect();
            (!rows.is_empty()).then_some(FailureDetail::Categorical(rows))
        }
        _ => {
            return Err(CompareError::invalid_input(format!(
                "Column '{}' is {} in reference but {} in candidate",
                reference.name,
                reference.kind(),
                candidate.kind()
            )))
        }
    };

    Ok(failures.map(|failures| {
        let failure_count = match &failures {
            FailureDetail::Numeric(rows) => rows.len(),
            FailureDetail::Categorical(rows) => rows.len(),
        };
        log::debug!(
            "Column {}: {} of {} rows failed",
            reference.name,
            failure_count,
            reference.len()
        );
        ColumnFailure {
            column: reference.name.clone(),
            kind: reference.kind(),
            failure_count,
            total: reference.len(),
            failures,
        }
    }))
}

/// Compare every column of two tables whose layouts already match.
///
/// All columns are evaluated; failures come back in column order.
pub fn compare_columns(reference: &Table, candidate: &Table, tolerance: Tolerance) -> Result<Vec<ColumnFailure>> {
    let pairs: Vec<(&Column, &Column)> = reference
        .columns()
        .map(|column| {
            candidate
                .column(&column.name)
                .map(|other| (column, other))
                .ok_or_else(|| {
                    CompareError::invalid_input(format!("Column '{}' missing from candidate", column.name))
                })
        })
        .collect::<Result<_>>()?;

    let outcomes: Vec<Option<ColumnFailure>> = pairs
        .par_iter()
        .map(|(a, b)| compare_column(a, b, tolerance))
        .collect::<Result<_>>()?;

    Ok(outcomes.into_iter().flatten().collect())
}

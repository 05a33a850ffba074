//! Column layout declarations and schema validation

use crate::error::{CompareError, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How values in a column are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Floating point, compared within a tolerance
    Float,
    /// Short text token, compared exactly
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Maximum token length of the exporter's flag columns
pub const FLAG_WIDTH: usize = 5;

/// Name of the integer identifier column
pub const ID_COLUMN: &str = "id";

use ColumnKind::{Categorical as C, Float as F};

/// Column layout written by the detected-sources exporter
const DETECTED_SOURCES: &[(&str, ColumnKind)] = &[
    (ID_COLUMN, C),
    ("coord_ra", F),
    ("coord_dec", F),
    ("flags_negative", C),
    ("base_SdssCentroid_flag", C),
    ("base_PixelFlags_flag_edge", C),
    ("base_PixelFlags_flag_interpolated", C),
    ("base_PixelFlags_flag_interpolatedCenter", C),
    ("base_PixelFlags_flag_saturated", C),
    ("base_PixelFlags_flag_saturatedCenter", C),
    ("base_SdssCentroid_x", F),
    ("base_SdssCentroid_y", F),
    ("base_SdssCentroid_xErr", F),
    ("base_SdssCentroid_yErr", F),
    ("base_SdssShape_xx", F),
    ("base_SdssShape_xy", F),
    ("base_SdssShape_yy", F),
    ("base_SdssShape_xxErr", F),
    ("base_SdssShape_xyErr", F),
    ("base_SdssShape_yyErr", F),
    ("base_SdssShape_flag", C),
    ("base_GaussianFlux_instFlux", F),
    ("base_GaussianFlux_instFluxErr", F),
    ("base_PsfFlux_instFlux", F),
    ("base_PsfFlux_instFluxErr", F),
    ("base_CircularApertureFlux_6_0_instFlux", F),
    ("base_CircularApertureFlux_6_0_instFluxErr", F),
    ("base_ClassificationExtendedness_value", F),
];

/// A single declared column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    /// Maximum token length, categorical columns only
    pub width: Option<usize>,
}

/// Ordered list of declared columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Build a schema from `(name, kind)` pairs.
    ///
    /// Categorical columns get no width limit; use [`Schema::with_width`] to set one.
    pub fn new(columns: &[(&str, ColumnKind)]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut specs = Vec::with_capacity(columns.len());

        for &(name, kind) in columns {
            if !seen.insert(name) {
                return Err(CompareError::config(format!(
                    "Duplicate column '{}' in schema",
                    name
                )));
            }
            specs.push(ColumnSpec {
                name: name.to_string(),
                kind,
                width: None,
            });
        }

        Ok(Self { columns: specs })
    }

    /// Layout of the detected-sources export, flags limited to [`FLAG_WIDTH`]
    pub fn detected_sources() -> Self {
        let columns = DETECTED_SOURCES
            .iter()
            .map(|&(name, kind)| ColumnSpec {
                name: name.to_string(),
                kind,
                width: match kind {
                    ColumnKind::Categorical if name != ID_COLUMN => Some(FLAG_WIDTH),
                    _ => None,
                },
            })
            .collect();

        Self { columns }
    }

    /// Limit every categorical column to `width` characters
    pub fn with_width(mut self, width: usize) -> Self {
        for spec in &mut self.columns {
            if spec.kind == ColumnKind::Categorical {
                spec.width = Some(width);
            }
        }
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Kind disagreement for a column present in both tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindChange {
    pub column: String,
    pub reference: ColumnKind,
    pub candidate: ColumnKind,
}

/// A column found at different positions in the two tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedColumn {
    pub column: String,
    pub reference: usize,
    pub candidate: usize,
}

/// Why two tables cannot be compared column by column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMismatch {
    /// Columns in the reference but not in the candidate
    pub missing: Vec<String>,
    /// Columns in the candidate but not in the reference
    pub unexpected: Vec<String>,
    pub kind_changes: Vec<KindChange>,
    /// Columns at a different position, when both tables hold the same names
    pub moved: Vec<MovedColumn>,
    /// Row counts of (reference, candidate) when they differ
    pub row_counts: Option<(usize, usize)>,
}

impl SchemaMismatch {
    /// Compare two ordered `(name, kind)` lists
    pub fn between(
        reference: &[(&str, ColumnKind)],
        candidate: &[(&str, ColumnKind)],
    ) -> Option<Self> {
        let ref_names: Vec<&str> = reference.iter().map(|(n, _)| *n).collect();
        let cand_names: Vec<&str> = candidate.iter().map(|(n, _)| *n).collect();

        let missing: Vec<String> = ref_names
            .iter()
            .filter(|n| !cand_names.contains(*n))
            .map(|n| n.to_string())
            .collect();
        let unexpected: Vec<String> = cand_names
            .iter()
            .filter(|n| !ref_names.contains(*n))
            .map(|n| n.to_string())
            .collect();

        let kind_changes: Vec<KindChange> = reference
            .iter()
            .filter_map(|&(name, ref_kind)| {
                candidate
                    .iter()
                    .find(|(n, _)| *n == name)
                    .filter(|(_, cand_kind)| *cand_kind != ref_kind)
                    .map(|&(_, cand_kind)| KindChange {
                        column: name.to_string(),
                        reference: ref_kind,
                        candidate: cand_kind,
                    })
            })
            .collect();

        let moved: Vec<MovedColumn> = if missing.is_empty() && unexpected.is_empty() {
            ref_names
                .iter()
                .enumerate()
                .filter_map(|(position, name)| {
                    let found = cand_names.iter().position(|n| n == name)?;
                    (found != position).then(|| MovedColumn {
                        column: name.to_string(),
                        reference: position,
                        candidate: found,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let mismatch = Self {
            missing,
            unexpected,
            kind_changes,
            moved,
            row_counts: None,
        };

        if mismatch.is_empty() {
            None
        } else {
            Some(mismatch)
        }
    }

    pub fn row_count(reference: usize, candidate: usize) -> Self {
        Self {
            row_counts: Some((reference, candidate)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
            && self.unexpected.is_empty()
            && self.kind_changes.is_empty()
            && self.moved.is_empty()
            && self.row_counts.is_none()
    }

    /// Names of every column involved in the mismatch
    pub fn columns(&self) -> Vec<&str> {
        self.missing
            .iter()
            .chain(&self.unexpected)
            .map(String::as_str)
            .chain(self.kind_changes.iter().map(|k| k.column.as_str()))
            .chain(self.moved.iter().map(|m| m.column.as_str()))
            .collect()
    }
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing columns [{}]", self.missing.join(", ")));
        }
        if !self.unexpected.is_empty() {
            parts.push(format!("unexpected columns [{}]", self.unexpected.join(", ")));
        }
        for change in &self.kind_changes {
            parts.push(format!(
                "column {} is {} in reference but {} in candidate",
                change.column, change.reference, change.candidate
            ));
        }
        for moved in &self.moved {
            parts.push(format!(
                "column {} is at position {} in reference but {} in candidate",
                moved.column, moved.reference, moved.candidate
            ));
        }
        if let Some((reference, candidate)) = self.row_counts {
            parts.push(format!(
                "row count differs ({} in reference, {} in candidate)",
                reference, candidate
            ));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Check that two tables share column names, order and kinds
pub fn validate_schema(reference: &Table, candidate: &Table) -> std::result::Result<(), SchemaMismatch> {
    match SchemaMismatch::between(&reference.kinds(), &candidate.kinds()) {
        Some(mismatch) => Err(mismatch),
        None => Ok(()),
    }
}

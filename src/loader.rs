//! Reader for the exporter's whitespace-separated text tables
//!
//! The first line is a header: `#` followed by the column names. Every later
//! non-blank line that does not start with `#` is one row, with one field per
//! declared column.

use crate::error::{CompareError, Result};
use crate::schema::{ColumnKind, ColumnSpec, Schema, SchemaMismatch, ID_COLUMN};
use crate::table::{Column, ColumnData, Table};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a table from `path`, checking its header against `schema`
pub fn read_table(path: &Path, schema: &Schema) -> Result<Table> {
    if !path.is_file() {
        return Err(CompareError::invalid_input(format!(
            "{} is not a file.",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let table = parse_table(BufReader::new(file), schema)?;
    log::debug!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Column names from a header line, without the leading `#`
pub fn parse_header(line: &str) -> Option<Vec<String>> {
    let names = line.trim_start().strip_prefix('#')?;
    Some(names.split_whitespace().map(str::to_string).collect())
}

/// Parse a table from any buffered reader
pub fn parse_table<R: BufRead>(reader: R, schema: &Schema) -> Result<Table> {
    let mut lines = reader.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) => line?,
        None => return Err(CompareError::malformed(1, "", "empty input, expected a header")),
    };
    let names = parse_header(&header)
        .ok_or_else(|| CompareError::malformed(1, "", "header line must start with '#'"))?;
    check_header(&names, schema)?;

    let mut builders: Vec<ColumnBuilder> = schema.columns().iter().map(ColumnBuilder::new).collect();

    for (index, line) in lines {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != builders.len() {
            return Err(CompareError::malformed(
                line_no,
                "",
                format!("expected {} fields, found {}", builders.len(), fields.len()),
            ));
        }

        for (builder, field) in builders.iter_mut().zip(fields) {
            builder.push(field, line_no)?;
        }
    }

    Table::new(builders.into_iter().map(ColumnBuilder::finish).collect())
}

/// Read only the header line of `path`
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let mut line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    parse_header(&line).ok_or_else(|| CompareError::malformed(1, "", "header line must start with '#'"))
}

/// Pair header names with their declared kinds.
///
/// The header carries names only, so names unknown to `schema` are treated as categorical.
pub fn header_kinds<'a>(names: &'a [String], schema: &Schema) -> Vec<(&'a str, ColumnKind)> {
    names
        .iter()
        .map(|n| (n.as_str(), schema.get(n).map_or(ColumnKind::Categorical, |c| c.kind)))
        .collect()
}

fn check_header(names: &[String], schema: &Schema) -> Result<()> {
    let found: Vec<&str> = names.iter().map(String::as_str).collect();
    if schema.names() == found {
        return Ok(());
    }

    let expected: Vec<(&str, ColumnKind)> = schema
        .columns()
        .iter()
        .map(|c| (c.name.as_str(), c.kind))
        .collect();
    let mismatch = SchemaMismatch::between(&expected, &header_kinds(names, schema)).unwrap_or_default();
    Err(CompareError::SchemaMismatch(mismatch))
}

struct ColumnBuilder<'a> {
    spec: &'a ColumnSpec,
    data: ColumnData,
}

impl<'a> ColumnBuilder<'a> {
    fn new(spec: &'a ColumnSpec) -> Self {
        let data = match spec.kind {
            ColumnKind::Float => ColumnData::Float(Vec::new()),
            ColumnKind::Categorical => ColumnData::Categorical(Vec::new()),
        };
        Self { spec, data }
    }

    fn push(&mut self, field: &str, line: usize) -> Result<()> {
        match &mut self.data {
            ColumnData::Float(values) => {
                let value = field.parse::<f64>().map_err(|_| {
                    CompareError::malformed(line, &self.spec.name, format!("'{}' is not a number", field))
                })?;
                values.push(value);
            }
            ColumnData::Categorical(values) if self.spec.name == ID_COLUMN => {
                let id = field.parse::<i64>().map_err(|_| {
                    CompareError::malformed(line, &self.spec.name, format!("'{}' is not an integer id", field))
                })?;
                values.push(id.to_string());
            }
            ColumnData::Categorical(values) => {
                if let Some(width) = self.spec.width {
                    if field.chars().count() > width {
                        return Err(CompareError::malformed(
                            line,
                            &self.spec.name,
                            format!("'{}' is longer than {} characters", field, width),
                        ));
                    }
                }
                values.push(field.to_string());
            }
        }
        Ok(())
    }

    fn finish(self) -> Column {
        Column {
            name: self.spec.name.clone(),
            data: self.data,
        }
    }
}

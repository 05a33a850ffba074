//! In-memory tables of typed columns

use crate::error::{CompareError, Result};
use crate::schema::ColumnKind;
use indexmap::IndexMap;
use serde::Serialize;

/// Values of a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Float(Vec<f64>),
    Categorical(Vec<String>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Float(_) => ColumnKind::Float,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Float(values),
        }
    }

    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, rejecting duplicate names and ragged columns
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        let mut index = IndexMap::with_capacity(columns.len());

        for column in columns {
            if column.len() != row_count {
                return Err(CompareError::invalid_input(format!(
                    "Column '{}' has {} rows, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
            if index.contains_key(&column.name) {
                return Err(CompareError::invalid_input(format!(
                    "Duplicate column '{}'",
                    column.name
                )));
            }
            index.insert(column.name.clone(), column);
        }

        Ok(Self {
            columns: index,
            row_count,
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get_index(index).map(|(_, column)| column)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// `(name, kind)` for every column in order
    pub fn kinds(&self) -> Vec<(&str, ColumnKind)> {
        self.columns
            .values()
            .map(|c| (c.name.as_str(), c.kind()))
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}

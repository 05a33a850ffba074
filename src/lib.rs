//! # tabcmp
//!
//! Regression comparison of tabular pipeline output against trusted reference
//! data. Float columns are compared within a tolerance on both the absolute and
//! relative scale; flag columns must match exactly.

pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod difference;
pub mod error;
pub mod loader;
pub mod output;
pub mod progress;
pub mod reference;
pub mod report;
pub mod schema;
pub mod table;
pub mod writer;

pub use compare::{Tolerance, DEFAULT_TOLERANCE};
pub use difference::{difference, Difference};
pub use error::{CompareError, Result};
pub use report::{compare_tables, ComparisonVerdict, Outcome};
pub use schema::{ColumnKind, Schema};
pub use table::{Column, ColumnData, Table};

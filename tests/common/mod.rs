//! Common test utilities and helpers

use std::fs;
use std::path::{Path, PathBuf};
use tabcmp::schema::{ColumnKind, Schema, ID_COLUMN};
use tabcmp::table::{Column, ColumnData, Table};
use tabcmp::writer::write_table;
use tabcmp::{ComparisonVerdict, Result};
use tempfile::TempDir;

/// Test fixture manager for creating temporary test environments
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a table in the exporter's text format
    pub fn create_table(&self, name: &str, table: &Table) -> Result<PathBuf> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_table(fs::File::create(&path)?, table)?;
        Ok(path)
    }

    /// Write a file with raw string content
    pub fn create_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Helper for running CLI commands in tests
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Run tabcmp with `args` and return the verdict
    pub fn run_command(&self, args: &[&str]) -> Result<ComparisonVerdict> {
        use clap::Parser;
        use tabcmp::cli::Cli;
        use tabcmp::commands::execute;

        let mut cmd_args = vec!["tabcmp"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| tabcmp::CompareError::invalid_input(e.to_string()))?;
        execute(&cli)
    }

    /// Run a comparison and expect a passing verdict
    pub fn expect_pass(&self, args: &[&str]) -> ComparisonVerdict {
        let verdict = self.run_command(args).expect("Command should succeed");
        assert!(verdict.passed(), "Expected verdict to pass: {:?}", verdict);
        verdict
    }

    /// Run a comparison and expect a verdict that did not pass
    pub fn expect_fail(&self, args: &[&str]) -> ComparisonVerdict {
        let verdict = self.run_command(args).expect("Command should succeed");
        assert!(!verdict.passed(), "Expected verdict to fail");
        verdict
    }

    /// Run a command and expect an error
    pub fn expect_error(&self, args: &[&str]) -> tabcmp::CompareError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Sample data generators for testing
pub mod sample_data {
    use super::*;

    /// A detected-sources table with `rows` deterministic rows
    pub fn detected_sources(rows: usize) -> Table {
        let schema = Schema::detected_sources();
        let columns = schema
            .columns()
            .iter()
            .enumerate()
            .map(|(c, spec)| match spec.kind {
                ColumnKind::Categorical if spec.name == ID_COLUMN => {
                    Column::categorical(ID_COLUMN, (0..rows).map(|r| (1000 + r).to_string()))
                }
                ColumnKind::Categorical => Column::categorical(
                    spec.name.clone(),
                    (0..rows).map(|r| if (r + c) % 3 == 0 { "True" } else { "False" }),
                ),
                ColumnKind::Float => Column::float(
                    spec.name.clone(),
                    (0..rows)
                        .map(|r| match (r + c) % 7 {
                            0 => 0.0,
                            1 => f64::NAN,
                            k => (k as f64) * 12.345678901 + r as f64 / 3.0,
                        })
                        .collect(),
                ),
            })
            .collect();
        Table::new(columns).expect("sample table should be valid")
    }

    /// Copy of `table` with one float cell replaced
    pub fn with_float(table: &Table, column: &str, row: usize, value: f64) -> Table {
        let columns = table
            .columns()
            .map(|c| {
                let mut c = c.clone();
                if c.name == column {
                    if let ColumnData::Float(values) = &mut c.data {
                        values[row] = value;
                    }
                }
                c
            })
            .collect();
        Table::new(columns).expect("modified table should be valid")
    }

    /// Copy of `table` with one categorical cell replaced
    pub fn with_token(table: &Table, column: &str, row: usize, token: &str) -> Table {
        let columns = table
            .columns()
            .map(|c| {
                let mut c = c.clone();
                if c.name == column {
                    if let ColumnData::Categorical(values) = &mut c.data {
                        values[row] = token.to_string();
                    }
                }
                c
            })
            .collect();
        Table::new(columns).expect("modified table should be valid")
    }
}

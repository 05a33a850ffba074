//! Edge cases in table contents

use crate::common::CliTestRunner;
use std::io::Cursor;
use tabcmp::loader::parse_table;
use tabcmp::schema::{ColumnKind, Schema};
use tabcmp::{compare_tables, CompareError, Tolerance};

fn xy_schema() -> Schema {
    Schema::new(&[("x", ColumnKind::Float), ("flag", ColumnKind::Categorical)])
        .unwrap()
        .with_width(5)
}

fn load(content: &str) -> tabcmp::Table {
    parse_table(Cursor::new(content), &xy_schema()).unwrap()
}

#[test]
fn test_nan_and_infinity_tokens() {
    let reference = load("#x flag\nnan T\ninf F\n-inf T\nNaN F\n");
    let candidate = load("#x flag\nNaN T\ninf F\n-inf T\nnan F\n");

    let verdict = compare_tables(&reference, &candidate, Tolerance::new(0.0).unwrap()).unwrap();
    assert!(verdict.passed());
}

#[test]
fn test_nan_against_number_fails() {
    let reference = load("#x flag\nnan T\n");
    let candidate = load("#x flag\n1.5 T\n");

    let verdict = compare_tables(&reference, &candidate, Tolerance::new(1e300).unwrap()).unwrap();
    assert!(!verdict.passed());
    assert_eq!(verdict.column_failures()[0].max_absolute(), Some(f64::INFINITY));
}

#[test]
fn test_zero_against_tiny_value_fails() {
    let reference = load("#x flag\n0 T\n");
    let candidate = load("#x flag\n1e-300 T\n");

    let verdict = compare_tables(&reference, &candidate, Tolerance::new(1.0).unwrap()).unwrap();
    assert!(!verdict.passed());
}

#[test]
fn test_signed_zero_passes() {
    let reference = load("#x flag\n0 T\n");
    let candidate = load("#x flag\n-0 T\n");

    let verdict = compare_tables(&reference, &candidate, Tolerance::new(0.0).unwrap()).unwrap();
    assert!(verdict.passed());
}

#[test]
fn test_header_only_tables_pass() {
    let reference = load("#x flag\n");
    let candidate = load("#x flag\n\n");

    let verdict = compare_tables(&reference, &candidate, Tolerance::default()).unwrap();
    assert!(verdict.passed());
    assert_eq!(verdict.rows_compared(), 0);
}

#[test]
fn test_flag_case_matters() {
    let reference = load("#x flag\n1 True\n");
    let candidate = load("#x flag\n1 TRUE\n");

    let verdict = compare_tables(&reference, &candidate, Tolerance::default()).unwrap();
    assert_eq!(verdict.column_failures()[0].column, "flag");
}

#[test]
fn test_malformed_float_is_an_error() {
    let err = parse_table(Cursor::new("#x flag\n1.0.0 T\n"), &xy_schema()).unwrap_err();
    match err {
        CompareError::MalformedInput { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, "x");
        }
        other => panic!("Expected MalformedInput, got {:?}", other),
    }
}

#[test]
fn test_malformed_candidate_through_cli() {
    let runner = CliTestRunner::new().unwrap();
    let header = "#id coord_ra";
    let reference = runner.fixture().create_raw("ref.txt", &format!("{}\n1 1.0\n", header)).unwrap();
    let input = runner.fixture().create_raw("input.txt", &format!("{}\n1 abc\n", header)).unwrap();

    // Same header on both sides, but not the detected-sources layout
    let err = runner.expect_error(&[
        input.to_str().unwrap(),
        "--reference",
        reference.to_str().unwrap(),
        "--quiet",
    ]);
    assert!(matches!(err, CompareError::SchemaMismatch(_)));
}

#[test]
fn test_invalid_tolerance_rejected() {
    assert!(matches!(
        Tolerance::new(-1e-10),
        Err(CompareError::InvalidTolerance { .. })
    ));
}

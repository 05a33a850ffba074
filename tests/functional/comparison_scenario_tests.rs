//! End-to-end behaviour of the comparison core on in-memory tables

use tabcmp::compare::FailureDetail;
use tabcmp::{compare_tables, difference, Column, Outcome, Table, Tolerance};

fn tol(value: f64) -> Tolerance {
    Tolerance::new(value).unwrap()
}

#[test]
fn test_float_column_with_zero_and_nan() {
    let reference = Table::new(vec![Column::float("x", vec![1.0, 0.0, f64::NAN])]).unwrap();
    let candidate = Table::new(vec![Column::float("x", vec![1.0000000001, 1.0, f64::NAN])]).unwrap();

    let verdict = compare_tables(&reference, &candidate, tol(1e-6)).unwrap();
    assert!(!verdict.passed());

    let failures = verdict.column_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].column, "x");
    assert_eq!(failures[0].failure_count, 1);
    assert_eq!(failures[0].total, 3);

    match &failures[0].failures {
        FailureDetail::Numeric(rows) => {
            assert_eq!(rows[0].row, 1);
            assert!(rows[0].absolute.is_infinite());
            assert!(rows[0].relative.is_infinite());
        }
        other => panic!("Expected numeric failures, got {:?}", other),
    }
}

#[test]
fn test_identical_tables_pass_at_any_tolerance() {
    let table = Table::new(vec![
        Column::categorical("id", ["1", "2", "3"]),
        Column::float("ra", vec![10.5, 0.0, f64::NAN]),
        Column::float("dec", vec![-1e-300, f64::INFINITY, 42.0]),
        Column::categorical("flag", ["True", "False", "-"]),
    ])
    .unwrap();

    for t in [0.0, 1e-10, 1.0, 1e300] {
        let verdict = compare_tables(&table, &table, tol(t)).unwrap();
        assert!(verdict.passed());
        assert!(verdict.column_failures().is_empty());
        assert_eq!(verdict.outcome(), &Outcome::Passed);
    }
}

#[test]
fn test_categorical_column_ignores_tolerance() {
    let reference = Table::new(vec![Column::categorical("flag", ["T", "F", "T"])]).unwrap();
    let candidate = Table::new(vec![Column::categorical("flag", ["T", "T", "T"])]).unwrap();

    for t in [0.0, 1e-10, 1e10] {
        let verdict = compare_tables(&reference, &candidate, tol(t)).unwrap();
        let failures = verdict.column_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].failure_count, 1);
        assert_eq!(failures[0].rows(), vec![1]);
    }
}

#[test]
fn test_extra_column_aborts_without_numeric_work() {
    let reference = Table::new(vec![
        Column::categorical("id", ["1"]),
        Column::float("ra", vec![1.0]),
        Column::float("dec", vec![1.0]),
    ])
    .unwrap();
    // Values differ wildly; an abort must not report them
    let candidate = Table::new(vec![
        Column::categorical("id", ["2"]),
        Column::float("ra", vec![1e9]),
        Column::float("dec", vec![-1e9]),
        Column::float("extra", vec![0.0]),
    ])
    .unwrap();

    let verdict = compare_tables(&reference, &candidate, tol(1e-10)).unwrap();
    assert!(!verdict.passed());
    assert!(verdict.column_failures().is_empty());
    assert_eq!(verdict.rows_compared(), 0);

    let mismatch = verdict.schema_mismatch().expect("Expected an aborted verdict");
    assert_eq!(mismatch.unexpected, vec!["extra"]);
    assert!(mismatch.missing.is_empty());
}

#[test]
fn test_kind_mismatch_aborts() {
    let reference = Table::new(vec![Column::float("x", vec![1.0])]).unwrap();
    let candidate = Table::new(vec![Column::categorical("x", ["1.0"])]).unwrap();

    let verdict = compare_tables(&reference, &candidate, tol(0.0)).unwrap();
    let mismatch = verdict.schema_mismatch().unwrap();
    assert_eq!(mismatch.kind_changes.len(), 1);
    assert_eq!(mismatch.columns(), vec!["x"]);
}

#[test]
fn test_every_failing_column_is_reported() {
    let reference = Table::new(vec![
        Column::float("a", vec![1.0, 2.0]),
        Column::float("b", vec![1.0, 2.0]),
        Column::categorical("f", ["T", "F"]),
        Column::float("c", vec![1.0, 2.0]),
    ])
    .unwrap();
    let candidate = Table::new(vec![
        Column::float("a", vec![1.5, 2.0]),
        Column::float("b", vec![1.0, 2.0]),
        Column::categorical("f", ["F", "T"]),
        Column::float("c", vec![1.0, -2.0]),
    ])
    .unwrap();

    let verdict = compare_tables(&reference, &candidate, tol(1e-10)).unwrap();
    let names: Vec<&str> = verdict.column_failures().iter().map(|f| f.column.as_str()).collect();
    assert_eq!(names, vec!["a", "f", "c"]);
    assert_eq!(verdict.column_failures()[1].failure_count, 2);
}

#[test]
fn test_tolerance_boundary_needs_both_scales() {
    let t = 1e-3;
    // relative > t, absolute <= t
    let small = difference(1e-6, 2e-6);
    assert!(small.relative > t && small.absolute <= t);
    // absolute > t, relative <= t
    let large = difference(1e6, 1e6 + 1.0);
    assert!(large.absolute > t && large.relative <= t);

    let reference = Table::new(vec![Column::float("x", vec![1e-6, 1e6, 1.0])]).unwrap();
    let candidate = Table::new(vec![Column::float("x", vec![2e-6, 1e6 + 1.0, 2.0])]).unwrap();

    let verdict = compare_tables(&reference, &candidate, tol(t)).unwrap();
    let failures = verdict.column_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].rows(), vec![2]);
}

#[test]
fn test_failure_magnitudes_are_reported() {
    let reference = Table::new(vec![Column::float("x", vec![10.0, 100.0])]).unwrap();
    let candidate = Table::new(vec![Column::float("x", vec![11.0, 150.0])]).unwrap();

    let verdict = compare_tables(&reference, &candidate, tol(1e-3)).unwrap();
    let failure = &verdict.column_failures()[0];
    assert_eq!(failure.max_absolute(), Some(50.0));
    assert_eq!(failure.max_relative(), Some(0.5));
}

//! Tests for individual stages and the ordering rules between them.

mod support;

use polars::prelude::{IntoColumn, NamedFrom, Series};
use sales_transform::stages::{
    DecomposeDates, FilterMissing, NormalizeColumns, ParseDates, SegmentCustomers, StandardizeText,
    decompose_order_dates, segment_customers, standardize_text,
};
use sales_transform::{SalesFrame, StageCondition, TransformError, transform};
use support::{canonical_frame, floats, order, strings};

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn segmentation_before_standardization_is_rejected() {
    let mut frame = SalesFrame::new(canonical_frame(&[order("A1", "acme", 1.0)]));
    frame.apply(&NormalizeColumns).unwrap();
    frame.apply(&ParseDates).unwrap();

    let err = frame.apply(&SegmentCustomers).unwrap_err();
    assert!(matches!(
        err,
        TransformError::PreconditionNotMet {
            stage: "segment_customers",
            missing: StageCondition::TextStandardized,
        }
    ));
    assert!(!frame.is_established(StageCondition::CustomersSegmented));
    assert!(frame.data().column("customer_segment").is_err());
}

#[test]
fn decompose_requires_parsed_dates() {
    let mut frame = SalesFrame::new(canonical_frame(&[order("A1", "acme", 1.0)]));
    frame.apply(&NormalizeColumns).unwrap();
    frame.apply(&FilterMissing).unwrap();

    let err = frame.apply(&DecomposeDates).unwrap_err();
    assert!(matches!(
        err,
        TransformError::PreconditionNotMet {
            missing: StageCondition::DatesParsed,
            ..
        }
    ));
}

#[test]
fn replaying_a_stage_is_rejected() {
    let mut frame = SalesFrame::new(canonical_frame(&[order("A1", "acme", 1.0)]));
    frame.apply(&NormalizeColumns).unwrap();
    frame.apply(&FilterMissing).unwrap();
    frame.apply(&StandardizeText).unwrap();

    let err = frame.apply(&StandardizeText).unwrap_err();
    assert!(matches!(
        err,
        TransformError::StageReplayed {
            stage: "standardize_text",
        }
    ));
    assert_eq!(frame.report().stages.len(), 3);
}

#[test]
fn failed_stage_establishes_nothing() {
    let df = canonical_frame(&[order("A1", "acme", 1.0)])
        .drop("order_date")
        .unwrap();
    let mut frame = SalesFrame::new(df);
    frame.apply(&NormalizeColumns).unwrap();

    assert!(frame.apply(&ParseDates).is_err());
    assert!(!frame.is_established(StageCondition::DatesParsed));
    assert!(frame.is_established(StageCondition::ColumnsNormalized));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn decomposition_twice_is_a_no_op() {
    let rows = [
        order("A1", "acme", 1.0).date("12/31/2004 0:00"),
        order("A2", "acme", 1.0).date("bogus"),
    ];
    let mut df = transform(canonical_frame(&rows)).unwrap().data;
    let before = df.clone();

    decompose_order_dates(&mut df).unwrap();
    assert!(df.equals_missing(&before));
}

#[test]
fn decomposition_reads_only_canonical_dates() {
    let rows = [
        order("A1", "acme", 1.0).date("2004-03-01 00:00:00"),
        order("A2", "acme", 1.0).date("3/1/2004 0:00"),
    ];
    let mut df = canonical_frame(&rows);

    decompose_order_dates(&mut df).unwrap();
    assert_eq!(
        strings(&df, "year_month"),
        vec![Some("2004-03".to_string()), None]
    );
}

#[test]
fn standardization_twice_is_a_no_op() {
    let rows = [
        order("A1", "  mini gifts DISTRIBUTORS ltd.", 1.0),
        order("A2", "o'brien's toys", 1.0),
    ];
    let mut df = transform(canonical_frame(&rows)).unwrap().data;
    let before = df.clone();

    standardize_text(&mut df).unwrap();
    assert!(df.equals_missing(&before));
    assert_eq!(
        strings(&df, "customer_name"),
        vec![
            Some("Mini Gifts Distributors Ltd.".to_string()),
            Some("O'Brien'S Toys".to_string()),
        ]
    );
}

#[test]
fn non_text_column_is_a_type_error() {
    let mut df = canonical_frame(&[order("A1", "acme", 1.0)]);
    let city = Series::new("city".into(), vec![Some(7i64)]);
    df.with_column(city.into_column()).unwrap();

    let err = standardize_text(&mut df).unwrap_err();
    match err {
        TransformError::TypeMismatch {
            stage,
            column,
            expected,
            ..
        } => {
            assert_eq!(stage, "standardize_text");
            assert_eq!(column, "city");
            assert_eq!(expected, "text");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn text_sales_column_is_a_type_error() {
    let mut df = canonical_frame(&[order("A1", "acme", 1.0)]);
    let total_sales = Series::new("total_sales".into(), vec!["1,000"]);
    df.with_column(total_sales.into_column()).unwrap();

    let err = transform(df).unwrap_err();
    assert!(matches!(
        err,
        TransformError::TypeMismatch {
            stage: "derive_metrics",
            ..
        }
    ));
}

// ============================================================================
// Segmentation
// ============================================================================

#[test]
fn case_variants_share_one_customer() {
    let rows = [
        order("A1", "acme corp", 30_000.0).date("1/5/2003 0:00"),
        order("A1", " ACME CORP ", 25_000.0).date("1/5/2003 0:00"),
        order("A2", "Acme Corp", 100_000.0).date("6/9/2004 0:00"),
        order("B1", "zeta", 10.0).date("2/2/2003 0:00"),
    ];
    let output = transform(canonical_frame(&rows)).unwrap();
    let df = &output.data;

    assert_eq!(
        floats(df, "customer_lifetime_value"),
        vec![
            Some(155_000.0),
            Some(155_000.0),
            Some(155_000.0),
            Some(10.0),
        ]
    );
    let counts: Vec<Option<i64>> = df
        .column("order_count")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(counts, vec![Some(2), Some(2), Some(2), Some(1)]);
    assert_eq!(
        strings(df, "last_order_date")[0],
        Some("2004-06-09 00:00:00".to_string())
    );
    assert_eq!(
        strings(df, "customer_segment"),
        vec![
            Some("High Value".to_string()),
            Some("High Value".to_string()),
            Some("High Value".to_string()),
            Some("Low Value".to_string()),
        ]
    );
    assert_eq!(output.report.customers, 2);
    assert_eq!(output.report.customers_by_segment["High Value"], 1);
    assert_eq!(output.report.customers_by_segment["Medium Value"], 0);
    assert_eq!(output.report.customers_by_segment["Low Value"], 1);
}

#[test]
fn segment_bounds_are_half_open() {
    let rows = [
        order("A1", "alpha", 49_999.99),
        order("B1", "beta", 50_000.0),
        order("C1", "gamma", 149_999.99),
        order("D1", "delta", 150_000.0),
        order("E1", "epsilon", 0.0),
    ];
    let output = transform(canonical_frame(&rows)).unwrap();

    assert_eq!(
        strings(&output.data, "customer_segment"),
        vec![
            Some("Low Value".to_string()),
            Some("Medium Value".to_string()),
            Some("Medium Value".to_string()),
            Some("High Value".to_string()),
            Some("Low Value".to_string()),
        ]
    );
}

#[test]
fn customer_without_parsed_dates_has_null_last_order() {
    let mut frame = SalesFrame::new(canonical_frame(&[order("A1", "Acme", 1.0).date("n/a")]));
    frame.apply(&NormalizeColumns).unwrap();
    frame.apply(&ParseDates).unwrap();
    let (mut df, report) = frame.into_parts();
    assert_eq!(report.unparseable_dates, 1);

    let summary = segment_customers(&mut df).unwrap();
    assert_eq!(summary.customers, 1);
    assert_eq!(strings(&df, "last_order_date"), vec![None]);
}

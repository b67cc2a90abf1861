//! Tests for report export and KPI computation.

use chrono::NaiveDate;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use sales_report::{
    MonthlyRevenue, ProductRevenue, ReportError, StatusCount, compute_kpis, export_report,
    report_dir_name,
};

fn processed() -> DataFrame {
    let (bikes, cars) = ("Motorcycles", "Classic Cars");
    let (low, medium) = ("Low Value", "Medium Value");
    DataFrame::new(vec![
        Series::new(
            "order_id".into(),
            vec![10107i64, 10107, 10121, 10134, 10145],
        )
        .into_column(),
        Series::new(
            "year_month".into(),
            vec!["2003-02", "2003-02", "2003-05", "2004-07", "2004-08"],
        )
        .into_column(),
        Series::new("year".into(), vec![2003i64, 2003, 2003, 2004, 2004]).into_column(),
        Series::new(
            "product_line".into(),
            vec![bikes, cars, bikes, "Ships", cars],
        )
        .into_column(),
        Series::new("territory".into(), vec!["NA", "NA", "EMEA", "EMEA", "NA"]).into_column(),
        Series::new(
            "customer_segment".into(),
            vec![low, low, medium, medium, low],
        )
        .into_column(),
        Series::new(
            "order_status".into(),
            vec!["Shipped", "Shipped", "Shipped", "Cancelled", "On Hold"],
        )
        .into_column(),
        Series::new("total_sales".into(), vec![100.0, 200.0, 300.0, 600.0, 50.0]).into_column(),
        Series::new("quantity".into(), vec![10i64, 20, 30, 40, 5]).into_column(),
    ])
    .unwrap()
}

#[test]
fn report_directory_is_dated() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    insta::assert_snapshot!(report_dir_name(date), @"sales_report_20240305");
}

#[test]
fn export_writes_three_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    let files = export_report(&processed(), dir.path(), date).unwrap();

    assert_eq!(files.dir, dir.path().join("sales_report_20240315"));
    for sheet in files.sheets() {
        assert!(sheet.exists(), "{} missing", sheet.display());
    }

    let summary = std::fs::read_to_string(&files.summary).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines[0],
        "month,product_line,territory,revenue,units_sold,num_orders"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("2003-02,Classic Cars,NA,200"));

    let territory = std::fs::read_to_string(&files.territory_analysis).unwrap();
    assert_eq!(territory.lines().next(), Some("territory,2003,2004"));
    assert!(territory.lines().nth(1).unwrap().starts_with("EMEA,300"));
}

#[test]
fn export_requires_year() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let df = processed().drop("year").unwrap();

    let err = export_report(&df, dir.path(), date).unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn { column } if column == "year"));
}

#[test]
fn kpis_over_processed_dataset() {
    let kpis = compute_kpis(&processed()).unwrap();

    assert_eq!(
        kpis.monthly_revenue,
        vec![
            MonthlyRevenue {
                month: "2003-02".to_string(),
                revenue: 300.0,
            },
            MonthlyRevenue {
                month: "2003-05".to_string(),
                revenue: 300.0,
            },
            MonthlyRevenue {
                month: "2004-07".to_string(),
                revenue: 600.0,
            },
            MonthlyRevenue {
                month: "2004-08".to_string(),
                revenue: 50.0,
            },
        ]
    );
    assert_eq!(
        kpis.top_products,
        vec![
            ProductRevenue {
                product_line: "Ships".to_string(),
                revenue: 600.0,
            },
            ProductRevenue {
                product_line: "Motorcycles".to_string(),
                revenue: 400.0,
            },
            ProductRevenue {
                product_line: "Classic Cars".to_string(),
                revenue: 250.0,
            },
        ]
    );

    let growth: Vec<(i64, Option<f64>)> = kpis
        .yoy_growth
        .iter()
        .map(|year| (year.year, year.growth_pct))
        .collect();
    assert_eq!(growth, vec![(2003, None), (2004, Some(8.333333333333332))]);

    assert_eq!(
        kpis.status_distribution[0],
        StatusCount {
            status: "Shipped".to_string(),
            rows: 3,
        }
    );
    assert_eq!(kpis.status_distribution.len(), 3);

    let segments: Vec<(&str, &str, f64)> = kpis
        .segment_territory
        .iter()
        .map(|row| (row.segment.as_str(), row.territory.as_str(), row.revenue))
        .collect();
    assert_eq!(
        segments,
        vec![("Low Value", "NA", 350.0), ("Medium Value", "EMEA", 900.0)]
    );
}

#[test]
fn kpis_serialize_to_json() {
    let kpis = compute_kpis(&processed()).unwrap();
    let json = serde_json::to_value(&kpis).unwrap();

    assert_eq!(json["top_products"][0]["product_line"], "Ships");
    assert_eq!(json["yoy_growth"][0]["growth_pct"], serde_json::Value::Null);
    assert_eq!(json["status_distribution"][0]["rows"], 3);
}

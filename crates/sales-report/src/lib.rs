//! Reporting over transformed sales tables.
//!
//! - [`monthly_summary`]: revenue, units and orders per month, product line
//!   and territory
//! - [`sales_pivot`]: revenue per product line or territory, one column per
//!   year
//! - [`export_report`]: writes the summary and both pivots as a dated report
//! - [`compute_kpis`]: headline indicators for the whole dataset

mod error;
mod export;
mod kpis;
mod summary;
mod values;

pub use error::{ReportError, Result};
pub use export::{ReportFiles, export_report, report_dir_name};
pub use kpis::{
    MonthlyRevenue, ProductRevenue, SalesKpis, SegmentTerritoryRevenue, StatusCount, YearGrowth,
    compute_kpis,
};
pub use summary::{PivotIndex, monthly_summary, sales_pivot};

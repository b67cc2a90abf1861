//! Customer lifetime aggregates and value segments.
//!
//! Segmentation is a two-pass operation: totals are accumulated per customer,
//! then broadcast back onto every row belonging to that customer.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{DataFrame, NamedFrom, Series};
use sales_model::CustomerSegment;
use sales_model::columns::{
    CUSTOMER_LIFETIME_VALUE, CUSTOMER_NAME, CUSTOMER_SEGMENT, LAST_ORDER_DATE, ORDER_COUNT,
    ORDER_DATE, ORDER_ID, TOTAL_SALES,
};
use tracing::info;

use crate::data_utils::{display_values, numeric_values, text_values};
use crate::error::Result;
use crate::report::TransformReport;
use crate::stage::{Stage, StageCondition};

const STAGE: &str = "segment_customers";

#[derive(Debug, Default)]
struct CustomerTotals {
    lifetime_value: f64,
    orders: BTreeSet<String>,
    last_order_date: Option<String>,
}

impl CustomerTotals {
    fn segment(&self) -> CustomerSegment {
        CustomerSegment::from_lifetime_value(self.lifetime_value)
    }
}

/// Result of [`segment_customers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentSummary {
    pub customers: usize,
    /// Customers per segment label. Every label is present, possibly with 0.
    pub by_segment: BTreeMap<String, usize>,
}

/// Add `customer_lifetime_value`, `order_count`, `last_order_date` and
/// `customer_segment`.
///
/// Customers are keyed by their standardized name. Lifetime value is the sum
/// of `total_sales`, order count the number of distinct order ids, and the
/// last order date the latest canonical `order_date` (null when the customer
/// has no parsed date).
pub fn segment_customers(df: &mut DataFrame) -> Result<SegmentSummary> {
    let names = text_values(df, CUSTOMER_NAME, STAGE)?;
    let sales = numeric_values(df, TOTAL_SALES, STAGE)?;
    let order_ids = display_values(df, ORDER_ID, STAGE)?;
    let order_dates = display_values(df, ORDER_DATE, STAGE)?;

    let mut totals: BTreeMap<&str, CustomerTotals> = BTreeMap::new();
    for (idx, name) in names.iter().enumerate() {
        let Some(name) = name.as_deref() else {
            continue;
        };
        let entry = totals.entry(name).or_default();
        if let Some(value) = sales[idx] {
            entry.lifetime_value += value;
        }
        if let Some(order_id) = &order_ids[idx] {
            entry.orders.insert(order_id.clone());
        }
        if let Some(date) = &order_dates[idx]
            && entry.last_order_date.as_ref().is_none_or(|last| date > last)
        {
            entry.last_order_date = Some(date.clone());
        }
    }

    let height = names.len();
    let mut lifetime_value = Vec::with_capacity(height);
    let mut order_count = Vec::with_capacity(height);
    let mut last_order_date = Vec::with_capacity(height);
    let mut segment = Vec::with_capacity(height);
    for name in &names {
        match name.as_deref().and_then(|name| totals.get(name)) {
            Some(customer) => {
                lifetime_value.push(Some(customer.lifetime_value));
                order_count.push(Some(customer.orders.len() as i64));
                last_order_date.push(customer.last_order_date.clone());
                segment.push(Some(customer.segment().as_str()));
            }
            None => {
                lifetime_value.push(None);
                order_count.push(None);
                last_order_date.push(None);
                segment.push(None);
            }
        }
    }

    let mut summary = SegmentSummary {
        customers: totals.len(),
        by_segment: CustomerSegment::ALL
            .iter()
            .map(|segment| (segment.as_str().to_string(), 0))
            .collect(),
    };
    for customer in totals.values() {
        *summary
            .by_segment
            .entry(customer.segment().as_str().to_string())
            .or_default() += 1;
    }

    df.with_column(Series::new(CUSTOMER_LIFETIME_VALUE.into(), lifetime_value))?;
    df.with_column(Series::new(ORDER_COUNT.into(), order_count))?;
    df.with_column(Series::new(LAST_ORDER_DATE.into(), last_order_date))?;
    df.with_column(Series::new(CUSTOMER_SEGMENT.into(), segment))?;

    info!(
        customers = summary.customers,
        segments = ?summary.by_segment,
        "segmented customers"
    );
    Ok(summary)
}

pub struct SegmentCustomers;

impl Stage for SegmentCustomers {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn requires(&self) -> &'static [StageCondition] {
        &[
            StageCondition::TextStandardized,
            StageCondition::DatesParsed,
        ]
    }

    fn establishes(&self) -> StageCondition {
        StageCondition::CustomersSegmented
    }

    fn apply(&self, df: &mut DataFrame, report: &mut TransformReport) -> Result<()> {
        let summary = segment_customers(df)?;
        report.customers = summary.customers;
        report.customers_by_segment = summary.by_segment;
        Ok(())
    }
}

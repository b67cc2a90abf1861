//! Canonical column names for the transaction table.
//!
//! Source extracts use upper-case identifiers (`ORDERNUMBER`, `PRICEEACH`, ...).
//! The transformer renames them once, up front, and every later stage refers
//! to the constants in this module.

// Base fields
pub const ORDER_ID: &str = "order_id";
pub const ORDER_DATE: &str = "order_date";
pub const ORDER_STATUS: &str = "order_status";
pub const QUANTITY: &str = "quantity";
pub const UNIT_PRICE: &str = "unit_price";
pub const TOTAL_SALES: &str = "total_sales";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const QUARTER: &str = "quarter";
pub const PRODUCT_LINE: &str = "product_line";
pub const PRODUCT_CODE: &str = "product_code";
pub const MANUFACTURER_PRICE: &str = "manufacturer_price";
pub const CUSTOMER_NAME: &str = "customer_name";
pub const CITY: &str = "city";
pub const COUNTRY: &str = "country";
pub const TERRITORY: &str = "territory";
pub const DEAL_SIZE: &str = "deal_size";

// Date parts
pub const DAY: &str = "day";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const WEEK: &str = "week";
pub const MONTH_NAME: &str = "month_name";
pub const YEAR_MONTH: &str = "year_month";

// Derived metrics
pub const REVENUE_PER_ITEM: &str = "revenue_per_item";
pub const DISCOUNT_PCT: &str = "discount_pct";
pub const IS_DISCOUNTED: &str = "is_discounted";
pub const HAS_INVALID_METRIC: &str = "has_invalid_metric";

// Anomaly flags
pub const IS_NEGATIVE_QTY: &str = "is_negative_qty";
pub const IS_SALES_OUTLIER: &str = "is_sales_outlier";

// Customer aggregates
pub const CUSTOMER_LIFETIME_VALUE: &str = "customer_lifetime_value";
pub const ORDER_COUNT: &str = "order_count";
pub const LAST_ORDER_DATE: &str = "last_order_date";
pub const CUSTOMER_SEGMENT: &str = "customer_segment";

// Business flags
pub const IS_HIGH_VALUE_ORDER: &str = "is_high_value_order";
pub const IS_BULK_ORDER: &str = "is_bulk_order";
pub const REGION: &str = "region";

/// Source column name to canonical name, matched case-sensitively.
pub const SOURCE_COLUMN_MAP: [(&str, &str); 17] = [
    ("ORDERNUMBER", ORDER_ID),
    ("ORDERDATE", ORDER_DATE),
    ("STATUS", ORDER_STATUS),
    ("QUANTITYORDERED", QUANTITY),
    ("PRICEEACH", UNIT_PRICE),
    ("SALES", TOTAL_SALES),
    ("YEAR_ID", YEAR),
    ("MONTH_ID", MONTH),
    ("QTR_ID", QUARTER),
    ("PRODUCTLINE", PRODUCT_LINE),
    ("PRODUCTCODE", PRODUCT_CODE),
    ("MSRP", MANUFACTURER_PRICE),
    ("CUSTOMERNAME", CUSTOMER_NAME),
    ("CITY", CITY),
    ("COUNTRY", COUNTRY),
    ("TERRITORY", TERRITORY),
    ("DEALSIZE", DEAL_SIZE),
];

/// Rows missing any of these values are dropped before derivation.
pub const CRITICAL_COLUMNS: [&str; 4] = [ORDER_ID, TOTAL_SALES, CUSTOMER_NAME, PRODUCT_CODE];

/// Columns that must hold numeric values once the table is normalized.
pub const NUMERIC_COLUMNS: [&str; 4] = [QUANTITY, UNIT_PRICE, MANUFACTURER_PRICE, TOTAL_SALES];

/// Text columns that are trimmed and title-cased.
pub const TITLE_CASE_COLUMNS: [&str; 5] =
    [CUSTOMER_NAME, CITY, PRODUCT_LINE, DEAL_SIZE, ORDER_STATUS];

/// Text columns that are trimmed and upper-cased.
pub const UPPER_CASE_COLUMNS: [&str; 1] = [COUNTRY];

/// Returns the canonical name for a source column, if it has one.
///
/// ```
/// use sales_model::canonical_name;
///
/// assert_eq!(canonical_name("MSRP"), Some("manufacturer_price"));
/// assert_eq!(canonical_name("msrp"), None);
/// assert_eq!(canonical_name("PHONE"), None);
/// ```
pub fn canonical_name(source: &str) -> Option<&'static str> {
    SOURCE_COLUMN_MAP
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn rename_targets_are_unique() {
        let targets: BTreeSet<&str> = SOURCE_COLUMN_MAP.iter().map(|(_, to)| *to).collect();
        assert_eq!(targets.len(), SOURCE_COLUMN_MAP.len());
    }

    #[test]
    fn critical_columns_are_rename_targets() {
        for column in CRITICAL_COLUMNS {
            assert!(
                SOURCE_COLUMN_MAP.iter().any(|(_, to)| *to == column),
                "{column} is not produced by the rename table"
            );
        }
    }
}

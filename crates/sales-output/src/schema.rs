//! Column subsets for the star-schema tables.
//!
//! Each table takes the columns it needs from the transformed dataset.
//! Required columns must be present; optional ones are written when the
//! dataset carries them and skipped otherwise.

use polars::prelude::DataFrame;
use sales_model::columns::{
    CITY, COUNTRY, CUSTOMER_NAME, DAY, DAY_OF_WEEK, DEAL_SIZE, DISCOUNT_PCT, IS_BULK_ORDER,
    IS_DISCOUNTED, IS_HIGH_VALUE_ORDER, IS_SALES_OUTLIER, MANUFACTURER_PRICE, MONTH, MONTH_NAME,
    ORDER_DATE, ORDER_ID, ORDER_STATUS, PRODUCT_CODE, PRODUCT_LINE, QUANTITY, QUARTER, REGION,
    REVENUE_PER_ITEM, TERRITORY, TOTAL_SALES, UNIT_PRICE, WEEK, YEAR, YEAR_MONTH,
};

use crate::error::{OutputError, Result};

/// Target table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Write each distinct row once.
    pub distinct: bool,
}

impl TableSpec {
    /// Columns to write, required first, in declaration order.
    ///
    /// # Errors
    ///
    /// [`OutputError::MissingColumn`] for the first absent required column.
    pub fn select(&self, df: &DataFrame) -> Result<Vec<&'static str>> {
        let mut columns = Vec::with_capacity(self.required.len() + self.optional.len());
        for column in self.required {
            if df.column(column).is_err() {
                return Err(OutputError::MissingColumn {
                    table: self.name,
                    column: (*column).to_string(),
                });
            }
            columns.push(*column);
        }
        columns.extend(
            self.optional
                .iter()
                .copied()
                .filter(|column| df.column(column).is_ok()),
        );
        Ok(columns)
    }
}

pub const DIM_CUSTOMERS: TableSpec = TableSpec {
    name: "dim_customers",
    required: &[CUSTOMER_NAME, CITY, COUNTRY, TERRITORY],
    optional: &[REGION],
    distinct: true,
};

pub const DIM_PRODUCTS: TableSpec = TableSpec {
    name: "dim_products",
    required: &[PRODUCT_CODE, PRODUCT_LINE, MANUFACTURER_PRICE],
    optional: &[],
    distinct: true,
};

pub const DIM_DATES: TableSpec = TableSpec {
    name: "dim_dates",
    required: &[ORDER_DATE, MONTH, QUARTER, YEAR],
    optional: &[DAY, DAY_OF_WEEK, WEEK, MONTH_NAME, YEAR_MONTH],
    distinct: true,
};

pub const FACT_TABLE: TableSpec = TableSpec {
    name: "fact_transactions",
    required: &[
        ORDER_ID,
        QUANTITY,
        UNIT_PRICE,
        TOTAL_SALES,
        ORDER_STATUS,
        DEAL_SIZE,
    ],
    optional: &[
        REVENUE_PER_ITEM,
        DISCOUNT_PCT,
        IS_DISCOUNTED,
        IS_SALES_OUTLIER,
        IS_HIGH_VALUE_ORDER,
        IS_BULK_ORDER,
    ],
    distinct: false,
};

/// Dimension tables in load order.
pub const DIMENSION_TABLES: [TableSpec; 3] = [DIM_CUSTOMERS, DIM_PRODUCTS, DIM_DATES];

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame(names: &[&str]) -> DataFrame {
        DataFrame::new(
            names
                .iter()
                .map(|name| Series::new((*name).into(), vec!["x"]).into_column())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn optional_columns_are_skipped_when_absent() {
        let df = frame(&[CUSTOMER_NAME, CITY, COUNTRY, TERRITORY]);
        assert_eq!(
            DIM_CUSTOMERS.select(&df).unwrap(),
            vec![CUSTOMER_NAME, CITY, COUNTRY, TERRITORY]
        );
    }

    #[test]
    fn optional_columns_follow_required_ones() {
        let df = frame(&[REGION, TERRITORY, COUNTRY, CITY, CUSTOMER_NAME, "phone"]);
        assert_eq!(
            DIM_CUSTOMERS.select(&df).unwrap(),
            vec![CUSTOMER_NAME, CITY, COUNTRY, TERRITORY, REGION]
        );
    }

    #[test]
    fn missing_required_column_names_the_table() {
        let df = frame(&[PRODUCT_CODE, PRODUCT_LINE]);
        let err = DIM_PRODUCTS.select(&df).unwrap_err();
        assert_eq!(
            err.to_string(),
            "table dim_products requires column 'manufacturer_price', which the dataset does not have"
        );
    }
}

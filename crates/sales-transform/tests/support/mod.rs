//! Shared fixtures for the transformer tests.

#![allow(dead_code)]

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use sales_model::SOURCE_COLUMN_MAP;

/// One transaction, using canonical field names.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: Option<String>,
    pub order_date: Option<String>,
    pub order_status: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub manufacturer_price: Option<f64>,
    pub total_sales: Option<f64>,
    pub product_line: Option<String>,
    pub product_code: Option<String>,
    pub customer_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub territory: Option<String>,
    pub deal_size: Option<String>,
}

pub fn order(order_id: &str, customer: &str, total_sales: f64) -> Order {
    Order {
        order_id: Some(order_id.to_string()),
        order_date: Some("2/24/2003 0:00".to_string()),
        order_status: Some("shipped".to_string()),
        quantity: Some(10.0),
        unit_price: Some(90.0),
        manufacturer_price: Some(100.0),
        total_sales: Some(total_sales),
        product_line: Some("classic cars".to_string()),
        product_code: Some("S10_1678".to_string()),
        customer_name: Some(customer.to_string()),
        city: Some("nyc".to_string()),
        country: Some("usa".to_string()),
        territory: Some("NA".to_string()),
        deal_size: Some("small".to_string()),
    }
}

impl Order {
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn prices(mut self, unit_price: f64, manufacturer_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self.manufacturer_price = Some(manufacturer_price);
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.order_date = Some(date.to_string());
        self
    }

    pub fn territory(mut self, territory: &str) -> Self {
        self.territory = Some(territory.to_string());
        self
    }

    pub fn without_customer(mut self) -> Self {
        self.customer_name = None;
        self
    }
}

fn text(name: &str, orders: &[Order], field: impl Fn(&Order) -> Option<String>) -> Column {
    let values: Vec<Option<String>> = orders.iter().map(field).collect();
    Series::new(name.into(), values).into_column()
}

fn number(name: &str, orders: &[Order], field: impl Fn(&Order) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = orders.iter().map(field).collect();
    Series::new(name.into(), values).into_column()
}

/// Build a table with canonical column names.
pub fn canonical_frame(orders: &[Order]) -> DataFrame {
    DataFrame::new(vec![
        text("order_id", orders, |o| o.order_id.clone()),
        text("order_date", orders, |o| o.order_date.clone()),
        text("order_status", orders, |o| o.order_status.clone()),
        number("quantity", orders, |o| o.quantity),
        number("unit_price", orders, |o| o.unit_price),
        number("total_sales", orders, |o| o.total_sales),
        text("product_line", orders, |o| o.product_line.clone()),
        text("product_code", orders, |o| o.product_code.clone()),
        number("manufacturer_price", orders, |o| o.manufacturer_price),
        text("customer_name", orders, |o| o.customer_name.clone()),
        text("city", orders, |o| o.city.clone()),
        text("country", orders, |o| o.country.clone()),
        text("territory", orders, |o| o.territory.clone()),
        text("deal_size", orders, |o| o.deal_size.clone()),
    ])
    .unwrap()
}

/// Build a table with the upper-case source column names.
pub fn source_frame(orders: &[Order]) -> DataFrame {
    let mut df = canonical_frame(orders);
    for (source, canonical) in SOURCE_COLUMN_MAP {
        if df.column(canonical).is_ok() {
            df.rename(canonical, source.into()).unwrap();
        }
    }
    df
}

pub fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(String::from))
        .collect()
}

pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn bools(df: &DataFrame, name: &str) -> Vec<Option<bool>> {
    df.column(name)
        .unwrap()
        .bool()
        .unwrap()
        .into_iter()
        .collect()
}

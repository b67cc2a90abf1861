//! SQLite star-schema loader.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{AnyValue, Column, DataFrame, DataType};
use rusqlite::Connection;
use rusqlite::types::Value;
use sales_common::{any_to_i64, any_to_string, any_to_string_opt};
use tracing::{debug, info};

use crate::error::Result;
use crate::schema::{DIMENSION_TABLES, FACT_TABLE, TableSpec};

/// Rows appended to one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLoad {
    pub table: &'static str,
    pub rows: usize,
}

/// Rows appended per table by one load call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub tables: Vec<TableLoad>,
}

impl LoadSummary {
    pub fn rows_for(&self, table: &str) -> Option<usize> {
        self.tables
            .iter()
            .find(|load| load.table == table)
            .map(|load| load.rows)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|load| load.rows).sum()
    }

    fn merge(&mut self, other: LoadSummary) {
        self.tables.extend(other.tables);
    }
}

/// A SQLite database holding the sales star schema.
///
/// Tables are created on first load with column types taken from the
/// dataset; later loads append, adding any optional column the table lacks.
pub struct SalesDatabase {
    conn: Connection,
}

impl SalesDatabase {
    /// Create or open a database file.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened sales database");
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Append the customer, product and date dimensions.
    pub fn load_dimensions(&mut self, df: &DataFrame) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for spec in DIMENSION_TABLES {
            summary.tables.push(self.write_table(&spec, df)?);
        }
        Ok(summary)
    }

    /// Append every row to the fact table.
    pub fn load_transactions(&mut self, df: &DataFrame) -> Result<LoadSummary> {
        Ok(LoadSummary {
            tables: vec![self.write_table(&FACT_TABLE, df)?],
        })
    }

    /// Dimensions first, then facts.
    pub fn load(&mut self, df: &DataFrame) -> Result<LoadSummary> {
        let started = Instant::now();
        let mut summary = self.load_dimensions(df)?;
        summary.merge(self.load_transactions(df)?);
        info!(
            rows = summary.total_rows(),
            duration_ms = started.elapsed().as_millis() as u64,
            "loaded star schema"
        );
        Ok(summary)
    }

    pub fn row_count(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM \"{table}\"");
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Column names of an existing table, in order.
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT name FROM pragma_table_info('{table}')"))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Append columns that a table created by an earlier load lacks.
    ///
    /// Rows written before the column existed read as null in it.
    fn add_missing_columns(&self, table: &str, names: &[&str], columns: &[&Column]) -> Result<()> {
        let existing: HashSet<String> = self.table_columns(table)?.into_iter().collect();
        for (name, column) in names.iter().zip(columns) {
            if existing.contains(*name) {
                continue;
            }
            let alter = format!(
                "ALTER TABLE \"{table}\" ADD COLUMN \"{name}\" {}",
                sql_type(column.dtype())
            );
            self.conn.execute(&alter, [])?;
            info!(table, column = *name, "added column to existing table");
        }
        Ok(())
    }

    fn write_table(&mut self, spec: &TableSpec, df: &DataFrame) -> Result<TableLoad> {
        let names = spec.select(df)?;
        let mut columns: Vec<&Column> = Vec::with_capacity(names.len());
        for name in &names {
            columns.push(df.column(name)?);
        }

        let definitions: Vec<String> = names
            .iter()
            .zip(&columns)
            .map(|(name, column)| format!("\"{name}\" {}", sql_type(column.dtype())))
            .collect();
        let create = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
            spec.name,
            definitions.join(", ")
        );
        self.conn.execute(&create, [])?;
        self.add_missing_columns(spec.name, &names, &columns)?;

        let placeholders: Vec<String> = (1..=names.len()).map(|idx| format!("?{idx}")).collect();
        let quoted: Vec<String> = names.iter().map(|name| format!("\"{name}\"")).collect();
        let insert = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            spec.name,
            quoted.join(", "),
            placeholders.join(", ")
        );

        let mut seen: HashSet<Vec<Option<String>>> = HashSet::new();
        let mut written = 0;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert)?;
            for idx in 0..df.height() {
                let mut values = Vec::with_capacity(columns.len());
                for column in &columns {
                    values.push(column.get(idx)?);
                }
                if spec.distinct {
                    let key: Vec<Option<String>> =
                        values.iter().cloned().map(any_to_string_opt).collect();
                    if !seen.insert(key) {
                        continue;
                    }
                }
                let row: Vec<Value> = values.into_iter().map(sql_value).collect();
                stmt.execute(rusqlite::params_from_iter(row.iter()))?;
                written += 1;
            }
        }
        tx.commit()?;

        debug!(table = spec.name, rows = written, "appended rows");
        Ok(TableLoad {
            table: spec.name,
            rows: written,
        })
    }
}

fn sql_type(dtype: &DataType) -> &'static str {
    if dtype.is_float() {
        "REAL"
    } else if dtype.is_integer() || dtype == &DataType::Boolean {
        "INTEGER"
    } else {
        "TEXT"
    }
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(flag) => Value::Integer(i64::from(flag)),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        other => match any_to_i64(other.clone()) {
            Some(v) => Value::Integer(v),
            None => Value::Text(any_to_string(other)),
        },
    }
}

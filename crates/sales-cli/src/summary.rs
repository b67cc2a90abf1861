use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sales_report::SalesKpis;
use sales_transform::TransformReport;

use sales_cli::types::{RunResult, TransformResult};

pub fn print_run_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("Processed: {}", result.processed.display());
    if let Some(path) = &result.database {
        println!("Database: {}", path.display());
    }
    if let Some(files) = &result.report_files {
        println!("Reports: {}", files.dir.display());
    }
    print_transform_table(&result.transform);
    print_stage_table(&result.transform);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Output"), header_cell("Rows / File")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    match &result.load {
        Some(load) => {
            for entry in &load.tables {
                table.add_row(vec![table_cell(entry.table), Cell::new(entry.rows)]);
            }
        }
        None => {
            table.add_row(vec![table_cell("database"), dim_cell("skipped")]);
        }
    }
    match &result.report_files {
        Some(files) => {
            for sheet in files.sheets() {
                table.add_row(vec![table_cell("report"), file_cell(sheet)]);
            }
        }
        None => {
            table.add_row(vec![table_cell("report"), dim_cell("skipped")]);
        }
    }
    println!("{table}");
}

pub fn print_transform_summary(result: &TransformResult) {
    println!("Input: {}", result.input.display());
    println!("Processed: {}", result.processed.display());
    print_transform_table(&result.transform);
    print_stage_table(&result.transform);
}

fn print_transform_table(report: &TransformReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, Cell); 12] = [
        ("Input rows", Cell::new(report.input_rows)),
        ("Output rows", Cell::new(report.output_rows)),
        ("Renamed columns", Cell::new(report.renamed_columns)),
        (
            "Dropped rows",
            count_cell(report.dropped_rows, Color::Yellow),
        ),
        (
            "Unparseable dates",
            count_cell(report.unparseable_dates, Color::Yellow),
        ),
        (
            "Invalid metric rows",
            count_cell(report.invalid_metric_rows, Color::Yellow),
        ),
        ("Discounted rows", Cell::new(report.discounted_rows)),
        (
            "Negative quantities",
            count_cell(report.negative_quantities, Color::Red),
        ),
        (
            "Sales outliers",
            count_cell(report.sales_outliers, Color::Yellow),
        ),
        ("High-value orders", Cell::new(report.high_value_orders)),
        ("Bulk orders", Cell::new(report.bulk_orders)),
        (
            "Unmapped territories",
            count_cell(report.unmapped_territories, Color::Yellow),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value]);
    }
    if let Some(fence) = &report.outlier_fence {
        table.add_row(vec![
            Cell::new("Outlier fence"),
            Cell::new(format!("[{:.2}, {:.2}]", fence.lower, fence.upper)),
        ]);
    }
    if let Some(threshold) = report.high_value_threshold {
        table.add_row(vec![
            Cell::new("High-value threshold"),
            Cell::new(format!("{threshold:.2}")),
        ]);
    }
    table.add_row(vec![
        header_cell("Customers"),
        Cell::new(report.customers).add_attribute(Attribute::Bold),
    ]);
    for (segment, count) in &report.customers_by_segment {
        table.add_row(vec![
            Cell::new(format!("  {segment}")).fg(Color::DarkGrey),
            Cell::new(count),
        ]);
    }
    println!("{table}");
}

fn print_stage_table(report: &TransformReport) {
    if report.stages.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows"), header_cell("ms")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for stage in &report.stages {
        table.add_row(vec![
            table_cell(&stage.name),
            Cell::new(stage.rows),
            dim_cell(format!("{:.1}", stage.duration_ms)),
        ]);
    }
    println!("{table}");
}

pub fn print_kpis(kpis: &SalesKpis) {
    let mut monthly = Table::new();
    monthly.set_header(vec![header_cell("Month"), header_cell("Revenue")]);
    apply_table_style(&mut monthly);
    align_column(&mut monthly, 1, CellAlignment::Right);
    for row in &kpis.monthly_revenue {
        monthly.add_row(vec![Cell::new(&row.month), money_cell(row.revenue)]);
    }
    println!("{monthly}");

    let mut products = Table::new();
    products.set_header(vec![header_cell("Product line"), header_cell("Revenue")]);
    apply_table_style(&mut products);
    align_column(&mut products, 1, CellAlignment::Right);
    for row in &kpis.top_products {
        products.add_row(vec![table_cell(&row.product_line), money_cell(row.revenue)]);
    }
    println!("{products}");

    let mut segments = Table::new();
    segments.set_header(vec![
        header_cell("Segment"),
        header_cell("Territory"),
        header_cell("Revenue"),
    ]);
    apply_table_style(&mut segments);
    align_column(&mut segments, 2, CellAlignment::Right);
    for row in &kpis.segment_territory {
        segments.add_row(vec![
            table_cell(&row.segment),
            Cell::new(&row.territory),
            money_cell(row.revenue),
        ]);
    }
    println!("{segments}");

    let mut growth = Table::new();
    growth.set_header(vec![
        header_cell("Year"),
        header_cell("Revenue"),
        header_cell("Growth %"),
    ]);
    apply_table_style(&mut growth);
    align_column(&mut growth, 1, CellAlignment::Right);
    align_column(&mut growth, 2, CellAlignment::Right);
    for row in &kpis.yoy_growth {
        let growth_cell = match row.growth_pct {
            Some(pct) if pct < 0.0 => Cell::new(format!("{pct:.2}")).fg(Color::Red),
            Some(pct) => Cell::new(format!("{pct:.2}")).fg(Color::Green),
            None => dim_cell("-"),
        };
        let cells = vec![Cell::new(row.year), money_cell(row.revenue), growth_cell];
        growth.add_row(cells);
    }
    println!("{growth}");

    let mut statuses = Table::new();
    statuses.set_header(vec![header_cell("Status"), header_cell("Rows")]);
    apply_table_style(&mut statuses);
    align_column(&mut statuses, 1, CellAlignment::Right);
    for row in &kpis.status_distribution {
        statuses.add_row(vec![Cell::new(&row.status), Cell::new(row.rows)]);
    }
    println!("{statuses}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn table_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn money_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}"))
}

fn file_cell(path: &Path) -> Cell {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Cell::new(name).fg(Color::Green)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

//! The standard stage sequence.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::error::Result;
use crate::frame::SalesFrame;
use crate::report::TransformReport;
use crate::stage::Stage;
use crate::stages::{
    BusinessFlags, DecomposeDates, DeriveMetrics, DetectAnomalies, FilterMissing, NormalizeColumns,
    ParseDates, SegmentCustomers, StandardizeText,
};

/// Transformed table and the counters collected on the way.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub data: DataFrame,
    pub report: TransformReport,
}

/// An ordered list of stages.
pub struct TransformPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl TransformPipeline {
    /// The nine stages in their only valid order.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(NormalizeColumns),
                Box::new(ParseDates),
                Box::new(FilterMissing),
                Box::new(DecomposeDates),
                Box::new(DeriveMetrics),
                Box::new(DetectAnomalies),
                Box::new(StandardizeText),
                Box::new(SegmentCustomers),
                Box::new(BusinessFlags),
            ],
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `data`.
    ///
    /// Stops at the first failing stage; nothing partial is returned.
    pub fn run(&self, data: DataFrame) -> Result<TransformOutput> {
        let span = info_span!("transform", input_rows = data.height());
        let _guard = span.enter();
        let started = Instant::now();

        let mut frame = SalesFrame::new(data);
        for stage in &self.stages {
            frame.apply(stage.as_ref())?;
        }
        let (data, report) = frame.into_parts();

        info!(
            input_rows = report.input_rows,
            output_rows = report.output_rows,
            dropped = report.dropped_rows,
            outliers = report.sales_outliers,
            customers = report.customers,
            duration_ms = started.elapsed().as_millis() as u64,
            "transformation complete"
        );
        Ok(TransformOutput { data, report })
    }
}

/// Run the standard pipeline.
pub fn transform(data: DataFrame) -> Result<TransformOutput> {
    TransformPipeline::standard().run(data)
}

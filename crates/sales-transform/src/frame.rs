//! A sales table paired with the conditions established on it.

use std::collections::BTreeSet;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use crate::error::{Result, TransformError};
use crate::report::{StageTiming, TransformReport};
use crate::stage::{Stage, StageCondition};

/// The table as it moves through the pipeline.
///
/// Tracks which [`StageCondition`]s hold, so a stage cannot run before the
/// stages it depends on, and cannot run twice.
#[derive(Debug, Clone)]
pub struct SalesFrame {
    data: DataFrame,
    established: BTreeSet<StageCondition>,
    report: TransformReport,
}

impl SalesFrame {
    /// Wrap a raw extract. No conditions hold yet.
    pub fn new(data: DataFrame) -> Self {
        let report = TransformReport {
            input_rows: data.height(),
            output_rows: data.height(),
            ..TransformReport::default()
        };
        Self {
            data,
            established: BTreeSet::new(),
            report,
        }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn report(&self) -> &TransformReport {
        &self.report
    }

    pub fn is_established(&self, condition: StageCondition) -> bool {
        self.established.contains(&condition)
    }

    /// Apply a stage after checking its preconditions.
    ///
    /// # Errors
    ///
    /// [`TransformError::PreconditionNotMet`] if a required condition does not
    /// hold, [`TransformError::StageReplayed`] if the stage's condition is
    /// already established, or whatever the stage itself returns. On error the
    /// established conditions are left unchanged.
    pub fn apply(&mut self, stage: &dyn Stage) -> Result<()> {
        let name = stage.name();
        if self.is_established(stage.establishes()) {
            return Err(TransformError::StageReplayed { stage: name });
        }
        if let Some(missing) = stage
            .requires()
            .iter()
            .copied()
            .find(|condition| !self.is_established(*condition))
        {
            return Err(TransformError::PreconditionNotMet {
                stage: name,
                missing,
            });
        }

        let span = info_span!("stage", stage = name);
        let _guard = span.enter();
        let started = Instant::now();
        stage.apply(&mut self.data, &mut self.report)?;
        let elapsed = started.elapsed();

        self.established.insert(stage.establishes());
        self.report.output_rows = self.data.height();
        self.report.stages.push(StageTiming {
            name: name.to_string(),
            rows: self.data.height(),
            duration_ms: elapsed.as_secs_f64() * 1000.0,
        });
        debug!(
            rows = self.data.height(),
            duration_ms = elapsed.as_millis() as u64,
            "stage complete"
        );
        Ok(())
    }

    pub fn into_parts(self) -> (DataFrame, TransformReport) {
        (self.data, self.report)
    }
}

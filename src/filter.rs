//! Row selection by run mode, GPU index and lane
//!
//! A filter with no constraints matches every row. Rows whose mode or lane
//! column holds anything other than 0/1 never match a constrained filter.

use crate::trace::{Lane, RunMode, TraceRow, TraceTable};

/// Filter that determines which trace rows feed a series
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    mode: Option<RunMode>,
    gpu: Option<i64>,
    lane: Option<Lane>,
}

impl RowFilter {
    /// Create a filter that includes all rows
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one run mode
    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Restrict to one GPU index
    pub fn gpu(mut self, gpu: i64) -> Self {
        self.gpu = Some(gpu);
        self
    }

    /// Restrict to one lane
    pub fn lane(mut self, lane: Lane) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Check if a row passes every constraint
    pub fn should_include(&self, row: &TraceRow) -> bool {
        if let Some(mode) = self.mode {
            if row.mode() != Some(mode) {
                return false;
            }
        }

        if let Some(gpu) = self.gpu {
            if row.gpu() != gpu {
                return false;
            }
        }

        match self.lane {
            None => true,
            Some(lane) => row.lane() == Some(lane),
        }
    }

    /// Matching rows, in input order
    pub fn select<'a, I>(&self, rows: I) -> Vec<&'a TraceRow>
    where
        I: IntoIterator<Item = &'a TraceRow>,
    {
        rows.into_iter()
            .filter(|row| self.should_include(row))
            .collect()
    }
}

/// Rows of the single-GPU run (both lanes)
pub fn single_gpu(table: &TraceTable) -> Vec<&TraceRow> {
    RowFilter::all().mode(RunMode::Single).select(table.rows())
}

/// Rows of one device in the multi-GPU run (both lanes)
pub fn multi_gpu(table: &TraceTable, gpu: i64) -> Vec<&TraceRow> {
    RowFilter::all()
        .mode(RunMode::Multi)
        .gpu(gpu)
        .select(table.rows())
}

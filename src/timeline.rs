//! Baseline normalization and segment geometry
//!
//! A group (one run mode, or one device of the multi-GPU run) is shifted by
//! its baseline, the smallest timestamp in any time column of any of its
//! rows, so the earliest event sits at time 0. Kernel and runtime series of a
//! group share that baseline.
//!
//! Each drawn row becomes two segments on its lane:
//!
//! ```text
//!   y=h            o-------o        Active: (start, h) -> (end, h)
//!                 /
//!   y=0  - - - - /                  Wait:   (queued, 0) -> (start, h)
//! ```

use crate::filter::RowFilter;
use crate::trace::{Lane, TraceRow};

/// Rows drawn per series, regardless of how many the trace holds
pub const ROWS_PER_SERIES: usize = 5;

/// Smallest timestamp across every time column of `rows`
pub fn baseline<'a, I>(rows: I) -> Option<i64>
where
    I: IntoIterator<Item = &'a TraceRow>,
{
    rows.into_iter()
        .flat_map(|row| row.timestamps().iter().copied())
        .min()
}

/// Timestamps of a row after baseline subtraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub timestamps: Vec<i64>,
}

impl NormalizedRow {
    pub fn queued(&self) -> i64 {
        self.timestamps[0]
    }

    pub fn started(&self) -> i64 {
        self.timestamps[2]
    }

    pub fn ended(&self) -> i64 {
        self.timestamps[3]
    }
}

/// Subtract `baseline` from every timestamp of `row`
pub fn normalize(row: &TraceRow, baseline: i64) -> NormalizedRow {
    NormalizedRow {
        timestamps: row.timestamps().iter().map(|t| t - baseline).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn new(x: i64, y: f64) -> Self {
        Self { x: x as f64, y }
    }
}

/// Phase a segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Queued until the device starts; drawn dashed
    Wait,
    /// Device execution; drawn solid with end markers
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn points(&self) -> [(f64, f64); 2] {
        [(self.from.x, self.from.y), (self.to.x, self.to.y)]
    }
}

/// Wait and active segments of one normalized row on a lane at `height`
pub fn row_segments(row: &NormalizedRow, height: f64) -> [Segment; 2] {
    [
        Segment {
            kind: SegmentKind::Wait,
            from: Point::new(row.queued(), 0.0),
            to: Point::new(row.started(), height),
        },
        Segment {
            kind: SegmentKind::Active,
            from: Point::new(row.started(), height),
            to: Point::new(row.ended(), height),
        },
    ]
}

/// Segments of one lane of a group
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub lane: Lane,
    pub segments: Vec<Segment>,
}

impl Series {
    /// Build the series from the first `count` rows of `lane` in `rows`.
    ///
    /// # Panics
    ///
    /// Panics with an out-of-range index if the lane has fewer than `count` rows.
    pub fn from_rows(rows: &[&TraceRow], lane: Lane, baseline: i64, count: usize) -> Self {
        let selected = RowFilter::all().lane(lane).select(rows.iter().copied());
        let segments = selected[..count]
            .iter()
            .flat_map(|row| row_segments(&normalize(row, baseline), lane.height()))
            .collect();

        Self { lane, segments }
    }

    /// Latest x coordinate reached by any segment
    pub fn max_time(&self) -> f64 {
        self.segments
            .iter()
            .flat_map(|s| [s.from.x, s.to.x])
            .fold(0.0, f64::max)
    }
}

/// Kernel and runtime series of one group under a shared baseline
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTimeline {
    pub baseline: i64,
    pub kernel: Series,
    pub runtime: Series,
}

impl GroupTimeline {
    /// # Panics
    ///
    /// Panics if either lane of `rows` has fewer than `count` rows.
    pub fn from_rows(rows: &[&TraceRow], count: usize) -> Self {
        let baseline = baseline(rows.iter().copied()).unwrap_or(0);

        tracing::debug!(rows = rows.len(), baseline, "building group timeline");

        Self {
            baseline,
            kernel: Series::from_rows(rows, Lane::Kernel, baseline, count),
            runtime: Series::from_rows(rows, Lane::Runtime, baseline, count),
        }
    }

    pub fn max_time(&self) -> f64 {
        self.kernel.max_time().max(self.runtime.max_time())
    }
}

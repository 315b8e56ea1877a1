//! Figure model: two stacked panels of lane timelines
//!
//! The top panel shows the single-GPU run, the bottom panel overlays both
//! devices of the multi-GPU run, each in its own color pair.

use ratatui::style::Color;

use crate::filter::{multi_gpu, single_gpu};
use crate::timeline::{GroupTimeline, Series, ROWS_PER_SERIES};
use crate::trace::{Lane, TraceRow, TraceTable};

/// Colors for the kernel and runtime lanes of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub kernel: Color,
    pub runtime: Color,
}

impl ColorPair {
    pub fn for_lane(&self, lane: Lane) -> Color {
        match lane {
            Lane::Kernel => self.kernel,
            Lane::Runtime => self.runtime,
        }
    }
}

pub const PRIMARY_COLORS: ColorPair = ColorPair {
    kernel: Color::Blue,
    runtime: Color::Red,
};

pub const SECONDARY_COLORS: ColorPair = ColorPair {
    kernel: Color::Cyan,
    runtime: Color::Yellow,
};

/// One group drawn on a panel
#[derive(Debug, Clone, PartialEq)]
pub struct PlotGroup {
    pub label: String,
    pub colors: ColorPair,
    pub timeline: GroupTimeline,
}

impl PlotGroup {
    /// # Panics
    ///
    /// Panics if either lane of `rows` has fewer than [`ROWS_PER_SERIES`] rows.
    pub fn new(label: impl Into<String>, colors: ColorPair, rows: &[&TraceRow]) -> Self {
        let label = label.into();
        tracing::debug!(group = %label, rows = rows.len(), "plotting group");

        Self {
            label,
            colors,
            timeline: GroupTimeline::from_rows(rows, ROWS_PER_SERIES),
        }
    }

    pub fn series(&self) -> [&Series; 2] {
        [&self.timeline.kernel, &self.timeline.runtime]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub groups: Vec<PlotGroup>,
}

impl Panel {
    /// Latest time on the panel; 1.0 when nothing extends past zero
    pub fn max_time(&self) -> f64 {
        let max = self
            .groups
            .iter()
            .map(|g| g.timeline.max_time())
            .fold(0.0, f64::max);
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }
}

/// The composed two-panel figure
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub top: Panel,
    pub bottom: Panel,
}

impl Figure {
    /// Build both panels from a loaded trace.
    ///
    /// # Panics
    ///
    /// Panics with an out-of-range index when any series (single GPU, or
    /// either device of the multi-GPU run, per lane) has fewer than
    /// [`ROWS_PER_SERIES`] rows.
    pub fn from_table(table: &TraceTable) -> Self {
        let single = single_gpu(table);
        let top = Panel {
            title: panel_title("single GPU", table.annotation_containing("Single GPU")),
            groups: vec![PlotGroup::new("GPU 0", PRIMARY_COLORS, &single)],
        };

        let gpu0 = multi_gpu(table, 0);
        let gpu1 = multi_gpu(table, 1);
        let bottom = Panel {
            title: panel_title(
                "multi GPU",
                table.annotation_containing("GPU (single thread)"),
            ),
            groups: vec![
                PlotGroup::new("GPU 0", PRIMARY_COLORS, &gpu0),
                PlotGroup::new("GPU 1", SECONDARY_COLORS, &gpu1),
            ],
        };

        tracing::info!(
            single_rows = single.len(),
            gpu0_rows = gpu0.len(),
            gpu1_rows = gpu1.len(),
            "figure composed"
        );

        Self { top, bottom }
    }

    pub fn panels(&self) -> [&Panel; 2] {
        [&self.top, &self.bottom]
    }
}

fn panel_title(name: &str, annotation: Option<&str>) -> String {
    match annotation {
        Some(text) => format!("{name} ({text})"),
        None => name.to_string(),
    }
}

//! Trace file loading
//!
//! Reads the whitespace-delimited event table printed by the OpenCL
//! multi-GPU benchmark when profiling is enabled:
//!
//! ```text
//! # Single GPU: 1.204518s
//! # run device event [0=kernel,1=read] queued submitted start end
//! 0 0 0 1503221012 1503221090 1503221740 1503229915
//! 0 0 1 1503221013 1503221095 1503229920 1503231044
//! ```
//!
//! Every data field is coerced to a signed 64-bit integer; that coercion is
//! the only validation performed. `#` lines are kept as annotations.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Minimum number of fields in a data row (mode, GPU, lane + 4 timestamps)
pub const MIN_COLUMNS: usize = 7;

/// Column index of the first timestamp
pub const TIMESTAMP_OFFSET: usize = 3;

/// Errors that can occur while loading a trace file
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}, column {column}: invalid integer {value:?}")]
    InvalidInteger {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("line {line}: expected at least 7 columns, found {found}")]
    TooFewColumns { line: usize, found: usize },

    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("trace contains no data rows")]
    Empty,
}

/// Result type for trace loading
pub type Result<T> = std::result::Result<T, TraceError>;

/// Run mode recorded in column 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// All images processed on one device
    Single,
    /// Images split across devices
    Multi,
}

impl RunMode {
    /// Map the raw column value; anything but 0/1 has no mode
    pub fn from_raw(value: i64) -> Option<Self> {
        match value {
            0 => Some(RunMode::Single),
            1 => Some(RunMode::Multi),
            _ => None,
        }
    }
}

/// Event series recorded in column 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Kernel launches
    Kernel,
    /// Runtime work following the kernel (buffer read-back)
    Runtime,
}

impl Lane {
    /// Map the raw column value; anything but 0/1 has no lane
    pub fn from_raw(value: i64) -> Option<Self> {
        match value {
            0 => Some(Lane::Kernel),
            1 => Some(Lane::Runtime),
            _ => None,
        }
    }

    /// Vertical position of the lane on a panel
    pub fn height(self) -> f64 {
        match self {
            Lane::Kernel => 1.0,
            Lane::Runtime => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lane::Kernel => "kernel",
            Lane::Runtime => "runtime",
        }
    }
}

/// A single event row of the trace table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    mode: i64,
    gpu: i64,
    lane: i64,
    /// Columns 3.. (queued, submitted, start, end, extras)
    timestamps: Vec<i64>,
}

impl TraceRow {
    /// Build a row from its raw fields; `None` if fewer than [`MIN_COLUMNS`]
    pub fn from_fields(fields: &[i64]) -> Option<Self> {
        if fields.len() < MIN_COLUMNS {
            return None;
        }

        Some(Self {
            mode: fields[0],
            gpu: fields[1],
            lane: fields[2],
            timestamps: fields[TIMESTAMP_OFFSET..].to_vec(),
        })
    }

    pub fn mode(&self) -> Option<RunMode> {
        RunMode::from_raw(self.mode)
    }

    /// GPU index (only meaningful in multi mode)
    pub fn gpu(&self) -> i64 {
        self.gpu
    }

    pub fn lane(&self) -> Option<Lane> {
        Lane::from_raw(self.lane)
    }

    /// All timestamp columns, including any extras past column 6
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Time the command was enqueued (segment start)
    pub fn queued(&self) -> i64 {
        self.timestamps[0]
    }

    /// Time the command was submitted to the device (not plotted)
    pub fn submitted(&self) -> i64 {
        self.timestamps[1]
    }

    /// Time the device started executing (segment mid)
    pub fn started(&self) -> i64 {
        self.timestamps[2]
    }

    /// Time the device finished executing (segment end)
    pub fn ended(&self) -> i64 {
        self.timestamps[3]
    }
}

/// A loaded trace: data rows in file order plus `#` annotations
#[derive(Debug, Clone, Default)]
pub struct TraceTable {
    rows: Vec<TraceRow>,
    annotations: Vec<String>,
}

impl TraceTable {
    /// Load a trace file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::parse(&contents)?;

        tracing::debug!(
            path = %path.display(),
            rows = table.rows.len(),
            annotations = table.annotations.len(),
            "loaded trace"
        );

        Ok(table)
    }

    /// Parse trace file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut table = Self::default();
        let mut width: Option<usize> = None;

        for (index, raw) in contents.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                continue;
            }

            if let Some(comment) = trimmed.strip_prefix('#') {
                let text = comment.trim_start_matches('#').trim();
                if !text.is_empty() {
                    table.annotations.push(text.to_string());
                }
                continue;
            }

            let fields = parse_fields(trimmed, line)?;

            match width {
                None => width = Some(fields.len()),
                Some(expected) if expected != fields.len() => {
                    return Err(TraceError::RaggedRow {
                        line,
                        expected,
                        found: fields.len(),
                    });
                }
                Some(_) => {}
            }

            let row = TraceRow::from_fields(&fields).ok_or(TraceError::TooFewColumns {
                line,
                found: fields.len(),
            })?;
            table.rows.push(row);
        }

        if table.rows.is_empty() {
            return Err(TraceError::Empty);
        }

        Ok(table)
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    /// First annotation containing `needle`, e.g. the "Single GPU: 1.2s" timing line
    pub fn annotation_containing(&self, needle: &str) -> Option<&str> {
        self.annotations
            .iter()
            .map(String::as_str)
            .find(|text| text.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromStr for TraceTable {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_fields(line_text: &str, line: usize) -> Result<Vec<i64>> {
    line_text
        .split_whitespace()
        .enumerate()
        .map(|(column, field)| {
            field.parse::<i64>().map_err(|_| TraceError::InvalidInteger {
                line,
                column,
                value: field.to_string(),
            })
        })
        .collect()
}

//! CLI argument parsing for gpu-timeline

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gpu-timeline")]
#[command(version)]
#[command(
    about = "Plot kernel and read-back timelines of single- and multi-GPU benchmark traces",
    long_about = None
)]
pub struct Cli {
    /// Trace file: rows of `run device event queued submitted start end`
    #[arg(value_name = "TRACE_FILE")]
    pub trace_file: PathBuf,
}

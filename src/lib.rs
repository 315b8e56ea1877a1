//! gpu-timeline - timeline plots of single- and multi-GPU benchmark traces
//!
//! Loads the event table printed by an OpenCL multi-GPU benchmark, splits it
//! by run mode and device, zero-bases each group on its earliest timestamp
//! and draws kernel and read-back lanes as two stacked terminal charts.

pub mod cli;
pub mod filter;
pub mod plot;
pub mod timeline;
pub mod trace;
pub mod tui;

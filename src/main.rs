use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use gpu_timeline::{cli::Cli, plot::Figure, trace::TraceTable, tui};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber when RUST_LOG is set
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    let table = match TraceTable::from_file(&args.trace_file) {
        Ok(table) => table,
        Err(err) => {
            tracing::debug!(path = %args.trace_file.display(), error = %err, "trace load failed");
            eprintln!("Could not open trace file");
            std::process::exit(1);
        }
    };

    // Panics before the terminal is touched if a series is short
    let figure = Figure::from_table(&table);

    if std::io::stdout().is_terminal() {
        tui::run_interactive(&figure)?;
    } else {
        let text = tui::render_to_string(&figure, tui::HEADLESS_WIDTH, tui::HEADLESS_HEIGHT)?;
        print!("{text}");
    }

    Ok(())
}

//! Terminal rendering of a [`Figure`]
//!
//! Interactive mode draws both panels in the alternate screen and blocks
//! until the user closes the view. Headless mode renders one frame into an
//! off-screen buffer and returns it as text.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::TestBackend,
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
};

use crate::plot::{Figure, Panel};
use crate::timeline::SegmentKind;

/// Off-screen size used when stdout is not a terminal
pub const HEADLESS_WIDTH: u16 = 100;
pub const HEADLESS_HEIGHT: u16 = 30;

const Y_BOUNDS: [f64; 2] = [-1.5, 1.5];

/// Point data for one dataset; owned so the chart can borrow it
struct Trace {
    name: Option<String>,
    points: Vec<(f64, f64)>,
    color: Color,
    kind: SegmentKind,
    scatter: bool,
}

fn panel_traces(panel: &Panel) -> Vec<Trace> {
    let mut traces = Vec::new();

    for group in &panel.groups {
        for series in group.series() {
            let color = group.colors.for_lane(series.lane);
            let mut named = false;

            for segment in &series.segments {
                let name = match (segment.kind, named) {
                    (SegmentKind::Active, false) => {
                        named = true;
                        Some(format!("{} {}", group.label, series.lane.label()))
                    }
                    _ => None,
                };

                traces.push(Trace {
                    name,
                    points: segment.points().to_vec(),
                    color,
                    kind: segment.kind,
                    scatter: false,
                });

                if segment.kind == SegmentKind::Active {
                    traces.push(Trace {
                        name: None,
                        points: segment.points().to_vec(),
                        color,
                        kind: segment.kind,
                        scatter: true,
                    });
                }
            }
        }
    }

    traces
}

fn dataset(trace: &Trace) -> Dataset<'_> {
    let (marker, graph_type, style) = match (trace.kind, trace.scatter) {
        (SegmentKind::Wait, _) => (
            Marker::Dot,
            GraphType::Line,
            Style::default().fg(trace.color).add_modifier(Modifier::DIM),
        ),
        (SegmentKind::Active, false) => (
            Marker::Braille,
            GraphType::Line,
            Style::default().fg(trace.color),
        ),
        (SegmentKind::Active, true) => (
            Marker::Block,
            GraphType::Scatter,
            Style::default().fg(trace.color),
        ),
    };

    let dataset = Dataset::default()
        .data(&trace.points)
        .marker(marker)
        .graph_type(graph_type)
        .style(style);

    match &trace.name {
        Some(name) => dataset.name(name.clone()),
        None => dataset,
    }
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &Panel) {
    let traces = panel_traces(panel);
    let datasets: Vec<Dataset> = traces.iter().map(dataset).collect();
    let max = panel.max_time();

    let x_axis = Axis::default()
        .title("time (ns)")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, max])
        .labels(vec![
            "0".to_string(),
            format!("{:.0}", max / 2.0),
            format!("{:.0}", max),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds(Y_BOUNDS)
        .labels(vec!["-1", "0", "1"]);

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(panel.title.clone()))
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Draw the whole figure into `frame`
pub fn render_figure(frame: &mut Frame, figure: &Figure) {
    let [top, bottom, footer] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_panel(frame, top, &figure.top);
    render_panel(frame, bottom, &figure.bottom);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw("/"),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" close"),
    ]));
    frame.render_widget(help, footer);
}

/// Render one frame off-screen and return its text, one line per row
pub fn render_to_string(figure: &Figure, width: u16, height: u16) -> Result<String> {
    let mut terminal =
        Terminal::new(TestBackend::new(width, height)).context("Failed to create buffer")?;
    terminal
        .draw(|frame| render_figure(frame, figure))
        .context("Failed to render figure")?;

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for row in buffer.content.chunks(usize::from(width)) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    Ok(out)
}

/// Initialize the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    io::stdout()
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend).context("Failed to create terminal")
}

/// Restore terminal to normal mode
fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    io::stdout()
        .execute(LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    Ok(())
}

fn is_close_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, figure: &Figure) -> Result<()> {
    loop {
        terminal.draw(|frame| render_figure(frame, figure))?;

        // Resize and other events fall through to a redraw
        if let Event::Key(key) = event::read()? {
            if is_close_key(&key) {
                return Ok(());
            }
        }
    }
}

/// Show the figure and block until the user closes it
pub fn run_interactive(figure: &Figure) -> Result<()> {
    let mut terminal = setup_terminal()?;
    tracing::debug!("interactive view opened");

    let result = event_loop(&mut terminal, figure);
    restore_terminal()?;

    tracing::debug!("interactive view closed");
    result
}

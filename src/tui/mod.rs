//! Ratatui-based terminal UI.
//!
//! One division at a time: its current table next to its predicted table, with a
//! league-wide touchdowns-vs-wins chart underneath. The payload is loaded once
//! and re-run in memory when the clamp policy changes.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
};

use crate::app::pipeline::{RunOutput, run_with_raw};
use crate::cli::RunArgs;
use crate::data::{SourceData, load_raw};
use crate::domain::{DisplayTable, GroupKey, RunConfig, SourceKind};
use crate::error::{AppError, EXIT_UPSTREAM};

mod plotters_chart;

use plotters_chart::FitPlottersChart;

/// Start the TUI.
pub fn run(args: RunArgs) -> Result<(), AppError> {
    // Load before touching the terminal so startup errors print normally.
    let mut app = App::new(crate::app::run_config_from_args(&args))?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_UPSTREAM,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: RunConfig,
    selected: GroupKey,
    status: String,
    source: Option<SourceData>,
    run: Option<RunOutput>,
}

impl App {
    fn new(config: RunConfig) -> Result<Self, AppError> {
        let mut app = Self {
            config,
            selected: GroupKey::ALL[0],
            status: String::new(),
            source: None,
            run: None,
        };
        app.reload()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.prev();
                self.status = self.selected.display_name();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = self.selected.next();
                self.status = self.selected.display_name();
            }
            KeyCode::Char('c') => {
                self.config.pipeline.clamp = self.config.pipeline.clamp.toggle();
                self.rerun();
                if self.run.is_some() {
                    self.status = format!("clamp: {}", clamp_label(self.config.pipeline.clamp));
                }
            }
            KeyCode::Char('r') => {
                let mut config = self.config.clone();
                if config.source == SourceKind::Sample {
                    config.seed = config.seed.wrapping_add(1);
                }
                match load_raw(&config) {
                    Ok(source) => {
                        self.config = config;
                        self.install(source);
                    }
                    Err(err) => self.status = format!("Refresh failed: {err}"),
                }
            }
            _ => {}
        }
        false
    }

    /// Load the payload from the configured source and run the pipeline.
    fn reload(&mut self) -> Result<(), AppError> {
        let source = load_raw(&self.config)?;
        self.install(source);
        Ok(())
    }

    fn install(&mut self, source: SourceData) {
        self.status = format!("Loaded {} rows from {}", source.records.len(), source.label);
        self.source = Some(source);
        self.rerun();
    }

    /// Re-run the pipeline over the already-loaded payload.
    fn rerun(&mut self) {
        let Some(source) = &self.source else {
            self.status = "No payload loaded.".to_string();
            return;
        };

        match run_with_raw(
            source.records.clone(),
            source.label.clone(),
            self.config.season,
            self.config.pipeline,
        ) {
            Ok(run) => self.run = Some(run),
            Err(err) => {
                self.run = None;
                self.status = err.to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("standings", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " | {} | season {} | {}",
                self.run
                    .as_ref()
                    .map(|r| r.source.as_str())
                    .unwrap_or("-"),
                self.config.season,
                self.selected.display_name(),
            )),
        ]));

        let model = match self.run.as_ref().map(|r| &r.output.predicted) {
            Some(Ok(predicted)) => crate::report::format_model_line(&predicted.fit, self.config.pipeline.clamp),
            Some(Err(err)) => format!("Predicted standings unavailable: {err}"),
            None => "-".to_string(),
        };
        lines.push(Line::from(Span::styled(model, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(area);
        let tables = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        let (current, predicted) = match &self.run {
            Some(run) => selected_tables(&run.output.display_tables(), self.selected),
            None => (None, None),
        };
        draw_table(frame, tables[0], "Current", current.as_ref());
        draw_table(frame, tables[1], "Predicted", predicted.as_ref());

        self.draw_chart(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Touchdowns vs Wins").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No data.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(run, self.selected);
        let widget = FitPlottersChart {
            line: &series.line,
            teams: &series.teams,
            highlight: &series.highlight,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "touchdowns",
            y_label: "wins",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ division  c clamp  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_table(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, table: Option<&DisplayTable>) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);

    let Some(table) = table else {
        frame.render_widget(Paragraph::new("-").block(block), area);
        return;
    };
    if let Some(reason) = &table.unavailable {
        let msg = Paragraph::new(format!("unavailable: {reason}"))
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let header = Row::new(["#", "team", "W", "L"]).style(Style::default().add_modifier(Modifier::BOLD));
    let rows = table.rows.iter().enumerate().map(|(i, row)| {
        let position = row.rank.map(i64::from).unwrap_or(i as i64 + 1);
        Row::new([
            position.to_string(),
            row.team.clone(),
            row.wins.to_string(),
            row.losses.to_string(),
        ])
    });
    let widths = [
        Constraint::Length(2),
        Constraint::Min(10),
        Constraint::Length(4),
        Constraint::Length(4),
    ];
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn clamp_label(clamp: crate::domain::ClampPolicy) -> &'static str {
    match clamp {
        crate::domain::ClampPolicy::None => "none",
        crate::domain::ClampPolicy::Season => "season",
    }
}

/// Current and predicted display tables for one division.
fn selected_tables(tables: &[DisplayTable], key: GroupKey) -> (Option<DisplayTable>, Option<DisplayTable>) {
    let current = tables.iter().find(|t| t.id == key.id()).cloned();
    let predicted = tables.iter().find(|t| t.id == key.predicted_id()).cloned();
    (current, predicted)
}

/// Plot-ready data for the chart widget.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    line: Vec<(f64, f64)>,
    teams: Vec<(f64, f64)>,
    highlight: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(run: &RunOutput, selected: GroupKey) -> ChartSeries {
    let records = &run.ingest.records;
    let teams: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.touchdowns, f64::from(r.wins)))
        .collect();
    let highlight: Vec<(f64, f64)> = records
        .iter()
        .filter(|r| GroupKey::from_tags(&r.conference, &r.division) == Some(selected))
        .map(|r| (r.touchdowns, f64::from(r.wins)))
        .collect();

    let (x0, x1) = widen(min_max(teams.iter().map(|p| p.0)));

    let line = match &run.output.predicted {
        Ok(predicted) => {
            let m = predicted.fit.model;
            vec![(x0, m.evaluate(x0)), (x1, m.evaluate(x1))]
        }
        Err(_) => Vec::new(),
    };

    let (y0, y1) = widen(min_max(teams.iter().chain(line.iter()).map(|p| p.1)));
    let pad = ((y1 - y0) * 0.05).max(1e-12);

    ChartSeries {
        line,
        teams,
        highlight,
        x_bounds: [x0, x1],
        y_bounds: [y0 - pad, y1 + pad],
    }
}

/// Give an empty or zero-width range a usable extent.
fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if hi <= lo {
        (lo - 1.0, lo + 1.0)
    } else {
        (lo, hi)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClampPolicy, PipelineConfig};

    fn sample_app() -> App {
        let config = RunConfig {
            source: SourceKind::Sample,
            input: None,
            season: 2025,
            seed: 3,
            games: 17,
            pipeline: PipelineConfig::default(),
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_json: None,
            export_csv: None,
            save_raw: None,
        };
        App::new(config).unwrap()
    }

    #[test]
    fn keys_cycle_divisions_and_quit() {
        let mut app = sample_app();
        assert_eq!(app.selected, GroupKey::ALL[0]);

        assert!(!app.handle_key(KeyCode::Down));
        assert_eq!(app.selected, GroupKey::ALL[1]);
        assert!(!app.handle_key(KeyCode::Char('k')));
        assert!(!app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.selected, GroupKey::ALL[7]);

        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn clamp_toggle_reruns_without_reloading() {
        let mut app = sample_app();
        let raw_before = app.source.as_ref().unwrap().records.clone();

        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.config.pipeline.clamp, ClampPolicy::Season);
        let run = app.run.as_ref().unwrap();
        assert_eq!(run.pipeline.clamp, ClampPolicy::Season);
        assert_eq!(app.source.as_ref().unwrap().records, raw_before);
        for p in &run.output.predicted.as_ref().unwrap().predictions {
            assert!((0..=17).contains(&p.predicted_wins));
        }
    }

    #[test]
    fn refresh_reseeds_the_sample_league() {
        let mut app = sample_app();
        let before = app.source.as_ref().unwrap().records.clone();
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.config.seed, 4);
        assert_ne!(app.source.as_ref().unwrap().records, before);
    }

    #[test]
    fn degenerate_ranges_are_widened() {
        assert_eq!(widen((f64::INFINITY, f64::NEG_INFINITY)), (0.0, 1.0));
        assert_eq!(widen((30.0, 30.0)), (29.0, 31.0));
        assert_eq!(widen((2.0, 5.0)), (2.0, 5.0));
    }

    #[test]
    fn failed_refresh_keeps_seed_and_data() {
        let mut app = sample_app();
        let before = app.source.as_ref().unwrap().records.clone();

        app.config.games = 0;
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.config.seed, 3);
        assert!(app.status.starts_with("Refresh failed"), "{}", app.status);
        assert_eq!(app.source.as_ref().unwrap().records, before);
        assert!(app.run.is_some());
    }

    #[test]
    fn chart_series_highlights_the_selected_division() {
        let app = sample_app();
        let run = app.run.as_ref().unwrap();
        let key = GroupKey::ALL[2];
        let series = chart_series(run, key);

        assert_eq!(series.teams.len(), 32);
        assert_eq!(series.highlight.len(), 4);
        assert_eq!(series.line.len(), 2);
        assert!(series.x_bounds[0] < series.x_bounds[1]);
        assert!(series.y_bounds[0] < series.y_bounds[1]);

        let (current, predicted) = selected_tables(&run.output.display_tables(), key);
        assert_eq!(current.unwrap().rows.len(), 4);
        assert_eq!(predicted.unwrap().id, key.predicted_id());
    }
}

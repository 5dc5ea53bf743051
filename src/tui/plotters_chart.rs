//! Plotters-powered touchdowns-vs-wins chart widget for Ratatui.
//!
//! Plotters output is rendered into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct FitPlottersChart<'a> {
    /// Fitted regression line (may be empty when no fit is available).
    pub line: &'a [(f64, f64)],
    /// Every ingested team as (touchdowns, wins).
    pub teams: &'a [(f64, f64)],
    /// Teams of the selected division (a subset of `teams`).
    pub highlight: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for FitPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(0, 255, 255);
            let highlight_color = RGBColor(255, 215, 0);

            if !self.line.is_empty() {
                chart.draw_series(LineSeries::new(self.line.iter().copied(), &line_color))?;
            }
            chart.draw_series(self.teams.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            // `Circle` radii are mis-scaled by the ratatui backend; a colored pixel
            // reliably overrides the base point instead.
            chart.draw_series(
                self.highlight
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), highlight_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

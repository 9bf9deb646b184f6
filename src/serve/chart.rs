//! Horizontal bar chart rendered to an inline SVG string with plotters.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

const WIDTH: u32 = 720;
const ROW_HEIGHT: u32 = 30;
// caption, x axis and margins
const FRAME_HEIGHT: u32 = 110;
const BAR_COLOR: RGBColor = RGBColor(139, 92, 246);

/// Share of the x range left of zero reserved for the bar labels.
const LABEL_SPAN: f64 = 0.6;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

fn draw_failed(err: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Render `bars` top to bottom in the given order.
///
/// Bar lengths share one linear scale starting at zero. Negative values are
/// drawn as zero-length bars.
pub fn horizontal_bar_chart(title: &str, bars: &[(String, f64)]) -> Result<String, ChartError> {
    let max = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let scale = if max > 0.0 { max } else { 1.0 };
    let n_rows = bars.len().max(1);
    let height = FRAME_HEIGHT + ROW_HEIGHT * n_rows as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_failed)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .build_cartesian_2d(-scale * LABEL_SPAN..scale * 1.25, 0f64..n_rows as f64)
            .map_err(draw_failed)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_| String::new())
            .x_label_formatter(&|v| if *v < 0.0 { String::new() } else { format!("{v:.2}") })
            .x_desc("importance")
            .draw()
            .map_err(draw_failed)?;

        // the first bar sits on the top row
        let row = |i: usize| (bars.len() - 1 - i) as f64;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
                let y = row(i);
                Rectangle::new([(0.0, y + 0.15), (value.max(0.0), y + 0.85)], BAR_COLOR.filled())
            }))
            .map_err(draw_failed)?;

        let label_style = TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(HPos::Right, VPos::Center));
        chart
            .draw_series(bars.iter().enumerate().map(|(i, (label, _))| {
                Text::new(label.clone(), (-scale * 0.02, row(i) + 0.5), label_style.clone())
            }))
            .map_err(draw_failed)?;

        let value_style = TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
                Text::new(format!("{value:.4}"), (value.max(0.0) + scale * 0.02, row(i) + 0.5), value_style.clone())
            }))
            .map_err(draw_failed)?;

        root.present().map_err(draw_failed)?;
    }
    Ok(svg)
}

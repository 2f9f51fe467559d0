//! Oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown on screen
const SCOPE_WINDOW: usize = 512;

/// Index of the first rising zero crossing, so a steady note stands still.
fn trigger_point(samples: &[f32]) -> usize {
    let search = samples.len().saturating_sub(SCOPE_WINDOW);
    samples[..search.min(samples.len())]
        .windows(2)
        .position(|w| w[0] <= 0.0 && w[1] > 0.0)
        .unwrap_or(0)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], gain: f32) {
    let start = trigger_point(samples);
    let window = &samples[start..samples.len().min(start + SCOPE_WINDOW)];
    let scale = if gain > 0.0 { 1.0 / gain } else { 1.0 };

    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64, (s * scale) as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Scope (L) ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, SCOPE_WINDOW as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.2, 1.2])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

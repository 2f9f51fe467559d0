//! Spectrum widget
//!
//! Hann-windowed FFT of the scope buffer, read at log-spaced frequencies
//! from 20 Hz to 5 kHz where a bass line lives. Peaks fall back slowly so
//! short notes stay visible between redraws.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::{f32::consts::TAU, sync::Arc};

const POINTS: usize = 64;
const LOW_HZ: f64 = 20.0;
const HIGH_HZ: f64 = 5_000.0;
const FLOOR_DB: f64 = -90.0;
/// dB lost per redraw when the level drops
const FALL_DB: f64 = 1.5;

pub struct Spectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    /// FFT bin read for each display point
    bins: Vec<usize>,
    /// (log10 Hz, dB) per display point
    levels: Vec<(f64, f64)>,
}

impl Spectrum {
    pub fn new(size: usize, sample_rate: f32) -> Self {
        let size = size.max(2);
        let fft = FftPlanner::new().plan_fft_forward(size);
        let window = (0..size)
            .map(|i| 0.5 - 0.5 * (TAU * i as f32 / (size - 1) as f32).cos())
            .collect();

        let nyquist_bin = size / 2 - 1;
        let high = HIGH_HZ.min(sample_rate as f64 / 2.0);
        let (bins, levels): (Vec<usize>, Vec<(f64, f64)>) = (0..POINTS)
            .map(|i| {
                let t = i as f64 / (POINTS - 1) as f64;
                let hz = LOW_HZ * (high / LOW_HZ).powf(t);
                let bin = ((hz * size as f64 / sample_rate as f64).round() as usize).min(nyquist_bin);
                (bin, (hz.log10(), FLOOR_DB))
            })
            .unzip();

        Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
            bins,
            levels,
        }
    }

    pub fn size(&self) -> usize {
        self.window.len()
    }

    /// Analyse the most recent `size()` samples.
    pub fn update(&mut self, samples: &[f32]) {
        let Some(start) = samples.len().checked_sub(self.size()) else {
            return;
        };

        for ((slot, &s), &w) in self.buffer.iter_mut().zip(&samples[start..]).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.buffer);

        let norm = 2.0 / self.size() as f32;
        for (&bin, (_, level)) in self.bins.iter().zip(self.levels.iter_mut()) {
            let magnitude = (self.buffer[bin].norm() * norm).max(1e-9);
            let db = (20.0 * magnitude.log10() as f64).max(FLOOR_DB);
            *level = if db > *level { db } else { (*level - FALL_DB).max(db) };
        }
    }

    pub fn levels(&self) -> &[(f64, f64)] {
        &self.levels
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &Spectrum) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum.levels());

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([LOW_HZ.log10(), HIGH_HZ.log10()])
                .labels(vec!["20", "200", "2k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-90", "-45", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

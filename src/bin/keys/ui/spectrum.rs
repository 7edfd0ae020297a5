//! Spectrum widget
//!
//! Windowed FFT of the scope buffer, sampled on a log-spaced grid that
//! covers the keyboard's octave and its first few harmonics. The strongest
//! grid point is reported as the sounding pitch.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Points drawn across the range
const SPECTRUM_BINS: usize = 64;
/// Displayed range in Hz
const MIN_FREQ: f64 = 100.0;
const MAX_FREQ: f64 = 2_000.0;
/// Anything quieter is treated as silence
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// FFT bin index for each display point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` must match the length of the buffers passed to [`update`](Self::update)
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(1.0);
        let max_freq = MAX_FREQ.min(nyquist);
        let min_freq = MIN_FREQ.min(max_freq);
        let ratio = max_freq / min_freq;
        let last_bin = (buffer_len / 2).saturating_sub(1);

        let mut spectrum = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = min_freq * ratio.powf(t);
            let index = (freq * buffer_len as f64 / sample_rate as f64).round() as usize;
            spectrum.push((freq, FLOOR_DB));
            bin_indices.push(index.min(last_bin));
        }

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from `buffer`; buffers of the wrong length are ignored
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() || buffer.is_empty() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((_, magnitude_db), &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let power = self.scratch[index].norm_sqr().max(1e-12);
            *magnitude_db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    /// Frequency of the loudest display point, or None for silence
    pub fn peak_frequency(&self) -> Option<f64> {
        self.spectrum
            .iter()
            .filter(|(_, db)| *db > FLOOR_DB + 40.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(freq, _)| *freq)
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let title = match analyzer.peak_frequency() {
        Some(freq) => format!(" Spectrum ~{freq:.0} Hz "),
        None => " Spectrum ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let spectrum = analyzer.data();
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum.last().map(|(f, _)| *f).unwrap_or(MAX_FREQ);
    let min_freq = spectrum.first().map(|(f, _)| *f).unwrap_or(MIN_FREQ);
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_freq, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_has_no_peak() {
        let mut analyzer = SpectrumAnalyzer::new(4096, 48_000.0);
        analyzer.update(&[0.0; 4096]);
        assert_eq!(analyzer.peak_frequency(), None);
    }

    #[test]
    fn finds_a_sine_near_its_pitch() {
        let sample_rate = 48_000.0;
        let buffer: Vec<f32> = (0..4096)
            .map(|i| 0.3 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate).sin())
            .collect();

        let mut analyzer = SpectrumAnalyzer::new(buffer.len(), sample_rate);
        analyzer.update(&buffer);

        let peak = analyzer.peak_frequency().unwrap();
        // Grid spacing at 440 Hz is about 5%
        assert!((peak - 440.0).abs() < 30.0, "peak at {peak}");
    }

    #[test]
    fn ignores_mismatched_buffers() {
        let mut analyzer = SpectrumAnalyzer::new(1024, 48_000.0);
        analyzer.update(&[0.5; 512]);
        assert!(analyzer.data().iter().all(|(_, db)| *db == FLOOR_DB));
    }
}

//! Status bar widget - audio device state, last key, pending timers, levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// What the status bar reports besides levels
pub struct StatusInfo<'a> {
    /// None until the first note opens the device
    pub sample_rate: Option<f32>,
    pub last_key: Option<&'a str>,
    pub error: Option<&'a str>,
    pub pending_tasks: usize,
}

/// Render the status bar
pub fn render_transport(frame: &mut Frame, area: Rect, status: &StatusInfo, audio_stats: &AudioStats) {
    let block = Block::default().title(" saavy keys ").borders(Borders::ALL);

    let device = match status.sample_rate {
        Some(rate) => Span::styled(
            format!(" ● {:.1}kHz  ", rate / 1000.0),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled(" ○ audio idle  ", Style::default().fg(Color::Yellow)),
    };

    let mut spans = vec![
        device,
        Span::styled(
            format!("{}  ", status.last_key.unwrap_or("-")),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("timers: {}  ", status.pending_tasks),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ];

    if let Some(error) = status.error {
        spans.push(Span::styled(format!("✗ {error}"), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_silence_are_zero() {
        let stats = AudioStats::from_buffer(&[0.0; 64]);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.rms, 0.0);
    }

    #[test]
    fn peak_tracks_largest_magnitude() {
        let stats = AudioStats::from_buffer(&[0.1, -0.3, 0.2]);
        assert!((stats.peak - 0.3).abs() < 1e-6);
        assert!(stats.rms > 0.0 && stats.rms < stats.peak);
    }
}

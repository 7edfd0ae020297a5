use std::time::Duration;

use crate::synth::tone::ToneRequest;

/// Seconds each note of a sequence sounds for.
pub const SEQUENCE_TONE_DURATION: f64 = 0.4;

/// Default spacing between sequence notes.
pub const DEFAULT_SEQUENCE_INTERVAL: Duration = Duration::from_millis(300);

/// An ordered list of pitches played one after another at a fixed spacing.
///
/// Each pitch becomes its own [`ToneRequest`]; nothing links the steps once
/// they have been handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRequest {
    pub frequencies: Vec<f32>,
    pub interval: Duration,
}

impl SequenceRequest {
    pub fn new(frequencies: impl Into<Vec<f32>>, interval: Duration) -> Self {
        Self {
            frequencies: frequencies.into(),
            interval,
        }
    }

    /// `(delay, tone)` for every step, in list order.
    ///
    /// Step `i` fires `i * interval` after the sequence is started. Delays
    /// that do not fit in a [`Duration`] saturate at `Duration::MAX`.
    pub fn steps(&self) -> impl Iterator<Item = (Duration, ToneRequest)> + '_ {
        self.frequencies.iter().enumerate().map(move |(i, &frequency)| {
            (self.delay_of(i), ToneRequest::new(frequency, SEQUENCE_TONE_DURATION))
        })
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Time from the first step firing to the last one firing.
    pub fn span(&self) -> Duration {
        self.delay_of(self.len().saturating_sub(1))
    }

    fn delay_of(&self, step: usize) -> Duration {
        u32::try_from(step)
            .ok()
            .and_then(|step| self.interval.checked_mul(step))
            .unwrap_or(Duration::MAX)
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::ramp::ExponentialRamp;

/// Gain at the moment a tone starts.
pub const PEAK_GAIN: f32 = 0.3;
/// Gain the envelope has decayed to when the tone stops.
pub const FLOOR_GAIN: f32 = 0.01;

/// Seconds a key press sounds for when no duration is given.
pub const DEFAULT_TONE_DURATION: f64 = 0.5;

/// "Play this pitch for this long", not yet tied to any clock.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    /// Pitch in Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
}

impl ToneRequest {
    pub fn new(frequency: f32, duration: f64) -> Self {
        Self {
            frequency,
            duration,
        }
    }

    /// Anchor the request at `now` on a context clock.
    pub fn at(self, now: f64) -> Tone {
        Tone::new(self.frequency, now, self.duration)
    }
}

/// A sine tone pinned to the context clock.
///
/// The oscillator sounds over `[start_time, stop_time)`; the gain falls
/// exponentially from [`PEAK_GAIN`] at start to [`FLOOR_GAIN`] at stop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub start_time: f64,
    pub stop_time: f64,
    pub envelope: ExponentialRamp,
}

impl Tone {
    pub fn new(frequency: f32, start_time: f64, duration: f64) -> Self {
        let stop_time = start_time + duration.max(0.0);
        Self {
            frequency,
            start_time,
            stop_time,
            envelope: ExponentialRamp::new(PEAK_GAIN, FLOOR_GAIN, start_time, stop_time),
        }
    }

    pub fn duration(&self) -> f64 {
        self.stop_time - self.start_time
    }
}

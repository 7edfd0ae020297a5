//! Piano settings
//!
//! Defaults reproduce the classic demo: half-second key tones, a 200 ms key
//! flash, 0.4 s sequence notes and all three demo buttons.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    demos::Demo,
    engine::context::DEFAULT_QUEUE_CAPACITY,
    keyboard::KEY_FLASH,
    synth::tone::DEFAULT_TONE_DURATION,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PianoConfig {
    /// Seconds a pressed key sounds for
    pub tone_duration: f64,
    /// How long a pressed key stays lit
    pub key_flash: Duration,
    /// Demo buttons to wire up
    pub demos: Vec<Demo>,
    /// Capacity of the control queue into the audio thread
    pub queue_capacity: usize,
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self {
            tone_duration: DEFAULT_TONE_DURATION,
            key_flash: KEY_FLASH,
            demos: Demo::ALL.to_vec(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

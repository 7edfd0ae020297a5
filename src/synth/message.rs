use std::fmt;

use rtrb::Producer;

use crate::synth::tone::Tone;

/// Control messages sent from the context to the audio thread.
pub enum SynthMessage {
    /// Start sounding a tone (times are on the context clock)
    Play(Tone),
    /// Cut every sounding tone immediately
    Silence,
    /// Mirror the mix into this producer from now on
    Tap(Producer<f32>),
}

impl fmt::Debug for SynthMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthMessage::Play(tone) => f.debug_tuple("Play").field(tone).finish(),
            SynthMessage::Silence => f.write_str("Silence"),
            SynthMessage::Tap(_) => f.write_str("Tap(..)"),
        }
    }
}

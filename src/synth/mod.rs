// Purpose: tones, the voices that play them, and the mixer that sums voices
// This layer sits above graph nodes and below the audio context

pub mod message;
pub mod mixer;
pub mod tone;
pub mod voice;

pub use message::SynthMessage;
pub use mixer::ToneMixer;
pub use tone::{Tone, ToneRequest};
pub use voice::Voice;

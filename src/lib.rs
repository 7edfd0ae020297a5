pub mod config;
pub mod demos; // Canned interval/scale examples
pub mod dsp;
pub mod engine; // Audio context, lazy engine, timers
pub mod graph; // Composable audio graph nodes
pub mod keyboard;
pub mod piano;
pub mod sequencing; // Note table and timed sequences
pub mod synth; // Tones, voices and the mixer

pub const MAX_BLOCK_SIZE: usize = 2048;

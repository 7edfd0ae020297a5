//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math so graph nodes can layer on timing and routing.

/// Exponential parameter automation.
pub mod ramp;
/// Phase-accumulating sine oscillator.
pub mod oscillator;

pub use oscillator::OscillatorBlock;
pub use ramp::ExponentialRamp;

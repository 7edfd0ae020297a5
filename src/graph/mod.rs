//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a tone needs:
//! pitch, absolute timing, and block-based rendering. The `extensions` module
//! adds fluent helpers so a tone graph reads the way it sounds.

/// Multiply two signals together (amplitude control).
pub mod amplify;
/// Fluent combinators (`.amplify()`).
pub mod extensions;
/// Gain automation node driven by the context clock.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band sine oscillator.
pub mod oscillator;

pub use amplify::Amplify;
pub use extensions::NodeExt;
pub use gain::GainNode;
pub use node::{GraphNode, RenderCtx};
pub use oscillator::OscNode;

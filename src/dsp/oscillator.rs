use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/*
Sine Oscillator
===============

The keyboard only ever needs the purest tone there is: a single frequency
with no harmonics. Smooth, hollow, a little flute-like.

Phase Accumulation
------------------

Rather than evaluating sin(2π f t) from an absolute time, we keep a phase
in [0, 1) and advance it by f / sample_rate every sample:

    sample = sin(2π · phase)
    phase  = phase + f / sr   (wrapped back into [0, 1))

Example: 440 Hz at 48kHz
  - increment = 440 / 48000 ≈ 0.00917
  - one full cycle every ≈ 109 samples

Wrapping keeps the phase small, so f32 precision never degrades no matter
how long a note rings.
*/

pub struct OscillatorBlock {
    phase: f32,
}

impl OscillatorBlock {
    pub fn sine() -> Self {
        Self { phase: 0.0 }
    }

    /// Restart the waveform at phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;

        for sample in out.iter_mut() {
            *sample = (TAU * self.phase).sin();

            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= self.phase.floor();
            }
        }
    }
}

impl Default for OscillatorBlock {
    fn default() -> Self {
        Self::sine()
    }
}

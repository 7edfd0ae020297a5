use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The oscillator is the sound source of every key: a sine wave at the pitch
carried in RenderCtx. Gain shaping happens downstream, so the oscillator
itself always runs at full scale (-1.0 to 1.0).

Example usage:
  let tone = OscNode::sine()
      .amplify(GainNode::ramp(ExponentialRamp::new(0.3, 0.01, start, stop)));
*/

pub struct OscNode {
    osc: OscillatorBlock,
}

impl OscNode {
    pub fn sine() -> Self {
        Self {
            osc: OscillatorBlock::sine(),
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}

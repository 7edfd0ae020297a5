use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Blocks never exceed MAX_BLOCK_SIZE; the mixer splits larger callbacks
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsp::ExponentialRamp, graph::{GainNode, OscNode}};

    #[test]
    fn scales_signal_by_gain() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut plain = OscNode::sine();
        let mut shaped = Amplify::new(
            OscNode::sine(),
            GainNode::ramp(ExponentialRamp::new(0.3, 0.3, 0.0, 1.0)),
        );

        let mut a = vec![0.0f32; 256];
        let mut b = vec![0.0f32; 256];
        plain.render_block(&mut a, &ctx);
        shaped.render_block(&mut b, &ctx);

        for (x, y) in a.iter().zip(&b) {
            assert!((x * 0.3 - y).abs() < 1e-6);
        }
    }
}

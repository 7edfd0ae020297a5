use crate::{
    dsp::ramp::ExponentialRamp,
    graph::node::{GraphNode, RenderCtx},
};

/// Gain parameter automated against the context clock.
///
/// Renders the gain curve itself; pair it with a signal through
/// [`Amplify`](crate::graph::Amplify) to apply it.
pub struct GainNode {
    ramp: ExponentialRamp,
}

impl GainNode {
    pub fn ramp(ramp: ExponentialRamp) -> Self {
        Self { ramp }
    }

    pub fn curve(&self) -> &ExponentialRamp {
        &self.ramp
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.ramp.value_at(ctx.sample_time(i)) * ctx.velocity;
        }
    }
}

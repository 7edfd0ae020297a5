use crate::{
    graph::{
        amplify::Amplify, extensions::NodeExt, gain::GainNode, node::GraphNode,
        oscillator::OscNode, RenderCtx,
    },
    synth::tone::Tone,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Pending,  // Waiting for its start frame
    Sounding, // Oscillator running, gain decaying
    Finished, // Past its stop frame, ready to be dropped
}

/// One sounding tone: a sine oscillator under its own gain envelope.
///
/// Every tone gets a fresh voice, so overlapping presses decay
/// independently of one another.
pub struct Voice {
    tone: Tone,
    graph: Amplify<OscNode, GainNode>,
    start_frame: u64,
    stop_frame: u64,
    state: VoiceState,
    sample_rate: f32,
}

impl Voice {
    pub fn new(tone: Tone, sample_rate: f32) -> Self {
        let graph = OscNode::sine().amplify(GainNode::ramp(tone.envelope));

        let start_frame = seconds_to_frames(tone.start_time, sample_rate);
        let stop_frame = seconds_to_frames(tone.stop_time, sample_rate).max(start_frame);

        Self {
            tone,
            graph,
            start_frame,
            stop_frame,
            state: VoiceState::Pending,
            sample_rate,
        }
    }

    /// Add this voice's output for the block starting at `block_start` into `out`.
    ///
    /// A start frame already in the past begins at the block start instead;
    /// the envelope stays anchored on the tone's own times.
    pub fn render_into(&mut self, out: &mut [f32], scratch: &mut [f32], block_start: u64) {
        let block_end = block_start + out.len() as u64;
        if self.state == VoiceState::Finished || block_end <= self.start_frame {
            return;
        }

        let from = self.start_frame.saturating_sub(block_start) as usize;
        let to = self.stop_frame.min(block_end).saturating_sub(block_start) as usize;

        if from < to {
            let ctx = RenderCtx::from_freq(self.sample_rate, self.tone.frequency, 1.0)
                .at_time((block_start + from as u64) as f64 / self.sample_rate as f64);

            if self.state == VoiceState::Pending {
                self.graph.note_on(&ctx);
                self.state = VoiceState::Sounding;
            }

            let span = &mut scratch[..to - from];
            self.graph.render_block(span, &ctx);
            for (o, s) in out[from..to].iter_mut().zip(span.iter()) {
                *o += *s;
            }
        }

        if block_end >= self.stop_frame {
            self.state = VoiceState::Finished;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == VoiceState::Finished
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn tone(&self) -> &Tone {
        &self.tone
    }

    pub fn stop_frame(&self) -> u64 {
        self.stop_frame
    }
}

#[inline]
fn seconds_to_frames(seconds: f64, sample_rate: f32) -> u64 {
    (seconds.max(0.0) * sample_rate as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn silent_before_start_and_after_stop() {
        let tone = Tone::new(50.0, 0.1, 0.2);
        let mut voice = Voice::new(tone, SAMPLE_RATE);
        let mut out = vec![0.0f32; 400];
        let mut scratch = vec![0.0f32; 400];

        voice.render_into(&mut out, &mut scratch, 0);

        assert!(out[..100].iter().all(|&s| s == 0.0));
        assert!(out[100..300].iter().any(|&s| s != 0.0));
        assert!(out[300..].iter().all(|&s| s == 0.0));
        assert!(voice.is_finished());
    }

    #[test]
    fn pending_until_start_block() {
        let tone = Tone::new(50.0, 1.0, 0.5);
        let mut voice = Voice::new(tone, SAMPLE_RATE);
        let mut out = vec![0.0f32; 100];
        let mut scratch = vec![0.0f32; 100];

        voice.render_into(&mut out, &mut scratch, 0);

        assert_eq!(voice.state(), VoiceState::Pending);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn late_start_begins_at_block() {
        let tone = Tone::new(50.0, 0.0, 0.5);
        let mut voice = Voice::new(tone, SAMPLE_RATE);
        let mut out = vec![0.0f32; 100];
        let mut scratch = vec![0.0f32; 100];

        voice.render_into(&mut out, &mut scratch, 200);

        assert_eq!(voice.state(), VoiceState::Sounding);
        // Envelope already partly decayed at t = 0.2
        let peak = out.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak < 0.3 && peak > 0.0);
    }

    #[test]
    fn amplitude_never_exceeds_peak_gain() {
        let tone = Tone::new(440.0, 0.0, 0.5);
        let mut voice = Voice::new(tone, 48_000.0);
        let mut out = vec![0.0f32; 1024];
        let mut scratch = vec![0.0f32; 1024];

        voice.render_into(&mut out, &mut scratch, 0);

        assert!(out.iter().all(|s| s.abs() <= 0.3 + 1e-6));
    }
}

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer};
use tracing::trace;

use crate::{
    synth::{message::SynthMessage, voice::Voice},
    MAX_BLOCK_SIZE,
};

/// Voices reserved up front. More simultaneous tones than this grow the
/// list on the audio thread.
const INITIAL_VOICES: usize = 32;

/// Audio-thread half of an audio context.
///
/// Drains tone messages, renders and sums every sounding voice, and publishes
/// how many frames it has produced so the context can read its clock.
pub struct ToneMixer {
    rx: Consumer<SynthMessage>,
    voices: Vec<Voice>,
    scratch: Vec<f32>,
    block: Vec<f32>,
    sample_rate: f32,
    frame: u64,
    clock: Arc<AtomicU64>,
    tap: Option<Producer<f32>>,
}

impl ToneMixer {
    pub(crate) fn new(sample_rate: f32, rx: Consumer<SynthMessage>, clock: Arc<AtomicU64>) -> Self {
        Self {
            rx,
            voices: Vec::with_capacity(INITIAL_VOICES),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            block: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate,
            frame: 0,
            clock,
            tap: None,
        }
    }

    /// Mirror every rendered sample into `tap` (dropped when the tap is full).
    pub fn with_tap(mut self, tap: Producer<f32>) -> Self {
        self.tap = Some(tap);
        self
    }

    /// Render one mono block of at most [`MAX_BLOCK_SIZE`] frames.
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        // Process control messages
        while let Ok(msg) = self.rx.pop() {
            match msg {
                SynthMessage::Play(tone) => {
                    trace!(frequency = tone.frequency, start = tone.start_time, "voice started");
                    self.voices.push(Voice::new(tone, self.sample_rate));
                }
                SynthMessage::Silence => self.voices.clear(),
                SynthMessage::Tap(tap) => self.tap = Some(tap),
            }
        }

        // Mix voices
        out.fill(0.0);
        let block_start = self.frame;
        for voice in &mut self.voices {
            voice.render_into(out, &mut self.scratch, block_start);
        }
        self.voices.retain(|v| !v.is_finished());

        if let Some(tap) = self.tap.as_mut() {
            for &sample in out.iter() {
                if tap.push(sample).is_err() {
                    break;
                }
            }
        }

        self.frame += out.len() as u64;
        self.clock.store(self.frame, Ordering::Release);
    }

    /// Fill an interleaved device buffer, copying the mono mix to every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        // Temporarily take the block buffer to allow the mutable borrow of self
        let mut block = std::mem::take(&mut self.block);

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let chunk = &mut block[..frames_to_render];
            self.render_block(chunk);

            let out_off = frames_written * channels;
            for (i, &s) in chunk.iter().enumerate() {
                for ch in 0..channels {
                    data[out_off + i * channels + ch] = s;
                }
            }

            frames_written += frames_to_render;
        }

        self.block = block;
    }

    /// Voices currently sounding or waiting to start.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frames rendered since the context was created.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::tone::Tone;
    use rtrb::RingBuffer;

    fn mixer(sample_rate: f32) -> (Producer<SynthMessage>, ToneMixer) {
        let (tx, rx) = RingBuffer::new(16);
        let clock = Arc::new(AtomicU64::new(0));
        (tx, ToneMixer::new(sample_rate, rx, clock))
    }

    #[test]
    fn overlapping_tones_sum() {
        let (mut tx, mut mix) = mixer(48_000.0);
        tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 0.5))).unwrap();
        let mut single = vec![0.0f32; 256];
        mix.render_block(&mut single);

        let (mut tx, mut mix) = mixer(48_000.0);
        tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 0.5))).unwrap();
        tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 0.5))).unwrap();
        let mut double = vec![0.0f32; 256];
        mix.render_block(&mut double);

        assert_eq!(mix.active_voices(), 2);
        for (a, b) in single.iter().zip(&double) {
            assert!((a * 2.0 - b).abs() < 1e-6);
        }
    }

    #[test]
    fn finished_voices_are_dropped() {
        let (mut tx, mut mix) = mixer(1_000.0);
        tx.push(SynthMessage::Play(Tone::new(50.0, 0.0, 0.1))).unwrap();

        let mut block = vec![0.0f32; 64];
        mix.render_block(&mut block);
        assert_eq!(mix.active_voices(), 1);

        mix.render_block(&mut block);
        assert_eq!(mix.active_voices(), 0);
        assert_eq!(mix.frame(), 128);
    }

    #[test]
    fn silence_cuts_everything() {
        let (mut tx, mut mix) = mixer(48_000.0);
        tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 5.0))).unwrap();
        let mut block = vec![0.0f32; 128];
        mix.render_block(&mut block);

        tx.push(SynthMessage::Silence).unwrap();
        mix.render_block(&mut block);

        assert_eq!(mix.active_voices(), 0);
        assert!(block.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn interleaved_copies_mono_to_all_channels() {
        let (mut tx, mut mix) = mixer(48_000.0);
        tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 1.0))).unwrap();

        let mut data = vec![0.0f32; 2 * 3000];
        mix.render_interleaved(&mut data, 2);

        assert_eq!(mix.frame(), 3000);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn keeps_every_voice_past_the_reserve() {
        let (mut tx, rx) = RingBuffer::new(INITIAL_VOICES * 2);
        let mut mix = ToneMixer::new(48_000.0, rx, Arc::new(AtomicU64::new(0)));
        for _ in 0..INITIAL_VOICES + 8 {
            tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 1.0))).unwrap();
        }

        let mut block = vec![0.0f32; 64];
        mix.render_block(&mut block);

        assert_eq!(mix.active_voices(), INITIAL_VOICES + 8);
    }

    #[test]
    fn tap_message_starts_mirroring() {
        let (mut tx, mut mix) = mixer(48_000.0);
        let (tap_tx, mut tap_rx) = RingBuffer::<f32>::new(256);
        tx.push(SynthMessage::Play(Tone::new(440.0, 0.0, 1.0))).unwrap();

        let mut block = vec![0.0f32; 64];
        mix.render_block(&mut block);
        assert!(tap_rx.pop().is_err());

        tx.push(SynthMessage::Tap(tap_tx)).unwrap();
        mix.render_block(&mut block);

        let tapped: Vec<f32> = std::iter::from_fn(|| tap_rx.pop().ok()).collect();
        assert_eq!(tapped, block);
    }

    #[test]
    fn clock_tracks_rendered_frames() {
        let (tx, rx) = RingBuffer::<SynthMessage>::new(4);
        drop(tx);
        let clock = Arc::new(AtomicU64::new(0));
        let mut mix = ToneMixer::new(48_000.0, rx, clock.clone());

        let mut block = vec![0.0f32; 480];
        mix.render_block(&mut block);
        mix.render_block(&mut block);

        assert_eq!(clock.load(Ordering::Acquire), 960);
    }
}

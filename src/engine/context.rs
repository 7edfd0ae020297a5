//! Audio context - the control-thread half of a running synth
//!
//! A context owns the message queue into its [`ToneMixer`] and reads the
//! mixer's frame counter as its clock. Tones are created against that clock
//! and handed over fire-and-forget.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use cpal::traits::StreamTrait;
use rtrb::{Producer, RingBuffer};
use tracing::{debug, warn};

use super::error::AudioError;
use crate::synth::{
    message::SynthMessage,
    mixer::ToneMixer,
    tone::{Tone, ToneRequest},
};

/// Default capacity of the control queue into the audio thread.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

pub struct AudioContext {
    sample_rate: f32,
    clock: Arc<AtomicU64>,
    tx: Producer<SynthMessage>,
    /// Keeps the device pulling audio; `None` for offline contexts
    stream: Option<cpal::Stream>,
    closed: bool,
}

impl AudioContext {
    /// Create a context that nothing drives yet.
    ///
    /// The returned mixer renders the context's output; whoever owns it
    /// (a device callback, a test, a bounce loop) advances the clock.
    pub fn offline(sample_rate: f32) -> (Self, ToneMixer) {
        Self::with_capacity(sample_rate, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(sample_rate: f32, queue_capacity: usize) -> (Self, ToneMixer) {
        let (tx, rx) = RingBuffer::<SynthMessage>::new(queue_capacity.max(1));
        let clock = Arc::new(AtomicU64::new(0));
        let mixer = ToneMixer::new(sample_rate, rx, clock.clone());

        let context = Self {
            sample_rate,
            clock,
            tx,
            stream: None,
            closed: false,
        };

        (context, mixer)
    }

    /// Keep `stream` alive for as long as the context is open.
    pub(crate) fn attach_stream(&mut self, stream: cpal::Stream) {
        self.stream = Some(stream);
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Seconds of audio the context has rendered so far.
    pub fn current_time(&self) -> f64 {
        self.clock.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    /// A tone starting now on this context's clock.
    pub fn create_tone(&self, frequency: f32, duration: f64) -> Tone {
        ToneRequest::new(frequency, duration).at(self.current_time())
    }

    /// Hand a tone to the audio thread.
    pub fn start_tone(&mut self, tone: Tone) -> Result<(), AudioError> {
        self.send(SynthMessage::Play(tone))?;
        debug!(
            frequency = tone.frequency,
            start = tone.start_time,
            stop = tone.stop_time,
            "tone scheduled"
        );
        Ok(())
    }

    /// Cut every tone that is currently sounding.
    pub fn silence(&mut self) -> Result<(), AudioError> {
        self.send(SynthMessage::Silence)
    }

    /// Stop the device and refuse further tones. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        // Best effort: the queue may already be full
        let _ = self.tx.push(SynthMessage::Silence);
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                warn!(%err, "failed to pause output stream");
            }
        }
        self.closed = true;
    }

    /// Have the mixer mirror its output into `tap` from its next block on.
    pub(crate) fn attach_tap(&mut self, tap: Producer<f32>) -> Result<(), AudioError> {
        self.send(SynthMessage::Tap(tap))
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn send(&mut self, msg: SynthMessage) -> Result<(), AudioError> {
        if self.closed {
            return Err(AudioError::Closed);
        }
        self.tx.push(msg).map_err(|_| {
            warn!("tone queue full, dropping message");
            AudioError::QueueFull
        })
    }
}

impl Drop for AudioContext {
    fn drop(&mut self) {
        self.close();
    }
}

//! Audio engine: a lazily opened context plus "play" helpers.
//!
//! The engine owns at most one [`AudioContext`] for its whole life. Nothing
//! touches the audio device until the first tone is played; if opening the
//! device fails, that call fails and the next one tries again.

pub mod context;
pub mod error;
pub mod output;
pub mod scheduler;

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    sequencing::{sequence::DEFAULT_SEQUENCE_INTERVAL, SequenceRequest},
    synth::tone::ToneRequest,
};

pub use context::AudioContext;
pub use error::AudioError;
pub use output::CpalOutput;
pub use scheduler::{Scheduler, TaskHandle};

pub use crate::synth::tone::DEFAULT_TONE_DURATION;

/// Creates the context an engine plays through.
///
/// Implemented by [`CpalOutput`] for real devices and by any
/// `FnMut() -> Result<AudioContext, AudioError>` closure.
pub trait ContextFactory {
    fn create(&mut self) -> Result<AudioContext, AudioError>;
}

impl<F> ContextFactory for F
where
    F: FnMut() -> Result<AudioContext, AudioError>,
{
    fn create(&mut self) -> Result<AudioContext, AudioError> {
        self()
    }
}

pub struct AudioEngine<F = CpalOutput> {
    factory: F,
    context: Option<AudioContext>,
    shut_down: bool,
}

impl<F: ContextFactory> AudioEngine<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            context: None,
            shut_down: false,
        }
    }

    /// The engine's context, created on first call.
    pub fn get_context(&mut self) -> Result<&mut AudioContext, AudioError> {
        if self.shut_down {
            return Err(AudioError::Closed);
        }

        let context = match self.context.take() {
            Some(context) => context,
            None => {
                let context = self.factory.create()?;
                info!(sample_rate = context.sample_rate(), "audio engine started");
                context
            }
        };

        Ok(self.context.insert(context))
    }

    /// Sound a sine tone now, decaying from 0.3 to 0.01 over `duration` seconds.
    pub fn play_note(&mut self, frequency: f32, duration: f64) -> Result<(), AudioError> {
        let context = self.get_context()?;
        let tone = context.create_tone(frequency, duration);
        context.start_tone(tone)
    }

    /// [`play_note`](Self::play_note) with a [`ToneRequest`].
    pub fn play(&mut self, request: ToneRequest) -> Result<(), AudioError> {
        self.play_note(request.frequency, request.duration)
    }

    /// Schedule one 0.4 s tone per frequency on `timers`, `interval` apart
    /// (`None` for the default 300 ms).
    ///
    /// Fire-and-forget: nothing is played here, and the context is not
    /// touched until the first step fires. An empty list schedules nothing.
    /// Fails with [`AudioError::Closed`] once the engine has been shut down.
    pub fn play_sequence<T: From<ToneRequest>>(
        &self,
        timers: &mut Scheduler<T>,
        now: Instant,
        frequencies: &[f32],
        interval: impl Into<Option<Duration>>,
    ) -> Result<Vec<TaskHandle>, AudioError> {
        if self.shut_down {
            return Err(AudioError::Closed);
        }

        let interval = interval.into().unwrap_or(DEFAULT_SEQUENCE_INTERVAL);
        let sequence = SequenceRequest::new(frequencies, interval);
        debug!(steps = sequence.len(), ?interval, "sequence scheduled");

        Ok(sequence
            .steps()
            .map(|(delay, tone)| timers.schedule(now, delay, T::from(tone)))
            .collect())
    }

    /// Whether the context has been created yet.
    pub fn is_started(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&AudioContext> {
        self.context.as_ref()
    }

    /// Close the context for good. Later audio calls fail with
    /// [`AudioError::Closed`].
    pub fn shutdown(&mut self) {
        if let Some(mut context) = self.context.take() {
            context.close();
            info!("audio engine shut down");
        }
        self.shut_down = true;
    }
}

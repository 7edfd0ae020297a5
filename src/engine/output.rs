use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::Producer;
use tracing::{error, info, warn};

use super::{
    context::{AudioContext, DEFAULT_QUEUE_CAPACITY},
    error::AudioError,
    ContextFactory,
};
use crate::synth::mixer::ToneMixer;

/// Opens the host's default output device through cpal.
///
/// Every context it creates gets its own stream; the stream lives inside the
/// context and stops when the context is closed or dropped.
pub struct CpalOutput {
    queue_capacity: usize,
    tap: Option<Producer<f32>>,
}

impl CpalOutput {
    pub fn new() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            tap: None,
        }
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Mirror the rendered mono mix into `tap` (for scopes and meters).
    pub fn tap(mut self, tap: Producer<f32>) -> Self {
        self.tap = Some(tap);
        self
    }
}

impl Default for CpalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl CpalOutput {
    /// Whether the sample tap is still waiting to be handed to a context.
    pub fn has_tap(&self) -> bool {
        self.tap.is_some()
    }

    /// Create a context and hand its mixer to `start`, which returns a
    /// running stream.
    ///
    /// The tap only moves to the mixer once `start` has succeeded, so a
    /// failed attempt leaves it in place for the next one.
    fn open<S>(
        &mut self,
        sample_rate: f32,
        start: impl FnOnce(ToneMixer) -> Result<S, AudioError>,
    ) -> Result<(AudioContext, S), AudioError> {
        let (mut context, mixer) = AudioContext::with_capacity(sample_rate, self.queue_capacity);
        let stream = start(mixer)?;

        if let Some(tap) = self.tap.take() {
            if let Err(err) = context.attach_tap(tap) {
                warn!(%err, "sample tap not attached");
            }
        }

        Ok((context, stream))
    }
}

impl ContextFactory for CpalOutput {
    fn create(&mut self) -> Result<AudioContext, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(config.sample_format()));
        }

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let (mut context, stream) = self.open(sample_rate, |mut mixer| {
            let stream = device.build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| mixer.render_interleaved(data, channels),
                |err| error!(%err, "audio stream error"),
                None,
            )?;
            stream.play()?;
            Ok(stream)
        })?;

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate,
            channels,
            "audio context created"
        );

        context.attach_stream(stream);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn failed_start_keeps_the_tap() {
        let (tap_tx, mut tap_rx) = RingBuffer::<f32>::new(1024);
        let mut output = CpalOutput::new().tap(tap_tx);

        let failed = output.open(48_000.0, |_mixer| -> Result<(), AudioError> {
            Err(AudioError::NoOutputDevice)
        });
        assert!(matches!(failed, Err(AudioError::NoOutputDevice)));
        assert!(output.has_tap());

        let mut running = None;
        let (mut context, ()) = output
            .open(48_000.0, |mixer| {
                running = Some(mixer);
                Ok(())
            })
            .unwrap();
        assert!(!output.has_tap());

        context.start_tone(context.create_tone(440.0, 0.5)).unwrap();
        let mut mixer = running.unwrap();
        let mut block = vec![0.0f32; 256];
        mixer.render_block(&mut block);

        let tapped: Vec<f32> = std::iter::from_fn(|| tap_rx.pop().ok()).collect();
        assert_eq!(tapped, block);
        assert!(tapped.iter().any(|&s| s != 0.0));
    }
}

//! Piano - ties the keyboard, the demo buttons and the audio engine together
//!
//! Everything runs on the caller's event loop. Key presses and demo triggers
//! return immediately; the key flash and sequence steps are queued as timed
//! tasks and performed by [`Piano::tick`].

use std::time::Instant;

use tracing::{debug, warn};

use crate::{
    config::PianoConfig,
    demos::{Demo, DemoPanel},
    engine::{AudioEngine, AudioError, ContextFactory, Scheduler},
    keyboard::{ActiveStyle, Keyboard},
    sequencing::notes::Note,
    synth::tone::ToneRequest,
};

/// Work deferred to a later turn of the event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    PlayNote(ToneRequest),
    ReleaseKey { index: usize, style: ActiveStyle },
}

impl From<ToneRequest> for Task {
    fn from(tone: ToneRequest) -> Self {
        Task::PlayNote(tone)
    }
}

pub struct Piano<F: ContextFactory> {
    engine: AudioEngine<F>,
    keyboard: Keyboard,
    demos: DemoPanel,
    timers: Scheduler<Task>,
    config: PianoConfig,
}

impl<F: ContextFactory> Piano<F> {
    pub fn new(notes: &[Note], factory: F, config: PianoConfig) -> Self {
        Self {
            engine: AudioEngine::new(factory),
            keyboard: Keyboard::build(notes),
            demos: DemoPanel::new(config.demos.iter().copied()),
            timers: Scheduler::new(),
            config,
        }
    }

    /// Light key `index`, sound its note, and unlight it after the key flash.
    ///
    /// The flash is queued even when the audio fails, so a key never stays
    /// stuck lit; the audio error is still returned.
    pub fn press_key(&mut self, index: usize, now: Instant) -> Result<(), AudioError> {
        let Some(style) = self.keyboard.activate(index) else {
            return Ok(());
        };
        let Some(note) = self.keyboard.key(index).map(|k| k.note) else {
            return Ok(());
        };
        debug!(note = note.name, frequency = note.frequency, "key pressed");

        let played = self.engine.play_note(note.frequency, self.config.tone_duration);
        self.timers
            .schedule(now, self.config.key_flash, Task::ReleaseKey { index, style });

        played
    }

    /// Start `demo` if its button is wired and the engine is still open.
    /// Returns whether anything was queued.
    pub fn trigger_demo(&mut self, demo: Demo, now: Instant) -> bool {
        let Some(sequence) = self.demos.trigger(demo) else {
            debug!(?demo, "demo not wired, ignoring");
            return false;
        };

        match self
            .engine
            .play_sequence(&mut self.timers, now, &sequence.frequencies, sequence.interval)
        {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, ?demo, "demo not started");
                false
            }
        }
    }

    /// Perform every task due at `now`.
    ///
    /// A failing tone does not stop the remaining tasks; the first error is
    /// returned once all of them have run.
    pub fn tick(&mut self, now: Instant) -> Result<(), AudioError> {
        let mut first_error = None;

        for task in self.timers.drain_due(now) {
            match task {
                Task::PlayNote(tone) => {
                    if let Err(err) = self.engine.play(tone) {
                        warn!(%err, frequency = tone.frequency, "scheduled tone failed");
                        first_error.get_or_insert(err);
                    }
                }
                Task::ReleaseKey { index, style } => self.keyboard.deactivate(index, style),
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Drop pending work and close the audio context.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.engine.shutdown();
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn demos(&self) -> &DemoPanel {
        &self.demos
    }

    pub fn engine(&self) -> &AudioEngine<F> {
        &self.engine
    }

    pub fn timers(&self) -> &Scheduler<Task> {
        &self.timers
    }

    pub fn config(&self) -> &PianoConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::{engine::AudioContext, sequencing::notes::NOTES};

    fn piano(config: PianoConfig) -> Piano<impl FnMut() -> Result<AudioContext, AudioError>> {
        Piano::new(
            &NOTES,
            || -> Result<AudioContext, AudioError> { Ok(AudioContext::offline(48_000.0).0) },
            config,
        )
    }

    #[test]
    fn white_key_flash_clears_after_200ms() {
        let mut piano = piano(PianoConfig::default());
        let now = Instant::now();

        piano.press_key(0, now).unwrap();
        assert_eq!(piano.keyboard().key(0).unwrap().active(), Some(ActiveStyle::Tone));

        piano.tick(now + Duration::from_millis(199)).unwrap();
        assert!(piano.keyboard().key(0).unwrap().is_active());

        piano.tick(now + Duration::from_millis(200)).unwrap();
        assert!(!piano.keyboard().key(0).unwrap().is_active());
    }

    #[test]
    fn black_key_uses_semitone_style() {
        let mut piano = piano(PianoConfig::default());
        let now = Instant::now();

        piano.press_key(1, now).unwrap();

        assert_eq!(piano.keyboard().key(1).unwrap().active(), Some(ActiveStyle::Semitone));
        let pending: Vec<_> = piano.timers().pending().collect();
        assert_eq!(
            pending,
            [(
                now + Duration::from_millis(200),
                &Task::ReleaseKey { index: 1, style: ActiveStyle::Semitone }
            )]
        );
    }

    #[test]
    fn unknown_key_does_nothing() {
        let mut piano = piano(PianoConfig::default());

        piano.press_key(42, Instant::now()).unwrap();

        assert!(!piano.engine().is_started());
        assert!(piano.timers().is_empty());
    }

    #[test]
    fn audio_failure_still_unlights_key() {
        let mut piano = Piano::new(
            &NOTES,
            || -> Result<AudioContext, AudioError> { Err(AudioError::NoOutputDevice) },
            PianoConfig::default(),
        );
        let now = Instant::now();

        let err = piano.press_key(4, now).unwrap_err();
        assert!(matches!(err, AudioError::NoOutputDevice));

        piano.tick(now + Duration::from_millis(200)).unwrap();
        assert!(!piano.keyboard().key(4).unwrap().is_active());
    }

    #[test]
    fn semitone_demo_queues_two_tones() {
        let mut piano = piano(PianoConfig::default());
        let now = Instant::now();

        assert!(piano.trigger_demo(Demo::Semitone, now));

        let pending: Vec<(Duration, Task)> = piano
            .timers()
            .pending()
            .map(|(due, task)| (due - now, *task))
            .collect();
        assert_eq!(
            pending,
            [
                (Duration::ZERO, Task::PlayNote(ToneRequest::new(261.63, 0.4))),
                (Duration::from_millis(400), Task::PlayNote(ToneRequest::new(277.18, 0.4))),
            ]
        );
        assert!(!piano.engine().is_started());
    }

    #[test]
    fn scale_demo_plays_eight_steps() {
        let mut piano = piano(PianoConfig::default());
        let now = Instant::now();
        piano.trigger_demo(Demo::MajorScale, now);

        let delays: Vec<u128> = piano
            .timers()
            .pending()
            .map(|(due, _)| (due - now).as_millis())
            .collect();
        assert_eq!(delays, [0, 300, 600, 900, 1200, 1500, 1800, 2100]);

        piano.tick(now + Duration::from_millis(2100)).unwrap();
        assert!(piano.timers().is_empty());
        assert!(piano.engine().is_started());
    }

    #[test]
    fn unwired_demo_is_ignored() {
        let config = PianoConfig {
            demos: vec![Demo::WholeTone],
            ..PianoConfig::default()
        };
        let mut piano = piano(config);

        assert!(!piano.trigger_demo(Demo::Semitone, Instant::now()));
        assert!(piano.timers().is_empty());
    }

    #[test]
    fn shutdown_drops_pending_work() {
        let mut piano = piano(PianoConfig::default());
        let now = Instant::now();
        piano.trigger_demo(Demo::MajorScale, now);
        piano.tick(now).unwrap();

        piano.shutdown();

        assert!(piano.timers().is_empty());
        assert!(!piano.engine().is_started());
        assert!(matches!(piano.press_key(0, now), Err(AudioError::Closed)));
        assert!(!piano.trigger_demo(Demo::Semitone, now));
        // Only the flash of the refused key press is pending
        assert_eq!(piano.timers().len(), 1);
    }
}

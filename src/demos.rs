//! Canned playback examples: a semitone, a whole tone, and a major scale.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::{notes::C5_HZ, SequenceRequest};

const SEMITONE: [f32; 2] = [261.63, 277.18];
const WHOLE_TONE: [f32; 2] = [261.63, 293.66];
const C_MAJOR: [f32; 8] = [261.63, 293.66, 329.63, 349.23, 392.0, 440.0, 493.88, C5_HZ];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    /// C then C#
    Semitone,
    /// C then D
    WholeTone,
    /// C major, C4 up to C5
    MajorScale,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Semitone, Demo::WholeTone, Demo::MajorScale];

    pub fn frequencies(self) -> &'static [f32] {
        match self {
            Demo::Semitone => &SEMITONE,
            Demo::WholeTone => &WHOLE_TONE,
            Demo::MajorScale => &C_MAJOR,
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            Demo::Semitone | Demo::WholeTone => Duration::from_millis(400),
            Demo::MajorScale => Duration::from_millis(300),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Demo::Semitone => "Semitone",
            Demo::WholeTone => "Whole tone",
            Demo::MajorScale => "Major scale",
        }
    }

    /// Computer key that triggers this demo.
    pub fn binding(self) -> char {
        match self {
            Demo::Semitone => '1',
            Demo::WholeTone => '2',
            Demo::MajorScale => '3',
        }
    }

    pub fn sequence(self) -> SequenceRequest {
        SequenceRequest::new(self.frequencies(), self.interval())
    }
}

/// The demo buttons that actually exist on screen.
///
/// Triggering a demo that was never wired is not an error; nothing happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPanel {
    wired: Vec<Demo>,
}

impl DemoPanel {
    pub fn new(demos: impl IntoIterator<Item = Demo>) -> Self {
        let mut wired: Vec<Demo> = Vec::new();
        for demo in demos {
            if !wired.contains(&demo) {
                wired.push(demo);
            }
        }
        Self { wired }
    }

    pub fn all() -> Self {
        Self::new(Demo::ALL)
    }

    pub fn is_wired(&self, demo: Demo) -> bool {
        self.wired.contains(&demo)
    }

    /// The sequence to play for `demo`, if its button exists.
    pub fn trigger(&self, demo: Demo) -> Option<SequenceRequest> {
        self.is_wired(demo).then(|| demo.sequence())
    }

    /// Wired demo bound to computer key `c`.
    pub fn demo_for_char(&self, c: char) -> Option<Demo> {
        self.wired.iter().copied().find(|d| d.binding() == c)
    }

    pub fn demos(&self) -> &[Demo] {
        &self.wired
    }
}

impl Default for DemoPanel {
    fn default() -> Self {
        Self::all()
    }
}

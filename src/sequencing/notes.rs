/*
Note Table
==========

One chromatic octave starting at middle C (C4), in keyboard order. The
frequencies are the familiar two-decimal 12-TET values anchored on
A4 = 440 Hz:

    f(n) = 440 * 2^((n - 9) / 12)      n = semitones above C4

  C4   261.63        F#4  369.99
  C#4  277.18        G4   392.00
  D4   293.66        G#4  415.30
  D#4  311.13        A4   440.00   ← tuning reference
  E4   329.63        A#4  466.16
  F4   349.23        B4   493.88

The five sharps are the black keys; the other seven are white.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which row of the keyboard a note lives on.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyColor {
    /// Natural note (C, D, E, F, G, A, B)
    White,
    /// Sharp (C#, D#, F#, G#, A#)
    Black,
}

/// Serialize only: names point into the static note table.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub name: &'static str,
    /// Pitch in Hz
    pub frequency: f32,
    pub color: KeyColor,
}

impl Note {
    pub const fn white(name: &'static str, frequency: f32) -> Self {
        Self {
            name,
            frequency,
            color: KeyColor::White,
        }
    }

    pub const fn black(name: &'static str, frequency: f32) -> Self {
        Self {
            name,
            frequency,
            color: KeyColor::Black,
        }
    }

    pub fn is_black(&self) -> bool {
        self.color == KeyColor::Black
    }

    /// Always the complement of [`is_black`](Self::is_black).
    pub fn is_natural(&self) -> bool {
        !self.is_black()
    }

    /// Hover text, e.g. `"C# (277.18 Hz)"`.
    pub fn tooltip(&self) -> String {
        format!("{} ({:.2} Hz)", self.name, self.frequency)
    }
}

/// Middle C, the first entry of [`NOTES`].
pub const C4_HZ: f32 = 261.63;
/// C one octave up; closes the major scale demo.
pub const C5_HZ: f32 = 523.25;

pub const NOTES: [Note; 12] = [
    Note::white("C", 261.63),
    Note::black("C#", 277.18),
    Note::white("D", 293.66),
    Note::black("D#", 311.13),
    Note::white("E", 329.63),
    Note::white("F", 349.23),
    Note::black("F#", 369.99),
    Note::white("G", 392.0),
    Note::black("G#", 415.3),
    Note::white("A", 440.0),
    Note::black("A#", 466.16),
    Note::white("B", 493.88),
];

/// Exact 12-TET frequency `semitones` above (or below) middle C.
pub fn equal_tempered(semitones: i32) -> f64 {
    440.0 * 2.0_f64.powf((semitones as f64 - 9.0) / 12.0)
}

//! Keyboard view model
//!
//! One control per note in table order, so the left-to-right layout falls
//! straight out of the note table. The view only tracks which keys are lit;
//! playing sound and timing the flash live in [`crate::piano`].

use std::time::Duration;

use crate::sequencing::notes::{KeyColor, Note};

/// How long a pressed key stays lit, regardless of how long it sounds.
pub const KEY_FLASH: Duration = Duration::from_millis(200);

/// Computer keys bound to the twelve notes (tracker layout, C through B).
pub const KEY_BINDINGS: [char; 12] = ['a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    White,
    Black,
}

/// Highlight applied while a key is lit. Each key color has its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStyle {
    /// Lit white key
    Tone,
    /// Lit black key
    Semitone,
}

impl From<KeyColor> for KeyStyle {
    fn from(color: KeyColor) -> Self {
        match color {
            KeyColor::White => KeyStyle::White,
            KeyColor::Black => KeyStyle::Black,
        }
    }
}

impl KeyStyle {
    pub fn active_style(self) -> ActiveStyle {
        match self {
            KeyStyle::White => ActiveStyle::Tone,
            KeyStyle::Black => ActiveStyle::Semitone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyControl {
    pub note: Note,
    pub style: KeyStyle,
    pub label: &'static str,
    pub tooltip: String,
    pub binding: Option<char>,
    active: Option<ActiveStyle>,
}

impl KeyControl {
    fn new(note: Note, binding: Option<char>) -> Self {
        Self {
            note,
            style: note.color.into(),
            label: note.name,
            tooltip: note.tooltip(),
            binding,
            active: None,
        }
    }

    pub fn active(&self) -> Option<ActiveStyle> {
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    keys: Vec<KeyControl>,
}

impl Keyboard {
    /// One key per note, in table order.
    ///
    /// The first twelve keys get the default computer-key bindings.
    pub fn build(notes: &[Note]) -> Self {
        let keys = notes
            .iter()
            .enumerate()
            .map(|(i, &note)| KeyControl::new(note, KEY_BINDINGS.get(i).copied()))
            .collect();

        Self { keys }
    }

    pub fn keys(&self) -> &[KeyControl] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> Option<&KeyControl> {
        self.keys.get(index)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the key bound to `c` (case-insensitive).
    pub fn index_for_char(&self, c: char) -> Option<usize> {
        let c = c.to_ascii_lowercase();
        self.keys.iter().position(|k| k.binding == Some(c))
    }

    /// Light key `index` with the highlight for its color.
    pub fn activate(&mut self, index: usize) -> Option<ActiveStyle> {
        let key = self.keys.get_mut(index)?;
        let style = key.style.active_style();
        key.active = Some(style);
        Some(style)
    }

    /// Remove `style` from key `index`; other highlights are left alone.
    pub fn deactivate(&mut self, index: usize, style: ActiveStyle) {
        if let Some(key) = self.keys.get_mut(index) {
            if key.active == Some(style) {
                key.active = None;
            }
        }
    }

    /// Indices of white keys, in order (useful for layout).
    pub fn white_keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.style == KeyStyle::White)
            .map(|(i, _)| i)
    }
}

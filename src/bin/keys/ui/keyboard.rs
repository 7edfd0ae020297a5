//! Keyboard widget - white keys side by side, black keys drawn over the gaps

use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use saavy_keys::keyboard::{ActiveStyle, KeyControl, KeyStyle, Keyboard};

/// Where each key landed on screen
#[derive(Default)]
pub struct KeyboardLayout {
    /// Black keys first: they sit on top of the white ones
    keys: Vec<(usize, Rect)>,
}

impl KeyboardLayout {
    pub fn compute(area: Rect, keyboard: &Keyboard) -> Self {
        let white_count = keyboard.white_keys().count().max(1) as u16;
        let key_width = (area.width / white_count).max(1);
        let black_width = (key_width * 2 / 3).max(1);
        let black_height = (area.height * 3 / 5).max(1);

        let mut whites = Vec::new();
        let mut blacks = Vec::new();
        let mut white_index = 0u16;

        for (i, key) in keyboard.keys().iter().enumerate() {
            match key.style {
                KeyStyle::White => {
                    let x = area.x + white_index * key_width;
                    whites.push((i, Rect::new(x, area.y, key_width, area.height)));
                    white_index += 1;
                }
                KeyStyle::Black => {
                    // Centered on the boundary after the previous white key
                    let boundary = area.x + white_index * key_width;
                    let x = boundary.saturating_sub(black_width / 2).max(area.x);
                    blacks.push((i, Rect::new(x, area.y, black_width, black_height)));
                }
            }
        }

        let mut keys = blacks;
        keys.extend(whites);
        Self { keys }
    }

    /// Key under `position`, if any
    pub fn hit(&self, position: Position) -> Option<usize> {
        self.keys
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(index, _)| *index)
    }
}

fn active_color(style: ActiveStyle) -> Color {
    match style {
        ActiveStyle::Tone => Color::LightCyan,
        ActiveStyle::Semitone => Color::Magenta,
    }
}

fn key_style(key: &KeyControl) -> Style {
    match (key.style, key.active()) {
        (_, Some(active)) => Style::default()
            .bg(active_color(active))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        (KeyStyle::White, None) => Style::default().bg(Color::White).fg(Color::Black),
        (KeyStyle::Black, None) => Style::default().bg(Color::Black).fg(Color::White),
    }
}

/// Label lines pushed to the bottom of a key of the given height
fn key_label(key: &KeyControl, height: u16) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = (0..height.saturating_sub(2)).map(|_| Line::from("")).collect();
    lines.push(Line::from(key.label));
    if let Some(binding) = key.binding {
        lines.push(Line::from(binding.to_ascii_uppercase().to_string()));
    }
    lines
}

/// Render the keyboard and return where each key was drawn
pub fn render_keyboard(frame: &mut Frame, area: Rect, keyboard: &Keyboard) -> KeyboardLayout {
    let block = Block::default().title(" Keyboard ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Terminal too small to fit any key
    if inner.width == 0 || inner.height == 0 {
        return KeyboardLayout::default();
    }

    let layout = KeyboardLayout::compute(inner, keyboard);

    // Whites first, then blacks over them
    for (index, rect) in layout.keys.iter().rev() {
        let Some(key) = keyboard.key(*index) else {
            continue;
        };

        let (borders, height) = match key.style {
            KeyStyle::White => (
                Borders::LEFT | Borders::RIGHT | Borders::BOTTOM,
                rect.height.saturating_sub(1),
            ),
            KeyStyle::Black => (Borders::NONE, rect.height),
        };

        let widget = Paragraph::new(key_label(key, height))
            .alignment(Alignment::Center)
            .style(key_style(key))
            .block(Block::default().borders(borders));

        if key.style == KeyStyle::Black {
            frame.render_widget(Clear, *rect);
        }
        frame.render_widget(widget, *rect);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use saavy_keys::sequencing::NOTES;

    fn draw(width: u16, height: u16, keyboard: &Keyboard) -> KeyboardLayout {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut layout = KeyboardLayout::default();
        terminal
            .draw(|frame| layout = render_keyboard(frame, frame.area(), keyboard))
            .unwrap();
        layout
    }

    #[test]
    fn squashed_terminal_draws_no_keys() {
        let keyboard = Keyboard::build(&NOTES);

        let layout = draw(80, 2, &keyboard);
        assert!(layout.keys.is_empty());
        assert_eq!(layout.hit(Position::new(5, 1)), None);
    }

    #[test]
    fn one_row_of_keys_still_renders() {
        let keyboard = Keyboard::build(&NOTES);

        // Border plus a single row: white keys end up zero rows tall inside
        let layout = draw(72, 3, &keyboard);
        assert_eq!(layout.keys.len(), 12);
    }

    #[test]
    fn black_keys_win_hit_tests() {
        let keyboard = Keyboard::build(&NOTES);
        let layout = KeyboardLayout::compute(Rect::new(0, 0, 70, 10), &keyboard);

        // Boundary between C and D, upper half: C#
        assert_eq!(layout.hit(Position::new(10, 1)), Some(1));
        // Same column, lower half: white key
        assert!(matches!(layout.hit(Position::new(10, 9)), Some(0) | Some(2)));
        // Middle of the last white key: B
        assert_eq!(layout.hit(Position::new(65, 8)), Some(11));
    }

    #[test]
    fn every_key_gets_a_rect() {
        let keyboard = Keyboard::build(&NOTES);
        let layout = KeyboardLayout::compute(Rect::new(0, 0, 70, 10), &keyboard);

        let mut indices: Vec<usize> = layout.keys.iter().map(|(i, _)| *i).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
    }
}

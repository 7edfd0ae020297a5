//! TUI module for keys
//!
//! Draws the keyboard and demo buttons, routes key presses and mouse clicks
//! into the piano, and visualizes the audio the mixer taps out.

mod demos;
mod keyboard;
mod spectrum;
mod transport;
mod waveform;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use tracing::error;

use saavy_keys::{
    demos::Demo,
    engine::{AudioError, CpalOutput},
    piano::Piano,
};

use demos::render_demos;
use keyboard::{render_keyboard, KeyboardLayout};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats, StatusInfo};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 4096;

/// UI application state
pub struct UiApp {
    piano: Piano<CpalOutput>,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    /// Created once the audio context reports its sample rate
    spectrum: Option<SpectrumAnalyzer>,
    /// Where the keys were last drawn (for mouse hit testing)
    key_layout: KeyboardLayout,
    /// Where the demo buttons were last drawn
    demo_layout: Vec<(Demo, Rect)>,
    /// Tooltip of the last pressed key
    last_key: Option<String>,
    /// Last audio failure, shown until the next successful press
    last_error: Option<String>,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(piano: Piano<CpalOutput>, audio_rx: Consumer<f32>) -> Self {
        Self {
            piano,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: None,
            key_layout: KeyboardLayout::default(),
            demo_layout: Vec::new(),
            last_key: None,
            last_error: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Poll for new audio samples
            self.poll_audio();

            // Fire due timers (key flashes, sequence steps)
            let result = self.piano.tick(Instant::now());
            self.report(result);

            // Draw the UI
            terminal.draw(|frame| self.render(frame))?;

            // Handle input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                        self.handle_click(Position::new(mouse.column, mouse.row));
                    }
                    _ => {}
                }
            }
        }

        self.piano.shutdown();
        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.audio_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            // Append new samples and keep only the last VIS_BUFFER_SIZE
            self.audio_buffer.extend(new_samples);
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
        }

        if self.spectrum.is_none() {
            if let Some(context) = self.piano.engine().context() {
                self.spectrum = Some(SpectrumAnalyzer::new(VIS_BUFFER_SIZE, context.sample_rate()));
            }
        }
        if let Some(spectrum) = self.spectrum.as_mut() {
            spectrum.update(&self.audio_buffer);
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                if let Some(index) = self.piano.keyboard().index_for_char(c) {
                    self.press(index);
                } else if let Some(demo) = self.piano.demos().demo_for_char(c) {
                    self.piano.trigger_demo(demo, Instant::now());
                }
            }
            _ => {}
        }
    }

    /// Handle a left click on a key or demo button
    fn handle_click(&mut self, position: Position) {
        if let Some(index) = self.key_layout.hit(position) {
            self.press(index);
            return;
        }

        let demo = self
            .demo_layout
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(demo, _)| *demo);
        if let Some(demo) = demo {
            self.piano.trigger_demo(demo, Instant::now());
        }
    }

    fn press(&mut self, index: usize) {
        let result = self.piano.press_key(index, Instant::now());
        self.last_key = self.piano.keyboard().key(index).map(|k| k.tooltip.clone());
        self.report(result);
    }

    fn report(&mut self, result: Result<(), AudioError>) {
        match result {
            Ok(()) => {
                if self.piano.engine().is_started() {
                    self.last_error = None;
                }
            }
            Err(err) => {
                error!(%err, "audio failure");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, keyboard, demos, scopes, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(8),    // Keyboard
                Constraint::Length(3), // Demo buttons
                Constraint::Length(8), // Waveform + spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let status = StatusInfo {
            sample_rate: self.piano.engine().context().map(|c| c.sample_rate()),
            last_key: self.last_key.as_deref(),
            error: self.last_error.as_deref(),
            pending_tasks: self.piano.timers().len(),
        };
        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, chunks[0], &status, &stats);

        self.key_layout = render_keyboard(frame, chunks[1], self.piano.keyboard());
        self.demo_layout = render_demos(frame, chunks[2], self.piano.demos());

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        match &self.spectrum {
            Some(spectrum) => render_spectrum(frame, scopes[1], spectrum),
            None => render_spectrum_placeholder(frame, scopes[1]),
        }

        // Help bar
        let help = Paragraph::new(" [A W S E D F T G Y H U J] Play  [1-3] Demos  [Click] Play  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}

fn render_spectrum_placeholder(frame: &mut Frame, area: Rect) {
    let block = ratatui::widgets::Block::bordered().title(" Spectrum ");
    let text = Paragraph::new(" press a key to open the audio device")
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

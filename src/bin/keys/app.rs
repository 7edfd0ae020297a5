//! App setup: audio output, terminal, and the UI loop

use std::io::stdout;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use rtrb::RingBuffer;

use saavy_keys::{config::PianoConfig, engine::CpalOutput, piano::Piano, sequencing::NOTES};

use super::ui::UiApp;

/// Samples buffered between the audio thread and the scope
const TAP_CAPACITY: usize = 8192;

/// Run the piano until the user quits
pub fn run(config: PianoConfig) -> EyreResult<()> {
    // The device is only opened on the first note
    let (tap_tx, tap_rx) = RingBuffer::<f32>::new(TAP_CAPACITY);
    let output = CpalOutput::new()
        .queue_capacity(config.queue_capacity)
        .tap(tap_tx);
    let piano = Piano::new(&NOTES, output, config);

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture).wrap_err("failed to enable mouse capture")?;

    let mut app = UiApp::new(piano, tap_rx);
    let result = app.run(&mut terminal);

    // Restore the terminal even if the loop failed
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

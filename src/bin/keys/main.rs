//! keys - one-octave terminal piano
//!
//! Run with: cargo run --bin keys

mod app;
mod cli;
mod ui;

use std::{fs::File, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use cli::Args;
use saavy_keys::sequencing::NOTES;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.list_notes {
        print_notes();
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    app::run(args.piano_config())
}

fn print_notes() {
    println!("=== Note table ===");
    for note in &NOTES {
        let color = if note.is_black() { "black" } else { "white" };
        println!("  {:<3} {:>7.2} Hz  {}", note.name, note.frequency, color);
    }
}

//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use saavy_keys::{config::PianoConfig, demos::Demo};

/// Demo buttons selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoArg {
    Semitone,
    WholeTone,
    Scale,
}

impl From<DemoArg> for Demo {
    fn from(arg: DemoArg) -> Self {
        match arg {
            DemoArg::Semitone => Demo::Semitone,
            DemoArg::WholeTone => Demo::WholeTone,
            DemoArg::Scale => Demo::MajorScale,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "keys")]
#[command(about = "One-octave terminal piano", long_about = None)]
pub struct Args {
    /// Demo buttons to show (default: all three)
    #[arg(long, value_enum, value_delimiter = ',', value_name = "DEMO")]
    pub demos: Vec<DemoArg>,

    /// Hide every demo button
    #[arg(long, conflicts_with = "demos")]
    pub no_demos: bool,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the note table and exit
    #[arg(long)]
    pub list_notes: bool,
}

impl Args {
    /// Piano settings implied by the arguments
    pub fn piano_config(&self) -> PianoConfig {
        let mut config = PianoConfig::default();
        if self.no_demos {
            config.demos.clear();
        } else if !self.demos.is_empty() {
            config.demos = self.demos.iter().map(|&d| d.into()).collect();
        }
        config
    }
}

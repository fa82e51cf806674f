use clap::Parser;
use std::path::PathBuf;

/// Terminal metronome with an accented first beat
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Initial tempo in beats per minute (clamped to 60-240)
    #[arg(short, long, allow_negative_numbers = true)]
    pub bpm: Option<i64>,

    /// Beats per measure; the first beat of each measure is accented
    #[arg(long)]
    pub beats_per_measure: Option<u32>,

    /// WAV file to use for the accented click
    #[arg(long, value_name = "PATH")]
    pub accent_sample: Option<PathBuf>,

    /// WAV file to use for the regular click
    #[arg(long, value_name = "PATH")]
    pub regular_sample: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/metronomers/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run without opening an audio device
    #[arg(long)]
    pub mute: bool,

    /// Log level written to the log file (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

use clap::Parser;
use metronomers::{audio, logging, tui, Args, Config, Metronome, ThreadScheduler};
use std::error::Error;
use std::sync::mpsc;

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_command_line_arguments();
    let config = Config::load(&args)?;
    initialize_logging(&config)?;

    let (message_tx, message_rx) = mpsc::channel();
    let player = audio::open_player(&config);
    let metronome = Metronome::mount(&config, ThreadScheduler::new(), player, message_tx.clone());

    tui::run_tui(metronome, message_tx, message_rx)?;
    log::info!("Application exiting");
    Ok(())
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn initialize_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let path = logging::init_logger(config.log_level)?;
    log::info!("Application starting, logging to {}", path.display());
    log::debug!("Resolved configuration: {:?}", config);
    Ok(())
}

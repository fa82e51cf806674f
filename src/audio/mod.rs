//! Click playback
//!
//! This module provides the audible side of the metronome:
//! - The [`Click`] kinds and the [`ClickPlayer`] trait the metronome plays through
//! - [`RodioPlayer`] for real output on the default audio device
//! - [`SilentPlayer`] for running without a device
//! - [`RecordingPlayer`] and [`FailingPlayer`] for tests
//!
//! Playback is fire-and-forget: a click never waits for the previous one.

mod mock;
mod rodio_player;

use crate::config::Config;
use log::{info, warn};
use std::error::Error;
use std::fmt;

pub use mock::{FailingPlayer, RecordingPlayer};
pub use rodio_player::RodioPlayer;

/// Which sound a beat makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Click {
    /// First beat of a measure
    Accent,
    /// Every other beat
    Regular,
}

/// Custom error type for audio operations
#[derive(Debug)]
pub enum AudioError {
    /// No usable output device
    DeviceError(String),
    /// A click sample could not be read or decoded
    LoadError(String),
    /// The mixer refused a click
    PlaybackError(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::DeviceError(msg) => write!(f, "audio device error: {}", msg),
            AudioError::LoadError(msg) => write!(f, "audio load error: {}", msg),
            AudioError::PlaybackError(msg) => write!(f, "audio playback error: {}", msg),
        }
    }
}

impl Error for AudioError {}

pub type Result<T> = std::result::Result<T, AudioError>;

/// Something that can sound a click without blocking.
pub trait ClickPlayer {
    fn play(&self, click: Click) -> Result<()>;
}

impl<P: ClickPlayer + ?Sized> ClickPlayer for Box<P> {
    fn play(&self, click: Click) -> Result<()> {
        (**self).play(click)
    }
}

/// Player used with `--mute` or when no device could be opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl ClickPlayer for SilentPlayer {
    fn play(&self, _click: Click) -> Result<()> {
        Ok(())
    }
}

/// Opens the configured player, falling back to silence when the device is unavailable.
pub fn open_player(config: &Config) -> Box<dyn ClickPlayer> {
    if config.mute {
        info!("Audio muted, clicks will not be played");
        return Box::new(SilentPlayer);
    }

    match RodioPlayer::open(
        config.accent_sample.as_deref(),
        config.regular_sample.as_deref(),
    ) {
        Ok(player) => {
            info!("Audio output opened");
            Box::new(player)
        }
        Err(e) => {
            warn!("{}; continuing without sound", e);
            Box::new(SilentPlayer)
        }
    }
}

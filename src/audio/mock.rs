use crate::audio::{AudioError, Click, ClickPlayer, Result};
use std::sync::{Arc, Mutex};

/// Remembers every click instead of playing it. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    clicks: Arc<Mutex<Vec<Click>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clicks(&self) -> Vec<Click> {
        self.clicks.lock().unwrap().clone()
    }
}

impl ClickPlayer for RecordingPlayer {
    fn play(&self, click: Click) -> Result<()> {
        self.clicks.lock().unwrap().push(click);
        Ok(())
    }
}

/// Rejects every click, like a platform that blocks audio.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPlayer;

impl ClickPlayer for FailingPlayer {
    fn play(&self, _click: Click) -> Result<()> {
        Err(AudioError::PlaybackError("playback blocked".to_string()))
    }
}

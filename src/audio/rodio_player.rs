use crate::audio::{AudioError, Click, ClickPlayer, Result};
use log::{debug, trace, warn};
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use std::fs;
use std::io::Cursor;
use std::path::Path;

const ACCENT_WAV: &[u8] = include_bytes!("../../assets/accent.wav");
const REGULAR_WAV: &[u8] = include_bytes!("../../assets/regular.wav");

type ClickSample = Buffered<Decoder<Cursor<Vec<u8>>>>;

/// Plays the two clicks on the default output device.
///
/// Both samples are decoded once when the player opens; each click hands a cheap
/// clone of the buffered sample to rodio's mixer, so clicks may overlap.
pub struct RodioPlayer {
    // Dropping the stream silences the handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    accent: ClickSample,
    regular: ClickSample,
}

impl RodioPlayer {
    /// Opens the default device. `None` paths use the built-in clicks; a path that
    /// cannot be loaded falls back to the built-in click for that slot.
    pub fn open(accent: Option<&Path>, regular: Option<&Path>) -> Result<Self> {
        let accent = load_click("accent", accent, ACCENT_WAV)?;
        let regular = load_click("regular", regular, REGULAR_WAV)?;

        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::DeviceError(e.to_string()))?;

        Ok(RodioPlayer {
            _stream: stream,
            handle,
            accent,
            regular,
        })
    }
}

impl ClickPlayer for RodioPlayer {
    fn play(&self, click: Click) -> Result<()> {
        let sample = match click {
            Click::Accent => self.accent.clone(),
            Click::Regular => self.regular.clone(),
        };
        trace!("Playing {:?} click", click);
        self.handle
            .play_raw(sample.convert_samples::<f32>())
            .map_err(|e| AudioError::PlaybackError(e.to_string()))
    }
}

fn load_click(name: &str, path: Option<&Path>, embedded: &'static [u8]) -> Result<ClickSample> {
    if let Some(path) = path {
        match fs::read(path)
            .map_err(|e| AudioError::LoadError(format!("{}: {}", path.display(), e)))
            .and_then(decode)
        {
            Ok(sample) => {
                debug!("Loaded {} click from {}", name, path.display());
                return Ok(sample);
            }
            Err(e) => warn!("{}; using built-in {} click", e, name),
        }
    }
    decode(embedded.to_vec())
}

fn decode(bytes: Vec<u8>) -> Result<ClickSample> {
    Decoder::new(Cursor::new(bytes))
        .map(Source::buffered)
        .map_err(|e| AudioError::LoadError(e.to_string()))
}

// state.rs

use crate::audio::Click;
use crate::config::{DEFAULT_BEATS_PER_MEASURE, DEFAULT_BPM, MAX_BPM, MIN_BPM};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Tempo in beats per minute, always within `MIN_BPM..=MAX_BPM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bpm(u32);

impl Bpm {
    /// Builds a tempo from any integer, clamping it into range.
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(i64::from(MIN_BPM), i64::from(MAX_BPM));
        Bpm(clamped as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Interval between two clicks: 60000 / bpm milliseconds.
    pub fn period(self) -> Duration {
        Duration::from_micros(60_000_000 / u64::from(self.0))
    }
}

impl Default for Bpm {
    fn default() -> Self {
        Bpm(DEFAULT_BPM)
    }
}

impl fmt::Display for Bpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error for tempo text that is not a number at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpmParseError(String);

impl fmt::Display for BpmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid tempo", self.0)
    }
}

impl Error for BpmParseError {}

impl FromStr for Bpm {
    type Err = BpmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Bpm::clamped)
            .map_err(|_| BpmParseError(s.to_string()))
    }
}

/// Events the metronome reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start/Stop button pressed
    ToggleStartStop,
    /// Slider moved; the raw value is clamped before use
    SetBpm(i64),
    /// The repeating timer fired
    Tick,
}

/// Side effects requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Cancel any running timer, then start one with this period
    RestartTimer(Duration),
    CancelTimer,
    Click(Click),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: MetronomeState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: MetronomeState) -> Self {
        Transition {
            state,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetronomeState {
    bpm: Bpm,
    beats_per_measure: u32,
    playing: bool,
    beat_index: u32,
}

impl Default for MetronomeState {
    fn default() -> Self {
        Self::new(Bpm::default(), DEFAULT_BEATS_PER_MEASURE)
    }
}

impl MetronomeState {
    /// A stopped metronome. A measure always has at least one beat.
    pub fn new(bpm: Bpm, beats_per_measure: u32) -> Self {
        Self {
            bpm,
            beats_per_measure: beats_per_measure.max(1),
            playing: false,
            beat_index: 0,
        }
    }

    pub fn bpm(&self) -> Bpm {
        self.bpm
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn beat_index(&self) -> u32 {
        self.beat_index
    }

    /// Applies one event and reports what the owner has to do about timers and audio.
    pub fn update(self, action: Action) -> Transition {
        match action {
            Action::ToggleStartStop => self.toggle_start_stop(),
            Action::SetBpm(value) => self.set_bpm(Bpm::clamped(value)),
            Action::Tick => self.tick(),
        }
    }

    /// Picks the click for the current beat and moves to the next one.
    pub fn emit_click(self) -> (Self, Click) {
        let click = if self.beat_index % self.beats_per_measure == 0 {
            Click::Accent
        } else {
            Click::Regular
        };
        let next = Self {
            beat_index: (self.beat_index + 1) % self.beats_per_measure,
            ..self
        };
        (next, click)
    }

    fn toggle_start_stop(self) -> Transition {
        if self.playing {
            Transition {
                state: Self {
                    playing: false,
                    ..self
                },
                effects: vec![Effect::CancelTimer],
            }
        } else {
            let started = Self {
                playing: true,
                beat_index: 0,
                ..self
            };
            let (state, click) = started.emit_click();
            Transition {
                state,
                effects: vec![Effect::RestartTimer(self.bpm.period()), Effect::Click(click)],
            }
        }
    }

    fn set_bpm(self, bpm: Bpm) -> Transition {
        if bpm == self.bpm {
            return Transition::unchanged(self);
        }

        if self.playing {
            Transition {
                state: Self {
                    bpm,
                    beat_index: 0,
                    ..self
                },
                effects: vec![Effect::RestartTimer(bpm.period())],
            }
        } else {
            Transition::unchanged(Self { bpm, ..self })
        }
    }

    fn tick(self) -> Transition {
        if !self.playing {
            return Transition::unchanged(self);
        }
        let (state, click) = self.emit_click();
        Transition {
            state,
            effects: vec![Effect::Click(click)],
        }
    }
}

pub mod audio;
pub mod cli;
pub mod config;
pub mod event_loop;
pub mod logging;
pub mod metronome;
pub mod state;
pub mod timer;
pub mod tui;
pub mod view;

pub use crate::audio::{Click, ClickPlayer};
pub use crate::cli::Args;
pub use crate::config::Config;
pub use crate::event_loop::{EngineMessage, EventLoop};
pub use crate::metronome::Metronome;
pub use crate::state::{Action, Bpm, MetronomeState};
pub use crate::timer::{Scheduler, ThreadScheduler};

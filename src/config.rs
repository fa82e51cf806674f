// config.rs

use crate::cli::Args;
use crate::state::Bpm;
use ::config::{ConfigError, Environment, File};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 100;
pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;

const ENV_PREFIX: &str = "METRONOMERS";

/// Resolved settings: CLI flags over `METRONOMERS_*` environment variables over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bpm: Bpm,
    pub beats_per_measure: u32,
    pub accent_sample: Option<PathBuf>,
    pub regular_sample: Option<PathBuf>,
    pub mute: bool,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bpm: Bpm::default(),
            beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            accent_sample: None,
            regular_sample: None,
            mute: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();

        // An explicit --config must exist; the default location is optional.
        match &args.config {
            Some(path) => builder = builder.add_source(File::from(path.as_path()).required(true)),
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let settings = builder.build()?;
        Self::from_settings(&settings, args)
    }

    fn from_settings(settings: &::config::Config, args: &Args) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bpm = match args.bpm {
            Some(bpm) => Some(bpm),
            None => optional(settings.get_int("bpm"))?,
        }
        .map(Bpm::clamped)
        .unwrap_or(defaults.bpm);

        let beats_per_measure = match args.beats_per_measure {
            Some(beats) => i64::from(beats),
            None => optional(settings.get_int("beats_per_measure"))?
                .unwrap_or(i64::from(defaults.beats_per_measure)),
        };
        if beats_per_measure < 1 || beats_per_measure > i64::from(u32::MAX) {
            return Err(ConfigError::Message(format!(
                "beats_per_measure must be at least 1, got {}",
                beats_per_measure
            )));
        }

        let accent_sample = match &args.accent_sample {
            Some(path) => Some(path.clone()),
            None => optional(settings.get_string("accent_sample"))?.map(PathBuf::from),
        };
        let regular_sample = match &args.regular_sample {
            Some(path) => Some(path.clone()),
            None => optional(settings.get_string("regular_sample"))?.map(PathBuf::from),
        };

        let mute = args.mute || optional(settings.get_bool("mute"))?.unwrap_or(false);

        let log_level = match &args.log_level {
            Some(level) => Some(level.clone()),
            None => optional(settings.get_string("log_level"))?,
        }
        .map(|level| parse_level(&level))
        .transpose()?
        .unwrap_or(defaults.log_level);

        Ok(Config {
            bpm,
            beats_per_measure: beats_per_measure as u32,
            accent_sample,
            regular_sample,
            mute,
            log_level,
        })
    }
}

fn optional<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ConfigError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(level)
        .map_err(|_| ConfigError::Message(format!("unknown log level '{}'", level)))
}

pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(config_dir(Path::new(&home)).join("config.toml"))
}

fn config_dir(home: &Path) -> PathBuf {
    home.join(".config").join("metronomers")
}

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Directory holding `app.log`: `~/.local/share/metronomers/logs`.
pub fn log_dir() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;
    Ok(log_dir_under(Path::new(&home)))
}

fn log_dir_under(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("metronomers")
        .join("logs")
}

/// Sends `log` records to the log file; the terminal is reserved for the UI.
/// Returns the path of the file being written.
pub fn init_logger(level: LevelFilter) -> Result<PathBuf, Error> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let path = log_dir.join("app.log");
    let log_file = OpenOptions::new().create(true).append(true).open(&path)?;

    // Keep audio backend chatter out of the file.
    let config = ConfigBuilder::new()
        .add_filter_allow_str("metronomers")
        .set_time_format_rfc3339()
        .build();

    WriteLogger::init(level, config, log_file)
        .map_err(|e| Error::new(ErrorKind::Other, format!("Logger initialization failed: {}", e)))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_layout() {
        assert_eq!(
            log_dir_under(Path::new("/home/user")),
            PathBuf::from("/home/user/.local/share/metronomers/logs")
        );
    }
}

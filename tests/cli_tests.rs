#[cfg(test)]
mod tests {
    use clap::Parser;
    use metronomers::*;
    use std::fs;
    use std::env;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; tests that load config hold this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "metronomers-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["test"]);
        assert_eq!(args.bpm, None);
        assert_eq!(args.beats_per_measure, None);
        assert!(!args.mute);
    }

    #[test]
    fn test_args_with_values() {
        let args = Args::parse_from([
            "test",
            "--bpm",
            "90",
            "--beats-per-measure",
            "3",
            "--accent-sample",
            "hi.wav",
            "--mute",
        ]);
        assert_eq!(args.bpm, Some(90));
        assert_eq!(args.beats_per_measure, Some(3));
        assert_eq!(args.accent_sample, Some(PathBuf::from("hi.wav")));
        assert!(args.mute);
    }

    #[test]
    fn test_non_numeric_bpm_is_rejected() {
        assert!(Args::try_parse_from(["test", "--bpm", "fast"]).is_err());
    }

    #[test]
    fn test_config_file_is_read() {
        let _guard = env_lock();
        let path = write_config(
            "read",
            "bpm = 132\nbeats_per_measure = 6\nmute = true\nlog_level = \"warn\"\n",
        );
        let args = Args::parse_from(["test", "--config", path.to_str().unwrap()]);
        let config = Config::load(&args).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.bpm.get(), 132);
        assert_eq!(config.beats_per_measure, 6);
        assert!(config.mute);
        assert_eq!(config.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn test_flags_override_config_file() {
        let _guard = env_lock();
        let path = write_config("override", "bpm = 132\n");
        let args = Args::parse_from(["test", "--config", path.to_str().unwrap(), "--bpm", "75"]);
        let config = Config::load(&args).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.bpm.get(), 75);
    }

    #[test]
    fn test_out_of_range_bpm_is_clamped() {
        let _guard = env_lock();
        let path = write_config("clamp", "bpm = 500\n");
        let args = Args::parse_from(["test", "--config", path.to_str().unwrap()]);
        let config = Config::load(&args).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.bpm.get(), 240);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let _guard = env_lock();
        let args = Args::parse_from(["test", "--config", "/nonexistent/metronomers.toml"]);
        assert!(Config::load(&args).is_err());
    }

    #[test]
    fn test_environment_sits_between_file_and_flags() {
        let _guard = env_lock();
        let path = write_config("env", "bpm = 132\nbeats_per_measure = 6\n");
        env::set_var("METRONOMERS_BPM", "150");
        env::set_var("METRONOMERS_BEATS_PER_MEASURE", "3");

        let from_env = Config::load(&Args::parse_from([
            "test",
            "--config",
            path.to_str().unwrap(),
        ]));
        let from_flags = Config::load(&Args::parse_from([
            "test",
            "--config",
            path.to_str().unwrap(),
            "--bpm",
            "75",
        ]));

        env::remove_var("METRONOMERS_BPM");
        env::remove_var("METRONOMERS_BEATS_PER_MEASURE");
        fs::remove_file(&path).unwrap();

        let from_env = from_env.unwrap();
        assert_eq!(from_env.bpm.get(), 150);
        assert_eq!(from_env.beats_per_measure, 3);

        let from_flags = from_flags.unwrap();
        assert_eq!(from_flags.bpm.get(), 75);
        assert_eq!(from_flags.beats_per_measure, 3);
    }
}

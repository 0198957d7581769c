use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fs, time::Duration};

use thiserror::Error;

use crate::domain::errors::TuningError;
use crate::domain::geometry::Playfield;
use crate::domain::tuning::Tuning;
use crate::use_cases::game::GameSettings;

// Runtime/session settings (gameplay tuning lives in `Tuning`).

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read tuning file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid tuning: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<TuningError> for ConfigError {
    fn from(err: TuningError) -> Self {
        match err {
            TuningError::Invalid { field, reason } => ConfigError::Invalid { field, reason },
        }
    }
}

/// Parses `value`, falling back to `default` when it is missing or malformed.
pub fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok(), default)
}

pub fn playfield() -> Playfield {
    Playfield::new(
        env_or("SPACE_ROCKS_WIDTH", 1024.0),
        env_or("SPACE_ROCKS_HEIGHT", 768.0),
    )
}

pub fn frame_interval() -> Duration {
    fps_to_interval(env_or("SPACE_ROCKS_FPS", 60))
}

pub fn fps_to_interval(fps: u64) -> Duration {
    Duration::from_millis(1000 / fps.max(1))
}

pub fn run_duration() -> Duration {
    Duration::from_secs(env_or("SPACE_ROCKS_RUN_SECONDS", 60))
}

pub fn debug_enabled() -> bool {
    env::var_os("DEBUG").is_some()
}

pub fn tuning_path() -> Option<PathBuf> {
    env::var_os("SPACE_ROCKS_TUNING").map(PathBuf::from)
}

/// Loads and validates tuning from a TOML file; fields it leaves out keep their defaults.
pub fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tuning: Tuning = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tuning.validate()?;
    Ok(tuning)
}

pub fn game_settings() -> Result<GameSettings, ConfigError> {
    let tuning = match tuning_path() {
        Some(path) => load_tuning(&path)?,
        None => Tuning::default(),
    };
    tuning.validate()?;
    Ok(GameSettings {
        playfield: playfield(),
        tuning,
        debug: debug_enabled(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_value_is_missing_or_malformed_then_default_is_used() {
        assert_eq!(parse_or(None, 60u64), 60);
        assert_eq!(parse_or(Some("fast".to_string()), 60u64), 60);
        assert_eq!(parse_or(Some("30".to_string()), 60u64), 30);
    }

    #[test]
    fn when_fps_is_zero_then_interval_stays_positive() {
        assert_eq!(fps_to_interval(0), Duration::from_millis(1000));
        assert_eq!(fps_to_interval(60), Duration::from_millis(16));
    }

    #[test]
    fn when_tuning_file_is_missing_then_read_error_names_it() {
        let path = Path::new("/definitely/not/here.toml");

        let err = load_tuning(path).expect_err("missing file");

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn when_tuning_file_is_partial_then_other_fields_keep_defaults() {
        let path = env::temp_dir().join(format!("space_rocks_tuning_{}.toml", std::process::id()));
        fs::write(&path, "[flow]\nstarting_lives = 5\n").expect("write temp tuning");

        let tuning = load_tuning(&path);
        let _ = fs::remove_file(&path);
        let tuning = tuning.expect("valid tuning");

        assert_eq!(tuning.flow.starting_lives, 5);
        assert_eq!(tuning.flow.max_lives, Tuning::default().flow.max_lives);
    }

    #[test]
    fn when_tuning_file_breaks_play_then_it_is_rejected_at_load() {
        let path = env::temp_dir().join(format!("space_rocks_invalid_{}.toml", std::process::id()));
        fs::write(&path, "[alien]\nleave_chance = 3.0\n\n[rock]\nmax_rotate = 0.0\n")
            .expect("write temp tuning");

        let result = load_tuning(&path);
        let _ = fs::remove_file(&path);

        match result {
            Err(ConfigError::Invalid { field, .. }) => {
                assert!(field == "alien.leave_chance" || field == "rock.max_rotate", "{field}");
            }
            other => panic!("expected an invalid tuning error, got {other:?}"),
        }
    }

    #[test]
    fn when_tuning_file_is_not_toml_then_parse_error_is_returned() {
        let path = env::temp_dir().join(format!("space_rocks_bad_{}.toml", std::process::id()));
        fs::write(&path, "[flow\nstarting_lives = ").expect("write temp tuning");

        let result = load_tuning(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}

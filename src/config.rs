use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Classic,
    Amber,
    Mono,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" | "green" => Ok(ColorScheme::Classic),
            "amber" => Ok(ColorScheme::Amber),
            "mono" | "white" => Ok(ColorScheme::Mono),
            _ => Err(format!("unknown color scheme {s:?}")),
        }
    }
}

/// Longest countdown accepted from config.
const MAX_COUNTDOWN_SECONDS: u32 = 60;

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub tick_rate_hz: u32,

    pub spawn_interval_seconds: f32,
    pub show_countdown: bool,
    pub countdown_seconds: u32,
    pub persist_high_score: bool,
    pub high_score_path: PathBuf,
    pub color_scheme: ColorScheme,

    /// Scales the arccos turn angle before it is reduced mod 360.
    pub angle_multiplier: f32,
    pub ship_speed: f32,
    pub ship_radius: f32,
    pub starting_lives: u32,
    pub asteroid_min_radius: u32,
    pub asteroid_max_radius: u32,
    pub rng_seed: Option<u64>,

    pub vectors_path: PathBuf,
    pub vocabulary_limit: Option<usize>,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            tick_rate_hz: 60,

            spawn_interval_seconds: 1.0,
            show_countdown: true,
            countdown_seconds: 3,
            persist_high_score: true,
            high_score_path: PathBuf::from("highscore.txt"),
            color_scheme: ColorScheme::Classic,

            angle_multiplier: 5.0,
            ship_speed: 3.0,
            ship_radius: 20.0,
            starting_lives: 5,
            asteroid_min_radius: 10,
            asteroid_max_radius: 30,
            rng_seed: None,

            vectors_path: PathBuf::from("vectors.txt"),
            vocabulary_limit: None,
            log_path: PathBuf::from("word-drift.log"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("field_width", self.field_width)?;
        require_positive("field_height", self.field_height)?;
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick_rate_hz must be at least 1".into()));
        }
        require_positive("spawn_interval_seconds", self.spawn_interval_seconds)?;
        require_positive("angle_multiplier", self.angle_multiplier)?;
        require_positive("ship_speed", self.ship_speed)?;
        require_positive("ship_radius", self.ship_radius)?;
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        if self.countdown_seconds > MAX_COUNTDOWN_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "countdown_seconds must be at most {MAX_COUNTDOWN_SECONDS}, got {}",
                self.countdown_seconds
            )));
        }
        if self.asteroid_min_radius > self.asteroid_max_radius {
            return Err(ConfigError::Invalid(format!(
                "asteroid radius range is empty: {}..={}",
                self.asteroid_min_radius, self.asteroid_max_radius
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz))
    }
}

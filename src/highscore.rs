use std::fs;
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::HighScoreError;

/// Best survival time, in seconds.
pub trait HighScoreStore {
    /// Returns 0 when nothing usable is stored.
    fn load(&self) -> f64;

    fn save(&mut self, seconds: f64) -> Result<(), HighScoreError>;
}

/// A single plain-text float in a file.
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_file(&self) -> Result<f64, HighScoreError> {
        let text = fs::read_to_string(&self.path)?;
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(HighScoreError::Parse(trimmed.to_string())),
        }
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> f64 {
        match self.read_file() {
            Ok(v) => v,
            Err(HighScoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No high score at {}, starting from 0", self.path.display());
                0.0
            }
            Err(e) => {
                warn!("Ignoring high score at {}: {e}", self.path.display());
                0.0
            }
        }
    }

    fn save(&mut self, seconds: f64) -> Result<(), HighScoreError> {
        fs::write(&self.path, seconds.to_string())?;
        debug!("Saved high score {seconds:.2}s to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the record for this process only.
#[derive(Default)]
pub struct MemoryHighScore {
    best: f64,
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> f64 {
        self.best
    }

    fn save(&mut self, seconds: f64) -> Result<(), HighScoreError> {
        self.best = seconds;
        Ok(())
    }
}

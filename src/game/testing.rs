use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::HighScoreError;
use crate::highscore::HighScoreStore;
use crate::oracle::SimilarityOracle;

/// Oracle that only knows the listed pairs (in either order).
pub struct MockOracle {
    words: HashSet<String>,
    pairs: HashMap<(String, String), f32>,
}

impl MockOracle {
    pub fn new(pairs: &[(&str, &str, f32)]) -> Self {
        let mut oracle = Self {
            words: HashSet::new(),
            pairs: HashMap::new(),
        };
        for &(a, b, s) in pairs {
            oracle.words.insert(a.to_string());
            oracle.words.insert(b.to_string());
            oracle.pairs.insert((a.to_string(), b.to_string()), s);
            oracle.pairs.insert((b.to_string(), a.to_string()), s);
        }
        oracle
    }
}

impl SimilarityOracle for MockOracle {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        if a == b && self.words.contains(a) {
            return Some(1.0);
        }
        self.pairs.get(&(a.to_string(), b.to_string())).copied()
    }

    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Records successful saves. The next `failures` saves return an error.
#[derive(Default, Clone)]
pub struct RecordingStore {
    pub initial: f64,
    pub failures: Rc<Cell<u32>>,
    pub saves: Rc<RefCell<Vec<f64>>>,
}

impl HighScoreStore for RecordingStore {
    fn load(&self) -> f64 {
        self.initial
    }

    fn save(&mut self, seconds: f64) -> Result<(), HighScoreError> {
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(HighScoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        self.saves.borrow_mut().push(seconds);
        Ok(())
    }
}

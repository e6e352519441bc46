use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, info};

use crate::error::OracleError;

/// Scores how related two words are.
pub trait SimilarityOracle {
    /// Similarity in [-1, 1], or `None` when either word is unknown.
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;

    fn contains(&self, word: &str) -> bool;
}

/// Word vectors loaded from a plain-text embedding file, one
/// `word f1 f2 ... fd` per line with an optional `count dim` header.
pub struct EmbeddingOracle {
    index: HashMap<String, usize>,
    vectors: Vec<f32>,
    dim: usize,
}

impl EmbeddingOracle {
    pub fn load(path: &Path, limit: Option<usize>) -> Result<Self, OracleError> {
        info!("Loading word vectors from {}", path.display());
        let file = File::open(path)?;
        let oracle = Self::from_reader(file, limit)?;
        info!("Loaded {} word vectors ({} dimensions)", oracle.len(), oracle.dim());
        Ok(oracle)
    }

    pub fn from_reader<R: Read>(reader: R, limit: Option<usize>) -> Result<Self, OracleError> {
        let mut oracle = Self {
            index: HashMap::new(),
            vectors: Vec::new(),
            dim: 0,
        };
        let limit = limit.unwrap_or(usize::MAX);

        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line_no = i + 1;
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if oracle.index.len() >= limit {
                break;
            }

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            let values: Vec<&str> = fields.collect();

            // word2vec text files start with "<count> <dim>"
            if line_no == 1 && values.len() == 1 && word.parse::<usize>().is_ok() {
                if let Ok(dim) = values[0].parse::<usize>() {
                    oracle.dim = dim;
                    continue;
                }
            }

            let mut vector = Vec::with_capacity(values.len());
            for v in &values {
                let value = v.parse::<f32>().map_err(|e| OracleError::Malformed {
                    line: line_no,
                    reason: format!("bad component {v:?} for {word:?}: {e}"),
                })?;
                if !value.is_finite() {
                    return Err(OracleError::Malformed {
                        line: line_no,
                        reason: format!("non-finite component {v:?} for {word:?}"),
                    });
                }
                vector.push(value);
            }

            if oracle.dim == 0 {
                if vector.is_empty() {
                    return Err(OracleError::Malformed {
                        line: line_no,
                        reason: format!("no vector for {word:?}"),
                    });
                }
                oracle.dim = vector.len();
            } else if vector.len() != oracle.dim {
                return Err(OracleError::DimensionMismatch {
                    line: line_no,
                    expected: oracle.dim,
                    found: vector.len(),
                });
            }

            if oracle.index.contains_key(word) {
                debug!("Duplicate word {word:?} on line {line_no}, keeping first");
                continue;
            }
            normalize(&mut vector);
            oracle.index.insert(word.to_string(), oracle.index.len());
            oracle.vectors.extend_from_slice(&vector);
        }

        if oracle.index.is_empty() {
            return Err(OracleError::Empty);
        }
        Ok(oracle)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        let slot = match self.index.get(word) {
            Some(&slot) => slot,
            None => *self.index.get(&word.to_lowercase())?,
        };
        let start = slot * self.dim;
        Some(&self.vectors[start..start + self.dim])
    }
}

impl SimilarityOracle for EmbeddingOracle {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        let dot: f32 = va.iter().zip(vb).map(|(x, y)| x * y).sum();
        Some(dot.clamp(-1.0, 1.0))
    }

    fn contains(&self, word: &str) -> bool {
        self.vector(word).is_some()
    }
}

fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

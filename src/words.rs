use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use rand::seq::IndexedRandom;

use crate::error::GameError;

/// A supplier of board words. Implementations are interchangeable and
/// injected at registry construction time.
pub trait WordSource: Send + Sync {
    /// Samples `n` distinct words, in no particular order.
    fn sample(&self, n: usize) -> Result<Vec<String>, GameError>;
}

fn sample_from(words: &[String], n: usize) -> Result<Vec<String>, GameError> {
    if words.len() < n {
        return Err(GameError::InsufficientWords {
            wanted: n,
            available: words.len(),
        });
    }
    let mut rng = rand::rng();
    Ok(words.choose_multiple(&mut rng, n).cloned().collect())
}

/// Word source backed by a newline-separated word list file.
pub struct FileWords {
    words: Vec<String>,
}

impl FileWords {
    pub fn load(path: &Path) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(Self::from_words(
            data.lines().map(|line| line.trim().to_lowercase()),
        ))
    }

    /// Normalizes a raw word list: empty lines and duplicates are dropped,
    /// first occurrence wins.
    fn from_words(raw: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let words = raw
            .into_iter()
            .filter(|word| !word.is_empty() && seen.insert(word.clone()))
            .collect();
        Self { words }
    }
}

impl WordSource for FileWords {
    fn sample(&self, n: usize) -> Result<Vec<String>, GameError> {
        sample_from(&self.words, n)
    }
}

/// Built-in fallback word list, used when no words file is configured.
pub struct BuiltinWords;

pub const DEFAULT_WORDS: &[&str] = &[
    "Europe",
    "Cat",
    "Bermuda",
    "Jupiter",
    "Dance",
    "Pupil",
    "Mail",
    "Fair",
    "Germany",
    "Forest",
    "Thumb",
    "Press",
    "Snow",
    "Day",
    "Washington",
    "Fly",
    "Head",
    "Dog",
    "Iron",
    "Train",
    "Beat",
    "Nail",
    "Charge",
    "Bell",
    "Alps",
];

impl WordSource for BuiltinWords {
    fn sample(&self, n: usize) -> Result<Vec<String>, GameError> {
        let words: Vec<String> = DEFAULT_WORDS.iter().map(|w| w.to_string()).collect();
        sample_from(&words, n)
    }
}

// path: crates/anchorgram_text/src/stopwords.rs
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::normalizer::fold;

/// Function words excluded during normalization. Built once at startup and
/// only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| fold(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; lines are trimmed, blank lines skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        Ok(Self::from_words(lines))
    }

    /// Load the list at `path`. A missing or unreadable file degrades to an
    /// empty set (stopword filtering becomes a no-op) and is logged.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = File::open(path).and_then(|f| Self::from_reader(BufReader::new(f)));
        match loaded {
            Ok(set) => {
                tracing::info!(path = %path.display(), words = set.len(), "stopwords loaded");
                set
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "stopword list unavailable, filtering disabled");
                Self::default()
            }
        }
    }

    /// `word` must already be folded (lowercase).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reader_trims_and_lowercases() {
        let set = StopwordSet::from_reader(Cursor::new("the\n  Of \n\n\tand\n")).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(set.contains("of"));
        assert!(set.contains("and"));
        assert!(!set.contains(""));
    }

    #[test]
    fn missing_file_gives_empty_set() {
        let set = StopwordSet::load_or_empty("/definitely/not/here/stopwords.txt");
        assert!(set.is_empty());
    }
}

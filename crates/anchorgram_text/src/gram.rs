// path: crates/anchorgram_text/src/gram.rs
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Ordered pair of normalized words. `(a, b)` and `(b, a)` are different
/// bigrams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bigram {
    first: String,
    second: String,
}

impl Bigram {
    /// `None` if either word is empty.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Option<Self> {
        let (first, second) = (first.into(), second.into());
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some(Self { first, second })
    }

    /// Synthetic search token: both words glued with no separator.
    pub fn joined(&self) -> String {
        joined(&self.first, &self.second)
    }
}

/// Canonical rendering used by the BINDEX artifact: `word1_word2`.
impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.first, self.second)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("not a bigram: {0:?}")]
pub struct ParseBigramError(String);

impl FromStr for Bigram {
    type Err = ParseBigramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || ParseBigramError(s.to_string());
        let (a, b) = s.split_once('_').ok_or_else(bad)?;
        // exactly two words: no second separator
        if b.contains('_') {
            return Err(bad());
        }
        Bigram::new(a, b).ok_or_else(bad)
    }
}

/// Glue two words into the synthetic token form.
pub fn joined(first: &str, second: &str) -> String {
    let mut out = String::with_capacity(first.len() + second.len());
    out.push_str(first);
    out.push_str(second);
    out
}

/// Adjacent pairs of a token stream.
pub fn pairs(tokens: &[String]) -> impl Iterator<Item = (&str, &str)> {
    tokens.windows(2).map(|w| (w[0].as_str(), w[1].as_str()))
}

/// BINDEX: the deduplicated set of extracted bigrams.
///
/// Keyed by first word so membership tests on borrowed token pairs do not
/// allocate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BigramSet {
    by_first: HashMap<String, HashSet<String>>,
    len: usize,
}

impl BigramSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the bigram was not present yet.
    pub fn insert(&mut self, bigram: Bigram) -> bool {
        let added = self
            .by_first
            .entry(bigram.first)
            .or_default()
            .insert(bigram.second);
        if added {
            self.len += 1;
        }
        added
    }

    pub fn contains(&self, first: &str, second: &str) -> bool {
        self.by_first
            .get(first)
            .is_some_and(|seconds| seconds.contains(second))
    }

    /// Move every member of `other` into `self`.
    pub fn merge(&mut self, other: BigramSet) {
        for (first, seconds) in other.by_first {
            for second in seconds {
                self.insert(Bigram {
                    first: first.clone(),
                    second,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_first
            .iter()
            .flat_map(|(a, bs)| bs.iter().map(move |b| (a.as_str(), b.as_str())))
    }

    /// Members in lexicographic order.
    pub fn sorted(&self) -> Vec<Bigram> {
        let mut out: Vec<Bigram> = self
            .iter()
            .map(|(a, b)| Bigram {
                first: a.to_string(),
                second: b.to_string(),
            })
            .collect();
        out.sort();
        out
    }

    /// One `word1_word2` per line, sorted, newline-terminated.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for bigram in self.sorted() {
            writeln!(w, "{bigram}")?;
        }
        w.flush()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        self.write_to(BufWriter::new(File::create(path)?))
    }

    /// Parse a BINDEX artifact. Blank lines are skipped; lines that are not
    /// `word1_word2` are logged and skipped.
    pub fn read_from<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut set = Self::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Bigram>() {
                Ok(b) => {
                    set.insert(b);
                }
                Err(err) => tracing::warn!(line = n + 1, %err, "skipping malformed bindex line"),
            }
        }
        Ok(set)
    }

    /// Load the artifact at `path`. A missing or unreadable file degrades to
    /// an empty set (no augmentation) and is logged.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path).and_then(|f| Self::read_from(BufReader::new(f))) {
            Ok(set) => {
                tracing::info!(path = %path.display(), bigrams = set.len(), "bindex loaded");
                set
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "bindex unavailable, augmentation disabled");
                Self::default()
            }
        }
    }
}

impl Extend<Bigram> for BigramSet {
    fn extend<T: IntoIterator<Item = Bigram>>(&mut self, iter: T) {
        for b in iter {
            self.insert(b);
        }
    }
}

impl FromIterator<Bigram> for BigramSet {
    fn from_iter<T: IntoIterator<Item = Bigram>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

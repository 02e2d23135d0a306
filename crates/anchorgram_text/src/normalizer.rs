// path: crates/anchorgram_text/src/normalizer.rs
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::stemmer::stem;
use crate::stopwords::StopwordSet;

/// Token delimiters: whitespace, hyphen, colon and stray link brackets/plus.
static DELIMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-:\[\]+]+").expect("delimiter regex"));

/// Lowercase, NFKC, strip accents
pub fn fold(s: &str) -> String {
    let lower = s.to_lowercase();
    let nfkc = lower.nfkc().collect::<String>();
    strip_accents(&nfkc)
}

fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_mark(*c)).collect()
}

fn is_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Split on delimiter runs; never yields empty tokens.
pub fn split_tokens(s: &str) -> impl Iterator<Item = &str> {
    DELIMS.split(s).filter(|t| !t.is_empty())
}

/// The tokenize -> stopword-filter -> stem pipeline. Extraction and
/// augmentation must both go through this type so that a bigram built from
/// an annotation lines up with the same words found in a record.
#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    stopwords: &'a StopwordSet,
}

impl<'a> Normalizer<'a> {
    pub fn new(stopwords: &'a StopwordSet) -> Self {
        Self { stopwords }
    }

    /// Normalized tokens of `text`, in order of occurrence.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        split_tokens(text)
            .filter_map(|raw| self.token(raw))
            .collect()
    }

    /// One raw token through folding, the stopword test and the stemmer.
    /// `None` for stopwords and for tokens with nothing left to stem.
    pub fn token(&self, raw: &str) -> Option<String> {
        let folded = fold(raw);
        if self.stopwords.contains(&folded) {
            return None;
        }
        let stemmed = stem(&folded);
        (!stemmed.is_empty()).then_some(stemmed)
    }

    /// Space-joined normalized form of a phrase; `None` when every token was
    /// dropped.
    pub fn phrase(&self, text: &str) -> Option<String> {
        let tokens = self.tokens(text);
        (!tokens.is_empty()).then(|| tokens.join(" "))
    }
}

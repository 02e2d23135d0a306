// path: src/extract.rs
//! Annotation text -> BINDEX.
//!
//! scan -> classify/clean -> normalize -> keep two-word phrases.

use std::collections::HashSet;

use anchorgram_text::{Bigram, BigramSet, Normalizer};

use crate::markup::{AnnotationScanner, candidates};

/// Normalize each phrase candidate and keep the ones that come out as
/// exactly two words. Phrases of one or three-plus words are dropped, never
/// truncated.
pub fn bigrams_from_candidates<I, S>(normalizer: &Normalizer<'_>, phrases: I) -> BigramSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized: HashSet<String> = phrases
        .into_iter()
        .filter_map(|p| normalizer.phrase(p.as_ref()))
        .collect();

    normalized
        .iter()
        .filter_map(|phrase| {
            let mut words = phrase.split_whitespace();
            match (words.next(), words.next(), words.next()) {
                (Some(a), Some(b), None) => Bigram::new(a, b),
                _ => None,
            }
        })
        .collect()
}

/// Builds bigrams from raw article text.
pub struct BigramExtractor<'a> {
    normalizer: Normalizer<'a>,
}

impl<'a> BigramExtractor<'a> {
    pub fn new(normalizer: Normalizer<'a>) -> Self {
        Self { normalizer }
    }

    /// Bigrams named by the annotations of one text block.
    pub fn extract(&self, text: &str) -> BigramSet {
        let mut out = BigramSet::new();
        for annotation in AnnotationScanner::new(text) {
            let phrases = candidates(&annotation);
            if phrases.is_empty() {
                continue;
            }
            out.merge(bigrams_from_candidates(&self.normalizer, &phrases));
        }
        out
    }

    /// Union over many text blocks.
    pub fn extract_all<'t, I>(&self, texts: I) -> BigramSet
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut out = BigramSet::new();
        for text in texts {
            out.merge(self.extract(text));
        }
        out
    }
}

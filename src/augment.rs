// path: src/augment.rs
//! Appends synthetic phrase tokens to record text so a plain term index can
//! match on known bigrams.
//!
//! The same [`Augmenter`] must be applied to documents and to queries: a
//! token like `bloodpressur` only helps if both sides produce it from the
//! same words.

use anchorgram_text::gram::{joined, pairs};
use anchorgram_text::{BigramSet, Normalizer};
use rayon::prelude::*;

use crate::collection::Record;
use crate::config::Resources;

#[derive(Clone, Copy)]
pub struct Augmenter<'a> {
    normalizer: Normalizer<'a>,
    bigrams: &'a BigramSet,
}

impl<'a> Augmenter<'a> {
    pub fn new(normalizer: Normalizer<'a>, bigrams: &'a BigramSet) -> Self {
        Self { normalizer, bigrams }
    }

    pub fn from_resources(res: &'a Resources) -> Self {
        Self::new(res.normalizer(), &res.bigrams)
    }

    /// Adjacent normalized pairs of `text` that are known bigrams, in order,
    /// repeats included.
    pub fn matches(&self, text: &str) -> Vec<(String, String)> {
        let tokens = self.normalizer.tokens(text);
        pairs(&tokens)
            .filter(|(a, b)| self.bigrams.contains(a, b))
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    /// Space-separated synthetic tokens for `text` (possibly empty).
    pub fn synthetic_tokens(&self, text: &str) -> String {
        let tokens = self.normalizer.tokens(text);
        let mut buf = String::new();
        for (a, b) in pairs(&tokens) {
            if !self.bigrams.contains(a, b) {
                continue;
            }
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(&joined(a, b));
        }
        buf
    }

    /// `text`, one space, then the synthetic tokens.
    pub fn augment(&self, text: &str) -> String {
        let extra = self.synthetic_tokens(text);
        let mut out = String::with_capacity(text.len() + 1 + extra.len());
        out.push_str(text);
        out.push(' ');
        out.push_str(&extra);
        out
    }

    pub fn augment_record(&self, record: &Record) -> Record {
        Record {
            id: record.id,
            text: self.augment(&record.text),
        }
    }

    /// Augment a whole collection. Records are independent, so they are
    /// processed in parallel; output order matches input order.
    pub fn augment_all(&self, records: &[Record]) -> Vec<Record> {
        let out: Vec<Record> = records.par_iter().map(|r| self.augment_record(r)).collect();
        tracing::info!(records = out.len(), "collection augmented");
        out
    }
}

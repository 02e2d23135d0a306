// path: src/stats.rs
//! How often BINDEX bigrams actually occur in a document and a query
//! collection.

use std::collections::{BTreeMap, HashMap};

use croaring::Bitmap;
use serde::Serialize;

use crate::augment::Augmenter;
use crate::collection::Record;

/// Occurrences of one side (documents or queries).
#[derive(Default)]
struct Side {
    occurrences: u64,
    // bigram (`a_b`) -> ids of records containing it
    records: HashMap<String, Bitmap>,
}

impl Side {
    fn observe(&mut self, aug: &Augmenter<'_>, records: &[Record]) {
        for r in records {
            for (a, b) in aug.matches(&r.text) {
                self.occurrences += 1;
                self.records
                    .entry(format!("{a}_{b}"))
                    .or_insert_with(Bitmap::new)
                    .add(r.id);
            }
        }
    }

    fn unique(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BigramStats {
    pub bigrams_in_documents: u64,
    pub unique_in_documents: usize,
    pub bigrams_in_queries: u64,
    pub unique_in_queries: usize,
    /// Distinct bigrams seen on both sides.
    pub common: usize,
    /// Bigram (`a_b`) -> number of documents containing it.
    pub document_frequency: BTreeMap<String, u64>,
}

/// Accumulates bigram matches for a document and a query collection.
pub struct BigramCounter<'a> {
    augmenter: Augmenter<'a>,
    docs: Side,
    queries: Side,
}

impl<'a> BigramCounter<'a> {
    pub fn new(augmenter: Augmenter<'a>) -> Self {
        Self {
            augmenter,
            docs: Side::default(),
            queries: Side::default(),
        }
    }

    pub fn observe_documents(&mut self, records: &[Record]) {
        self.docs.observe(&self.augmenter, records);
    }

    pub fn observe_queries(&mut self, records: &[Record]) {
        self.queries.observe(&self.augmenter, records);
    }

    /// Number of documents containing `bigram` (rendered `a_b`).
    pub fn document_frequency(&self, bigram: &str) -> u64 {
        self.docs
            .records
            .get(bigram)
            .map(|bm| bm.cardinality())
            .unwrap_or(0)
    }

    pub fn report(&self) -> BigramStats {
        let common = self
            .queries
            .records
            .keys()
            .filter(|k| self.docs.records.contains_key(*k))
            .count();
        let document_frequency = self
            .docs
            .records
            .keys()
            .map(|k| (k.clone(), self.document_frequency(k)))
            .collect();
        BigramStats {
            bigrams_in_documents: self.docs.occurrences,
            unique_in_documents: self.docs.unique(),
            bigrams_in_queries: self.queries.occurrences,
            unique_in_queries: self.queries.unique(),
            common,
            document_frequency,
        }
    }
}

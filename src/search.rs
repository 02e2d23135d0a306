// path: src/search.rs
//! Boundary with the external full-text engine. Ranking lives on the other
//! side of [`SearchBackend`]; this module only feeds it augmented text and
//! writes its answers as result lines.
//!
//! Library-only: the `anchorgram` binary never calls into this module; an
//! external engine implements [`SearchBackend`] and drives a run with
//! [`run_configured`] (`top_k`, `run_tag` from [`PipelineConfig`]).

use std::fmt;
use std::io::Write;

use anyhow::Context;

use crate::augment::Augmenter;
use crate::collection::Record;
use crate::config::PipelineConfig;

/// One ranked answer from the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredHit {
    pub id: u32,
    pub score: f32,
}

/// Narrow contract of the index/search collaborator.
pub trait SearchBackend {
    fn add_document(&mut self, id: u32, text: &str) -> anyhow::Result<()>;
    /// Best hits first, at most `limit`.
    fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<ScoredHit>>;
}

/// `<query id> 0 <matched id> <rank> <score> <run tag>`
#[derive(Debug, Clone, PartialEq)]
pub struct ResultLine<'a> {
    pub query_id: u32,
    pub doc_id: u32,
    /// 1-based
    pub rank: usize,
    pub score: f32,
    pub run_tag: &'a str,
}

impl fmt::Display for ResultLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 0 {} {} {} {}",
            self.query_id, self.doc_id, self.rank, self.score, self.run_tag
        )
    }
}

/// Augment and index every document.
pub fn index_documents<B: SearchBackend>(
    backend: &mut B,
    augmenter: &Augmenter<'_>,
    docs: &[Record],
) -> anyhow::Result<usize> {
    for doc in augmenter.augment_all(docs) {
        if let Err(err) = backend.add_document(doc.id, &doc.text) {
            tracing::error!(id = doc.id, error = %err, "indexing failed, aborting run");
            return Err(err.context(format!("index document {}", doc.id)));
        }
    }
    tracing::info!(documents = docs.len(), "documents indexed");
    Ok(docs.len())
}

/// Augment each query, run it and write one result line per hit in rank
/// order. Returns the number of lines written.
pub fn run_queries<B: SearchBackend, W: Write>(
    backend: &B,
    augmenter: &Augmenter<'_>,
    queries: &[Record],
    limit: usize,
    run_tag: &str,
    mut out: W,
) -> anyhow::Result<usize> {
    let mut written = 0usize;
    for query in augmenter.augment_all(queries) {
        let hits = match backend.search(&query.text, limit) {
            Ok(hits) => hits,
            Err(err) => {
                tracing::error!(id = query.id, error = %err, "search failed, aborting run");
                return Err(err.context(format!("query {}", query.id)));
            }
        };
        for (i, hit) in hits.iter().enumerate() {
            let line = ResultLine {
                query_id: query.id,
                doc_id: hit.id,
                rank: i + 1,
                score: hit.score,
                run_tag,
            };
            writeln!(out, "{line}").context("write result line")?;
            written += 1;
        }
    }
    out.flush().context("flush results")?;
    tracing::info!(queries = queries.len(), lines = written, "queries answered");
    Ok(written)
}

/// [`run_queries`] with the hit limit and run tag taken from `cfg`.
pub fn run_configured<B: SearchBackend, W: Write>(
    backend: &B,
    augmenter: &Augmenter<'_>,
    queries: &[Record],
    cfg: &PipelineConfig,
    out: W,
) -> anyhow::Result<usize> {
    run_queries(backend, augmenter, queries, cfg.top_k, &cfg.run_tag, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorgram_text::{Bigram, BigramSet, Normalizer, StopwordSet};
    use std::cell::RefCell;

    /// Records what it was given; answers every query with the documents
    /// whose text contains the query's last word.
    #[derive(Default)]
    struct Recorder {
        docs: Vec<(u32, String)>,
        queries: RefCell<Vec<String>>,
        fail_on_add: bool,
    }

    impl SearchBackend for Recorder {
        fn add_document(&mut self, id: u32, text: &str) -> anyhow::Result<()> {
            if self.fail_on_add {
                anyhow::bail!("disk full");
            }
            self.docs.push((id, text.to_string()));
            Ok(())
        }

        fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<ScoredHit>> {
            self.queries.borrow_mut().push(query.to_string());
            let needle = query.split_whitespace().last().unwrap_or_default();
            Ok(self
                .docs
                .iter()
                .filter(|(_, t)| t.split_whitespace().any(|w| w == needle))
                .take(limit)
                .enumerate()
                .map(|(i, (id, _))| ScoredHit {
                    id: *id,
                    score: 1.0 / (i as f32 + 1.0),
                })
                .collect())
        }
    }

    fn rec(id: u32, text: &str) -> Record {
        Record {
            id,
            text: text.into(),
        }
    }

    #[test]
    fn result_line_format() {
        let line = ResultLine {
            query_id: 3,
            doc_id: 41,
            rank: 1,
            score: 2.5,
            run_tag: "STANDARD",
        };
        assert_eq!(line.to_string(), "3 0 41 1 2.5 STANDARD");
    }

    #[test]
    fn documents_and_queries_pass_through_the_same_augmentation() {
        let stop = StopwordSet::default();
        let set: BigramSet = [Bigram::new("blood", "pressur").unwrap()].into_iter().collect();
        let aug = Augmenter::new(Normalizer::new(&stop), &set);

        let mut backend = Recorder::default();
        index_documents(
            &mut backend,
            &aug,
            &[rec(10, "blood pressure in infants"), rec(11, "pressure ulcers")],
        )
        .unwrap();
        assert_eq!(backend.docs[0].1, "blood pressure in infants bloodpressur");

        let mut out = Vec::new();
        let n = run_queries(&backend, &aug, &[rec(1, "Blood Pressure")], 10, "BIGRAMS", &mut out)
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(backend.queries.borrow()[0], "Blood Pressure bloodpressur");
        assert_eq!(String::from_utf8(out).unwrap(), "1 0 10 1 1 BIGRAMS\n");
    }

    #[test]
    fn backend_failure_aborts() {
        let stop = StopwordSet::default();
        let set = BigramSet::new();
        let aug = Augmenter::new(Normalizer::new(&stop), &set);
        let mut backend = Recorder {
            fail_on_add: true,
            ..Recorder::default()
        };
        let err = index_documents(&mut backend, &aug, &[rec(1, "x")]).unwrap_err();
        assert!(format!("{err:#}").contains("disk full"));
    }

    #[test]
    fn configured_run_caps_hits_and_tags_lines() {
        let stop = StopwordSet::default();
        let set = BigramSet::new();
        let aug = Augmenter::new(Normalizer::new(&stop), &set);
        let mut backend = Recorder::default();
        let docs: Vec<Record> = (1..=5).map(|id| rec(id, "aorta")).collect();
        index_documents(&mut backend, &aug, &docs).unwrap();

        let cfg = PipelineConfig {
            top_k: 2,
            ..PipelineConfig::default()
        };
        let mut out = Vec::new();
        let n = run_configured(&backend, &aug, &[rec(9, "aorta")], &cfg, &mut out).unwrap();
        assert_eq!(n, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["9 0 1 1 1 STANDARD", "9 0 2 2 0.5 STANDARD"]);
    }
}

// path: src/corpus.rs
//! Article dump reader: bodies sit between a `<TEXT>` line and a `</TEXT>`
//! line, everything else in the dump is ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anchorgram_text::BigramSet;
use anyhow::Context;

use crate::extract::BigramExtractor;

const TEXT_OPEN: &str = "<TEXT>";
const TEXT_CLOSE: &str = "</TEXT>";

/// Streams article bodies out of a dump, one `String` per `<TEXT>` block.
pub struct ArticleReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> ArticleReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }
}

impl ArticleReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for ArticleReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        // skip to the next opening tag
        loop {
            match self.next_line()? {
                Ok(line) if line.trim() == TEXT_OPEN => break,
                Ok(_) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        let opened_at = self.line_no;
        let mut body = String::new();
        loop {
            match self.next_line() {
                Some(Ok(line)) if line.trim() == TEXT_CLOSE => return Some(Ok(body)),
                Some(Ok(line)) => {
                    body.push_str(&line);
                    body.push('\n');
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    tracing::warn!(line = opened_at, "article block not closed before end of input");
                    return Some(Ok(body));
                }
            }
        }
    }
}

/// Outcome of one extraction run.
#[derive(Debug, Default)]
pub struct CorpusBigrams {
    pub bigrams: BigramSet,
    pub articles: usize,
}

/// Run extraction over every article of a dump.
pub fn extract_corpus<R: BufRead>(
    extractor: &BigramExtractor<'_>,
    reader: R,
) -> io::Result<CorpusBigrams> {
    let mut out = CorpusBigrams::default();
    for article in ArticleReader::new(reader) {
        let article = article?;
        out.bigrams.merge(extractor.extract(&article));
        out.articles += 1;
    }
    tracing::info!(articles = out.articles, bigrams = out.bigrams.len(), "corpus scanned");
    Ok(out)
}

pub fn extract_corpus_file(
    extractor: &BigramExtractor<'_>,
    path: impl AsRef<Path>,
) -> anyhow::Result<CorpusBigrams> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open corpus {}", path.display()))?;
    extract_corpus(extractor, BufReader::new(f))
        .with_context(|| format!("read corpus {}", path.display()))
}

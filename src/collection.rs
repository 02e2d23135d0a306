// path: src/collection.rs
//! Reader for line-oriented document/query collections:
//!
//! ```text
//! .I 1
//! .W
//! free text, possibly
//! over many lines
//! .I 2
//! ...
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

pub const ID_MARKER: &str = ".I";
pub const BODY_MARKER: &str = ".W";

/// One document or query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: u32,
    pub text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum CollectionError {
    #[error("line {line}: record identifier {value:?} is not a positive integer")]
    UnrecognizedIdentifier { line: usize, value: String },
    #[error("line {line}: body marker with no preceding record identifier")]
    MissingIdentifier { line: usize },
    #[error("line {line}: record identifier {id} appears twice")]
    DuplicateIdentifier { line: usize, id: u32 },
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InBody,
}

/// Parses a collection into records. Any error fails the whole read; no
/// partial list is returned.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, CollectionError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut state = State::Idle;
    let mut id: Option<u32> = None;
    let mut text = String::new();

    for (n, line) in reader.lines().enumerate() {
        let line_no = n + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(ID_MARKER) {
            if state == State::InBody {
                if let Some(prev) = id {
                    records.push(Record {
                        id: prev,
                        text: std::mem::take(&mut text),
                    });
                }
            } else if let Some(prev) = id {
                tracing::debug!(id = prev, "record without body dropped");
            }
            let next = parse_id(rest, line_no)?;
            if !seen.insert(next) {
                return Err(CollectionError::DuplicateIdentifier { line: line_no, id: next });
            }
            id = Some(next);
            state = State::Idle;
            text.clear();
        } else if trimmed.starts_with(BODY_MARKER) {
            if id.is_none() {
                return Err(CollectionError::MissingIdentifier { line: line_no });
            }
            // a second body marker inside a body is ignored
            state = State::InBody;
        } else if state == State::InBody {
            text.push_str(&line);
            text.push('\n');
        }
    }

    if state == State::InBody {
        if let Some(last) = id {
            records.push(Record { id: last, text });
        }
    }
    Ok(records)
}

fn parse_id(rest: &str, line: usize) -> Result<u32, CollectionError> {
    let value = rest.trim();
    match value.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CollectionError::UnrecognizedIdentifier {
            line,
            value: value.to_string(),
        }),
    }
}

/// A collection on disk; every call to [`Collection::records`] re-reads the
/// file from the start.
#[derive(Debug, Clone)]
pub struct Collection {
    path: PathBuf,
}

impl Collection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// [`Collection::records`] with the file name attached to any error.
    pub fn load(&self) -> anyhow::Result<Vec<Record>> {
        self.records()
            .with_context(|| format!("read collection {}", self.path.display()))
    }

    pub fn records(&self) -> Result<Vec<Record>, CollectionError> {
        let f = File::open(&self.path)?;
        let records = read_records(BufReader::new(f))?;
        tracing::info!(path = %self.path.display(), records = records.len(), "collection read");
        Ok(records)
    }
}

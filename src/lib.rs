//! Phrase-aware retrieval preprocessing.
//!
//! Two phases, connected only through the BINDEX file:
//!
//! - **extraction**: scan wiki link markup in an article dump
//!   ([`markup`], [`corpus`]), normalize link phrases and keep the two-word
//!   ones ([`extract`]), persist the set.
//! - **augmentation**: read a document or query collection
//!   ([`collection`]), append a synthetic token for every adjacent word pair
//!   found in BINDEX ([`augment`]) and hand the text to a search engine
//!   ([`search`]).
//!
//! Normalization itself lives in the `anchorgram_text` crate.

pub mod augment;
pub mod collection;
pub mod config;
pub mod corpus;
pub mod extract;
pub mod markup;
pub mod search;
pub mod stats;

pub use anchorgram_text as text;

//! Text normalization shared by BINDEX extraction and record augmentation.
//!
//! Everything that turns characters into comparable words lives here so both
//! phases see exactly the same tokens: [`normalizer::fold`] and the
//! [`normalizer::Normalizer`] pipeline, the Porter [`stemmer`], the
//! [`stopwords::StopwordSet`] and the [`gram::Bigram`] / [`gram::BigramSet`]
//! types with their flat-file form.

pub mod gram;
pub mod normalizer;
pub mod stemmer;
pub mod stopwords;

pub use gram::{Bigram, BigramSet};
pub use normalizer::Normalizer;
pub use stopwords::StopwordSet;

//! Wiki link markup: locating `[[ ... ]]` annotations in raw article text and
//! turning each into phrase candidates.

pub mod annotation;
pub mod scanner;

pub use annotation::candidates;
pub use scanner::AnnotationScanner;

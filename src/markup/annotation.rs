// path: src/markup/annotation.rs
use std::collections::BTreeSet;

use super::scanner::{CLOSE, OPEN};

/// Markers of non-lexical link targets: external URLs, media and
/// project/meta namespaces. Matched as case-sensitive substrings.
const REJECT_MARKERS: &[&str] = &[
    "http://",
    "https://",
    "File:",
    "s:",
    "Image:",
    "WP:",
    "MOS:",
    "Template:",
    "Wikipedia:",
];

/// Stripped only when it leads the annotation.
const CATEGORY_PREFIX: &str = "Category:";

/// Stripped wherever they occur. `wikt:` goes before `w:`.
const NAMESPACE_MARKERS: &[&str] = &["Book:", "wikt:", "w:", "de:"];

const ALIAS_SEP: char = '|';

/// Whether the annotation names something worth turning into a phrase.
pub fn is_lexical(annotation: &str) -> bool {
    let t = annotation.trim();
    !t.starts_with(':') && !REJECT_MARKERS.iter().any(|m| t.contains(m))
}

/// Drop the link delimiters and recognised namespace prefixes.
pub fn clean(annotation: &str) -> String {
    let mut s = annotation.replace(OPEN, "").replace(CLOSE, "");
    let stripped = s
        .trim_start()
        .strip_prefix(CATEGORY_PREFIX)
        .map(str::to_string);
    if let Some(rest) = stripped {
        s = rest;
    }
    for marker in NAMESPACE_MARKERS {
        if s.contains(marker) {
            s = s.replace(marker, "");
        }
    }
    s
}

/// Classify one raw annotation and return its phrase candidates: one per
/// alias when the link carries a `|` list, deduplicated. Rejected annotations
/// give an empty set.
pub fn candidates(annotation: &str) -> BTreeSet<String> {
    if !is_lexical(annotation) {
        return BTreeSet::new();
    }
    clean(annotation)
        .split(ALIAS_SEP)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn category_with_aliases() {
        assert_eq!(
            candidates("[[Category:Heart disease|Heart disease|cardiac disease]]"),
            set(&["Heart disease", "cardiac disease"])
        );
    }

    #[test]
    fn media_and_meta_rejected() {
        assert!(candidates("[[File:diagram.png]]").is_empty());
        assert!(candidates("[[Image:x.jpg|thumb]]").is_empty());
        assert!(candidates("[[Template:Cite]]").is_empty());
        assert!(candidates("[[Wikipedia:Manual]]").is_empty());
        assert!(candidates("[[WP:MED]]").is_empty());
        assert!(candidates("[[MOS:HEAD]]").is_empty());
        assert!(candidates("[[http://example.org page]]").is_empty());
        assert!(candidates("[[s:Some source]]").is_empty());
    }

    #[test]
    fn leading_colon_rejected() {
        assert!(!is_lexical("  :Category:Cardiology"));
        assert!(candidates(":Category:Cardiology").is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(is_lexical("[[file:lower is fine]]"));
    }

    #[test]
    fn category_stripped_only_as_prefix() {
        assert_eq!(clean("[[Category:Blood]]"), "Blood");
        assert_eq!(clean("[[See Category:Blood]]"), "See Category:Blood");
    }

    #[test]
    fn namespace_markers_stripped_everywhere() {
        assert_eq!(clean("[[wikt:aorta]]"), "aorta");
        assert_eq!(clean("[[Book:Cardiology|de:Herz]]"), "Cardiology|Herz");
        assert_eq!(clean("[[w:Blood pressure]]"), "Blood pressure");
    }

    #[test]
    fn plain_link_is_one_candidate() {
        assert_eq!(candidates("[[Blood pressure]]"), set(&["Blood pressure"]));
    }

    #[test]
    fn empty_aliases_dropped() {
        assert_eq!(candidates("[[Pulse||rate| ]]"), set(&["Pulse", "rate"]));
        assert!(candidates("[[]]").is_empty());
    }
}

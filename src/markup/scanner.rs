// path: src/markup/scanner.rs
use std::borrow::Cow;

pub const OPEN: &str = "[[";
pub const CLOSE: &str = "]]";

/// Lazy scan over the `[[ ... ]]` annotations of one text block, in order of
/// occurrence.
///
/// Overlap is decided positionally: when a second `[[` shows up before the
/// first `]]`, the inner span (second opener through first closer) is one
/// annotation and the outer span minus the inner text, closed by the next
/// `]]`, is a sibling emitted right after it. Missing delimiters end the scan
/// quietly; whatever was emitted so far stands.
pub struct AnnotationScanner<'a> {
    text: &'a str,
    cursor: usize,
    pending: Option<Cow<'a, str>>,
    done: bool,
}

/// Delimiter positions found for one step of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    /// `[[ ... ]]` with no opener inside.
    Simple { open: usize, close: usize },
    /// `[[ ... [[ ... ]] ... ]]`
    Overlap {
        open: usize,
        inner_open: usize,
        inner_close: usize,
        close: usize,
    },
    /// Inner annotation complete, outer one never closed.
    Unclosed { inner_open: usize, inner_close: usize },
}

impl<'a> AnnotationScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            pending: None,
            done: false,
        }
    }

    fn find_from(&self, pat: &str, from: usize) -> Option<usize> {
        self.text.get(from..)?.find(pat).map(|i| i + from)
    }

    fn next_span(&self) -> Option<Span> {
        let open = self.find_from(OPEN, self.cursor)?;
        let close = self.find_from(CLOSE, open + OPEN.len())?;
        match self.find_from(OPEN, open + OPEN.len()) {
            Some(inner_open) if inner_open < close => {
                match self.find_from(CLOSE, close + CLOSE.len()) {
                    Some(outer_close) => Some(Span::Overlap {
                        open,
                        inner_open,
                        inner_close: close,
                        close: outer_close,
                    }),
                    None => Some(Span::Unclosed {
                        inner_open,
                        inner_close: close,
                    }),
                }
            }
            _ => Some(Span::Simple { open, close }),
        }
    }
}

impl<'a> Iterator for AnnotationScanner<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(sibling) = self.pending.take() {
            return Some(sibling);
        }
        if self.done {
            return None;
        }
        let text = self.text;
        let Some(span) = self.next_span() else {
            self.done = true;
            return None;
        };
        match span {
            Span::Simple { open, close } => {
                let end = close + CLOSE.len();
                self.cursor = end;
                Some(Cow::Borrowed(&text[open..end]))
            }
            Span::Overlap {
                open,
                inner_open,
                inner_close,
                close,
            } => {
                let inner_end = inner_close + CLOSE.len();
                let end = close + CLOSE.len();
                let mut outer = String::with_capacity(end - open - (inner_end - inner_open));
                outer.push_str(&text[open..inner_open]);
                outer.push_str(&text[inner_end..end]);
                self.pending = Some(Cow::Owned(outer));
                self.cursor = end;
                Some(Cow::Borrowed(&text[inner_open..inner_end]))
            }
            Span::Unclosed {
                inner_open,
                inner_close,
            } => {
                self.done = true;
                Some(Cow::Borrowed(&text[inner_open..inner_close + CLOSE.len()]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(text: &str) -> Vec<String> {
        AnnotationScanner::new(text).map(Cow::into_owned).collect()
    }

    #[test]
    fn simple_annotations_in_order() {
        let got = owned("The [[heart]] pumps [[blood|Blood]] through [[vein]]s.");
        assert_eq!(got, vec!["[[heart]]", "[[blood|Blood]]", "[[vein]]"]);
    }

    #[test]
    fn annotation_at_offset_zero() {
        assert_eq!(owned("[[Aorta]] is big"), vec!["[[Aorta]]"]);
    }

    #[test]
    fn adjacent_annotations() {
        assert_eq!(owned("[[a]][[b]]"), vec!["[[a]]", "[[b]]"]);
    }

    #[test]
    fn nested_yields_inner_then_outer_without_inner() {
        let got = owned("x [[File:Heart.png|thumb|The [[heart]] wall]] y [[aorta]]");
        assert_eq!(
            got,
            vec!["[[heart]]", "[[File:Heart.png|thumb|The  wall]]", "[[aorta]]"]
        );
    }

    #[test]
    fn nested_inner_is_removed_positionally() {
        // the same inner text earlier in the block must not shift the sibling
        let got = owned("[[b]] [[a [[b]] c]]");
        assert_eq!(got, vec!["[[b]]", "[[b]]", "[[a  c]]"]);
    }

    #[test]
    fn missing_close_stops_scan() {
        assert_eq!(owned("[[ok]] then [[broken"), vec!["[[ok]]"]);
        assert!(owned("no markup here").is_empty());
        assert!(owned("]] [[").is_empty());
    }

    #[test]
    fn unclosed_outer_keeps_inner_then_stops() {
        let got = owned("[[outer [[inner]] never closed [[later]]");
        // second `]]` after the inner one belongs to [[later]] and closes the outer
        assert_eq!(got, vec!["[[inner]]", "[[outer  never closed [[later]]"]);

        let got = owned("[[outer [[inner]] tail");
        assert_eq!(got, vec!["[[inner]]"]);
    }

    #[test]
    fn three_levels_use_first_inner_opener() {
        let got = owned("[[a [[b [[c]] d]] e]]");
        assert_eq!(got, vec!["[[b [[c]]", "[[a  d]]"]);
    }

    #[test]
    fn scanner_is_lazy_and_fused() {
        let mut it = AnnotationScanner::new("[[a]] [[b");
        assert_eq!(it.next().as_deref(), Some("[[a]]"));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}

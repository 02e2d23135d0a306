// path: crates/anchorgram_text/src/stemmer.rs
//! Porter suffix-stripping stemmer.
//!
//! Follows Porter's reference implementation, including its two departures
//! from the 1980 paper (`bli -> ble` and `logi -> log` in step 2). Only
//! letters and digits of the input are fed to the algorithm; everything else
//! is dropped before stemming.

/// Stem one word. Each call works on its own scratch buffer, so the function
/// is safe to call from any number of threads at once.
///
/// ```
/// use anchorgram_text::stemmer::stem;
///
/// assert_eq!(stem("pressure"), "pressur");
/// assert_eq!(stem("caresses"), "caress");
/// assert_eq!(stem("generalization"), "gener");
/// ```
pub fn stem(word: &str) -> String {
    let kept: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    // Short words and non-ASCII leftovers pass through untouched.
    if kept.len() <= 2 || !kept.is_ascii() {
        return kept;
    }

    let mut s = Stemmer::new(kept.into_bytes());
    s.step1ab();
    s.step1c();
    s.step2();
    s.step3();
    s.step4();
    s.step5();
    s.into_string()
}

/// Scratch state for a single word: `b` is the word being reduced (its
/// length is the current end), `j` the length of the candidate stem set by
/// the last successful `ends`.
struct Stemmer {
    b: Vec<u8>,
    j: usize,
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

impl Stemmer {
    fn new(b: Vec<u8>) -> Self {
        let j = b.len();
        Self { b, j }
    }

    fn into_string(self) -> String {
        // only ASCII bytes ever enter the buffer
        String::from_utf8(self.b).unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.b.len()
    }

    fn last(&self) -> u8 {
        self.b[self.b.len() - 1]
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in the stem `b[..j]`.
    fn measure(&self) -> usize {
        (1..self.j)
            .filter(|&i| self.is_consonant(i) && !self.is_consonant(i - 1))
            .count()
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.is_consonant(i))
    }

    /// `b[i-1..=i]` is a double consonant.
    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.is_consonant(i)
    }

    /// `b[i-2..=i]` is consonant-vowel-consonant and the last one is not
    /// `w`, `x` or `y`. Restores an `e` in words like `hop(e)`.
    fn cvc(&self, i: usize) -> bool {
        if i < 2 || !self.is_consonant(i) || self.is_consonant(i - 1) || !self.is_consonant(i - 2)
        {
            return false;
        }
        !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let s = suffix.as_bytes();
        if s.len() > self.len() || !self.b.ends_with(s) {
            return false;
        }
        self.j = self.len() - s.len();
        true
    }

    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    /// Plurals and -ed / -ing.
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends("sses") {
                self.b.truncate(self.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.b[self.len() - 2] != b's' {
                self.b.pop();
            }
        }
        self.j = self.len();

        if self.ends("eed") {
            if self.measure() > 0 {
                self.b.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.b.truncate(self.j);
            self.j = self.len();
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.len() - 1) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else if self.measure() == 1 && self.cvc(self.len() - 1) {
                self.set_to("e");
            }
        }
    }

    /// Terminal y -> i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.len() - 1;
            self.b[last] = b'i';
        }
    }

    /// Double suffixes to single ones.
    fn step2(&mut self) {
        if self.len() < 2 {
            return;
        }
        for (suffix, replacement) in STEP2 {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    /// -ic-, -full, -ness etc.
    fn step3(&mut self) {
        if self.b.is_empty() {
            return;
        }
        for (suffix, replacement) in STEP3 {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    /// Takes off -ant, -ence etc. in context <c>vcvc<v>.
    fn step4(&mut self) {
        if self.len() < 2 {
            return;
        }
        for suffix in STEP4 {
            if !self.ends(suffix) {
                continue;
            }
            if *suffix == "ion" && !(self.j >= 1 && matches!(self.b[self.j - 1], b's' | b't')) {
                continue;
            }
            if self.measure() > 1 {
                self.b.truncate(self.j);
            }
            return;
        }
    }

    /// Final -e and -ll.
    fn step5(&mut self) {
        if self.b.is_empty() {
            return;
        }
        self.j = self.len();
        if self.last() == b'e' {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.len() - 2)) {
                self.b.pop();
            }
        }
        self.j = self.len();
        if self.last() == b'l' && self.double_consonant(self.len() - 1) && self.measure() > 1 {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pairs: &[(&str, &str)]) {
        for (word, want) in pairs {
            assert_eq!(stem(word), *want, "stem({word})");
        }
    }

    #[test]
    fn plurals_and_participles() {
        check(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "ti"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("sized", "size"),
            ("hopping", "hop"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("filing", "file"),
            ("happy", "happi"),
            ("sky", "sky"),
        ]);
    }

    #[test]
    fn derivational_suffixes() {
        check(&[
            ("relational", "relat"),
            ("conditional", "condit"),
            ("valenci", "valenc"),
            ("digitizer", "digit"),
            ("conformabli", "conform"),
            ("radicalli", "radic"),
            ("vileli", "vile"),
            ("analogousli", "analog"),
            ("operator", "oper"),
            ("feudalism", "feudal"),
            ("decisiveness", "decis"),
            ("hopefulness", "hope"),
            ("formaliti", "formal"),
            ("sensitiviti", "sensit"),
            ("sensibiliti", "sensibl"),
            ("triplicate", "triplic"),
            ("formative", "form"),
            ("electrical", "electr"),
            ("goodness", "good"),
            ("revival", "reviv"),
            ("allowance", "allow"),
            ("adjustment", "adjust"),
            ("adoption", "adopt"),
            ("homologou", "homolog"),
            ("effective", "effect"),
            ("bowdlerize", "bowdler"),
            ("probate", "probat"),
            ("rate", "rate"),
            ("controll", "control"),
            ("roll", "roll"),
        ]);
    }

    #[test]
    fn domain_words() {
        check(&[
            ("pressure", "pressur"),
            ("blood", "blood"),
            ("disease", "diseas"),
            ("cardiac", "cardiac"),
            ("generalization", "gener"),
        ]);
    }

    #[test]
    fn drops_non_alphanumeric_and_keeps_short_words() {
        assert_eq!(stem("pressure,"), "pressur");
        assert_eq!(stem("(blood)"), "blood");
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("a1"), "a1");
        assert_eq!(stem("--"), "");
    }

    #[test]
    fn digits_pass_through() {
        assert_eq!(stem("1990s"), "1990");
        assert_eq!(stem("2024"), "2024");
    }

    #[test]
    fn repeated_calls_do_not_leak_state() {
        let first = stem("hopping");
        let _ = stem("generalization");
        assert_eq!(stem("hopping"), first);
    }
}

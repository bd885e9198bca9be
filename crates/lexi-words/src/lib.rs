//! A sorted, case-normalisable keyword set with abbreviated-match support.
//!
//! Built from an arbitrary whitespace/newline separated blob, as lexers
//! receive from `WordListSet`. Sorted once on first query; membership tests
//! are binary searches.

use ahash::AHashSet;

/// A single word list, as handed to a lexer by index through `WordListSet`.
#[derive(Debug, Default, Clone)]
pub struct WordList {
    words: Vec<Box<str>>,
    sorted: bool,
    case_sensitive: bool,
    /// First index (in `words`) whose entry starts with a given lowercase
    /// letter, used to narrow the abbreviated-match walk. Index 255 is the
    /// catch-all bucket for non-ASCII-letter starts.
    start_index: [usize; 256],
}

impl WordList {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            words: Vec::new(),
            sorted: true,
            case_sensitive,
            start_index: [0; 256],
        }
    }

    /// Replace the contents from a whitespace/newline-delimited blob.
    /// Returns `true` if the resulting sorted content differs from before
    /// (drives `WordListSet`'s "first modified line" semantics, P6).
    pub fn set_from_blob(&mut self, blob: &str) -> bool {
        let mut new_words: Vec<Box<str>> = blob
            .split_whitespace()
            .map(|w| if self.case_sensitive { w.into() } else { w.to_lowercase().into_boxed_str() })
            .collect();
        new_words.sort();
        new_words.dedup();
        let changed = new_words != self.words;
        self.words = new_words;
        self.sorted = true;
        self.reindex();
        changed
    }

    fn reindex(&mut self) {
        self.start_index = [self.words.len(); 256];
        for (i, w) in self.words.iter().enumerate().rev() {
            if let Some(&b) = w.as_bytes().first() {
                self.start_index[b as usize] = i;
            }
        }
    }

    fn normalize<'a>(&self, s: &'a str, buf: &'a mut String) -> &'a str {
        if self.case_sensitive {
            s
        } else {
            buf.clear();
            buf.push_str(&s.to_lowercase());
            buf.as_str()
        }
    }

    /// Exact membership, `O(log n)`.
    pub fn in_list(&self, s: &str) -> bool {
        debug_assert!(self.sorted);
        let mut buf = String::new();
        let key = self.normalize(s, &mut buf);
        self.words.binary_search_by(|w| w.as_ref().cmp(key)).is_ok()
    }

    /// Abbreviated membership: a stored word `PREFIX<marker>SUFFIX` matches
    /// `s` when `s` is between `PREFIX` and `PREFIX SUFFIX` (i.e. `s` is at
    /// least as long as the required prefix and is itself a prefix of the
    /// full word). A stored word with no marker behaves like an exact match.
    pub fn in_list_abbreviated(&self, s: &str, marker: char) -> bool {
        debug_assert!(self.sorted);
        let mut buf = String::new();
        let key = self.normalize(s, &mut buf);
        let Some(&first) = key.as_bytes().first() else {
            return false;
        };
        let start = self.start_index[first as usize];
        for word in &self.words[start..] {
            match word.as_bytes().first() {
                Some(&b) if b == first => {}
                _ => break,
            }
            let full = word.as_ref();
            let (prefix, full_no_marker) = match full.find(marker) {
                Some(idx) => (&full[..idx], format!("{}{}", &full[..idx], &full[idx + marker.len_utf8()..])),
                None => (full, full.to_string()),
            };
            if key.len() >= prefix.len() && key.len() <= full_no_marker.len() && full_no_marker.starts_with(key) {
                return true;
            }
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// A fast de-duplicated set view, for callers (like the task-marker
    /// scanner) that only need existence checks over whole tokens and want
    /// to avoid repeated binary search overhead across a hot loop.
    pub fn to_hash_set(&self) -> AHashSet<&str> {
        self.words.iter().map(|w| w.as_ref()).collect()
    }
}

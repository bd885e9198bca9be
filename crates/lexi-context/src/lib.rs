//! The style context (spec.md C4): a forward-only cursor layered on a
//! [`Document`], giving every lexer `ch`/`chNext`/`chPrev`, transactional
//! state transitions, and multi-byte lookahead.

use lexi_doc::Document;

/// A forward cursor over `[start_pos, start_pos + length)` of a [`Document`],
/// accumulating one lexical "segment" at a time. Every `Lex` implementation
/// drives one of these; segments are committed to the document's style
/// bytes on `set_state`/`complete`, never eagerly, so `change_state` can
/// retroactively relabel a segment that hasn't been written yet.
pub struct StyleContext<'a, D: Document + ?Sized> {
    doc: &'a mut D,
    end_pos: usize,
    seg_start: usize,
    pub current_pos: usize,
    pub current_line: usize,
    pub state: u8,
    pub ch: u8,
    pub ch_next: u8,
    pub ch_prev: u8,
    pub at_line_start: bool,
    pub at_line_end: bool,
}

impl<'a, D: Document + ?Sized> StyleContext<'a, D> {
    pub fn new(doc: &'a mut D, start_pos: usize, length: usize, init_style: u8) -> Self {
        let end_pos = start_pos + length;
        doc.start_styling(start_pos);
        let current_line = doc.get_line(start_pos);
        let ch = doc.char_at(start_pos);
        let ch_next = doc.char_at(start_pos + 1);
        let ch_prev = if start_pos == 0 { 0 } else { doc.char_at(start_pos - 1) };
        let mut sc = Self {
            doc,
            end_pos,
            seg_start: start_pos,
            current_pos: start_pos,
            current_line,
            state: init_style,
            ch,
            ch_next,
            ch_prev,
            at_line_start: false,
            at_line_end: false,
        };
        sc.recompute_line_flags();
        sc
    }

    fn recompute_line_flags(&mut self) {
        self.at_line_start = self.current_pos == self.doc.line_start(self.current_line);
        let is_last_pos = self.current_pos + 1 >= self.doc.len();
        let next_is_terminator = matches!(self.ch_next, b'\n') || (self.ch_next == b'\r');
        self.at_line_end = match self.ch {
            b'\n' | b'\r' => true,
            _ => is_last_pos && !next_is_terminator,
        };
    }

    /// `true` while the cursor is within the requested range.
    #[inline]
    pub fn more(&self) -> bool {
        self.current_pos < self.end_pos
    }

    /// Read-only access to the underlying document, for lexers that need
    /// to look up line boundaries or styles beyond what the cursor tracks.
    pub fn document(&self) -> &D {
        self.doc
    }

    /// Mutable access to the underlying document, for lexers that write
    /// side-channel state (fold levels, line-state words) that isn't part
    /// of the styled-byte stream `set_state`/`complete` commit.
    pub fn document_mut(&mut self) -> &mut D {
        self.doc
    }

    /// One-past-the-end position of the request, `startPos + length`.
    pub fn end_pos(&self) -> usize {
        self.end_pos
    }

    pub fn forward(&mut self) {
        self.forward_bytes(1);
    }

    pub fn forward_bytes(&mut self, n: usize) {
        for _ in 0..n {
            if !self.more() {
                break;
            }
            if self.ch == b'\n' || (self.ch == b'\r' && self.ch_next != b'\n') {
                self.current_line += 1;
            }
            self.current_pos += 1;
            self.ch = self.doc.char_at(self.current_pos);
            self.ch_next = self.doc.char_at(self.current_pos + 1);
            self.ch_prev = self.doc.char_at(self.current_pos.wrapping_sub(1));
            self.recompute_line_flags();
        }
    }

    /// Byte at `current_pos + offset` (offset may be negative), `0` if out
    /// of range (spec.md C4 `GetRelative`).
    pub fn get_relative(&self, offset: isize) -> u8 {
        let pos = self.current_pos as isize + offset;
        if pos < 0 {
            0
        } else {
            self.doc.char_at(pos as usize)
        }
    }

    pub fn match1(&self, c1: u8) -> bool {
        self.ch == c1
    }

    pub fn match2(&self, c1: u8, c2: u8) -> bool {
        self.ch == c1 && self.ch_next == c2
    }

    pub fn match_literal(&self, literal: &[u8]) -> bool {
        self.doc.matches(self.current_pos, literal)
    }

    /// Commit the in-progress segment `[segStart, currentPos)` with the
    /// *old* state, then begin a new segment at `currentPos` with `s`.
    pub fn set_state(&mut self, s: u8) {
        if self.current_pos > self.seg_start {
            self.doc.colour_to(self.current_pos, self.state);
        }
        self.state = s;
        self.seg_start = self.current_pos;
    }

    /// Retroactively relabel the current (uncommitted) segment.
    pub fn change_state(&mut self, s: u8) {
        self.state = s;
    }

    /// Advance one byte, then `set_state`.
    pub fn forward_set_state(&mut self, s: u8) {
        self.forward();
        self.set_state(s);
    }

    /// Bytes of the in-progress (uncommitted) segment.
    pub fn current_bytes(&self) -> Vec<u8> {
        (self.seg_start..self.current_pos).map(|p| self.doc.char_at(p)).collect()
    }

    /// ASCII-lowercased bytes of the in-progress segment.
    pub fn current_lowered(&self) -> Vec<u8> {
        self.current_bytes().into_iter().map(|b| b.to_ascii_lowercase()).collect()
    }

    pub fn current_len(&self) -> usize {
        self.current_pos - self.seg_start
    }

    /// Commit any remaining uncommitted segment up to `end_pos` and flush
    /// the document. Must be called on every exit path of `Lex` (spec.md
    /// §5, "the segment is guaranteed released").
    pub fn complete(&mut self) {
        if self.end_pos > self.seg_start {
            self.doc.colour_to(self.end_pos, self.state);
        }
        self.seg_start = self.end_pos;
        self.doc.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_doc::MemoryDocument;

    #[test]
    fn basic_forward_and_commit() {
        let mut doc = MemoryDocument::from_str("ab cd");
        {
            let mut sc = StyleContext::new(&mut doc, 0, 5, 0);
            // "ab" as state 1, space as state 0, "cd" as state 1
            while sc.more() {
                if sc.ch == b' ' {
                    sc.set_state(0);
                    sc.forward();
                    sc.set_state(1);
                } else {
                    sc.forward();
                }
            }
            sc.complete();
        }
        assert_eq!(doc.styles(), &[1, 1, 0, 1, 1]);
    }

    #[test]
    fn change_state_relabels_uncommitted_segment() {
        let mut doc = MemoryDocument::from_str("abc");
        {
            let mut sc = StyleContext::new(&mut doc, 0, 3, 0);
            sc.forward();
            sc.forward();
            sc.change_state(9); // relabel the whole "abc" segment before it's committed
            sc.forward();
            sc.complete();
        }
        assert_eq!(doc.styles(), &[9, 9, 9]);
    }

    #[test]
    fn get_relative_and_match() {
        let mut doc = MemoryDocument::from_str("R\"delim(");
        let sc = StyleContext::new(&mut doc, 0, 8, 0);
        assert!(sc.match2(b'R', b'"'));
        assert_eq!(sc.get_relative(2), b'd');
        assert_eq!(sc.get_relative(-1), 0);
    }

    #[test]
    fn current_bytes_tracks_uncommitted_segment() {
        let mut doc = MemoryDocument::from_str("hello");
        let mut sc = StyleContext::new(&mut doc, 0, 5, 0);
        sc.forward_bytes(3);
        assert_eq!(sc.current_bytes(), b"hel");
        assert_eq!(sc.current_lowered(), b"hel");
    }

    #[test]
    fn at_line_end_and_line_tracking() {
        let mut doc = MemoryDocument::from_str("ab\ncd");
        let mut sc = StyleContext::new(&mut doc, 0, 5, 0);
        assert!(!sc.at_line_end);
        sc.forward_bytes(2);
        assert!(sc.at_line_end); // positioned on '\n'
        sc.forward();
        assert_eq!(sc.current_line, 1);
        assert!(sc.at_line_start);
    }
}

//! Reference in-memory [`Document`] implementation.
//!
//! Backed by a plain `Vec<u8>` rather than a rope: the engine indexes text
//! by byte position (including positions that may fall inside a multi-byte
//! UTF-8 sequence while a lexer is mid-token), which a char-indexed rope
//! cannot address directly. A flat byte buffer is the faithful model for
//! spec.md's "Position is a byte offset" data model.

use crate::{Document, lineindex::LineIndex};

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    bytes: Vec<u8>,
    styles: Vec<u8>,
    fold_levels: Vec<u32>,
    line_states: Vec<u32>,
    lines: LineIndex,
    last_committed: usize,
    pending_relex: Option<(usize, usize)>,
}

impl MemoryDocument {
    pub fn from_str(text: &str) -> Self {
        Self::from_bytes(text.as_bytes().to_vec())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let lines = LineIndex::build(&bytes);
        let n = bytes.len();
        let line_count = lines.line_count();
        Self {
            styles: vec![0u8; n],
            fold_levels: vec![0u32; line_count],
            line_states: vec![0u32; line_count],
            bytes,
            lines,
            last_committed: 0,
            pending_relex: None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn styles(&self) -> &[u8] {
        &self.styles
    }

    /// Drain the most recent `change_lexer_state` request, if any. Used by a
    /// host (here: the CLI) to decide whether to re-invoke `Lex`.
    pub fn take_pending_relex(&mut self) -> Option<(usize, usize)> {
        self.pending_relex.take()
    }

    /// Rebuild the line index and grow the per-line arrays; used by a host
    /// after appending/replacing text. Out of scope for the engine proper
    /// (spec.md treats editing as the host's concern) but kept small here so
    /// the CLI and tests can build documents incrementally.
    pub fn reset_text(&mut self, bytes: Vec<u8>) {
        self.lines = LineIndex::build(&bytes);
        self.styles = vec![0u8; bytes.len()];
        self.fold_levels = vec![0u32; self.lines.line_count()];
        self.line_states = vec![0u32; self.lines.line_count()];
        self.bytes = bytes;
        self.last_committed = 0;
        self.pending_relex = None;
    }
}

impl Document for MemoryDocument {
    fn char_at(&self, pos: usize) -> u8 {
        self.bytes.get(pos).copied().unwrap_or(0)
    }

    fn style_at(&self, pos: usize) -> u8 {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    fn line_start(&self, line: usize) -> usize {
        self.lines.line_start(line)
    }

    fn line_end(&self, line: usize) -> usize {
        self.lines.line_end(line, &self.bytes)
    }

    fn get_line(&self, pos: usize) -> usize {
        self.lines.line_of(pos)
    }

    fn start_styling(&mut self, pos: usize) {
        self.last_committed = pos;
    }

    fn colour_to(&mut self, end_pos: usize, style: u8) {
        let end = end_pos.min(self.styles.len());
        if end > self.last_committed {
            self.styles[self.last_committed..end].fill(style);
        }
        self.last_committed = end_pos;
    }

    fn set_level(&mut self, line: usize, word: u32) {
        if line < self.fold_levels.len() {
            self.fold_levels[line] = word;
        }
    }

    fn get_level(&self, line: usize) -> u32 {
        self.fold_levels.get(line).copied().unwrap_or(0)
    }

    fn set_line_state(&mut self, line: usize, word: u32) {
        if line < self.line_states.len() {
            self.line_states[line] = word;
        }
    }

    fn get_line_state(&self, line: usize) -> u32 {
        self.line_states.get(line).copied().unwrap_or(0)
    }

    fn change_lexer_state(&mut self, start: usize, end: usize) {
        self.pending_relex = Some(match self.pending_relex.take() {
            Some((s, e)) => (s.min(start), e.max(end)),
            None => (start, end),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_to_fills_inclusive_range() {
        let mut doc = MemoryDocument::from_str("abcdef");
        doc.start_styling(0);
        doc.colour_to(3, 7);
        assert_eq!(doc.styles(), &[7, 7, 7, 0, 0, 0]);
    }

    #[test]
    fn out_of_range_reads_are_zero() {
        let doc = MemoryDocument::from_str("ab");
        assert_eq!(doc.char_at(100), 0);
        assert_eq!(doc.style_at(100), 0);
    }

    #[test]
    fn line_state_round_trip() {
        let mut doc = MemoryDocument::from_str("a\nb\nc");
        doc.set_line_state(1, 42);
        assert_eq!(doc.get_line_state(1), 42);
        assert_eq!(doc.get_line_state(0), 0);
    }

    #[test]
    fn change_lexer_state_merges_ranges() {
        let mut doc = MemoryDocument::from_str("abcdef");
        doc.change_lexer_state(2, 4);
        doc.change_lexer_state(1, 3);
        assert_eq!(doc.take_pending_relex(), Some((1, 4)));
        assert_eq!(doc.take_pending_relex(), None);
    }
}

//! The document accessor (spec.md C3): a read-only cursor over host buffer
//! bytes and style bytes, plus write access for style runs, per-line fold
//! levels, and per-line line-state words.
//!
//! The host owns the real buffer; this crate defines the contract
//! ([`Document`]) a lexer drives, and [`MemoryDocument`], a reference
//! in-memory implementation used by the CLI and by every lexer's tests.

pub mod lineindex;
pub mod memory;

pub use memory::MemoryDocument;

/// Read/write contract a lexer drives over one `Lex`/`Fold` call.
///
/// Write calls must be made in order of non-decreasing position (spec.md
/// I5); implementations are free to buffer, but [`Document::flush`] must be
/// called before a `Lex` call returns so that I1 (full style coverage) holds.
pub trait Document {
    /// Byte at `pos`, or `0` if out of `[0, len())`.
    fn char_at(&self, pos: usize) -> u8;
    /// Style code at `pos`, or `0` if out of range.
    fn style_at(&self, pos: usize) -> u8;
    /// One-past-the-end position, `N`.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn line_count(&self) -> usize;
    fn line_start(&self, line: usize) -> usize;
    /// Start of the line's terminator (or `len()`/next line start if none).
    fn line_end(&self, line: usize) -> usize;
    fn get_line(&self, pos: usize) -> usize;

    /// Byte-compare helper: does `literal` occur starting at `pos`?
    fn matches(&self, pos: usize, literal: &[u8]) -> bool {
        literal.iter().enumerate().all(|(i, &b)| self.char_at(pos + i) == b)
    }

    /// Reset the internal "last committed" watermark to `pos`, called once
    /// at the start of a `Lex`/`Fold` call before any `colour_to`.
    fn start_styling(&mut self, pos: usize);

    /// Commit `style` across `[lastCommitted, end_pos)`, then advance the
    /// watermark to `end_pos`.
    fn colour_to(&mut self, end_pos: usize, style: u8);

    /// Flush any buffered trailing style run up to the current watermark.
    /// A no-op for implementations that write eagerly.
    fn flush(&mut self) {}

    fn set_level(&mut self, line: usize, word: u32);
    fn get_level(&self, line: usize) -> u32;

    fn set_line_state(&mut self, line: usize, word: u32);
    fn get_line_state(&self, line: usize) -> u32;

    /// Signal that downstream bytes in `[start, end)` must be re-requested
    /// (e.g. preprocessor conditional greying changed after a `#define`
    /// edit). The host is responsible for scheduling the follow-up `Lex`.
    fn change_lexer_state(&mut self, start: usize, end: usize);
}

/// Lets code written against `D: Document` be called through a `&dyn
/// Document`/`&mut dyn Document` trait object too (e.g. a `Lexer` impl
/// bridging to a generic `lex<D: Document>` free function).
impl Document for dyn Document + '_ {
    fn char_at(&self, pos: usize) -> u8 {
        (**self).char_at(pos)
    }
    fn style_at(&self, pos: usize) -> u8 {
        (**self).style_at(pos)
    }
    fn len(&self) -> usize {
        (**self).len()
    }
    fn line_count(&self) -> usize {
        (**self).line_count()
    }
    fn line_start(&self, line: usize) -> usize {
        (**self).line_start(line)
    }
    fn line_end(&self, line: usize) -> usize {
        (**self).line_end(line)
    }
    fn get_line(&self, pos: usize) -> usize {
        (**self).get_line(pos)
    }
    fn start_styling(&mut self, pos: usize) {
        (**self).start_styling(pos)
    }
    fn colour_to(&mut self, end_pos: usize, style: u8) {
        (**self).colour_to(end_pos, style)
    }
    fn flush(&mut self) {
        (**self).flush()
    }
    fn set_level(&mut self, line: usize, word: u32) {
        (**self).set_level(line, word)
    }
    fn get_level(&self, line: usize) -> u32 {
        (**self).get_level(line)
    }
    fn set_line_state(&mut self, line: usize, word: u32) {
        (**self).set_line_state(line, word)
    }
    fn get_line_state(&self, line: usize) -> u32 {
        (**self).get_line_state(line)
    }
    fn change_lexer_state(&mut self, start: usize, end: usize) {
        (**self).change_lexer_state(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_helper_uses_char_at() {
        let doc = MemoryDocument::from_bytes(b"R\"delim(".to_vec());
        assert!(doc.matches(0, b"R\""));
        assert!(!doc.matches(1, b"R\""));
    }
}

//! A Lua lexer and folder, ported from Scintilla/Lexilla's `LexLua.cxx`.
//!
//! Lua has no cross-call macro table or conditional-compilation state like
//! the C family does (`lexi-cpp`/`lexi-pp`); everything a `Lex` call needs
//! to resume mid-document — the long-bracket equals-count, a pending `\z`
//! whitespace escape, whether the current comment run is a doc-comment —
//! fits in the per-line line-state word, so this crate carries no
//! persistent lexer-instance state at all.

pub mod fold;
pub mod lex;
pub mod options;
pub mod style;

use lexi_doc::Document;
use lexi_engine::{Lexer, LexerModule, LexerRegistry, OptionSet, WordLists};
use options::LuaOptions;

pub struct LuaLexer {
    options: LuaOptions,
    option_set: OptionSet<LuaOptions>,
    words: WordLists,
}

impl Default for LuaLexer {
    fn default() -> Self {
        Self { options: LuaOptions::default(), option_set: options::option_set(), words: WordLists::new(8, true) }
    }
}

impl LuaLexer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Lexer for LuaLexer {
    fn property_names(&self) -> String {
        self.option_set.property_names()
    }

    fn property_type(&self, name: &str) -> i32 {
        self.option_set.property_type(name) as i32
    }

    fn describe_property(&self, name: &str) -> String {
        self.option_set.describe_property(name).to_string()
    }

    fn property_set(&mut self, name: &str, val: &str) -> bool {
        self.option_set.property_set(&mut self.options, name, val)
    }

    fn property_get(&self, name: &str) -> Option<String> {
        self.option_set.property_get(&self.options, name)
    }

    fn describe_word_list_sets(&self) -> String {
        self.option_set.describe_word_list_sets()
    }

    fn word_list_set(&mut self, n: usize, text: &str) -> i64 {
        if self.words.set(n, text) {
            0
        } else {
            -1
        }
    }

    fn lex(&mut self, doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8) {
        lex::lex(doc, start_pos, length, init_style, &self.words);
    }

    fn fold(&mut self, doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8) {
        fold::fold(doc, start_pos, length, init_style, &self.options);
    }
}

pub fn register(registry: &mut LexerRegistry) {
    registry.register(LexerModule { id: 1, name: "lua", factory: || Box::new(LuaLexer::new()) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_doc::MemoryDocument;

    #[test]
    fn lexes_keywords_and_identifiers() {
        let mut lexer = LuaLexer::new();
        lexer.word_list_set(0, "function local end if then");
        let mut doc = MemoryDocument::from_str("local x = 1\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(0), style::WORD); // "local"
        assert_eq!(doc.style_at(6), style::IDENTIFIER); // "x"
    }

    #[test]
    fn long_bracket_string_spans_to_matching_equals_count() {
        let mut lexer = LuaLexer::new();
        let mut doc = MemoryDocument::from_str("[==[\nhello\n]==]\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        let h_pos = doc.bytes().iter().position(|&b| b == b'h').unwrap();
        assert_eq!(doc.style_at(h_pos), style::LITERAL_STRING);
    }

    #[test]
    fn shebang_line_is_a_comment() {
        let mut lexer = LuaLexer::new();
        let mut doc = MemoryDocument::from_str("#!/usr/bin/env lua\nprint(1)\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(0), style::COMMENT_LINE);
    }

    #[test]
    fn folds_function_end_pair() {
        let mut lexer = LuaLexer::new();
        lexer.word_list_set(0, "function end");
        let mut doc = MemoryDocument::from_str("function f()\n  return 1\nend\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        lexer.fold(&mut doc, 0, doc.len(), 0);
        assert!(lexi_state::is_header(doc.get_level(0)));
    }

    #[test]
    fn label_is_recognised() {
        let mut lexer = LuaLexer::new();
        let mut doc = MemoryDocument::from_str("::top::\ngoto top\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(2), style::LABEL);
    }
}

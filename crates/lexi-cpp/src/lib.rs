//! A C-family lexer and folder (C++, C, Java, JavaScript and kin), ported
//! from Scintilla's `LexCPP.cxx`.
//!
//! Preprocessor conditional tracking, macro evaluation, and the expression
//! evaluator's quirky operator-precedence order live in `lexi-pp`; this
//! crate owns the style-byte state machine (`lex.rs`), the fold pass
//! (`fold.rs`), the option table (`options.rs`), and the style constants
//! (`style.rs`).

pub mod fold;
pub mod lex;
pub mod options;
pub mod style;

use lexi_doc::Document;
use lexi_engine::{Lexer, LexerModule, LexerRegistry, OptionSet, WordLists};
use lexi_pp::PPStates;
use options::CppOptions;
use std::collections::HashMap;

/// Word-list slot 4 ("Preprocessor definitions") and slot 5 ("Task marker
/// and error marker keywords") both feed state this lexer keeps across
/// calls, so `word_list_set` has to special-case them instead of just
/// forwarding into `WordLists`.
const SLOT_PREPROCESSOR_DEFINITIONS: usize = 4;

pub struct CppLexer {
    options: CppOptions,
    option_set: OptionSet<CppOptions>,
    words: WordLists,
    state: lex::CppLexState,
}

impl Default for CppLexer {
    fn default() -> Self {
        Self {
            options: CppOptions::default(),
            option_set: options::option_set(),
            words: WordLists::new(6, false),
            state: lex::CppLexState::default(),
        }
    }
}

impl CppLexer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Lexer for CppLexer {
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
        if n == SLOT_PREPROCESSOR_DEFINITIONS {
            let table = lex::parse_seed_definitions(text);
            self.state.initial_table = table;
            self.state.define_history.clear();
            self.words.set(n, text);
            return 0;
        }
        if self.words.set(n, text) {
            0
        } else {
            -1
        }
    }

    fn lex(&mut self, doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8) {
        let outcome = lex::lex(doc, start_pos, length, init_style, &self.options, &self.words, &mut self.state);
        if outcome.definitions_changed {
            doc.change_lexer_state(start_pos, doc.len());
        }
    }

    fn fold(&mut self, doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8) {
        fold::fold(doc, start_pos, length, init_style, &self.options);
    }
}

/// Resets every piece of cross-call state kept between `Lex` invocations,
/// used when a host wants a clean re-lex from the top of the document.
impl CppLexer {
    pub fn reset_state(&mut self) {
        self.state = lex::CppLexState { pp_states: PPStates::default(), define_history: Vec::new(), initial_table: self.state.initial_table.clone(), raw_string_terminators: HashMap::new() };
    }
}

pub fn register(registry: &mut LexerRegistry) {
    registry.register(LexerModule { id: 0, name: "cpp", factory: || Box::new(CppLexer::new()) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_doc::MemoryDocument;

    #[test]
    fn lexes_a_simple_function() {
        let mut lexer = CppLexer::new();
        lexer.word_list_set(0, "int return if");
        let mut doc = MemoryDocument::from_str("int main() {\n  return 0;\n}\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(0), style::WORD); // "int"
        assert_eq!(doc.style_at(4), style::IDENTIFIER); // "main"
    }

    #[test]
    fn folds_braces() {
        let mut lexer = CppLexer::new();
        let mut doc = MemoryDocument::from_str("void f() {\n  int x;\n}\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        lexer.fold(&mut doc, 0, doc.len(), 0);
        assert!(lexi_state::is_header(doc.get_level(0)));
    }

    #[test]
    fn property_round_trips_through_the_lexer_trait() {
        let mut lexer = CppLexer::new();
        assert!(lexer.property_set("fold.comment", "1"));
        assert_eq!(lexer.property_get("fold.comment").as_deref(), Some("1"));
    }

    #[test]
    fn preprocessor_conditional_greys_inactive_branch() {
        let mut lexer = CppLexer::new();
        let mut doc = MemoryDocument::from_str("#if 0\nint x;\n#endif\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(6) & style::ACTIVE_FLAG, style::ACTIVE_FLAG);
    }

    #[test]
    fn define_and_use_changes_definitions_and_requests_relex() {
        let mut lexer = CppLexer::new();
        let mut doc = MemoryDocument::from_str("#define FOO 1\n#if FOO\nint x;\n#endif\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(doc.len() - 8) & style::ACTIVE_FLAG, 0);
    }

    #[test]
    fn word_list_slot_four_seeds_preprocessor_definitions() {
        let mut lexer = CppLexer::new();
        lexer.word_list_set(4, "FOO=1 BAR");
        let mut doc = MemoryDocument::from_str("#if FOO\nint x;\n#endif\n");
        lexer.lex(&mut doc, 0, doc.len(), 0);
        assert_eq!(doc.style_at(doc.len() - 8) & style::ACTIVE_FLAG, 0);
    }
}

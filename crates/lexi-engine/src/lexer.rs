//! The per-language lexer instance contract (spec.md C9).

use lexi_doc::Document;
use lexi_words::WordList;

/// Everything a host needs from a constructed lexer instance. A lexer owns
/// its word lists, options, and any cross-call state (macro tables,
/// per-line fold state) for as long as the host keeps it alive.
pub trait Lexer: Send {
    /// `\n`-joined option names (spec.md §6, "Property names").
    fn property_names(&self) -> String;
    fn property_type(&self, name: &str) -> i32;
    fn describe_property(&self, name: &str) -> String;
    /// Parses and applies `val`; returns whether any styling-relevant
    /// option actually changed.
    fn property_set(&mut self, name: &str, val: &str) -> bool;
    fn property_get(&self, name: &str) -> Option<String>;

    /// `\n`-joined word-list slot labels.
    fn describe_word_list_sets(&self) -> String;
    /// Installs word list `n`'s contents. Returns the first line from which
    /// re-lexing is required, or `-1` if nothing changed.
    fn word_list_set(&mut self, n: usize, text: &str) -> i64;

    fn lex(&mut self, doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8);
    fn fold(&mut self, doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8);

    /// Allocates `count` fresh substyle ids above `primary_style`, or `-1`
    /// if this lexer doesn't support substyling (spec.md §4.9, "Optional
    /// substyle API"). The default is the no-op most lexers want.
    fn allocate_substyles(&mut self, _primary_style: u8, _count: u8) -> i32 {
        -1
    }
    fn free_substyles(&mut self) {}
    fn substyles_start(&self, _primary_style: u8) -> i32 {
        -1
    }
    fn substyles_length(&self, _primary_style: u8) -> i32 {
        0
    }
    /// Resolves a style byte back to its primary style; the identity for a
    /// lexer with no substyles.
    fn primary_style_from_style(&self, style: u8) -> u8 {
        style
    }
    /// Binds a whitespace-separated identifier blob to `substyle`. Returns
    /// `false` for a lexer with no substyles, or an unknown substyle id.
    fn set_identifiers(&mut self, _substyle: u8, _identifiers: &str) -> bool {
        false
    }
}

/// Shared storage most `Lexer` implementations need for their word lists;
/// not part of the trait, but every concrete lexer embeds one.
#[derive(Debug, Default)]
pub struct WordLists {
    pub lists: Vec<WordList>,
}

impl WordLists {
    pub fn new(count: usize, case_sensitive: bool) -> Self {
        Self { lists: (0..count).map(|_| WordList::new(case_sensitive)).collect() }
    }

    pub fn get(&self, n: usize) -> Option<&WordList> {
        self.lists.get(n)
    }

    /// Sets list `n` from a blob; returns whether it actually changed.
    pub fn set(&mut self, n: usize, text: &str) -> bool {
        match self.lists.get_mut(n) {
            Some(list) => list.set_from_blob(text),
            None => false,
        }
    }
}

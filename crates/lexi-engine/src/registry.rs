//! Process-wide lexer module registry (spec.md C8).

use crate::lexer::Lexer;
use std::sync::OnceLock;

/// A factory that constructs a fresh, independently owned lexer instance.
pub type LexerFactory = fn() -> Box<dyn Lexer>;

/// One registered lexer module: a stable numeric id, a stable ASCII name
/// the host looks up by preference, and its factory.
#[derive(Clone, Copy)]
pub struct LexerModule {
    pub id: i32,
    pub name: &'static str,
    pub factory: LexerFactory,
}

/// Append-only table of registered lexer modules. Registration happens
/// once, at catalog-construction time; lookups never mutate it.
#[derive(Default)]
pub struct LexerRegistry {
    modules: Vec<LexerModule>,
}

impl LexerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: LexerModule) {
        self.modules.push(module);
    }

    pub fn by_name(&self, name: &str) -> Option<&LexerModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn by_id(&self, id: i32) -> Option<&LexerModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn create_by_name(&self, name: &str) -> Option<Box<dyn Lexer>> {
        self.by_name(name).map(|m| (m.factory)())
    }

    pub fn create_by_id(&self, id: i32) -> Option<Box<dyn Lexer>> {
        self.by_id(id).map(|m| (m.factory)())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|m| m.name)
    }
}

/// The process-wide catalog every bundled lexer registers itself into.
/// Built once on first access; individual lexer crates each expose a
/// `register(&mut LexerRegistry)` free function that `lexi-cli` calls to
/// populate it, so this crate itself has no compile-time dependency on
/// `lexi-cpp`/`lexi-lua`.
static CATALOG: OnceLock<LexerRegistry> = OnceLock::new();

pub fn catalog_with(build: impl FnOnce(&mut LexerRegistry)) -> &'static LexerRegistry {
    CATALOG.get_or_init(|| {
        let mut registry = LexerRegistry::new();
        build(&mut registry);
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::WordLists;
    use lexi_doc::Document;

    struct StubLexer(WordLists);

    impl Lexer for StubLexer {
        fn property_names(&self) -> String {
            String::new()
        }
        fn property_type(&self, _name: &str) -> i32 {
            0
        }
        fn describe_property(&self, _name: &str) -> String {
            String::new()
        }
        fn property_set(&mut self, _name: &str, _val: &str) -> bool {
            false
        }
        fn property_get(&self, _name: &str) -> Option<String> {
            None
        }
        fn describe_word_list_sets(&self) -> String {
            String::new()
        }
        fn word_list_set(&mut self, _n: usize, _text: &str) -> i64 {
            -1
        }
        fn lex(&mut self, _doc: &mut dyn Document, _start_pos: usize, _length: usize, _init_style: u8) {}
        fn fold(&mut self, _doc: &mut dyn Document, _start_pos: usize, _length: usize, _init_style: u8) {}
    }

    fn make_stub() -> Box<dyn Lexer> {
        Box::new(StubLexer(WordLists::new(1, true)))
    }

    #[test]
    fn lookup_by_name_and_id() {
        let mut registry = LexerRegistry::new();
        registry.register(LexerModule { id: 7, name: "stub", factory: make_stub });
        assert!(registry.by_name("stub").is_some());
        assert!(registry.by_id(7).is_some());
        assert!(registry.by_name("missing").is_none());
    }

    #[test]
    fn create_by_name_returns_independent_instances() {
        let mut registry = LexerRegistry::new();
        registry.register(LexerModule { id: 1, name: "stub", factory: make_stub });
        let a = registry.create_by_name("stub");
        let b = registry.create_by_name("stub");
        assert!(a.is_some());
        assert!(b.is_some());
    }

    #[test]
    fn names_lists_registered_modules() {
        let mut registry = LexerRegistry::new();
        registry.register(LexerModule { id: 1, name: "stub", factory: make_stub });
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["stub"]);
    }
}

//! The macro symbol table and definition-history log (spec.md §3).

use ahash::AHashMap;
use smallvec::SmallVec;

/// Most real macros take 0-4 parameters; this keeps the common case off
/// the heap.
pub type MacroArgs = SmallVec<[String; 4]>;

/// A `#define`d macro. `arguments` is only non-empty for function-like
/// macros invoked as `NAME(a, b)`; a plain value macro has no argument list
/// at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDef {
    pub value: String,
    pub arguments: MacroArgs,
}

impl MacroDef {
    pub fn value(value: impl Into<String>) -> Self {
        Self { value: value.into(), arguments: MacroArgs::new() }
    }

    pub fn function_like(value: impl Into<String>, arguments: impl Into<MacroArgs>) -> Self {
        Self { value: value.into(), arguments: arguments.into() }
    }

    pub fn is_function_like(&self) -> bool {
        !self.arguments.is_empty()
    }
}

/// Map from identifier to its macro definition.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable(AHashMap<String, MacroDef>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn define(&mut self, name: impl Into<String>, def: MacroDef) {
        self.0.insert(name.into(), def);
    }

    pub fn undef(&mut self, name: &str) {
        self.0.remove(name);
    }
}

/// One entry in the definition-history log: a `#define`/`#undef` seen on a
/// given line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PPDefinition {
    pub line: usize,
    pub key: String,
    pub value: String,
    pub arguments: MacroArgs,
    pub is_undef: bool,
}

impl PPDefinition {
    pub fn define(line: usize, key: impl Into<String>, value: impl Into<String>, arguments: impl Into<MacroArgs>) -> Self {
        Self { line, key: key.into(), value: value.into(), arguments: arguments.into(), is_undef: false }
    }

    pub fn undef(line: usize, key: impl Into<String>) -> Self {
        Self { line, key: key.into(), value: String::new(), arguments: MacroArgs::new(), is_undef: true }
    }
}

/// Ordered log of every definition change seen, used to rebuild the symbol
/// table from scratch after an incremental re-lex (spec.md §3,
/// "Definition-history log").
#[derive(Debug, Default, Clone)]
pub struct DefinitionHistory {
    entries: Vec<PPDefinition>,
}

impl DefinitionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PPDefinition) {
        self.entries.push(entry);
    }

    /// Discard entries with `line > start_line - 1`, i.e. keep only entries
    /// strictly before `start_line`, ahead of re-lexing from `start_line`.
    pub fn truncate_for_relex(&mut self, start_line: usize) {
        self.entries.retain(|e| e.line + 1 <= start_line);
    }

    /// Replay surviving entries onto a fresh table, in recorded order.
    pub fn rebuild(&self, initial: &SymbolTable) -> SymbolTable {
        let mut table = initial.clone();
        for e in &self.entries {
            if e.is_undef {
                table.undef(&e.key);
            } else {
                table.define(e.key.clone(), MacroDef::function_like(e.value.clone(), e.arguments.clone()));
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

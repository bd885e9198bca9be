//! The preprocessor cross-cutting pass (spec.md C6): conditional-nesting
//! tracking, a macro/symbol table with a replayable definition-history log,
//! and the `#if`/`#elif` expression evaluator.
//!
//! This crate does not scan C syntax itself -- lexers like `lexi-cpp` drive
//! it by calling [`Preprocessor::start_section`]/[`end_section`] etc. as
//! they recognize directives, and consult [`Preprocessor::is_inactive`] to
//! decide whether to OR the active-flag bit into emitted styles.

mod eval;
mod macros;
mod state;

pub use eval::{evaluate_expression, evaluate_tokens, tokenize};
pub use macros::{DefinitionHistory, MacroDef, PPDefinition, SymbolTable};
pub use state::{LinePPState, PPStates, MAX_LEVEL};

/// Bundles the per-line conditional stack, the live symbol table, and its
/// history log behind one handle a lexer carries across `Lex` invocations.
#[derive(Debug, Default)]
pub struct Preprocessor {
    states: PPStates,
    table: SymbolTable,
    history: DefinitionHistory,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume state as of the start of `line`.
    pub fn state_for_line(&self, line: usize) -> LinePPState {
        self.states.for_line(line)
    }

    pub fn record_state(&mut self, line: usize, state: LinePPState) {
        self.states.add(line, state);
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn define(&mut self, line: usize, key: impl Into<String>, value: impl Into<String>, arguments: Vec<String>) {
        let key = key.into();
        let value = value.into();
        self.table.define(key.clone(), if arguments.is_empty() {
            MacroDef::value(value.clone())
        } else {
            MacroDef::function_like(value.clone(), arguments.clone())
        });
        self.history.push(PPDefinition::define(line, key, value, arguments));
    }

    pub fn undef(&mut self, line: usize, key: &str) {
        self.table.undef(key);
        self.history.push(PPDefinition::undef(line, key));
    }

    pub fn evaluate(&self, expr: &str) -> bool {
        evaluate_expression(expr, &self.table)
    }

    /// Drop everything recorded at or after `start_line` and rebuild the
    /// symbol table by replaying what survives, ahead of resuming a lex at
    /// `start_line` (spec.md §3, "Definition-history log").
    pub fn prepare_for_relex(&mut self, start_line: usize, initial: &SymbolTable) {
        self.states.truncate_from(start_line);
        self.history.truncate_for_relex(start_line);
        self.table = self.history.rebuild(initial);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_evaluate() {
        let mut pp = Preprocessor::new();
        pp.define(0, "DEBUG", "1", vec![]);
        assert!(pp.evaluate("DEBUG"));
        assert!(pp.evaluate("defined(DEBUG)"));
    }

    #[test]
    fn relex_replays_history_and_drops_later_defines() {
        let mut pp = Preprocessor::new();
        pp.define(0, "A", "1", vec![]);
        pp.define(5, "B", "2", vec![]);
        let mut s = LinePPState::default();
        s.start_section(true);
        pp.record_state(0, s);
        pp.prepare_for_relex(3, &SymbolTable::new());
        assert!(pp.symbol_table().contains("A"));
        assert!(!pp.symbol_table().contains("B"));
        assert!(!pp.state_for_line(0).is_inactive()); // truncated back to default
    }

    #[test]
    fn conditional_nesting_round_trip() {
        let mut pp = Preprocessor::new();
        let mut s = pp.state_for_line(1);
        let cond = pp.evaluate("0");
        s.start_section(cond);
        assert!(s.is_inactive());
        pp.record_state(1, s);
        assert!(pp.state_for_line(1).is_inactive());
    }
}

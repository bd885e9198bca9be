//! Lua lexer options (spec.md §4.12), ported from `LexLua.cxx`'s
//! `OptionsLua`.

use lexi_engine::OptionSet;

#[derive(Debug, Clone)]
pub struct LuaOptions {
    pub fold_compact: bool,
}

impl Default for LuaOptions {
    fn default() -> Self {
        Self { fold_compact: true }
    }
}

pub fn option_set() -> OptionSet<LuaOptions> {
    let mut set = OptionSet::new();
    set.define_bool(
        "fold.compact",
        "Mark blank lines as part of the fold",
        |o: &LuaOptions| o.fold_compact,
        |o, v| o.fold_compact = v,
    );
    set.define_word_list_sets(&[
        "Keywords",
        "Basic functions",
        "String, (table) & math functions",
        "(coroutines), I/O & system facilities",
        "user1",
        "user2",
        "user3",
        "user4",
    ]);
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_compact_defaults_on() {
        assert!(LuaOptions::default().fold_compact);
    }

    #[test]
    fn eight_word_list_slots_are_described() {
        let set = option_set();
        assert_eq!(set.describe_word_list_sets().lines().count(), 8);
    }
}

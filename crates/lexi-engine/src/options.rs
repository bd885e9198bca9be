//! Named, typed options and the word-list descriptor set every lexer
//! publishes (spec.md C7).
//!
//! The original reflects into an options struct with pointer-to-member
//! fields; Rust has no pointer-to-member, so each option instead carries a
//! getter/setter closure pair over `T`, which is the idiomatic stand-in and
//! keeps `PropertySet`'s "did the value change" contract intact.

use ahash::AHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Boolean = 0,
    Integer = 1,
    String = 2,
}

struct OptionDef<T> {
    op_type: OptionType,
    description: String,
    get: Box<dyn Fn(&T) -> String + Send + Sync>,
    set: Box<dyn Fn(&mut T, &str) -> bool + Send + Sync>,
}

/// Describes the named options of a lexer's options struct `T`, and the
/// word-list slots it expects to be fed via `WordListSet`.
pub struct OptionSet<T> {
    order: Vec<String>,
    defs: AHashMap<String, OptionDef<T>>,
    word_lists: Vec<String>,
}

impl<T> Default for OptionSet<T> {
    fn default() -> Self {
        Self { order: Vec::new(), defs: AHashMap::new(), word_lists: Vec::new() }
    }
}

impl<T> OptionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn define(&mut self, name: &str, op_type: OptionType, description: &str, def: OptionDef<T>) {
        if !self.defs.contains_key(name) {
            self.order.push(name.to_string());
        }
        let _ = op_type;
        let _ = description;
        self.defs.insert(name.to_string(), def);
    }

    pub fn define_bool(
        &mut self,
        name: &str,
        description: &str,
        get: impl Fn(&T) -> bool + Send + Sync + 'static,
        set: impl Fn(&mut T, bool) + Send + Sync + 'static,
    ) {
        let def = OptionDef {
            op_type: OptionType::Boolean,
            description: description.to_string(),
            get: Box::new(move |t| if get(t) { "1".to_string() } else { "0".to_string() }),
            set: Box::new(move |t, val| {
                let parsed = val.trim().parse::<i64>().unwrap_or(0) != 0;
                let changed = get(t) != parsed;
                set(t, parsed);
                changed
            }),
        };
        self.define(name, OptionType::Boolean, description, def);
    }

    pub fn define_int(
        &mut self,
        name: &str,
        description: &str,
        get: impl Fn(&T) -> i64 + Send + Sync + 'static,
        set: impl Fn(&mut T, i64) + Send + Sync + 'static,
    ) {
        let def = OptionDef {
            op_type: OptionType::Integer,
            description: description.to_string(),
            get: Box::new(move |t| get(t).to_string()),
            set: Box::new(move |t, val| {
                let parsed = val.trim().parse::<i64>().unwrap_or(0);
                let changed = get(t) != parsed;
                set(t, parsed);
                changed
            }),
        };
        self.define(name, OptionType::Integer, description, def);
    }

    pub fn define_string(
        &mut self,
        name: &str,
        description: &str,
        get: impl Fn(&T) -> String + Send + Sync + 'static,
        set: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) {
        let def = OptionDef {
            op_type: OptionType::String,
            description: description.to_string(),
            get: Box::new(move |t| get(t)),
            set: Box::new(move |t, val| {
                let changed = get(t) != val;
                set(t, val);
                changed
            }),
        };
        self.define(name, OptionType::String, description, def);
    }

    pub fn define_word_list_sets(&mut self, descriptions: &[&str]) {
        self.word_lists = descriptions.iter().map(|s| s.to_string()).collect();
    }

    /// `\n`-joined, in definition order (spec.md §6, "Property names").
    pub fn property_names(&self) -> String {
        self.order.join("\n")
    }

    pub fn property_type(&self, name: &str) -> OptionType {
        self.defs.get(name).map(|d| d.op_type).unwrap_or(OptionType::Boolean)
    }

    pub fn describe_property(&self, name: &str) -> &str {
        self.defs.get(name).map(|d| d.description.as_str()).unwrap_or("")
    }

    pub fn describe_word_list_sets(&self) -> String {
        self.word_lists.join("\n")
    }

    /// Parse `val` and write it into `target`, returning whether the value
    /// changed. Unknown names are a no-op returning `false`.
    pub fn property_set(&self, target: &mut T, name: &str, val: &str) -> bool {
        match self.defs.get(name) {
            Some(def) => (def.set)(target, val),
            None => false,
        }
    }

    pub fn property_get(&self, target: &T, name: &str) -> Option<String> {
        self.defs.get(name).map(|def| (def.get)(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestOptions {
        track_preprocessor: bool,
        fold_comment: bool,
        tab_width: i64,
    }

    fn options() -> OptionSet<TestOptions> {
        let mut set = OptionSet::new();
        set.define_bool(
            "track.preprocessor",
            "Track #if state",
            |o: &TestOptions| o.track_preprocessor,
            |o: &mut TestOptions, v| o.track_preprocessor = v,
        );
        set.define_bool(
            "fold.comment",
            "Fold comments",
            |o: &TestOptions| o.fold_comment,
            |o: &mut TestOptions, v| o.fold_comment = v,
        );
        set.define_int(
            "tab.width",
            "Width of a tab",
            |o: &TestOptions| o.tab_width,
            |o: &mut TestOptions, v| o.tab_width = v,
        );
        set.define_word_list_sets(&["Keywords", "Types"]);
        set
    }

    #[test]
    fn set_reports_change_and_writes_field() {
        let set = options();
        let mut opts = TestOptions::default();
        assert!(set.property_set(&mut opts, "track.preprocessor", "1"));
        assert!(opts.track_preprocessor);
        assert!(!set.property_set(&mut opts, "track.preprocessor", "1")); // unchanged
    }

    #[test]
    fn unknown_name_is_a_harmless_noop() {
        let set = options();
        let mut opts = TestOptions::default();
        assert!(!set.property_set(&mut opts, "bogus.name", "1"));
    }

    #[test]
    fn names_preserve_definition_order() {
        let set = options();
        assert_eq!(set.property_names(), "track.preprocessor\nfold.comment\ntab.width");
    }

    #[test]
    fn word_list_descriptions_join_with_newline() {
        let set = options();
        assert_eq!(set.describe_word_list_sets(), "Keywords\nTypes");
    }

    #[test]
    fn integer_option_round_trips() {
        let set = options();
        let mut opts = TestOptions::default();
        set.property_set(&mut opts, "tab.width", "4");
        assert_eq!(opts.tab_width, 4);
        assert_eq!(set.property_get(&opts, "tab.width").as_deref(), Some("4"));
    }
}

//! C-family lexer options (spec.md §4.11), ported from `LexCPP.cxx`'s
//! `OptionsCPP`.

use lexi_engine::OptionSet;

#[derive(Debug, Clone)]
pub struct CppOptions {
    pub fold: bool,
    pub fold_comment: bool,
    pub fold_comment_multiline: bool,
    pub fold_comment_explicit: bool,
    pub fold_explicit_anywhere: bool,
    pub fold_explicit_start: String,
    pub fold_explicit_end: String,
    pub fold_preprocessor: bool,
    pub fold_syntax_based: bool,
    pub fold_at_else: bool,
    pub fold_compact: bool,
    pub case_sensitive: bool,
    pub track_preprocessor: bool,
    pub update_preprocessor: bool,
    pub verbatim_strings_allow_escapes: bool,
    pub triplequoted_strings: bool,
    pub hashquoted_strings: bool,
    pub back_quoted_strings: bool,
    pub escape_sequence: bool,
    pub styling_within_preprocessor: bool,
}

impl Default for CppOptions {
    fn default() -> Self {
        Self {
            fold: true,
            fold_comment: false,
            fold_comment_multiline: true,
            fold_comment_explicit: true,
            fold_explicit_anywhere: false,
            fold_explicit_start: String::new(),
            fold_explicit_end: String::new(),
            fold_preprocessor: false,
            fold_syntax_based: true,
            fold_at_else: false,
            fold_compact: true,
            case_sensitive: false,
            track_preprocessor: true,
            update_preprocessor: true,
            verbatim_strings_allow_escapes: true,
            triplequoted_strings: false,
            hashquoted_strings: false,
            back_quoted_strings: false,
            escape_sequence: false,
            styling_within_preprocessor: false,
        }
    }
}

pub fn option_set() -> OptionSet<CppOptions> {
    let mut set = OptionSet::new();
    set.define_bool("fold", "Enable folding", |o: &CppOptions| o.fold, |o, v| o.fold = v);
    set.define_bool("fold.comment", "Fold multi-line comments", |o: &CppOptions| o.fold_comment, |o, v| o.fold_comment = v);
    set.define_bool(
        "fold.preprocessor",
        "Fold preprocessor #if/#region blocks",
        |o: &CppOptions| o.fold_preprocessor,
        |o, v| o.fold_preprocessor = v,
    );
    set.define_bool(
        "fold.compact",
        "Mark blank lines as part of the fold",
        |o: &CppOptions| o.fold_compact,
        |o, v| o.fold_compact = v,
    );
    set.define_bool(
        "fold.at.else",
        "Place '} else {' at the outer level",
        |o: &CppOptions| o.fold_at_else,
        |o, v| o.fold_at_else = v,
    );
    set.define_bool(
        "lexer.cpp.track.preprocessor",
        "Track #if/#elif/#endif nesting",
        |o: &CppOptions| o.track_preprocessor,
        |o, v| o.track_preprocessor = v,
    );
    set.define_bool(
        "lexer.cpp.update.preprocessor",
        "Update macro table on #define/#undef",
        |o: &CppOptions| o.update_preprocessor,
        |o, v| o.update_preprocessor = v,
    );
    set.define_bool(
        "lexer.cpp.escape.sequence",
        "Highlight escape sequences in strings",
        |o: &CppOptions| o.escape_sequence,
        |o, v| o.escape_sequence = v,
    );
    set.define_bool(
        "lexer.cpp.verbatim.strings.allow.escapes",
        "Allow backslash escapes in @\"...\" strings",
        |o: &CppOptions| o.verbatim_strings_allow_escapes,
        |o, v| o.verbatim_strings_allow_escapes = v,
    );
    set.define_bool(
        "lexer.cpp.triplequoted.strings",
        "Recognise \"\"\"...\"\"\" strings",
        |o: &CppOptions| o.triplequoted_strings,
        |o, v| o.triplequoted_strings = v,
    );
    set.define_bool(
        "lexer.cpp.hashquoted.strings",
        "Recognise #\"...\" strings",
        |o: &CppOptions| o.hashquoted_strings,
        |o, v| o.hashquoted_strings = v,
    );
    set.define_bool(
        "lexer.cpp.backquoted.strings",
        "Recognise `...` raw strings",
        |o: &CppOptions| o.back_quoted_strings,
        |o, v| o.back_quoted_strings = v,
    );
    set.define_word_list_sets(&[
        "Primary keywords and identifiers",
        "Secondary keywords and identifiers",
        "Documentation comment keywords",
        "Global classes and typedefs",
        "Preprocessor definitions",
        "Task marker and error marker keywords",
    ]);
    set
}

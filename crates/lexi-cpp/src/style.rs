//! Style byte constants for the C-family lexer (spec.md §4.11), ported
//! from `LexCPP.cxx`'s `SCE_C_*` enumeration.
//!
//! Bit 6 (`0x40`) is the active flag: it is OR'd into every style while the
//! byte sits inside an inactive `#if` branch (spec.md §3, "Style code").

pub const ACTIVE_FLAG: u8 = 0x40;

pub const DEFAULT: u8 = 0;
pub const COMMENT: u8 = 1;
pub const COMMENT_LINE: u8 = 2;
pub const COMMENT_DOC: u8 = 3;
pub const NUMBER: u8 = 4;
pub const WORD: u8 = 5;
pub const STRING: u8 = 6;
pub const CHARACTER: u8 = 7;
pub const UUID: u8 = 8;
pub const PREPROCESSOR: u8 = 9;
pub const OPERATOR: u8 = 10;
pub const IDENTIFIER: u8 = 11;
pub const STRING_EOL: u8 = 12;
pub const VERBATIM: u8 = 13;
pub const REGEX: u8 = 14;
pub const COMMENT_LINE_DOC: u8 = 15;
pub const WORD2: u8 = 16;
pub const COMMENT_DOC_KEYWORD: u8 = 17;
pub const COMMENT_DOC_KEYWORD_ERROR: u8 = 18;
pub const GLOBAL_CLASS: u8 = 19;
pub const STRING_RAW: u8 = 20;
pub const TRIPLE_VERBATIM: u8 = 21;
pub const HASH_QUOTED_STRING: u8 = 22;
pub const PREPROCESSOR_COMMENT: u8 = 23;
pub const PREPROCESSOR_COMMENT_DOC: u8 = 24;
pub const USER_LITERAL: u8 = 25;
pub const TASK_MARKER: u8 = 26;
pub const ESCAPE_SEQUENCE: u8 = 27;

/// Strips the active flag, for comparisons against the bare state constants.
#[inline]
pub fn mask_active(style: u8) -> u8 {
    style & !ACTIVE_FLAG
}

pub fn is_stream_comment_style(style: u8) -> bool {
    matches!(
        mask_active(style),
        COMMENT | COMMENT_DOC | COMMENT_DOC_KEYWORD | COMMENT_DOC_KEYWORD_ERROR
    )
}

/// Styles that behave like whitespace for the purposes of regex-start
/// lookback (spec.md §4.11, "Regex heuristic").
pub fn is_space_equiv(style: u8) -> bool {
    matches!(
        mask_active(style),
        DEFAULT | COMMENT | COMMENT_LINE | COMMENT_DOC | COMMENT_LINE_DOC | PREPROCESSOR
    )
}

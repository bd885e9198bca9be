//! Style byte constants for the Lua lexer (spec.md §4.12), ported from
//! `LexLua.cxx`'s `SCE_LUA_*` enumeration.

pub const DEFAULT: u8 = 0;
pub const COMMENT: u8 = 1;
pub const COMMENT_LINE: u8 = 2;
pub const COMMENT_DOC: u8 = 3;
pub const NUMBER: u8 = 4;
pub const WORD: u8 = 5;
pub const STRING: u8 = 6;
pub const CHARACTER: u8 = 7;
pub const LITERAL_STRING: u8 = 8;
pub const PREPROCESSOR: u8 = 9;
pub const OPERATOR: u8 = 10;
pub const IDENTIFIER: u8 = 11;
pub const STRING_EOL: u8 = 12;
pub const WORD2: u8 = 13;
pub const WORD3: u8 = 14;
pub const WORD4: u8 = 15;
pub const WORD5: u8 = 16;
pub const WORD6: u8 = 17;
pub const WORD7: u8 = 18;
pub const WORD8: u8 = 19;
pub const LABEL: u8 = 20;

/// Low byte of the line-state word: how many `=` separated the last open
/// `[==[`/`--[==[` delimiter on this line (spec.md §9, private bit layout).
pub const MASK_SEPARATOR: u32 = 0xFF;
/// Set while a `\z` continuation is eating following whitespace inside a
/// short string.
pub const MASK_STRING_WS: u32 = 0x100;
/// Set while the current block comment run began with `---` (a doc-comment).
pub const MASK_DOC_COMMENT: u32 = 0x200;

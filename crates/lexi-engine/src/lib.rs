//! The framework layer binding a document, word lists, options, and the
//! generic lexer loop into the per-language lexer contract (spec.md
//! C7-C10).

pub mod driver;
pub mod lexer;
pub mod options;
pub mod registry;
pub mod substyle;

pub use driver::{backtrack_to_safe_line, init_style_at, sanitize_init_style};
pub use lexer::{Lexer, WordLists};
pub use options::{OptionSet, OptionType};
pub use registry::{catalog_with, LexerFactory, LexerModule, LexerRegistry};
pub use substyle::SubstyleAllocator;

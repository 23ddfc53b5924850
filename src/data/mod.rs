//! Data layer - Static symbol tables
//!
//! This module contains the read-only lookup tables used by the math
//! processor:
//! - Greek letters
//! - Operators, relations and miscellaneous symbols
//! - Superscript and subscript character maps

pub mod scripts;
pub mod symbols;

// Re-export commonly used items
pub use scripts::{
    subscript_char, superscript_char, to_subscript, to_superscript, SUBSCRIPTS, SUPERSCRIPTS,
};
pub use symbols::{
    apply_symbol_table, is_known_command, lookup_greek, lookup_symbol, GREEK_LETTERS,
    MATH_SYMBOLS,
};

//! Core rendering pipeline
//!
//! Data flows one way:
//! content → `blocks` (per line) → `tokenizer` (math spans) → `emphasis`
//! (per text span), with `math` called wherever a math span is produced.
//! `tree` holds the output node types.

pub mod blocks;
pub mod emphasis;
pub mod math;
pub mod options;
pub mod tokenizer;
pub mod tree;

pub use blocks::{parse_blocks, parse_blocks_with_options};
pub use emphasis::{parse_emphasis, Style, StyledRun};
pub use math::{process_math, process_math_with_options, MathProcessor};
pub use options::RenderOptions;
pub use tokenizer::{tokenize, tokenize_with_options, MathDelimiter, Token, TokenKind};
pub use tree::{
    build_runs, render_inline, render_inline_with_options, to_plain_text, Block, BlockKind,
    MathRun, Run,
};

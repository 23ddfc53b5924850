//! # notemark
//!
//! Markdown + LaTeX math rendering engine for AI-generated notes.
//!
//! Content arrives as Markdown prose with math embedded between `$..$`,
//! `$$..$$`, `\(..\)` or `\[..\]`. It leaves as a UI-agnostic render tree:
//! a list of [`Block`]s, each holding styled text and math [`Run`]s, with
//! every math fragment converted to readable Unicode (`\frac{a}{b}` →
//! `(a)/(b)`, `x^2` → `x²`, `\alpha` → `α`).
//!
//! ## Features
//!
//! - **Total**: every input renders; malformed markup degrades to text
//! - **Block structure**: headers, lists, task items, quotes, rules, fenced code
//! - **Inline emphasis**: bold, italic, bold-italic, code, strikethrough
//! - **Math**: fractions, roots, scripts, Greek letters, 250+ symbols
//! - **WASM Support**: compiles to WebAssembly for the app's web view
//!
//! ## Usage Examples
//!
//! ### Documents
//!
//! ```rust
//! use notemark::{render_block, BlockKind};
//!
//! let blocks = render_block("# Circle\n\n- Area: $\\pi r^2$");
//! assert_eq!(blocks[0].kind, BlockKind::Header { level: 1 });
//! assert_eq!(blocks[2].text(), "Area: πr²");
//! ```
//!
//! ### Math only
//!
//! ```rust
//! use notemark::process_math;
//!
//! assert_eq!(process_math(r"\frac{a}{b}"), "(a)/(b)");
//! assert_eq!(process_math(r"\sum_{i=1}^{n} i"), "∑ᵢ₌₁ⁿ i");
//! ```
//!
//! ### Plain text
//!
//! ```rust
//! use notemark::{render_block, to_plain_text};
//!
//! let text = to_plain_text(&render_block("- [x] **done**"));
//! assert_eq!(text, "☑ done");
//! ```

/// Core rendering pipeline
pub mod core;

/// Data layer - static symbol tables
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the pipeline
pub use core::{
    build_runs, parse_blocks, parse_blocks_with_options, parse_emphasis, process_math,
    process_math_with_options, render_inline, render_inline_with_options, to_plain_text,
    tokenize, tokenize_with_options, Block, BlockKind, MathDelimiter, MathProcessor, MathRun,
    RenderOptions, Run, Style, StyledRun, Token, TokenKind,
};

// Re-export symbol data
pub use data::scripts;
pub use data::symbols;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::diagnostics::{check_content, check_content_with_options};
pub use utils::error::{RenderError, RenderResult};

/// Render a whole document into blocks
///
/// This is the entry point the note view calls with LLM output. It never
/// fails: unrecognized structure becomes paragraphs, unterminated math
/// stays literal text.
///
/// # Arguments
/// * `content` - Markdown with embedded LaTeX math
///
/// # Returns
/// One block per source line, code fences collapsed into a single block
pub fn render_block(content: &str) -> Vec<Block> {
    parse_blocks(content)
}

/// Render a whole document with custom options
pub fn render_block_with_options(content: &str, options: &RenderOptions) -> Vec<Block> {
    parse_blocks_with_options(content, options)
}

/// Render a document straight to plain text
pub fn render_plain_text(content: &str) -> String {
    to_plain_text(&render_block(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_block_basic() {
        let blocks = render_block("# Title\n\n- item1\n- item2");
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].kind, BlockKind::Header { level: 1 });
        assert_eq!(blocks[0].text(), "Title");
        assert_eq!(blocks[1].kind, BlockKind::Empty);
        assert_eq!(blocks[3].text(), "item2");
    }

    #[test]
    fn test_render_inline_basic() {
        let runs = render_inline("plain **bold**");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], Run::Styled(StyledRun::new("bold", Style::Bold)));
    }

    #[test]
    fn test_process_math_basic() {
        assert_eq!(process_math(r"\alpha + \beta"), "α + β");
        assert_eq!(process_math(r"x \leq y"), "x ≤ y");
    }

    #[test]
    fn test_render_with_options() {
        let content = "$$\n\\sqrt{2}\n$$";
        let blocks = render_block_with_options(content, &RenderOptions::document());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "√(2)");
    }

    #[test]
    fn test_render_plain_text() {
        let text = render_plain_text("1. first $x^2$\n---\n> *quote*");
        assert_eq!(text, "1. first x²\n───\n> quote");
    }

    #[test]
    fn test_empty_input() {
        assert!(render_block("").is_empty());
        assert!(render_inline("").is_empty());
        assert_eq!(process_math(""), "");
        assert!(check_content("").is_empty());
    }
}

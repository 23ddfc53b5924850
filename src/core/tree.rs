//! Render tree: UI-agnostic blocks and runs
//!
//! The host layer maps each [`BlockKind`] and [`Run`] to its own view
//! primitives; nothing here knows about fonts, colors or layout.

use std::fmt::Write;

use super::emphasis::{parse_emphasis, StyledRun};
use super::options::RenderOptions;
use super::tokenizer::{tokenize_with_options, TokenKind};

/// A rendered math span
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathRun {
    /// LaTeX source, delimiters stripped
    pub raw: String,
    /// Unicode rendering
    pub text: String,
    /// True for `$$..$$` / `\[..\]`
    pub display: bool,
}

/// An inline child of a block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Run {
    Styled(StyledRun),
    Math(MathRun),
}

impl Run {
    /// Text the run displays
    pub fn text(&self) -> &str {
        match self {
            Run::Styled(run) => &run.text,
            Run::Math(run) => &run.text,
        }
    }
}

/// Structural kind of a block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BlockKind {
    /// `#` through `######`
    Header { level: u8 },
    Paragraph,
    Blockquote,
    BulletItem,
    NumberedItem { index: u64 },
    TaskItem { checked: bool },
    /// Fenced code; the language tag is kept but not interpreted
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    HorizontalRule,
    Empty,
}

impl BlockKind {
    /// Whether blocks of this kind carry inline children
    pub fn has_inline(&self) -> bool {
        !matches!(
            self,
            BlockKind::CodeBlock { .. } | BlockKind::HorizontalRule | BlockKind::Empty
        )
    }
}

/// One structural unit of a document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub kind: BlockKind,
    /// Leading indentation of the source line in columns (tab = 4)
    pub indent: usize,
    pub inline: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind, indent: usize, inline: Vec<Run>) -> Self {
        Self {
            kind,
            indent,
            inline,
        }
    }

    /// A block without inline children (code, rule, empty)
    pub fn bare(kind: BlockKind, indent: usize) -> Self {
        Self::new(kind, indent, Vec::new())
    }

    /// Concatenated display text of the inline children
    pub fn text(&self) -> String {
        self.inline.iter().map(Run::text).collect()
    }
}

/// Build inline runs for one line of prose: tokenize for math, then split
/// each text token into styled runs.
pub fn build_runs(text: &str, options: &RenderOptions) -> Vec<Run> {
    let mut runs = Vec::new();
    for token in tokenize_with_options(text, options) {
        match token.kind {
            TokenKind::Text => {
                runs.extend(parse_emphasis(&token.raw).into_iter().map(Run::Styled));
            }
            TokenKind::InlineMath | TokenKind::BlockMath => {
                runs.push(Run::Math(MathRun {
                    display: token.kind == TokenKind::BlockMath,
                    text: token.processed.unwrap_or_default(),
                    raw: token.raw,
                }));
            }
        }
    }
    runs
}

/// Render a single line of content without block classification
pub fn render_inline(content: &str) -> Vec<Run> {
    build_runs(content, &RenderOptions::default())
}

/// Render inline content with custom options
pub fn render_inline_with_options(content: &str, options: &RenderOptions) -> Vec<Run> {
    build_runs(content, options)
}

/// Flatten a render tree to readable plain text
///
/// Used where styling is lost anyway: copy to clipboard, share sheets,
/// search indexing.
pub fn to_plain_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let pad = " ".repeat(block.indent);
        match &block.kind {
            BlockKind::Header { .. } | BlockKind::Paragraph => {
                let _ = write!(out, "{}{}", pad, block.text());
            }
            BlockKind::Blockquote => {
                let _ = write!(out, "{}> {}", pad, block.text());
            }
            BlockKind::BulletItem => {
                let _ = write!(out, "{}• {}", pad, block.text());
            }
            BlockKind::NumberedItem { index } => {
                let _ = write!(out, "{}{}. {}", pad, index, block.text());
            }
            BlockKind::TaskItem { checked } => {
                let mark = if *checked { '☑' } else { '☐' };
                let _ = write!(out, "{}{} {}", pad, mark, block.text());
            }
            BlockKind::CodeBlock { lines, .. } => {
                out.push_str(&lines.join("\n"));
            }
            BlockKind::HorizontalRule => {
                let _ = write!(out, "{}───", pad);
            }
            BlockKind::Empty => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emphasis::Style;

    #[test]
    fn test_build_runs_mixed() {
        let runs = render_inline(r"**Area**: $\pi r^2$");
        assert_eq!(
            runs,
            vec![
                Run::Styled(StyledRun::new("Area", Style::Bold)),
                Run::Styled(StyledRun::plain(": ")),
                Run::Math(MathRun {
                    raw: r"\pi r^2".to_string(),
                    text: "πr²".to_string(),
                    display: false,
                }),
            ]
        );
    }

    #[test]
    fn test_emphasis_not_applied_inside_math() {
        let runs = render_inline("$a*b*c$");
        assert_eq!(runs.len(), 1);
        assert!(matches!(&runs[0], Run::Math(m) if m.raw == "a*b*c"));
    }

    #[test]
    fn test_display_flag() {
        let runs = render_inline("$$x$$");
        assert!(matches!(&runs[0], Run::Math(m) if m.display));
    }

    #[test]
    fn test_empty_inline() {
        assert!(render_inline("").is_empty());
    }

    #[test]
    fn test_plain_text() {
        let blocks = vec![
            Block::new(
                BlockKind::Header { level: 1 },
                0,
                vec![Run::Styled(StyledRun::plain("Title"))],
            ),
            Block::bare(BlockKind::Empty, 0),
            Block::new(
                BlockKind::TaskItem { checked: true },
                2,
                vec![Run::Styled(StyledRun::plain("done"))],
            ),
            Block::bare(
                BlockKind::CodeBlock {
                    language: None,
                    lines: vec!["a".into(), "b".into()],
                },
                0,
            ),
        ];
        assert_eq!(to_plain_text(&blocks), "Title\n\n  ☑ done\na\nb");
    }

    #[test]
    fn test_has_inline() {
        assert!(BlockKind::Paragraph.has_inline());
        assert!(!BlockKind::HorizontalRule.has_inline());
        assert!(!BlockKind::Empty.has_inline());
    }
}

//! Line-oriented block parser
//!
//! Content is processed one line at a time. Fenced code switches the parser
//! into a verbatim state until the closing fence; every other line is
//! classified on its own and its text handed to the inline pipeline.
//!
//! Classification precedence for a trimmed line:
//! empty → rule → header → blockquote → numbered → task → bullet → paragraph.
//! A line that almost matches a form (`#Title`, `- [ x]`) simply falls
//! through to the next one.

use lazy_static::lazy_static;
use regex::Regex;

use super::math::MathProcessor;
use super::options::RenderOptions;
use super::tree::{build_runs, Block, BlockKind, MathRun, Run};

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"^(#{1,6})\s+(.*)$").unwrap();
    static ref NUMBERED: Regex = Regex::new(r"^(\d+)\.\s+(.*)$").unwrap();
    static ref TASK: Regex = Regex::new(r"^- \[([ xX])\]\s*(.*)$").unwrap();
}

const FENCE: &str = "```";

/// Parse a document into blocks
///
/// ```rust
/// use notemark::{parse_blocks, BlockKind};
///
/// let blocks = parse_blocks("# Title\n\n- item");
/// assert_eq!(blocks[0].kind, BlockKind::Header { level: 1 });
/// assert_eq!(blocks[2].kind, BlockKind::BulletItem);
/// ```
pub fn parse_blocks(content: &str) -> Vec<Block> {
    parse_blocks_with_options(content, &RenderOptions::default())
}

/// Parse a document into blocks with custom options
pub fn parse_blocks_with_options(content: &str, options: &RenderOptions) -> Vec<Block> {
    let mut parser = BlockParser::new(options);
    for line in content.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

enum State {
    Normal,
    InCodeBlock {
        language: Option<String>,
        lines: Vec<String>,
        indent: usize,
    },
    InDisplayMath {
        close: &'static str,
        lines: Vec<String>,
        indent: usize,
    },
}

struct BlockParser<'a> {
    options: &'a RenderOptions,
    blocks: Vec<Block>,
    state: State,
}

impl<'a> BlockParser<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
            state: State::Normal,
        }
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        match &mut self.state {
            State::InCodeBlock { lines, .. } if !trimmed.starts_with(FENCE) => {
                lines.push(line.to_string());
                return;
            }
            State::InCodeBlock { .. } => {
                self.close_code_block();
                return;
            }
            State::InDisplayMath { close, lines, .. } if trimmed != *close => {
                lines.push(line.to_string());
                return;
            }
            State::InDisplayMath { .. } => {
                self.close_display_math();
                return;
            }
            State::Normal => {}
        }

        let indent = indent_width(line);

        if let Some(rest) = trimmed.strip_prefix(FENCE) {
            let language = Some(rest.trim())
                .filter(|lang| !lang.is_empty())
                .map(str::to_string);
            tracing::trace!(?language, "code fence opened");
            self.state = State::InCodeBlock {
                language,
                lines: Vec::new(),
                indent,
            };
            return;
        }

        if self.options.join_display_math {
            let close = match trimmed {
                "$$" => Some("$$"),
                "\\[" => Some("\\]"),
                _ => None,
            };
            if let Some(close) = close {
                self.state = State::InDisplayMath {
                    close,
                    lines: Vec::new(),
                    indent,
                };
                return;
            }
        }

        let block = self.classify(trimmed, indent);
        self.blocks.push(block);
    }

    fn classify(&self, trimmed: &str, indent: usize) -> Block {
        if trimmed.is_empty() {
            return Block::bare(BlockKind::Empty, indent);
        }

        if matches!(trimmed, "---" | "***" | "___") {
            return Block::bare(BlockKind::HorizontalRule, indent);
        }

        if let Some(caps) = HEADER.captures(trimmed) {
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            let text = caps.get(2).map_or("", |m| m.as_str());
            return self.with_runs(BlockKind::Header { level }, indent, text);
        }

        if let Some(rest) = trimmed.strip_prefix("> ") {
            return self.with_runs(BlockKind::Blockquote, indent, rest);
        }

        if let Some(caps) = NUMBERED.captures(trimmed) {
            let index = caps
                .get(1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(u64::MAX);
            let text = caps.get(2).map_or("", |m| m.as_str());
            return self.with_runs(BlockKind::NumberedItem { index }, indent, text);
        }

        if let Some(caps) = TASK.captures(trimmed) {
            let checked = caps.get(1).is_some_and(|m| m.as_str() != " ");
            let text = caps.get(2).map_or("", |m| m.as_str());
            return self.with_runs(BlockKind::TaskItem { checked }, indent, text);
        }

        if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            return self.with_runs(BlockKind::BulletItem, indent, rest);
        }

        self.with_runs(BlockKind::Paragraph, indent, trimmed)
    }

    fn with_runs(&self, kind: BlockKind, indent: usize, text: &str) -> Block {
        Block::new(kind, indent, build_runs(text.trim(), self.options))
    }

    fn close_code_block(&mut self) {
        if let State::InCodeBlock {
            language,
            lines,
            indent,
        } = std::mem::replace(&mut self.state, State::Normal)
        {
            tracing::trace!(lines = lines.len(), "code fence closed");
            self.blocks
                .push(Block::bare(BlockKind::CodeBlock { language, lines }, indent));
        }
    }

    fn close_display_math(&mut self) {
        if let State::InDisplayMath { lines, indent, .. } =
            std::mem::replace(&mut self.state, State::Normal)
        {
            let raw = lines
                .iter()
                .map(|l| l.trim())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            let text = MathProcessor::new(self.options).process(&raw);
            let run = Run::Math(MathRun {
                raw,
                text,
                display: true,
            });
            self.blocks
                .push(Block::new(BlockKind::Paragraph, indent, vec![run]));
        }
    }

    /// Flush whatever region is still open at end of input
    fn finish(mut self) -> Vec<Block> {
        match self.state {
            State::InCodeBlock { .. } => {
                tracing::debug!("unterminated code fence at end of input");
                self.close_code_block();
            }
            State::InDisplayMath { .. } => {
                tracing::debug!("unterminated display math at end of input");
                self.close_display_math();
            }
            State::Normal => {}
        }
        self.blocks
    }
}

/// Leading indentation in columns, counting a tab as four
fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
        blocks.iter().map(|b| b.kind.clone()).collect()
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_blocks("").is_empty());
    }

    #[test]
    fn test_title_and_list() {
        let blocks = parse_blocks("# Title\n\n- item1\n- item2");
        assert_eq!(
            kinds(&blocks),
            vec![
                BlockKind::Header { level: 1 },
                BlockKind::Empty,
                BlockKind::BulletItem,
                BlockKind::BulletItem,
            ]
        );
        assert_eq!(blocks[0].text(), "Title");
        assert_eq!(blocks[2].text(), "item1");
        assert_eq!(blocks[3].text(), "item2");
    }

    #[test]
    fn test_header_levels() {
        let blocks = parse_blocks("###### six\n####### seven\n#nospace");
        assert_eq!(blocks[0].kind, BlockKind::Header { level: 6 });
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
        assert_eq!(blocks[2].kind, BlockKind::Paragraph);
        assert_eq!(blocks[2].text(), "#nospace");
    }

    #[test]
    fn test_rules() {
        let blocks = parse_blocks("---\n***\n___\n----");
        assert_eq!(blocks[0].kind, BlockKind::HorizontalRule);
        assert_eq!(blocks[1].kind, BlockKind::HorizontalRule);
        assert_eq!(blocks[2].kind, BlockKind::HorizontalRule);
        assert_eq!(blocks[3].kind, BlockKind::Paragraph);
        assert!(blocks[0].inline.is_empty());
    }

    #[test]
    fn test_lists() {
        let blocks = parse_blocks("12. twelve\n- [ ] todo\n- [X] done\n* star\n- [y] odd");
        assert_eq!(blocks[0].kind, BlockKind::NumberedItem { index: 12 });
        assert_eq!(blocks[0].text(), "twelve");
        assert_eq!(blocks[1].kind, BlockKind::TaskItem { checked: false });
        assert_eq!(blocks[1].text(), "todo");
        assert_eq!(blocks[2].kind, BlockKind::TaskItem { checked: true });
        assert_eq!(blocks[3].kind, BlockKind::BulletItem);
        assert_eq!(blocks[4].kind, BlockKind::BulletItem);
        assert_eq!(blocks[4].text(), "[y] odd");
    }

    #[test]
    fn test_blockquote() {
        let blocks = parse_blocks("> quoted *text*\n>tight");
        assert_eq!(blocks[0].kind, BlockKind::Blockquote);
        assert_eq!(blocks[0].text(), "quoted text");
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_code_block() {
        let blocks = parse_blocks("```rust\nlet x = $a$;\n  # not a header\n```\nafter");
        assert_eq!(
            blocks[0].kind,
            BlockKind::CodeBlock {
                language: Some("rust".to_string()),
                lines: vec!["let x = $a$;".to_string(), "  # not a header".to_string()],
            }
        );
        assert!(blocks[0].inline.is_empty());
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_unterminated_code_block_is_flushed() {
        let blocks = parse_blocks("```\nline");
        assert_eq!(
            kinds(&blocks),
            vec![BlockKind::CodeBlock {
                language: None,
                lines: vec!["line".to_string()],
            }]
        );
    }

    #[test]
    fn test_indent() {
        let blocks = parse_blocks("- top\n  - nested\n\t- tabbed");
        assert_eq!(blocks[0].indent, 0);
        assert_eq!(blocks[1].indent, 2);
        assert_eq!(blocks[2].indent, 4);
        assert_eq!(blocks[1].kind, BlockKind::BulletItem);
    }

    #[test]
    fn test_math_in_header() {
        let blocks = parse_blocks(r"## Energy $E = mc^2$");
        assert_eq!(blocks[0].kind, BlockKind::Header { level: 2 });
        assert_eq!(blocks[0].text(), "Energy E = mc²");
    }

    #[test]
    fn test_display_math_joining() {
        let input = "$$\n\\frac{a}{b}\n+ c\n$$\nafter";

        let joined = parse_blocks_with_options(input, &RenderOptions::document());
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].kind, BlockKind::Paragraph);
        assert!(matches!(&joined[0].inline[0], Run::Math(m) if m.display && m.text == "(a)/(b) + c"));

        let plain = parse_blocks(input);
        assert_eq!(plain.len(), 5);
        assert_eq!(plain[0].text(), "$$");
    }

    #[test]
    fn test_crlf() {
        let blocks = parse_blocks("# A\r\n- b\r\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text(), "A");
    }
}

//! Inline tokenizer: splits text into prose and math spans
//!
//! Four delimiter forms are recognized, tried in this order at each
//! position: `$$...$$`, `\[...\]`, `$...$`, `\(...\)`. Everything between
//! matches is emitted verbatim as [`TokenKind::Text`]. A delimiter pair
//! around nothing but whitespace (`$ $`) is left as text.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

use super::math::MathProcessor;
use super::options::RenderOptions;

lazy_static! {
    static ref MATH_DELIMITERS: Regex = Regex::new(
        r"(?s)\$\$(.+?)\$\$|\\\[(.+?)\\\]|\$([^$]+?)\$|\\\((.+?)\\\)"
    )
    .unwrap();
}

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Text,
    InlineMath,
    BlockMath,
}

/// The delimiter pair that produced a math token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathDelimiter {
    /// `$$...$$`
    DoubleDollar,
    /// `\[...\]`
    Bracket,
    /// `$...$`
    Dollar,
    /// `\(...\)`
    Paren,
}

impl MathDelimiter {
    pub fn open(self) -> &'static str {
        match self {
            MathDelimiter::DoubleDollar => "$$",
            MathDelimiter::Bracket => "\\[",
            MathDelimiter::Dollar => "$",
            MathDelimiter::Paren => "\\(",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            MathDelimiter::DoubleDollar => "$$",
            MathDelimiter::Bracket => "\\]",
            MathDelimiter::Dollar => "$",
            MathDelimiter::Paren => "\\)",
        }
    }

    /// Display delimiters produce block math, the others inline math
    pub fn is_display(self) -> bool {
        matches!(self, MathDelimiter::DoubleDollar | MathDelimiter::Bracket)
    }
}

/// A classified span of input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Text tokens: the span verbatim. Math tokens: the inner content,
    /// delimiters stripped and trimmed.
    pub raw: String,
    /// Unicode rendering of `raw`, only set for math tokens
    pub processed: Option<String>,
    /// Delimiter pair, only set for math tokens
    pub delimiter: Option<MathDelimiter>,
    /// Byte range of the whole token in the input, delimiters included
    pub span: Range<usize>,
}

impl Token {
    fn text(input: &str, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::Text,
            raw: input[span.clone()].to_string(),
            processed: None,
            delimiter: None,
            span,
        }
    }

    pub fn is_math(&self) -> bool {
        !matches!(self.kind, TokenKind::Text)
    }

    /// The token's source slice in `input`
    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Split `text` into text and math tokens
///
/// ```rust
/// use notemark::{tokenize, TokenKind};
///
/// let tokens = tokenize(r"The area is $\pi r^2$ square units");
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].kind, TokenKind::InlineMath);
/// assert_eq!(tokens[1].processed.as_deref(), Some("πr²"));
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with_options(text, &RenderOptions::default())
}

/// Split `text` into tokens, processing math under `options`
pub fn tokenize_with_options(text: &str, options: &RenderOptions) -> Vec<Token> {
    let mut tokens = Vec::new();
    if text.is_empty() {
        return tokens;
    }

    let processor = MathProcessor::new(options);
    let mut last = 0;
    for caps in MATH_DELIMITERS.captures_iter(text) {
        let Some((whole, delimiter, inner)) = classify(&caps) else {
            continue;
        };
        // Blank content is not math; the span stays part of the text
        if inner.trim().is_empty() {
            continue;
        }

        if whole.start > last {
            tokens.push(Token::text(text, last..whole.start));
        }

        let raw = inner.trim().to_string();
        let kind = if delimiter.is_display() {
            TokenKind::BlockMath
        } else {
            TokenKind::InlineMath
        };
        tokens.push(Token {
            kind,
            processed: Some(processor.process(&raw)),
            raw,
            delimiter: Some(delimiter),
            span: whole.clone(),
        });
        last = whole.end;
    }

    if last < text.len() {
        tokens.push(Token::text(text, last..text.len()));
    }
    tokens
}

/// Work out which alternative matched
fn classify<'t>(caps: &Captures<'t>) -> Option<(Range<usize>, MathDelimiter, &'t str)> {
    let whole = caps.get(0)?.range();
    let delimiters = [
        MathDelimiter::DoubleDollar,
        MathDelimiter::Bracket,
        MathDelimiter::Dollar,
        MathDelimiter::Paren,
    ];
    delimiters
        .into_iter()
        .enumerate()
        .find_map(|(i, delimiter)| caps.get(i + 1).map(|m| (whole.clone(), delimiter, m.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_plain_text() {
        let tokens = tokenize("no math here");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text]);
        assert_eq!(tokens[0].raw, "no math here");
        assert_eq!(tokens[0].processed, None);
    }

    #[test]
    fn test_inline_dollar() {
        let tokens = tokenize(r"The area is $\pi r^2$ square units");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Text, TokenKind::InlineMath, TokenKind::Text]
        );
        assert_eq!(tokens[0].raw, "The area is ");
        assert_eq!(tokens[1].raw, r"\pi r^2");
        assert_eq!(tokens[1].processed.as_deref(), Some("πr²"));
        assert_eq!(tokens[2].raw, " square units");
    }

    #[test]
    fn test_display_delimiters() {
        let tokens = tokenize(r"$$ x^2 $$ and \[\alpha\]");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::BlockMath, TokenKind::Text, TokenKind::BlockMath]
        );
        assert_eq!(tokens[0].raw, "x^2");
        assert_eq!(tokens[0].delimiter, Some(MathDelimiter::DoubleDollar));
        assert_eq!(tokens[2].processed.as_deref(), Some("α"));
        assert_eq!(tokens[2].delimiter, Some(MathDelimiter::Bracket));
    }

    #[test]
    fn test_paren_inline() {
        let tokens = tokenize(r"see \(x_1\)");
        assert_eq!(tokens[1].kind, TokenKind::InlineMath);
        assert_eq!(tokens[1].delimiter, Some(MathDelimiter::Paren));
        assert_eq!(tokens[1].processed.as_deref(), Some("x₁"));
    }

    #[test]
    fn test_double_dollar_wins_over_single() {
        let tokens = tokenize("$$a$$");
        assert_eq!(kinds(&tokens), vec![TokenKind::BlockMath]);
    }

    #[test]
    fn test_unterminated_dollar_is_text() {
        let tokens = tokenize("costs $5 today");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text]);
        assert_eq!(tokens[0].raw, "costs $5 today");
    }

    #[test]
    fn test_spans_cover_input() {
        let input = r"a $b$ c $$d$$ \(e\) \[f\] g $";
        let tokens = tokenize(input);
        let rebuilt: String = tokens.iter().map(|t| t.source(input)).collect();
        assert_eq!(rebuilt, input);
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].span.end, pair[1].span.start);
        }
    }

    #[test]
    fn test_blank_math_is_text() {
        for input in ["$ $", "$$  $$", r"\( \)", r"\[ \]"] {
            let tokens = tokenize(input);
            assert_eq!(kinds(&tokens), vec![TokenKind::Text], "for {:?}", input);
            assert_eq!(tokens[0].raw, input);
        }

        let tokens = tokenize("a $  $ b $y$");
        assert_eq!(kinds(&tokens), vec![TokenKind::Text, TokenKind::InlineMath]);
        assert_eq!(tokens[0].raw, "a $  $ b ");
        assert_eq!(tokens[1].raw, "y");
    }
}

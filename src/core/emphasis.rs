//! Markdown inline emphasis
//!
//! Recognizes `***bold italic***`, `**bold**`, `*italic*`, `` `code` `` and
//! `~~strikethrough~~`. Asterisk forms are tried longest first so `***x***`
//! is never read as italic wrapped around bold.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMPHASIS: Regex = Regex::new(
        r"\*\*\*(.+?)\*\*\*|\*\*(.+?)\*\*|\*(.+?)\*|`(.+?)`|~~(.+?)~~"
    )
    .unwrap();
}

/// Inline style of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
    Code,
    Strikethrough,
}

impl Style {
    /// The Markdown delimiter that produces this style
    pub fn delimiter(self) -> &'static str {
        match self {
            Style::Plain => "",
            Style::Bold => "**",
            Style::Italic => "*",
            Style::BoldItalic => "***",
            Style::Code => "`",
            Style::Strikethrough => "~~",
        }
    }
}

/// A span of text with a single style
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledRun {
    pub text: String,
    pub style: Style,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }

    /// The run with its delimiters put back
    pub fn to_markdown(&self) -> String {
        let delimiter = self.style.delimiter();
        format!("{}{}{}", delimiter, self.text, delimiter)
    }
}

/// Split prose into styled runs
///
/// Input without any recognized delimiter comes back as one plain run.
///
/// ```rust
/// use notemark::{parse_emphasis, Style};
///
/// let runs = parse_emphasis("a **bold** move");
/// assert_eq!(runs[1].text, "bold");
/// assert_eq!(runs[1].style, Style::Bold);
/// ```
pub fn parse_emphasis(text: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let styles = [
            Style::BoldItalic,
            Style::Bold,
            Style::Italic,
            Style::Code,
            Style::Strikethrough,
        ];
        let Some((style, inner)) = styles
            .into_iter()
            .enumerate()
            .find_map(|(i, style)| caps.get(i + 1).map(|m| (style, m.as_str())))
        else {
            continue;
        };

        if whole.start() > last {
            runs.push(StyledRun::plain(&text[last..whole.start()]));
        }
        runs.push(StyledRun::new(inner, style));
        last = whole.end();
    }

    if last < text.len() {
        runs.push(StyledRun::plain(&text[last..]));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(runs: &[StyledRun]) -> Vec<Style> {
        runs.iter().map(|r| r.style).collect()
    }

    #[test]
    fn test_plain_only() {
        let runs = parse_emphasis("nothing special");
        assert_eq!(runs, vec![StyledRun::plain("nothing special")]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_emphasis("").is_empty());
    }

    #[test]
    fn test_each_style() {
        let runs = parse_emphasis("***a*** **b** *c* `d` ~~e~~");
        assert_eq!(
            styles(&runs),
            vec![
                Style::BoldItalic,
                Style::Plain,
                Style::Bold,
                Style::Plain,
                Style::Italic,
                Style::Plain,
                Style::Code,
                Style::Plain,
                Style::Strikethrough,
            ]
        );
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", " ", "b", " ", "c", " ", "d", " ", "e"]);
    }

    #[test]
    fn test_unmatched_delimiter_stays_plain() {
        let runs = parse_emphasis("2 * 3 = 6");
        assert_eq!(runs, vec![StyledRun::plain("2 * 3 = 6")]);
    }

    #[test]
    fn test_code_keeps_inner_asterisks() {
        let runs = parse_emphasis("`a*b*c`");
        assert_eq!(runs, vec![StyledRun::new("a*b*c", Style::Code)]);
    }

    #[test]
    fn test_markdown_round_trip() {
        let input = "start **mid** and *end*";
        let rebuilt: String = parse_emphasis(input).iter().map(StyledRun::to_markdown).collect();
        assert_eq!(rebuilt, input);
    }
}

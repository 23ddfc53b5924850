//! Content diagnostics
//!
//! Rendering never fails, but it can degrade: an unclosed `$` shows up as
//! literal text, an unknown command silently disappears. This module
//! reports those spots so generated content can be inspected or regenerated.
//!
//! - Unclosed code fences
//! - Unterminated math delimiters
//! - Unbalanced braces inside math
//! - Math nested deeper than the render limit
//! - LaTeX commands the renderer does not know
//!
//! ## Example
//!
//! ```rust
//! use notemark::diagnostics::check_content;
//!
//! let result = check_content("Cost is $\\frac{1}{2 today");
//! assert!(!result.is_empty());
//! ```

use fxhash::FxHashSet;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::core::options::RenderOptions;
use crate::core::tokenizer::{tokenize_with_options, Token, TokenKind};
use crate::data::symbols::is_known_command;

lazy_static! {
    static ref COMMAND: Regex = Regex::new(r"\\([A-Za-z]+)").unwrap();

    /// Commands handled structurally by the math processor
    static ref STRUCTURAL_COMMANDS: FxHashSet<&'static str> = {
        let mut s = FxHashSet::default();
        s.insert("frac");
        s.insert("dfrac");
        s.insert("tfrac");
        s.insert("cfrac");
        s.insert("sqrt");
        s.insert("binom");
        s.insert("dbinom");
        s.insert("tbinom");
        s
    };
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output will not look like the author intended
    Warning,
    /// Error - structure is broken, output is a best-effort guess
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed, in characters)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// One-line summary, e.g. `1 error, 2 warnings`
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.errors, "error"),
            (self.warnings, "warning"),
            (self.infos, "note"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, noun)| format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" }))
        .collect();

        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check content for spots where rendering will degrade
pub fn check_content(input: &str) -> CheckResult {
    check_content_with_options(input, &RenderOptions::default())
}

/// Check content against custom render limits
pub fn check_content_with_options(input: &str, options: &RenderOptions) -> CheckResult {
    let mut result = CheckResult::default();
    let mut reported_commands = FxHashSet::default();
    let mut open_fence: Option<usize> = None;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().starts_with("```") {
            open_fence = match open_fence {
                Some(_) => None,
                None => Some(line_no),
            };
            continue;
        }
        if open_fence.is_some() {
            continue;
        }

        for token in tokenize_with_options(line, options) {
            match token.kind {
                TokenKind::Text => check_stray_delimiters(line, line_no, &token, &mut result),
                TokenKind::InlineMath | TokenKind::BlockMath => {
                    check_math(line, line_no, &token, options, &mut reported_commands, &mut result)
                }
            }
        }
    }

    if let Some(line) = open_fence {
        result.add(
            Diagnostic::new(DiagnosticLevel::Warning, "code fence is never closed")
                .with_location(line, 1)
                .with_suggestion("Add a closing ``` line; the rest of the content renders as code"),
        );
    }

    result
}

/// Column (1-indexed, in characters) of byte `offset` within `line`
fn column_of(line: &str, offset: usize) -> usize {
    line.get(..offset).map_or(1, |prefix| prefix.chars().count() + 1)
}

/// Report math openers left over in a text token
fn check_stray_delimiters(line: &str, line_no: usize, token: &Token, result: &mut CheckResult) {
    let openers = ["$$", "\\[", "\\(", "$"];
    let Some((offset, opener)) = openers
        .iter()
        .filter_map(|op| token.raw.find(op).map(|pos| (pos, *op)))
        .min_by_key(|(pos, _)| *pos)
    else {
        return;
    };

    let column = column_of(line, token.span.start + offset);
    result.add(
        Diagnostic::new(
            DiagnosticLevel::Warning,
            format!("math delimiter '{}' renders as literal text", opener),
        )
        .with_location(line_no, column)
        .with_source(line.trim())
        .with_suggestion("Close the delimiter around non-empty math, or escape it"),
    );
}

/// Report problems inside one math token
fn check_math(
    line: &str,
    line_no: usize,
    token: &Token,
    options: &RenderOptions,
    reported: &mut FxHashSet<String>,
    result: &mut CheckResult,
) {
    let column = column_of(line, token.span.start);
    let (depth, balance) = brace_profile(&token.raw);

    if balance != 0 {
        let message = if balance > 0 {
            format!("{} unclosed brace{} in math", balance, if balance == 1 { "" } else { "s" })
        } else {
            "unmatched closing brace '}' in math".to_string()
        };
        result.add(
            Diagnostic::new(DiagnosticLevel::Error, message)
                .with_location(line_no, column)
                .with_source(token.source(line)),
        );
    }

    if depth > options.max_math_depth {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Warning,
                format!(
                    "math nested {} levels deep exceeds the limit of {}",
                    depth, options.max_math_depth
                ),
            )
            .with_location(line_no, column)
            .with_suggestion("Inner levels render flattened"),
        );
    }

    for caps in COMMAND.captures_iter(&token.raw) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let takes_group = token.raw[whole.end()..].trim_start().starts_with('{');
        if takes_group || is_known_command(name) || STRUCTURAL_COMMANDS.contains(name) {
            continue;
        }
        if reported.insert(name.to_string()) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("unknown command '\\{}' will be dropped", name),
                )
                .with_location(line_no, column)
                .with_source(token.source(line)),
            );
        }
    }
}

/// Maximum brace nesting depth and final balance, skipping escaped braces
fn brace_profile(latex: &str) -> (usize, i64) {
    let mut depth = 0i64;
    let mut max_depth = 0i64;
    let mut went_negative = false;
    let mut chars = latex.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            '}' => {
                depth -= 1;
                if depth < 0 {
                    went_negative = true;
                    depth = 0;
                }
            }
            _ => {}
        }
    }

    let balance = if went_negative && depth == 0 { -1 } else { depth };
    (max_depth as usize, balance)
}

const RESET: &str = "\x1b[0m";

fn level_color(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "\x1b[31m",
        DiagnosticLevel::Warning => "\x1b[33m",
        DiagnosticLevel::Info => "\x1b[34m",
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let paint = |color: &str, text: String| {
        if use_color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text
        }
    };

    let mut output = String::new();
    for diag in &result.diagnostics {
        output.push_str(&paint(level_color(diag.level), diag.to_string()));
        output.push_str("\n\n");
    }

    let summary_color = if result.has_errors() {
        level_color(DiagnosticLevel::Error)
    } else if result.warnings > 0 {
        level_color(DiagnosticLevel::Warning)
    } else {
        "\x1b[32m"
    };
    output.push_str(&paint(summary_color, format!("Summary: {}", result.summary())));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_content() {
        let result = check_content("# Notes\n\nThe area is $\\pi r^2$.\n");
        assert!(result.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_unclosed_fence() {
        let result = check_content("text\n```python\nprint(1)");
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].line, Some(2));
    }

    #[test]
    fn test_code_is_not_checked() {
        let result = check_content("```\n$ \\unknown {\n```");
        assert!(result.is_empty());
    }

    #[test]
    fn test_unterminated_dollar() {
        let result = check_content("price $5");
        assert_eq!(result.warnings, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.column, Some(7));
        assert!(diag.message.contains("'$'"));
    }

    #[test]
    fn test_unbalanced_braces() {
        let result = check_content(r"$\frac{1}{2$");
        assert!(result.has_errors());

        let result = check_content(r"$a}$");
        assert!(result.has_errors());

        let result = check_content(r"$\{a$");
        assert!(!result.has_errors());
    }

    #[test]
    fn test_deep_nesting() {
        let opts = RenderOptions::default().with_max_math_depth(1);
        let result = check_content_with_options(r"$x^{a^{b^{c}}}$", &opts);
        assert_eq!(result.warnings, 1);
    }

    #[test]
    fn test_unknown_command_reported_once() {
        let result = check_content("$\\foo x$ and $\\foo y$ and $\\mathbb{R}$");
        assert_eq!(result.infos, 1);
        assert!(result.diagnostics[0].message.contains("\\foo"));
    }

    #[test]
    fn test_blank_math_is_reported() {
        let result = check_content("empty $ $ here");
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].column, Some(7));
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::default();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Info, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Info, "test"));

        assert_eq!(result.summary(), "1 error, 1 warning, 2 notes");
        assert_eq!(CheckResult::default().summary(), "no issues found");
    }

    #[test]
    fn test_format_with_color() {
        let result = check_content(r"$a}$");
        let text = format_diagnostics(&result, true);
        assert!(text.starts_with("\x1b[31merror:"));
        assert!(text.ends_with("Summary: 1 error\x1b[0m"));
    }

    #[test]
    fn test_format_without_color() {
        let result = check_content("price $5");
        let text = format_diagnostics(&result, false);
        assert!(text.contains("warning: math delimiter"));
        assert!(text.ends_with("Summary: 1 warning"));
        assert!(!text.contains('\x1b'));
    }
}

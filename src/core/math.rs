//! LaTeX math → Unicode approximation
//!
//! The processor runs a fixed sequence of passes over the fragment. Order
//! matters: structural constructs are expanded first (recursing into their
//! arguments), then names are substituted, then whatever LaTeX is left is
//! stripped.
//!
//! 1. `\frac{A}{B}` → `(A)/(B)`, `\binom{n}{k}` → `C(n,k)`
//! 2. `\sqrt[n]{x}` → `ⁿ√(x)`, `\sqrt{x}` → `√(x)`
//! 3. `^{..}` / `_{..}` → script forms of the processed content
//! 4. `^c` / `_c` → script form of a single character
//! 5. Greek letters, matched as whole control words
//! 6. Operators and symbols, each control word looked up whole
//! 7. `\command{content}` → `content`
//! 8. Strip leftover commands and backslashes, collapse whitespace
//!
//! No backslash survives pass 8, so running the processor on its own
//! output is a no-op.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Write;

use crate::data::scripts::{subscript_char, superscript_char, to_subscript, to_superscript};
use crate::data::symbols::{apply_symbol_table, lookup_greek};

use super::options::RenderOptions;

lazy_static! {
    static ref FRAC_COMMAND: Regex =
        Regex::new(r"\\(?:[dtc]?frac|[dt]?binom)[A-Za-z]*").unwrap();
    static ref SQRT_COMMAND: Regex = Regex::new(r"\\sqrt[A-Za-z]*").unwrap();
    static ref CONTROL_WORD: Regex = Regex::new(r"\\([A-Za-z]+)(\s*)").unwrap();
    static ref COMMAND_WITH_GROUP: Regex = Regex::new(r"\\[A-Za-z]+\*?\s*\{").unwrap();
    static ref BARE_COMMAND: Regex = Regex::new(r"\\[A-Za-z]+").unwrap();
    static ref SCRIPT_MARKER: Regex = Regex::new(r"[\^_]+([{A-Za-z0-9])").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Convert a LaTeX math fragment to its Unicode approximation
///
/// Total: never panics, returns `""` for empty input.
///
/// ```rust
/// use notemark::process_math;
///
/// assert_eq!(process_math(r"\frac{1}{2}"), "(1)/(2)");
/// assert_eq!(process_math("x^{2}+y_{n}"), "x²+yₙ");
/// ```
pub fn process_math(latex: &str) -> String {
    MathProcessor::new(&RenderOptions::default()).process(latex)
}

/// Convert a LaTeX math fragment with custom limits
pub fn process_math_with_options(latex: &str, options: &RenderOptions) -> String {
    MathProcessor::new(options).process(latex)
}

/// Runs the math passes under a set of [`RenderOptions`] limits
#[derive(Debug, Clone, Copy)]
pub struct MathProcessor<'a> {
    options: &'a RenderOptions,
}

impl<'a> MathProcessor<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Process a fragment from the top level
    pub fn process(&self, latex: &str) -> String {
        self.process_at(latex, 0)
    }

    fn process_at(&self, latex: &str, depth: usize) -> String {
        if latex.trim().is_empty() {
            return String::new();
        }

        let mut s = latex.to_string();
        if depth <= self.options.max_math_depth && latex.len() <= self.options.max_math_len {
            s = self.replace_fractions(&s, depth);
            s = self.replace_roots(&s, depth);
            s = self.replace_braced_scripts(&s, depth);
            s = replace_single_scripts(&s);
        } else {
            tracing::debug!(
                depth,
                len = latex.len(),
                "math limit reached, skipping structural passes"
            );
        }

        s = replace_greek(&s);
        s = apply_symbol_table(&s);
        s = self.collapse_commands(&s, depth);
        cleanup(&s)
    }

    /// Pass 1: `\frac{A}{B}` (and `\dfrac`, `\tfrac`, `\cfrac`), plus the
    /// two-argument `\binom{n}{k}` → `C(n,k)`
    fn replace_fractions(&self, input: &str, depth: usize) -> String {
        if !input.contains("frac") && !input.contains("binom") {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(m) = FRAC_COMMAND.find(rest) {
            out.push_str(&rest[..m.start()]);

            let binom = m.as_str().ends_with("binom");
            let args = if binom || m.as_str().ends_with("frac") {
                read_argument(rest, m.end()).and_then(|(num, next)| {
                    read_argument(rest, next).map(|(den, end)| (num, den, end))
                })
            } else {
                None
            };

            match args {
                Some((num, den, end)) => {
                    let num = self.process_at(num, depth + 1);
                    let den = self.process_at(den, depth + 1);
                    if binom {
                        let _ = write!(out, "C({},{})", num, den);
                    } else {
                        let _ = write!(out, "({})/({})", num, den);
                    }
                    rest = &rest[end..];
                }
                None => {
                    out.push_str(m.as_str());
                    rest = &rest[m.end()..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Pass 2: `\sqrt[n]{x}` and `\sqrt{x}`
    fn replace_roots(&self, input: &str, depth: usize) -> String {
        if !input.contains("\\sqrt") {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(m) = SQRT_COMMAND.find(rest) {
            out.push_str(&rest[..m.start()]);

            let root = if m.as_str() == "\\sqrt" {
                let (index, pos) = read_root_index(rest, m.end());
                read_argument(rest, pos).map(|(radicand, end)| (index, radicand, end))
            } else {
                None
            };

            match root {
                Some((index, radicand, end)) => {
                    let _ = write!(
                        out,
                        "{}√({})",
                        to_superscript(index),
                        self.process_at(radicand, depth + 1)
                    );
                    rest = &rest[end..];
                }
                None => {
                    out.push_str(m.as_str());
                    rest = &rest[m.end()..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Pass 3: `^{..}`, `_{..}`, and scripts whose argument is a command
    fn replace_braced_scripts(&self, input: &str, depth: usize) -> String {
        let bytes = input.as_bytes();
        let mut out = String::with_capacity(input.len());
        let mut last = 0;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            if b == b'\\' {
                // Escaped character, e.g. `\_`
                i += 2;
                continue;
            }

            let is_script = (b == b'^' || b == b'_')
                && matches!(bytes.get(i + 1), Some(b'{') | Some(b'\\'));
            if is_script {
                if let Some((content, end)) = read_argument(input, i + 1) {
                    out.push_str(&input[last..i]);
                    let inner = self.process_at(content, depth + 1);
                    if b == b'^' {
                        out.push_str(&to_superscript(&inner));
                    } else {
                        out.push_str(&to_subscript(&inner));
                    }
                    i = end;
                    last = end;
                    continue;
                }
            }
            i += 1;
        }

        out.push_str(&input[last..]);
        out
    }

    /// Pass 7: `\command{content}` → `content`, innermost commands included
    fn collapse_commands(&self, input: &str, depth: usize) -> String {
        if !input.contains('\\') {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(m) = COMMAND_WITH_GROUP.find(rest) {
            out.push_str(&rest[..m.start()]);
            let (content, end) = read_group(rest, m.end() - 1);
            if depth <= self.options.max_math_depth {
                out.push_str(&self.collapse_commands(content, depth + 1));
            } else {
                out.push_str(content);
            }
            rest = &rest[end..];
        }
        out.push_str(rest);
        out
    }
}

/// Pass 4: `^c` / `_c` for a single ASCII alphanumeric `c`
fn replace_single_scripts(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '^' | '_' => match chars.peek() {
                Some(&next) if next.is_ascii_alphanumeric() => {
                    chars.next();
                    out.push(if c == '^' {
                        superscript_char(next)
                    } else {
                        subscript_char(next)
                    });
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Pass 5: Greek letters.
///
/// The whole control word is looked up, so `\alphaX` is left alone. Spaces
/// after a letter are dropped when an alphanumeric follows (`\pi r` → `πr`).
fn replace_greek(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in CONTROL_WORD.captures_iter(input) {
        let (Some(whole), Some(name), Some(space)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let Some(letter) = lookup_greek(name.as_str()) else {
            continue;
        };

        out.push_str(&input[last..whole.start()]);
        out.push_str(letter);
        let next = input[whole.end()..].chars().next();
        if !next.is_some_and(char::is_alphanumeric) {
            out.push_str(space.as_str());
        }
        last = whole.end();
    }
    out.push_str(&input[last..]);
    out
}

/// Pass 8: strip what LaTeX is left and normalize whitespace
fn cleanup(input: &str) -> String {
    let s = BARE_COMMAND.replace_all(input, "");
    let s = s.replace('\\', "");
    let s = SCRIPT_MARKER.replace_all(&s, "$1");
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}

/// Read a brace group starting at `open` (which must hold `{`).
///
/// Returns the inner content and the index just past the closing brace.
/// An unterminated group yields empty content and consumes the rest of the
/// input.
pub(crate) fn read_group(s: &str, open: usize) -> (&str, usize) {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (&s[open + 1..i], i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    ("", s.len())
}

/// Read one macro argument at `pos`: a brace group, a control word, or a
/// single alphanumeric character. Leading whitespace is skipped.
fn read_argument(s: &str, pos: usize) -> Option<(&str, usize)> {
    let after = s.get(pos..)?;
    let trimmed = after.trim_start();
    let start = pos + (after.len() - trimmed.len());

    match trimmed.chars().next()? {
        '{' => Some(read_group(s, start)),
        '\\' => {
            let word = trimmed[1..]
                .bytes()
                .take_while(u8::is_ascii_alphabetic)
                .count();
            let end = if word > 0 {
                start + 1 + word
            } else {
                start + 1 + trimmed[1..].chars().next()?.len_utf8()
            };
            Some((&s[start..end], end))
        }
        c if c.is_alphanumeric() => {
            let end = start + c.len_utf8();
            Some((&s[start..end], end))
        }
        _ => None,
    }
}

/// Read an optional `[n]` root index at `pos`
fn read_root_index(s: &str, pos: usize) -> (&str, usize) {
    let after = &s[pos..];
    let trimmed = after.trim_start();
    if !trimmed.starts_with('[') {
        return ("", pos);
    }

    let open = pos + (after.len() - trimmed.len());
    match s[open..].find(']') {
        Some(close) => (s[open + 1..open + close].trim(), open + close + 1),
        None => ("", s.len()),
    }
}

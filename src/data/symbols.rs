//! LaTeX command → Unicode symbol tables
//!
//! Two tables live here: the Greek alphabet, keyed by bare command name, and
//! the operator/relation/symbol table keyed by the full backslash command.
//! Both are built once and never mutated, so they can be read from any
//! thread without locking.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Greek letters, keyed by command name without the leading backslash.
///
/// Lookups are whole-word: `alpha` matches, `alphabet` does not.
pub static GREEK_LETTERS: phf::Map<&'static str, &'static str> = phf_map! {
    // Lowercase
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ϵ",
    "varepsilon" => "ε",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "vartheta" => "ϑ",
    "iota" => "ι",
    "kappa" => "κ",
    "varkappa" => "ϰ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "omicron" => "ο",
    "pi" => "π",
    "varpi" => "ϖ",
    "rho" => "ρ",
    "varrho" => "ϱ",
    "sigma" => "σ",
    "varsigma" => "ς",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "ϕ",
    "varphi" => "φ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",
    "digamma" => "ϝ",

    // Uppercase with distinct glyphs
    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Theta" => "Θ",
    "Lambda" => "Λ",
    "Xi" => "Ξ",
    "Pi" => "Π",
    "Sigma" => "Σ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
    "varGamma" => "Γ",
    "varDelta" => "Δ",
    "varTheta" => "Θ",
    "varLambda" => "Λ",
    "varXi" => "Ξ",
    "varPi" => "Π",
    "varSigma" => "Σ",
    "varUpsilon" => "Υ",
    "varPhi" => "Φ",
    "varPsi" => "Ψ",
    "varOmega" => "Ω",

    // Not real LaTeX, but common in generated text
    "Alpha" => "Α",
    "Beta" => "Β",
    "Epsilon" => "Ε",
    "Zeta" => "Ζ",
    "Eta" => "Η",
    "Iota" => "Ι",
    "Kappa" => "Κ",
    "Mu" => "Μ",
    "Nu" => "Ν",
    "Omicron" => "Ο",
    "Rho" => "Ρ",
    "Tau" => "Τ",
    "Chi" => "Χ",
};

lazy_static! {
    /// A control word (`\alpha`) or a control symbol (`\,`, `\\`)
    static ref CONTROL_SEQUENCE: Regex = Regex::new(r"\\(?:[A-Za-z]+|[^A-Za-z])").unwrap();

    /// Operators, relations, arrows and miscellaneous math symbols.
    ///
    /// Keys include the backslash. Values never contain a backslash or a
    /// script marker, which keeps the math processor idempotent.
    pub static ref MATH_SYMBOLS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();

        // Binary operators
        m.insert("\\times", "×");
        m.insert("\\div", "÷");
        m.insert("\\pm", "±");
        m.insert("\\mp", "∓");
        m.insert("\\cdot", "·");
        m.insert("\\ast", "∗");
        m.insert("\\star", "⋆");
        m.insert("\\circ", "∘");
        m.insert("\\bullet", "•");
        m.insert("\\oplus", "⊕");
        m.insert("\\ominus", "⊖");
        m.insert("\\otimes", "⊗");
        m.insert("\\oslash", "⊘");
        m.insert("\\odot", "⊙");
        m.insert("\\cap", "∩");
        m.insert("\\cup", "∪");
        m.insert("\\setminus", "∖");
        m.insert("\\wedge", "∧");
        m.insert("\\land", "∧");
        m.insert("\\vee", "∨");
        m.insert("\\lor", "∨");
        m.insert("\\dagger", "†");
        m.insert("\\ddagger", "‡");

        // Relations
        m.insert("\\leq", "≤");
        m.insert("\\le", "≤");
        m.insert("\\leqslant", "⩽");
        m.insert("\\geq", "≥");
        m.insert("\\ge", "≥");
        m.insert("\\geqslant", "⩾");
        m.insert("\\lesssim", "≲");
        m.insert("\\gtrsim", "≳");
        m.insert("\\neq", "≠");
        m.insert("\\ne", "≠");
        m.insert("\\approx", "≈");
        m.insert("\\equiv", "≡");
        m.insert("\\sim", "∼");
        m.insert("\\simeq", "≃");
        m.insert("\\cong", "≅");
        m.insert("\\propto", "∝");
        m.insert("\\ll", "≪");
        m.insert("\\gg", "≫");
        m.insert("\\prec", "≺");
        m.insert("\\succ", "≻");
        m.insert("\\perp", "⊥");
        m.insert("\\parallel", "∥");
        m.insert("\\mid", "∣");
        m.insert("\\nmid", "∤");
        m.insert("\\models", "⊨");
        m.insert("\\vdash", "⊢");
        m.insert("\\doteq", "≐");
        m.insert("\\coloneqq", "≔");

        // Sets and logic
        m.insert("\\in", "∈");
        m.insert("\\notin", "∉");
        m.insert("\\ni", "∋");
        m.insert("\\subset", "⊂");
        m.insert("\\subseteq", "⊆");
        m.insert("\\subsetneq", "⊊");
        m.insert("\\supset", "⊃");
        m.insert("\\supseteq", "⊇");
        m.insert("\\emptyset", "∅");
        m.insert("\\varnothing", "∅");
        m.insert("\\forall", "∀");
        m.insert("\\exists", "∃");
        m.insert("\\nexists", "∄");
        m.insert("\\neg", "¬");
        m.insert("\\lnot", "¬");
        m.insert("\\top", "⊤");
        m.insert("\\bot", "⊥");
        m.insert("\\intercal", "ᵀ");
        m.insert("\\therefore", "∴");
        m.insert("\\because", "∵");

        // Arrows
        m.insert("\\to", "→");
        m.insert("\\gets", "←");
        m.insert("\\rightarrow", "→");
        m.insert("\\leftarrow", "←");
        m.insert("\\leftrightarrow", "↔");
        m.insert("\\Rightarrow", "⇒");
        m.insert("\\Leftarrow", "⇐");
        m.insert("\\Leftrightarrow", "⇔");
        m.insert("\\implies", "⟹");
        m.insert("\\impliedby", "⟸");
        m.insert("\\iff", "⟺");
        m.insert("\\longrightarrow", "⟶");
        m.insert("\\longleftarrow", "⟵");
        m.insert("\\Longrightarrow", "⟹");
        m.insert("\\Longleftarrow", "⟸");
        m.insert("\\mapsto", "↦");
        m.insert("\\uparrow", "↑");
        m.insert("\\downarrow", "↓");
        m.insert("\\updownarrow", "↕");
        m.insert("\\nearrow", "↗");
        m.insert("\\searrow", "↘");
        m.insert("\\rightleftharpoons", "⇌");

        // Big operators
        m.insert("\\sum", "∑");
        m.insert("\\prod", "∏");
        m.insert("\\coprod", "∐");
        m.insert("\\int", "∫");
        m.insert("\\iint", "∬");
        m.insert("\\iiint", "∭");
        m.insert("\\oint", "∮");
        m.insert("\\bigcup", "⋃");
        m.insert("\\bigcap", "⋂");
        m.insert("\\bigoplus", "⨁");
        m.insert("\\bigotimes", "⨂");

        // Calculus and misc symbols
        m.insert("\\partial", "∂");
        m.insert("\\nabla", "∇");
        m.insert("\\infty", "∞");
        m.insert("\\aleph", "ℵ");
        m.insert("\\hbar", "ℏ");
        m.insert("\\ell", "ℓ");
        m.insert("\\Re", "ℜ");
        m.insert("\\Im", "ℑ");
        m.insert("\\wp", "℘");
        m.insert("\\prime", "′");
        m.insert("\\angle", "∠");
        m.insert("\\triangle", "△");
        m.insert("\\square", "□");
        m.insert("\\degree", "°");
        m.insert("\\checkmark", "✓");
        m.insert("\\surd", "√");

        // Dots
        m.insert("\\ldots", "…");
        m.insert("\\dots", "…");
        m.insert("\\cdots", "⋯");
        m.insert("\\vdots", "⋮");
        m.insert("\\ddots", "⋱");

        // Delimiters
        m.insert("\\langle", "⟨");
        m.insert("\\rangle", "⟩");
        m.insert("\\lfloor", "⌊");
        m.insert("\\rfloor", "⌋");
        m.insert("\\lceil", "⌈");
        m.insert("\\rceil", "⌉");
        m.insert("\\lvert", "|");
        m.insert("\\rvert", "|");
        m.insert("\\vert", "|");
        m.insert("\\lVert", "‖");
        m.insert("\\rVert", "‖");
        m.insert("\\Vert", "‖");
        m.insert("\\|", "‖");
        m.insert("\\{", "{");
        m.insert("\\}", "}");
        m.insert("\\lbrace", "{");
        m.insert("\\rbrace", "}");

        // Sizing commands render as nothing
        m.insert("\\left", "");
        m.insert("\\right", "");
        m.insert("\\middle", "");
        m.insert("\\big", "");
        m.insert("\\Big", "");
        m.insert("\\bigg", "");
        m.insert("\\Bigg", "");
        m.insert("\\bigl", "");
        m.insert("\\bigr", "");
        m.insert("\\Bigl", "");
        m.insert("\\Bigr", "");
        m.insert("\\displaystyle", "");
        m.insert("\\textstyle", "");
        m.insert("\\limits", "");
        m.insert("\\nolimits", "");

        // Named functions keep their upright names
        m.insert("\\sin", "sin");
        m.insert("\\cos", "cos");
        m.insert("\\tan", "tan");
        m.insert("\\cot", "cot");
        m.insert("\\sec", "sec");
        m.insert("\\csc", "csc");
        m.insert("\\sinh", "sinh");
        m.insert("\\cosh", "cosh");
        m.insert("\\tanh", "tanh");
        m.insert("\\coth", "coth");
        m.insert("\\arcsin", "arcsin");
        m.insert("\\arccos", "arccos");
        m.insert("\\arctan", "arctan");
        m.insert("\\log", "log");
        m.insert("\\ln", "ln");
        m.insert("\\lg", "lg");
        m.insert("\\exp", "exp");
        m.insert("\\lim", "lim");
        m.insert("\\liminf", "lim inf");
        m.insert("\\limsup", "lim sup");
        m.insert("\\sup", "sup");
        m.insert("\\inf", "inf");
        m.insert("\\max", "max");
        m.insert("\\min", "min");
        m.insert("\\arg", "arg");
        m.insert("\\det", "det");
        m.insert("\\deg", "deg");
        m.insert("\\dim", "dim");
        m.insert("\\ker", "ker");
        m.insert("\\gcd", "gcd");
        m.insert("\\Pr", "Pr");
        m.insert("\\bmod", "mod");
        m.insert("\\pmod", "mod");

        // Spacing
        m.insert("\\quad", " ");
        m.insert("\\qquad", " ");
        m.insert("\\,", " ");
        m.insert("\\;", " ");
        m.insert("\\:", " ");
        m.insert("\\ ", " ");
        m.insert("\\!", "");
        m.insert("\\\\", " ");

        // Escaped text characters
        m.insert("\\%", "%");
        m.insert("\\&", "&");
        m.insert("\\#", "#");
        m.insert("\\$", "$");

        m
    };
}

/// Look up a Greek letter by bare command name (`"alpha"`, not `"\alpha"`)
#[inline]
pub fn lookup_greek(name: &str) -> Option<&'static str> {
    GREEK_LETTERS.get(name).copied()
}

/// Look up an operator or symbol by its full backslash command
#[inline]
pub fn lookup_symbol(command: &str) -> Option<&'static str> {
    MATH_SYMBOLS.get(command).copied()
}

/// Check whether a bare command name is covered by either table
pub fn is_known_command(name: &str) -> bool {
    GREEK_LETTERS.contains_key(name) || MATH_SYMBOLS.contains_key(format!("\\{}", name).as_str())
}

/// Replace every control sequence found in [`MATH_SYMBOLS`].
///
/// A control word is read to its last letter before the lookup, so the
/// longest command at each position is the only candidate: `\top` never
/// becomes `→p`, and an unknown `\inner` is left whole for cleanup.
pub fn apply_symbol_table(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    CONTROL_SEQUENCE
        .replace_all(input, |caps: &Captures| {
            let command = &caps[0];
            lookup_symbol(command).unwrap_or(command).to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_lookup() {
        assert_eq!(lookup_greek("alpha"), Some("α"));
        assert_eq!(lookup_greek("Omega"), Some("Ω"));
        assert_eq!(lookup_greek("alphaX"), None);
        assert_eq!(lookup_greek("\\alpha"), None);
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(apply_symbol_table("\\top"), "⊤");
        assert_eq!(apply_symbol_table("\\to"), "→");
        assert_eq!(apply_symbol_table("\\infty"), "∞");
        assert_eq!(apply_symbol_table("\\leq \\left( \\right)"), "≤ ( )");
        assert_eq!(apply_symbol_table("a\\,b \\\\ c"), "a b   c");
    }

    #[test]
    fn test_unknown_word_not_split() {
        assert_eq!(apply_symbol_table("\\inner x"), "\\inner x");
        assert_eq!(apply_symbol_table("\\topology"), "\\topology");
        assert_eq!(apply_symbol_table("\\lesssim \\intercal"), "≲ ᵀ");
        assert_eq!(apply_symbol_table("\\sum₁"), "∑₁");
    }

    #[test]
    fn test_values_are_backslash_free() {
        for (command, symbol) in MATH_SYMBOLS.iter() {
            assert!(!symbol.contains('\\'), "{} maps to a backslash", command);
            assert!(!symbol.contains('^') && !symbol.contains('_'));
        }
        for symbol in GREEK_LETTERS.values() {
            assert!(!symbol.contains('\\'));
        }
    }

    #[test]
    fn test_known_command() {
        assert!(is_known_command("alpha"));
        assert!(is_known_command("sum"));
        assert!(!is_known_command("mathbb"));
    }
}

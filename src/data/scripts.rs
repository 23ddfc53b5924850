//! Unicode superscript and subscript character maps
//!
//! Unicode only has script forms for digits, a handful of operators and a
//! subset of the Latin alphabet. Characters without a script form pass
//! through unchanged.

use phf::phf_map;

/// Superscript forms
pub static SUPERSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '⁰',
    '1' => '¹',
    '2' => '²',
    '3' => '³',
    '4' => '⁴',
    '5' => '⁵',
    '6' => '⁶',
    '7' => '⁷',
    '8' => '⁸',
    '9' => '⁹',
    '+' => '⁺',
    '-' => '⁻',
    '−' => '⁻',
    '=' => '⁼',
    '(' => '⁽',
    ')' => '⁾',
    'a' => 'ᵃ',
    'b' => 'ᵇ',
    'c' => 'ᶜ',
    'd' => 'ᵈ',
    'e' => 'ᵉ',
    'f' => 'ᶠ',
    'g' => 'ᵍ',
    'h' => 'ʰ',
    'i' => 'ⁱ',
    'j' => 'ʲ',
    'k' => 'ᵏ',
    'l' => 'ˡ',
    'm' => 'ᵐ',
    'n' => 'ⁿ',
    'o' => 'ᵒ',
    'p' => 'ᵖ',
    'r' => 'ʳ',
    's' => 'ˢ',
    't' => 'ᵗ',
    'u' => 'ᵘ',
    'v' => 'ᵛ',
    'w' => 'ʷ',
    'x' => 'ˣ',
    'y' => 'ʸ',
    'z' => 'ᶻ',
    'A' => 'ᴬ',
    'B' => 'ᴮ',
    'D' => 'ᴰ',
    'E' => 'ᴱ',
    'G' => 'ᴳ',
    'H' => 'ᴴ',
    'I' => 'ᴵ',
    'J' => 'ᴶ',
    'K' => 'ᴷ',
    'L' => 'ᴸ',
    'M' => 'ᴹ',
    'N' => 'ᴺ',
    'O' => 'ᴼ',
    'P' => 'ᴾ',
    'R' => 'ᴿ',
    'T' => 'ᵀ',
    'U' => 'ᵁ',
    'V' => 'ⱽ',
    'W' => 'ᵂ',
};

/// Subscript forms
pub static SUBSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '₀',
    '1' => '₁',
    '2' => '₂',
    '3' => '₃',
    '4' => '₄',
    '5' => '₅',
    '6' => '₆',
    '7' => '₇',
    '8' => '₈',
    '9' => '₉',
    '+' => '₊',
    '-' => '₋',
    '−' => '₋',
    '=' => '₌',
    '(' => '₍',
    ')' => '₎',
    'a' => 'ₐ',
    'e' => 'ₑ',
    'h' => 'ₕ',
    'i' => 'ᵢ',
    'j' => 'ⱼ',
    'k' => 'ₖ',
    'l' => 'ₗ',
    'm' => 'ₘ',
    'n' => 'ₙ',
    'o' => 'ₒ',
    'p' => 'ₚ',
    'r' => 'ᵣ',
    's' => 'ₛ',
    't' => 'ₜ',
    'u' => 'ᵤ',
    'v' => 'ᵥ',
    'x' => 'ₓ',
};

/// Superscript form of a single character, or the character itself
#[inline]
pub fn superscript_char(c: char) -> char {
    SUPERSCRIPTS.get(&c).copied().unwrap_or(c)
}

/// Subscript form of a single character, or the character itself
#[inline]
pub fn subscript_char(c: char) -> char {
    SUBSCRIPTS.get(&c).copied().unwrap_or(c)
}

/// Map every character of `input` to its superscript form where one exists
pub fn to_superscript(input: &str) -> String {
    input.chars().map(superscript_char).collect()
}

/// Map every character of `input` to its subscript form where one exists
pub fn to_subscript(input: &str) -> String {
    input.chars().map(subscript_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superscript_digits() {
        assert_eq!(to_superscript("2"), "²");
        assert_eq!(to_superscript("n+1"), "ⁿ⁺¹");
        assert_eq!(to_superscript("10"), "¹⁰");
    }

    #[test]
    fn test_subscript_letters() {
        assert_eq!(to_subscript("n"), "ₙ");
        assert_eq!(to_subscript("i=0"), "ᵢ₌₀");
    }

    #[test]
    fn test_unmapped_pass_through() {
        assert_eq!(to_subscript("q"), "q");
        assert_eq!(to_superscript("α"), "α");
        assert_eq!(superscript_char('Q'), 'Q');
    }
}

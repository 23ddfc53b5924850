//! Render options
//!
//! Every public entry point has a `*_with_options` variant taking a
//! [`RenderOptions`]; the plain variants use [`RenderOptions::default`].

/// Options controlling how content is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Maximum nesting depth for fractions, roots and braced scripts.
    /// Deeper constructs are flattened instead of expanded.
    /// Default: 32
    pub max_math_depth: usize,

    /// Math fragments longer than this many bytes skip structural expansion
    /// and only get symbol substitution and cleanup.
    /// Default: 16 KiB
    pub max_math_len: usize,

    /// Join a `$$` / `\[` line, the lines after it and the matching closing
    /// line into a single display-math paragraph.
    /// Default: false
    pub join_display_math: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_math_depth: 32,
            max_math_len: 16 * 1024,
            join_display_math: false,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight limits for short snippets such as chat bubbles
    pub fn chat() -> Self {
        Self {
            max_math_depth: 8,
            max_math_len: 2 * 1024,
            join_display_math: false,
        }
    }

    /// Settings for long generated documents such as lecture summaries
    pub fn document() -> Self {
        Self {
            join_display_math: true,
            ..Self::default()
        }
    }

    /// Override the math nesting limit
    pub fn with_max_math_depth(mut self, depth: usize) -> Self {
        self.max_math_depth = depth;
        self
    }

    /// Override the math fragment length limit
    pub fn with_max_math_len(mut self, len: usize) -> Self {
        self.max_math_len = len;
        self
    }

    /// Enable or disable multi-line display math joining
    pub fn with_join_display_math(mut self, join: bool) -> Self {
        self.join_display_math = join;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let chat = RenderOptions::chat();
        assert!(chat.max_math_depth < RenderOptions::default().max_math_depth);
        assert!(!chat.join_display_math);

        let doc = RenderOptions::document();
        assert!(doc.join_display_math);
        assert_eq!(doc.max_math_depth, 32);
    }

    #[test]
    fn test_builders() {
        let opts = RenderOptions::new()
            .with_max_math_depth(4)
            .with_max_math_len(64)
            .with_join_display_math(true);
        assert_eq!(opts.max_math_depth, 4);
        assert_eq!(opts.max_math_len, 64);
        assert!(opts.join_display_math);
    }
}

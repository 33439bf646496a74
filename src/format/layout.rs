//! Whitespace layout: indentation, separators and statement boundaries

use super::{is_line_terminator, is_whitespace, tokens_fuse};

/// Resolved whitespace settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// One level of indentation
    pub indent_unit: String,
    /// Indentation of the outermost statements
    pub base: String,
    pub newline: String,
    pub space: String,
    pub compact: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::pretty("    ", 0, "\n", " ")
    }
}

impl Layout {
    pub fn pretty(indent_unit: &str, base_level: usize, newline: &str, space: &str) -> Self {
        Layout {
            indent_unit: indent_unit.to_string(),
            base: indent_unit.repeat(base_level),
            newline: newline.to_string(),
            space: space.to_string(),
            compact: false,
        }
    }

    /// All optional whitespace removed
    pub fn compact() -> Self {
        Layout {
            indent_unit: String::new(),
            base: String::new(),
            newline: String::new(),
            space: String::new(),
            compact: true,
        }
    }

    /// A space that survives compaction, for places where tokens would fuse
    pub fn non_empty_space(&self) -> &str {
        if self.space.is_empty() {
            " "
        } else {
            &self.space
        }
    }

    /// Separator to put between two adjacent pieces of output
    ///
    /// Empty pieces and pieces already bordered by whitespace need nothing.
    /// Pieces whose border characters would fuse into one token always get a
    /// space, even in compact layout.
    pub fn separator(&self, left: &str, right: &str) -> &str {
        let (Some(l), Some(r)) = (left.chars().next_back(), right.chars().next()) else {
            return "";
        };
        if tokens_fuse(l, r) {
            self.non_empty_space()
        } else if is_whitespace(l) || is_line_terminator(l) || is_whitespace(r) || is_line_terminator(r) {
            ""
        } else {
            &self.space
        }
    }

    /// Indentation one level deeper than `base`
    pub fn deeper(&self, base: &str) -> String {
        format!("{}{}", base, self.indent_unit)
    }
}

/// Whether a statement starting with `first` would continue an unterminated
/// previous statement
pub fn is_asi_hazard(first: char) -> bool {
    matches!(first, '(' | '[' | '`' | '+' | '-' | '/')
}

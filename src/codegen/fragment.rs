//! Generated text with attached origin marks
//!
//! Every renderer returns a [`Fragment`]: the text it produced plus the
//! positions inside that text where a node with a known source location
//! starts. Fragments are only ever concatenated, so marks stay sorted by
//! offset and the final mapping list comes out in generated order.

use crate::format::is_line_terminator;

/// Where a piece of output came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub source: String,
    /// 0-based line in the original source
    pub line: u32,
    pub column: u32,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mark {
    /// Byte offset into the fragment text
    offset: usize,
    origin: Origin,
}

/// A run of generated text plus the origins of the nodes inside it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    marks: Vec<Mark>,
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment {
            text: text.to_string(),
            marks: Vec::new(),
        }
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment { text, marks: Vec::new() }
    }
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    pub fn ends_with_line_terminator(&self) -> bool {
        self.last_char().is_some_and(is_line_terminator)
    }

    pub fn contains_line_terminator(&self) -> bool {
        self.text.contains(is_line_terminator)
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append another fragment, keeping its marks
    pub fn append(&mut self, other: Fragment) {
        let shift = self.text.len();
        self.text.push_str(&other.text);
        self.marks.extend(other.marks.into_iter().map(|mut m| {
            m.offset += shift;
            m
        }));
    }

    /// Builder form of [`push_str`](Self::push_str)
    pub fn then(mut self, text: &str) -> Self {
        self.push_str(text);
        self
    }

    /// Builder form of [`append`](Self::append)
    pub fn then_fragment(mut self, other: Fragment) -> Self {
        self.append(other);
        self
    }

    /// Put `text` in front, shifting existing marks
    pub fn prepend(self, text: &str) -> Self {
        let mut out = Fragment::from(text);
        out.append(self);
        out
    }

    /// Wrap in parentheses
    pub fn parenthesized(self) -> Self {
        self.prepend("(").then(")")
    }

    /// Drop trailing whitespace and line terminators
    pub fn trim_end(&mut self) {
        let len = self
            .text
            .trim_end_matches(|c: char| c.is_whitespace() || is_line_terminator(c))
            .len();
        self.text.truncate(len);
        self.marks.retain(|m| m.offset <= len);
    }

    /// Remove `suffix` from the end; false when the text does not end with it
    pub fn strip_suffix(&mut self, suffix: &str) -> bool {
        if !self.text.ends_with(suffix) {
            return false;
        }
        let len = self.text.len() - suffix.len();
        self.text.truncate(len);
        self.marks.retain(|m| m.offset <= len);
        true
    }

    /// Mark the start of this fragment as coming from `origin`
    pub fn mapped(mut self, origin: Origin) -> Self {
        self.marks.insert(0, Mark { offset: 0, origin });
        self
    }

    /// Final text and mappings as `(generated line, generated column, origin)`
    ///
    /// Lines are 0-based; columns count UTF-16 code units.
    pub fn finish(self) -> (String, Vec<(u32, u32, Origin)>) {
        let mut positions = Vec::with_capacity(self.marks.len());
        let mut marks = self.marks.into_iter().peekable();
        let mut line = 0u32;
        let mut column = 0u32;
        let mut previous = '\0';

        for (offset, c) in self.text.char_indices() {
            while let Some(mark) = marks.next_if(|m| m.offset <= offset) {
                positions.push((line, column, mark.origin));
            }
            if is_line_terminator(c) {
                if !(c == '\n' && previous == '\r') {
                    line += 1;
                }
                column = 0;
            } else {
                column += c.len_utf16() as u32;
            }
            previous = c;
        }
        for mark in marks {
            positions.push((line, column, mark.origin));
        }
        (self.text, positions)
    }
}

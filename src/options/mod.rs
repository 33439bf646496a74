//! Generation options
//!
//! [`GenerationOptions`] mirrors the option object JS code generators accept,
//! with camelCase keys so a JSON options file deserializes directly:
//!
//! ```
//! use estree_codegen::options::GenerationOptions;
//!
//! let options = GenerationOptions::from_json(r#"{
//!     "format": { "quotes": "double", "semicolons": false },
//!     "indent": { "style": "  " }
//! }"#).unwrap();
//! assert!(!options.format.semicolons);
//! ```
//!
//! Options are resolved once per `generate` call. Values that cannot be
//! defaulted safely are rejected with [`Error::InvalidOption`]; values that can
//! are normalized with a warning.

use crate::error::{Error, Result};
use crate::format::{is_line_terminator, is_whitespace, Layout, QuoteStyle};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default bound on node nesting
pub const DEFAULT_MAX_DEPTH: usize = 2_000;

/// Indentation settings for pretty layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndentOptions {
    /// One indentation unit
    pub style: String,
    /// Number of units the outermost statements are indented by
    pub base: usize,
    /// Accepted for compatibility; comment text is always kept verbatim
    pub adjust_multiline_comment: bool,
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self {
            style: "    ".to_string(),
            base: 0,
            adjust_multiline_comment: false,
        }
    }
}

/// Literal and whitespace formatting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub quotes: QuoteStyle,
    /// Minimal whitespace
    pub compact: bool,
    /// Emit statement-terminating semicolons
    pub semicolons: bool,
    /// Parenthesize `new` callees without arguments (`new Foo()` vs `new Foo`)
    pub parentheses: bool,
    /// Keep non-ASCII characters unescaped in string literals
    pub escapeless: bool,
    pub newline: String,
    pub space: String,
    /// JSON-compatible literal output
    pub json: bool,
    /// Shortest numeric spelling
    pub renumber: bool,
    /// Allow hexadecimal spelling for large integers when renumbering
    pub hexadecimal: bool,
    /// Reuse a literal's `raw` text when it denotes the same value
    pub raw: bool,
    /// Reproduce blank lines between statements from `sourceCode`
    pub preserve_blank_lines: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            quotes: QuoteStyle::Single,
            compact: false,
            semicolons: true,
            parentheses: true,
            escapeless: false,
            newline: "\n".to_string(),
            space: " ".to_string(),
            json: false,
            renumber: false,
            hexadecimal: false,
            raw: false,
            preserve_blank_lines: false,
        }
    }
}

/// `sourceMap` option: `true` to take source names from node `loc.source`,
/// or the name of the single original source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceMapOption {
    Enabled(bool),
    Source(String),
}

/// The full option record of one `generate` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub indent: IndentOptions,
    pub format: FormatOptions,
    /// Re-insert comments supplied alongside the tree
    pub comment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<SourceMapOption>,
    /// Return the code together with the map instead of the map alone
    pub source_map_with_code: bool,
    /// Node field holding pre-rendered text to emit in place of the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbatim: Option<String>,
    /// Emit `directive` fields as directive prologues and protect string
    /// statements that would otherwise be read as directives
    pub directive: bool,
    /// Original source text, for blank-line preservation between comments
    /// and statements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    /// Generated file name recorded in the source map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map_root: Option<String>,
    /// Original source text embedded as `sourcesContent`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_content: Option<String>,
    /// Deepest node nesting accepted before failing
    pub max_depth: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            indent: IndentOptions::default(),
            format: FormatOptions::default(),
            comment: false,
            source_map: None,
            source_map_with_code: false,
            verbatim: None,
            directive: true,
            source_code: None,
            file: None,
            source_map_root: None,
            source_content: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::invalid_option("<options>", e.to_string()))
    }

    /// Compact layout: no indentation, newlines or optional spaces
    pub fn compact() -> Self {
        let mut options = Self::default();
        options.format.compact = true;
        options
    }

    pub fn with_quotes(mut self, quotes: QuoteStyle) -> Self {
        self.format.quotes = quotes;
        self
    }

    pub fn with_semicolons(mut self, semicolons: bool) -> Self {
        self.format.semicolons = semicolons;
        self
    }

    pub fn with_indent(mut self, style: impl Into<String>, base: usize) -> Self {
        self.indent.style = style.into();
        self.indent.base = base;
        self
    }

    pub fn with_comments(mut self, comment: bool) -> Self {
        self.comment = comment;
        self
    }

    /// Enable source maps for a named original source
    pub fn with_source_map(mut self, source: impl Into<String>) -> Self {
        self.source_map = Some(SourceMapOption::Source(source.into()));
        self
    }

    pub fn with_source_map_with_code(mut self, with_code: bool) -> Self {
        self.source_map_with_code = with_code;
        self
    }

    pub fn with_verbatim(mut self, field: impl Into<String>) -> Self {
        self.verbatim = Some(field.into());
        self
    }

    pub fn with_source_code(mut self, source: impl Into<String>) -> Self {
        self.source_code = Some(source.into());
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether a source map was requested
    pub fn source_map_enabled(&self) -> bool {
        !matches!(self.source_map, None | Some(SourceMapOption::Enabled(false)))
    }

    /// Explicit original source name, when the option names one
    pub fn source_name(&self) -> Option<&str> {
        match &self.source_map {
            Some(SourceMapOption::Source(name)) => Some(name),
            _ => None,
        }
    }

    /// Validate and normalize for one generation run
    pub fn resolve(&self) -> Result<GenerationOptions> {
        let mut resolved = self.clone();

        if let Some(c) = resolved.indent.style.chars().find(|&c| !is_whitespace(c)) {
            return Err(Error::invalid_option(
                "indent.style",
                format!("indentation must be whitespace, found {:?}", c),
            ));
        }
        if let Some(c) = resolved.format.space.chars().find(|&c| !is_whitespace(c)) {
            return Err(Error::invalid_option(
                "format.space",
                format!("space must be whitespace, found {:?}", c),
            ));
        }
        if let Some(c) = resolved.format.newline.chars().find(|&c| !is_line_terminator(c)) {
            return Err(Error::invalid_option(
                "format.newline",
                format!("newline must consist of line terminators, found {:?}", c),
            ));
        }
        if resolved.max_depth == 0 {
            return Err(Error::invalid_option("maxDepth", "must be at least 1"));
        }

        if resolved.format.json && resolved.format.quotes != QuoteStyle::Double {
            warn!(quotes = ?resolved.format.quotes, "json output requires double quotes");
            resolved.format.quotes = QuoteStyle::Double;
        }
        if resolved.format.hexadecimal && !resolved.format.renumber {
            warn!("format.hexadecimal has no effect without format.renumber");
        }
        if !resolved.format.compact && resolved.format.newline.is_empty() {
            warn!("empty newline in pretty layout, using \\n");
            resolved.format.newline = "\n".to_string();
        }
        if resolved.format.preserve_blank_lines && resolved.source_code.is_none() {
            warn!("format.preserveBlankLines needs sourceCode, disabling");
            resolved.format.preserve_blank_lines = false;
        }
        Ok(resolved)
    }

    /// Whitespace layout for these options
    pub fn layout(&self) -> Layout {
        if self.format.compact {
            Layout::compact()
        } else {
            Layout::pretty(&self.indent.style, self.indent.base, &self.format.newline, &self.format.space)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = GenerationOptions::default();
        assert_eq!(options.indent.style, "    ");
        assert_eq!(options.format.quotes, QuoteStyle::Single);
        assert!(options.format.semicolons);
        assert!(options.format.parentheses);
        assert!(!options.comment);
        assert!(!options.source_map_enabled());
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn parses_camel_case_json() {
        let options = GenerationOptions::from_json(
            r#"{"format":{"quotes":"auto","compact":true,"preserveBlankLines":false},
                "sourceMap":"input.js","sourceMapWithCode":true,"indent":{"base":1}}"#,
        )
        .unwrap();
        assert_eq!(options.format.quotes, QuoteStyle::Auto);
        assert!(options.format.compact);
        assert_eq!(options.source_name(), Some("input.js"));
        assert!(options.source_map_with_code);
        assert_eq!(options.indent.base, 1);
        assert_eq!(options.indent.style, "    ");
    }

    #[test]
    fn source_map_flag() {
        let options = GenerationOptions::from_json(r#"{"sourceMap":true}"#).unwrap();
        assert!(options.source_map_enabled());
        assert_eq!(options.source_name(), None);
        let options = GenerationOptions::from_json(r#"{"sourceMap":false}"#).unwrap();
        assert!(!options.source_map_enabled());
    }

    #[test]
    fn unknown_quote_style_normalizes_to_auto() {
        let options = GenerationOptions::from_json(r#"{"format":{"quotes":"backtick"}}"#).unwrap();
        assert_eq!(options.format.quotes, QuoteStyle::Auto);
    }

    #[test]
    fn wrongly_typed_option_is_invalid() {
        let err = GenerationOptions::from_json(r#"{"format":{"compact":"yes"}}"#).unwrap_err();
        assert_eq!(err.category(), "InvalidOption");
    }

    #[test]
    fn resolve_rejects_non_whitespace() {
        let err = GenerationOptions::new().with_indent("ab", 0).resolve().unwrap_err();
        assert!(err.to_string().contains("indent.style"));

        let mut options = GenerationOptions::new();
        options.format.newline = "x".to_string();
        assert_eq!(options.resolve().unwrap_err().category(), "InvalidOption");

        let mut options = GenerationOptions::new();
        options.format.space = "_".to_string();
        assert_eq!(options.resolve().unwrap_err().category(), "InvalidOption");

        assert!(GenerationOptions::new().with_max_depth(0).resolve().is_err());
    }

    #[test]
    fn resolve_normalizes_json_quotes() {
        let mut options = GenerationOptions::new();
        options.format.json = true;
        let resolved = options.resolve().unwrap();
        assert_eq!(resolved.format.quotes, QuoteStyle::Double);
    }

    #[test]
    fn layout_follows_compact_flag() {
        assert!(GenerationOptions::compact().layout().compact);
        let layout = GenerationOptions::new().with_indent("\t", 2).layout();
        assert_eq!(layout.base, "\t\t");
        assert_eq!(layout.indent_unit, "\t");
    }
}

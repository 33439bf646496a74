//! Error types for estree-codegen

use std::fmt;
use thiserror::Error;

/// Node kind and source position attached to a malformed-node report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeContext {
    /// ESTree `type` of the offending node
    pub kind: String,
    /// Source range of the node, if the parser recorded one
    pub range: Option<[u32; 2]>,
}

impl NodeContext {
    /// Create a context for a node kind
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            range: None,
        }
    }

    /// Attach a source range
    pub fn with_range(mut self, range: Option<[u32; 2]>) -> Self {
        self.range = range;
        self
    }
}

impl fmt::Display for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some([start, end]) => write!(f, "{} [{}..{}]", self.kind, start, end),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Main error type for code generation
#[derive(Error, Debug)]
pub enum Error {
    /// The input contained a node whose `type` is not a known ESTree kind
    #[error("UnsupportedNodeKind: unknown node type `{kind}`")]
    UnsupportedNodeKind { kind: String },

    /// A node is missing a required field, or holds a value its slot cannot take
    #[error("MalformedNode: {node}: {message}")]
    MalformedNode { node: NodeContext, message: String },

    /// An option value is outside its domain and cannot be defaulted
    #[error("InvalidOption: `{option}`: {message}")]
    InvalidOption { option: String, message: String },

    /// The tree nests deeper than the configured limit
    #[error("DepthLimitExceeded: node nesting exceeds {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Source map serialization or parsing failed
    #[error("SourceMapError: {0}")]
    SourceMapError(String),
}

impl Error {
    /// Create an unsupported-kind error
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Error::UnsupportedNodeKind { kind: kind.into() }
    }

    /// Create a malformed-node error
    pub fn malformed(node: NodeContext, message: impl Into<String>) -> Self {
        Error::MalformedNode {
            node,
            message: message.into(),
        }
    }

    /// Create a malformed-node error for a required field that is absent
    pub fn missing_field(kind: impl Into<String>, field: &str) -> Self {
        Error::MalformedNode {
            node: NodeContext::new(kind),
            message: format!("missing required field `{}`", field),
        }
    }

    /// Create an invalid-option error
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Short name of the error category
    pub fn category(&self) -> &'static str {
        match self {
            Error::UnsupportedNodeKind { .. } => "UnsupportedNodeKind",
            Error::MalformedNode { .. } => "MalformedNode",
            Error::InvalidOption { .. } => "InvalidOption",
            Error::DepthLimitExceeded { .. } => "DepthLimitExceeded",
            Error::SourceMapError(_) => "SourceMapError",
        }
    }
}

/// Result type alias for code generation
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_range() {
        let err = Error::malformed(
            NodeContext::new("BinaryExpression").with_range(Some([3, 9])),
            "missing required field `operator`",
        );
        assert_eq!(
            err.to_string(),
            "MalformedNode: BinaryExpression [3..9]: missing required field `operator`"
        );
    }

    #[test]
    fn categories() {
        assert_eq!(Error::unsupported("JSXElement").category(), "UnsupportedNodeKind");
        assert_eq!(Error::invalid_option("format.space", "x").category(), "InvalidOption");
        assert_eq!(Error::DepthLimitExceeded { limit: 4 }.category(), "DepthLimitExceeded");
    }
}

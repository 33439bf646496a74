//! estree-codegen: JavaScript source from ESTree syntax trees
//!
//! Hand the generator a tree produced by any ESTree-conforming parser and it
//! returns JavaScript text that parses back to the same tree, optionally with
//! the original comments re-inserted and a V3 source map.
//!
//! # Quick Start
//!
//! ```
//! use estree_codegen::{ast, generate, GenerationOptions, Output};
//!
//! fn main() -> estree_codegen::Result<()> {
//!     let tree = ast::from_json(r#"{
//!         "type": "BinaryExpression", "operator": "*",
//!         "left": { "type": "BinaryExpression", "operator": "+",
//!                   "left": { "type": "Literal", "value": 1 },
//!                   "right": { "type": "Literal", "value": 2 } },
//!         "right": { "type": "Literal", "value": 3 }
//!     }"#)?;
//!     let Output::Code(code) = generate(&tree, &GenerationOptions::default())? else {
//!         unreachable!()
//!     };
//!     assert_eq!(code, "(1 + 2) * 3");
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! The pipeline flows: JSON → [`ast`] → [`comments`] index → [`codegen`] → text and [`source_map`]
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Input** | [`ast`], [`comments`], [`options`] |
//! | **Rendering** | [`codegen`], [`precedence`], [`format`] |
//! | **Output** | [`source_map`], [`error`](Error) |

#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod codegen;
pub mod comments;
pub mod error;
pub mod format;
pub mod options;
pub mod precedence;
pub mod prelude;
pub mod source_map;

pub use ast::Node;
pub use comments::CommentRecord;
pub use error::{Error, Result};
pub use options::GenerationOptions;
pub use source_map::SourceMap;

use codegen::CodeGenerator;
use comments::CommentIndex;
use source_map::{SourceMapBuilder, SourceMapping};
use tracing::debug;

/// estree-codegen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result of one generation run, shaped by `sourceMap`/`sourceMapWithCode`
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Source maps disabled
    Code(String),
    /// Source map requested without the code
    Map(SourceMap),
    /// Source map requested together with the code
    CodeWithMap { code: String, map: SourceMap },
}

impl Output {
    /// Generated text, if this output carries it
    pub fn code(&self) -> Option<&str> {
        match self {
            Output::Code(code) | Output::CodeWithMap { code, .. } => Some(code),
            Output::Map(_) => None,
        }
    }

    /// Source map, if one was requested
    pub fn map(&self) -> Option<&SourceMap> {
        match self {
            Output::Map(map) | Output::CodeWithMap { map, .. } => Some(map),
            Output::Code(_) => None,
        }
    }
}

/// Generate JavaScript for `node`
///
/// `node` may be a `Program`, any statement, any expression, or an auxiliary
/// node such as a `Property` or `SwitchCase`.
pub fn generate(node: &Node, options: &GenerationOptions) -> Result<Output> {
    generate_with_comments(node, &[], options)
}

/// Generate JavaScript for `node`, re-inserting `comments` when
/// `options.comment` is set
pub fn generate_with_comments(node: &Node, comments: &[CommentRecord], options: &GenerationOptions) -> Result<Output> {
    let options = options.resolve()?;
    debug!(
        root = node.kind(),
        compact = options.format.compact,
        comments = comments.len(),
        source_map = options.source_map_enabled(),
        "generating"
    );

    let attached = if options.comment { comments } else { &[] };
    let index = CommentIndex::build(node, attached, options.source_code.as_deref(), options.max_depth);
    let (code, positions) = CodeGenerator::new(&options, index).generate(node)?.finish();

    if !options.source_map_enabled() {
        debug!(bytes = code.len(), "generated");
        return Ok(Output::Code(code));
    }

    let mut builder = SourceMapBuilder::new();
    if let Some(file) = &options.file {
        builder.set_file(file.as_str());
    }
    if let Some(root) = &options.source_map_root {
        builder.set_source_root(root.as_str());
    }
    if let (Some(source), Some(content)) = (options.source_name(), &options.source_content) {
        builder.set_source_content(source, content);
    }
    for (line, column, origin) in positions {
        builder.record(&SourceMapping {
            generated_line: line,
            generated_column: column,
            source: origin.source,
            original_line: origin.line,
            original_column: origin.column,
            name: origin.name,
        })?;
    }
    debug!(bytes = code.len(), mappings = builder.len(), "generated with source map");

    let map = builder.build();
    if options.source_map_with_code {
        Ok(Output::CodeWithMap { code, map })
    } else {
        Ok(Output::Map(map))
    }
}

/// Parse ESTree JSON and generate JavaScript for it
///
/// `options.max_depth` bounds loading as well as generation.
pub fn generate_json(json: &str, options: &GenerationOptions) -> Result<Output> {
    let max_depth = options.resolve()?.max_depth;
    let node = ast::from_json_with_limit(json, max_depth)?;
    generate(&node, options)
}

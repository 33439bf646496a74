//! Prelude module for convenient imports
//!
//! This module provides the most commonly used types for generating code.
//! Import everything from this module for quick access:
//!
//! ```
//! use estree_codegen::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let tree = from_json(r#"{"type":"Identifier","name":"x"}"#)?;
//!     let output = generate(&tree, &GenerationOptions::compact())?;
//!     assert_eq!(output.code(), Some("x"));
//!     Ok(())
//! }
//! ```

// Entry points
pub use crate::{generate, generate_json, generate_with_comments, Output};

// Trees and comments
pub use crate::ast::{from_json, from_value, Node};
pub use crate::comments::{comments_from_json, CommentKind, CommentRecord};

// Options
pub use crate::format::QuoteStyle;
pub use crate::options::{GenerationOptions, SourceMapOption};

// Error handling
pub use crate::error::{Error, Result};

// Source maps
pub use crate::source_map::{SourceMap, SourceMapConsumer};

//! Node dispatcher
//!
//! [`CodeGenerator`] walks the tree once, rendering every node into a
//! [`Fragment`] and concatenating children into their parent's fragment.
//! Parenthesization, token separation, semicolons and indentation are all
//! decided here from the precedence tables and the resolved layout; the
//! comment index and verbatim payloads are consulted per node.
//!
//! Rendering is split by node family:
//! - `stmt.rs`: statements, statement lists and blocks
//! - `expr.rs`: expressions, literals and patterns
//! - `function.rs`: functions, arrows, classes and object members
//! - `module.rs`: import and export declarations

mod expr;
mod fragment;
mod function;
mod module;
mod stmt;

pub use fragment::{Fragment, Origin};

use crate::ast::Node;
use crate::comments::{CommentIndex, CommentKind, CommentRecord, Span};
use crate::error::{Error, NodeContext, Result};
use crate::format::{is_line_terminator, Layout};
use crate::options::{GenerationOptions, SourceMapOption};
use crate::precedence::Precedence;
use bitflags::bitflags;
use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::trace;

/// Stack left when a nested render switches to a fresh segment
const RED_ZONE: usize = 256 * 1024;
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

bitflags! {
    /// Context threaded through expression rendering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExprFlags: u8 {
        /// `in` may appear unparenthesized (cleared inside `for` initializers)
        const ALLOW_IN = 1 << 0;
        /// `new Foo` may drop its empty argument list
        const ALLOW_UNPARENTHESIZED_NEW = 1 << 1;
    }
}

bitflags! {
    /// Context threaded through statement rendering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StmtFlags: u8 {
        const ALLOW_IN = 1 << 0;
        /// The block is a function body
        const FUNCTION_BODY = 1 << 1;
        /// Still inside a directive prologue
        const DIRECTIVE_CONTEXT = 1 << 2;
        /// Last statement of its list; a compact layout may drop the semicolon
        const SEMICOLON_OPTIONAL = 1 << 3;
    }
}

/// Renders one tree under one set of resolved options
pub struct CodeGenerator<'a> {
    options: &'a GenerationOptions,
    layout: Layout,
    /// Indentation of the statement currently being rendered
    base: String,
    comments: CommentIndex<'a>,
    /// Comment ids already written
    emitted: FxHashSet<usize>,
    depth: usize,
    /// Set when the last statement rendered ended without its semicolon
    unterminated: bool,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator; `options` must already be resolved
    pub fn new(options: &'a GenerationOptions, comments: CommentIndex<'a>) -> Self {
        let layout = options.layout();
        let base = layout.base.clone();
        Self {
            options,
            layout,
            base,
            comments,
            emitted: FxHashSet::default(),
            depth: 0,
            unterminated: false,
        }
    }

    /// Render `root`, which may be a program, a statement, an expression or
    /// any auxiliary node
    pub fn generate(&mut self, root: &Node) -> Result<Fragment> {
        let mut fragment = match root {
            Node::Program(_) => self.gen_statement(root, StmtFlags::ALLOW_IN)?,
            _ if root.is_statement() => self.gen_statement(root, StmtFlags::ALLOW_IN)?,
            _ if root.is_expression() => self.gen_expression(root, Precedence::Sequence, ExprFlags::all())?,
            _ => self.gen_auxiliary(root)?,
        };
        if self.layout.compact && matches!(root, Node::Program(_)) {
            fragment.trim_end();
        }
        Ok(fragment)
    }

    // ========== Layout helpers ==========

    /// Concatenate two pieces with whatever separator keeps them distinct tokens
    fn join(&self, mut left: Fragment, right: Fragment) -> Fragment {
        let separator = self.layout.separator(left.text(), right.text());
        left.push_str(separator);
        left.append(right);
        left
    }

    fn join_str(&self, left: Fragment, right: &str) -> Fragment {
        self.join(left, Fragment::from(right))
    }

    fn space(&self) -> &str {
        &self.layout.space
    }

    fn newline(&self) -> &str {
        &self.layout.newline
    }

    /// Statement terminator, or nothing when semicolons are turned off
    ///
    /// Pretty layout drops every terminator; compact layout only the last
    /// one of a list.
    fn semicolon(&mut self, flags: StmtFlags) -> &'static str {
        let omit = !self.options.format.semicolons
            && (!self.layout.compact || flags.contains(StmtFlags::SEMICOLON_OPTIONAL));
        self.unterminated = omit;
        if omit {
            ""
        } else {
            ";"
        }
    }

    /// Run `f` one indentation level deeper
    fn with_indent<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let deeper = self.layout.deeper(&self.base);
        let previous = std::mem::replace(&mut self.base, deeper);
        let result = f(self);
        self.base = previous;
        result
    }

    /// Prefix with the current indentation
    fn indented(&self, fragment: Fragment) -> Fragment {
        fragment.prepend(&self.base)
    }

    // ========== Depth guard ==========

    /// Run a nested render one level deeper, failing past `max_depth`
    ///
    /// Moves onto a fresh stack segment whenever the current one runs low.
    fn nested<T>(&mut self, render: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || render(self));
        self.depth -= 1;
        result
    }

    /// Render an auxiliary node through `render`, with depth accounting,
    /// comments and source mapping
    fn visit(&mut self, node: &Node, render: impl FnOnce(&mut Self) -> Result<Fragment>) -> Result<Fragment> {
        let fragment = self.nested(render)?;
        Ok(self.decorate(node, fragment, false))
    }

    /// [`visit`](Self::visit) for clauses laid out like statements
    /// (`case`, `catch`), whose comments go on their own lines
    fn visit_clause(&mut self, node: &Node, render: impl FnOnce(&mut Self) -> Result<Fragment>) -> Result<Fragment> {
        let fragment = self.nested(render)?;
        Ok(self.decorate(node, fragment, true))
    }

    // ========== Errors ==========

    fn malformed(&self, node: &Node, message: impl Into<String>) -> Error {
        Error::malformed(NodeContext::new(node.kind()).with_range(node.range()), message)
    }

    /// A node that cannot fill the slot it was found in
    fn misplaced(&self, node: &Node, slot: &str) -> Error {
        self.malformed(node, format!("{} cannot appear in {}", node.kind(), slot))
    }

    // ========== Verbatim ==========

    /// Pre-rendered text and precedence attached under the verbatim field
    fn verbatim(&self, node: &Node) -> Result<Option<(String, Precedence)>> {
        let Some(field) = self.options.verbatim.as_deref() else {
            return Ok(None);
        };
        let Some(payload) = node.meta().extra.get(field) else {
            return Ok(None);
        };
        match payload {
            Value::String(content) => Ok(Some((content.clone(), Precedence::Sequence))),
            Value::Object(obj) => {
                let content = obj
                    .get("content")
                    .and_then(Value::as_str)
                    .ok_or_else(|| self.malformed(node, format!("verbatim `{}` needs a string `content`", field)))?;
                let precedence = match obj.get("precedence") {
                    None | Some(Value::Null) => Precedence::Sequence,
                    Some(level) => level
                        .as_u64()
                        .map(Precedence::from_level)
                        .ok_or_else(|| self.malformed(node, "verbatim precedence must be a non-negative integer"))?,
                };
                Ok(Some((content.to_string(), precedence)))
            }
            _ => Err(self.malformed(
                node,
                format!("verbatim `{}` must be a string or an object", field),
            )),
        }
    }

    /// Verbatim text with continuation lines moved to the current indentation
    fn verbatim_text(&self, content: &str) -> Fragment {
        let mut out = String::with_capacity(content.len());
        for (i, line) in content.split('\n').enumerate() {
            if i > 0 {
                out.push_str(&self.layout.newline);
                out.push_str(&self.base);
            }
            out.push_str(line.strip_suffix('\r').unwrap_or(line));
        }
        Fragment::from(out)
    }

    // ========== Comments and mappings ==========

    /// Attach the node's origin and its leading and trailing comments
    fn decorate(&mut self, node: &Node, fragment: Fragment, statement: bool) -> Fragment {
        let mut fragment = match self.origin(node) {
            Some(origin) => fragment.mapped(origin),
            None => fragment,
        };
        if !self.options.comment || self.comments.is_empty() {
            return fragment;
        }
        let inner = self.take_comments(self.comments.inner(node));
        if !inner.is_empty() {
            fragment = self.with_inner_comments(&inner, fragment, statement);
        }
        let leading = self.take_comments(self.comments.leading(node));
        if !leading.is_empty() {
            fragment = self.with_leading_comments(node, &leading, fragment, statement);
        }
        let trailing = self.take_comments(self.comments.trailing(node));
        if !trailing.is_empty() {
            fragment = self.with_trailing_comments(&trailing, fragment, statement);
        }
        fragment
    }

    fn origin(&self, node: &Node) -> Option<Origin> {
        let loc = node.meta().loc.as_ref()?;
        let source = match self.options.source_map.as_ref()? {
            SourceMapOption::Source(name) => name.clone(),
            SourceMapOption::Enabled(true) => loc.source.clone()?,
            SourceMapOption::Enabled(false) => return None,
        };
        Some(Origin {
            source,
            line: loc.start.line.saturating_sub(1),
            column: loc.start.column,
            name: node.identifier_name().map(str::to_string),
        })
    }

    /// Keep only comments not yet written, marking them written
    fn take_comments(&mut self, found: Vec<(usize, &'a CommentRecord)>) -> Vec<&'a CommentRecord> {
        found
            .into_iter()
            .filter(|(id, _)| self.emitted.insert(*id))
            .map(|(_, comment)| comment)
            .collect()
    }

    fn has_leading_comments(&self, node: &Node) -> bool {
        self.options.comment && !self.comments.leading(node).is_empty()
    }

    fn with_leading_comments(
        &self,
        node: &Node,
        comments: &[&CommentRecord],
        fragment: Fragment,
        statement: bool,
    ) -> Fragment {
        let mut prefix = String::new();
        for (i, comment) in comments.iter().enumerate() {
            prefix.push_str(&comment.text());
            if !prefix.ends_with(is_line_terminator) {
                prefix.push_str(if statement { self.newline() } else { self.space() });
            }
            if prefix.ends_with(is_line_terminator) {
                let next = match comments.get(i + 1) {
                    Some(next) => Some(Span::of_comment(next)),
                    None => Span::of_node(node),
                };
                if !self.layout.compact
                    && next.is_some_and(|next| self.comments.blank_line_between(Span::of_comment(comment), next))
                {
                    prefix.push_str(self.newline());
                }
                prefix.push_str(&self.base);
            }
        }
        fragment.prepend(&prefix)
    }

    fn with_trailing_comments(&self, comments: &[&CommentRecord], mut fragment: Fragment, statement: bool) -> Fragment {
        for comment in comments {
            if fragment.ends_with_line_terminator() {
                fragment.push_str(&self.base);
            } else {
                fragment.push_str(self.space());
            }
            fragment.push_str(&comment.text());
        }
        if !statement && fragment.ends_with_line_terminator() {
            fragment.push_str(&self.base);
        }
        fragment
    }

    /// Comments inside a node with no children to carry them
    /// (`return /* c */;`)
    ///
    /// Block comments go in front of the terminator, line comments after it.
    fn with_inner_comments(&self, comments: &[&CommentRecord], mut fragment: Fragment, statement: bool) -> Fragment {
        let terminated = fragment.strip_suffix(";");
        let (block, line): (Vec<&CommentRecord>, Vec<&CommentRecord>) =
            comments.iter().copied().partition(|comment| comment.kind == CommentKind::Block);
        for comment in block {
            fragment.push_str(self.space());
            fragment.push_str(&comment.text());
        }
        if terminated {
            fragment.push_str(";");
        }
        if line.is_empty() {
            fragment
        } else {
            self.with_trailing_comments(&line, fragment, statement)
        }
    }

    /// `open` + `close`, with any comments found inside the empty node
    ///
    /// Block-like containers put each comment on its own deeper-indented
    /// line; `inline` containers (`[]`, `()`) keep them on the same line.
    fn empty_container(&mut self, node: &Node, open: &str, close: &str, inline: bool) -> Fragment {
        let inner = if self.options.comment {
            self.take_comments(self.comments.inner(node))
        } else {
            Vec::new()
        };
        if inner.is_empty() {
            return Fragment::from(format!("{}{}", open, close));
        }
        let mut out = String::from(open);
        if inline {
            for comment in &inner {
                out.push_str(&comment.text());
                if out.ends_with(is_line_terminator) {
                    out.push_str(&self.base);
                }
            }
        } else {
            let deeper = self.layout.deeper(&self.base);
            out.push_str(self.newline());
            for comment in &inner {
                out.push_str(&deeper);
                out.push_str(&comment.text());
                if !out.ends_with(is_line_terminator) {
                    out.push_str(self.newline());
                }
            }
            out.push_str(&self.base);
        }
        out.push_str(close);
        Fragment::from(out)
    }

    /// Source span where `node` starts, counting its leading comments
    fn leading_span(&self, node: &Node) -> Option<Span> {
        if self.options.comment {
            if let Some((_, first)) = self.comments.leading(node).first() {
                return Some(Span::of_comment(first));
            }
        }
        Span::of_node(node)
    }

    /// Whether the original source had a blank line between two siblings
    fn blank_line_between_nodes(&self, earlier: &Node, later: &Node) -> bool {
        if !self.options.format.preserve_blank_lines || self.layout.compact {
            return false;
        }
        match (Span::of_node(earlier), self.leading_span(later)) {
            (Some(a), Some(b)) => self.comments.blank_line_between(a, b),
            _ => false,
        }
    }

    fn trace_asi(&self, node: &Node) {
        trace!(node = node.kind(), "inserted semicolon before ASI hazard");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn ident(name: &str) -> Node {
        Node::Identifier(Identifier::new(name))
    }

    fn render(node: &Node, options: &GenerationOptions) -> Result<String> {
        let options = options.resolve()?;
        let mut generator = CodeGenerator::new(&options, CommentIndex::empty());
        Ok(generator.generate(node)?.finish().0)
    }

    #[test]
    fn renders_expression_root() {
        let node = Node::BinaryExpression(BinaryExpression {
            operator: BinaryOperator::Add,
            left: Box::new(ident("a")),
            right: Box::new(Node::Literal(Literal::number(1.0))),
            meta: Meta::default(),
        });
        assert_eq!(render(&node, &GenerationOptions::new()).unwrap(), "a + 1");
        assert_eq!(render(&node, &GenerationOptions::compact()).unwrap(), "a+1");
    }

    #[test]
    fn verbatim_replaces_node() {
        let mut meta = Meta::default();
        meta.extra.insert(
            "x-verbatim".to_string(),
            serde_json::json!({ "content": "a, b", "precedence": 0 }),
        );
        let node = Node::UnaryExpression(UnaryExpression {
            operator: UnaryOperator::Not,
            argument: Box::new(Node::Identifier(Identifier {
                name: "ignored".to_string(),
                meta,
            })),
            prefix: true,
            meta: Meta::default(),
        });
        let options = GenerationOptions::new().with_verbatim("x-verbatim");
        assert_eq!(render(&node, &options).unwrap(), "!(a, b)");
    }

    #[test]
    fn bad_verbatim_payload_is_malformed() {
        let mut meta = Meta::default();
        meta.extra.insert("raw-js".to_string(), serde_json::json!(42));
        let node = Node::Identifier(Identifier {
            name: "x".to_string(),
            meta,
        });
        let err = render(&node, &GenerationOptions::new().with_verbatim("raw-js")).unwrap_err();
        assert_eq!(err.category(), "MalformedNode");
    }

    #[test]
    fn depth_limit() {
        let mut node = ident("x");
        for _ in 0..20 {
            node = Node::UnaryExpression(UnaryExpression {
                operator: UnaryOperator::Not,
                argument: Box::new(node),
                prefix: true,
                meta: Meta::default(),
            });
        }
        let err = render(&node, &GenerationOptions::new().with_max_depth(10)).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 10 }));
        assert!(render(&node, &GenerationOptions::new().with_max_depth(30)).is_ok());
    }

    fn addition_chain(terms: usize) -> Node {
        (1..terms).fold(ident("x"), |left, _| {
            Node::BinaryExpression(BinaryExpression {
                operator: BinaryOperator::Add,
                left: Box::new(left),
                right: Box::new(ident("x")),
                meta: Meta::default(),
            })
        })
    }

    #[test]
    fn long_chain_at_default_limit() {
        use crate::options::DEFAULT_MAX_DEPTH;

        // the leftmost operand sits one level below the last `+`
        let node = addition_chain(DEFAULT_MAX_DEPTH);
        let code = render(&node, &GenerationOptions::new()).unwrap();
        assert_eq!(code, vec!["x"; DEFAULT_MAX_DEPTH].join(" + "));

        let node = addition_chain(DEFAULT_MAX_DEPTH + 1);
        let err = render(&node, &GenerationOptions::new()).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: DEFAULT_MAX_DEPTH }));
    }
}

//! Comment attachment
//!
//! Comments arrive as a flat list of [`CommentRecord`]s with source ranges,
//! separate from the tree. [`CommentIndex::build`] walks the tree once and
//! decides, for every comment, which node it belongs to:
//!
//! - inside the innermost node whose range contains it,
//! - as a trailing comment of the preceding child when it sits on the same
//!   source line as that child's end,
//! - otherwise as a leading comment of the following child,
//! - otherwise trailing the last child, or inside an empty container
//!   (`{}`, `[]`, an empty function body) when there are no children at all.
//!
//! The index is keyed by node identity and never touches the tree. The code
//! generator asks it for a node's comments while rendering.

use crate::ast::{Node, SourceLocation};
use crate::format::is_line_terminator;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Comment flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
}

/// A comment as reported by the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    /// Comment text without the delimiters
    #[serde(alias = "text")]
    pub value: String,
    pub range: [u32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

impl CommentRecord {
    pub fn block(value: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            kind: CommentKind::Block,
            value: value.into(),
            range: [start, end],
            loc: None,
        }
    }

    pub fn line(value: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            kind: CommentKind::Line,
            value: value.into(),
            range: [start, end],
            loc: None,
        }
    }

    pub fn with_loc(mut self, loc: SourceLocation) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn is_line(&self) -> bool {
        self.kind == CommentKind::Line
    }

    /// Source text of the comment
    ///
    /// Block text is reproduced exactly, line breaks included. A line comment
    /// always ends with a line break so whatever follows starts a new line.
    pub fn text(&self) -> String {
        match self.kind {
            CommentKind::Block => format!("/*{}*/", self.value),
            CommentKind::Line => {
                if self.value.ends_with(is_line_terminator) {
                    format!("//{}", self.value)
                } else {
                    format!("//{}\n", self.value)
                }
            }
        }
    }
}

/// Parse a JSON array of ESTree comments
pub fn comments_from_json(json: &str) -> crate::error::Result<Vec<CommentRecord>> {
    serde_json::from_str(json).map_err(|e| crate::error::Error::invalid_option("comments", e.to_string()))
}

/// Where a comment was attached relative to its node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Leading,
    Trailing,
    Inner,
}

fn node_key(node: &Node) -> usize {
    node as *const Node as usize
}

fn contains(outer: [u32; 2], inner: [u32; 2]) -> bool {
    outer[0] <= inner[0] && inner[1] <= outer[1]
}

/// Read-only map from nodes to the comments attached to them
#[derive(Debug, Default)]
pub struct CommentIndex<'a> {
    comments: &'a [CommentRecord],
    source: Option<&'a str>,
    leading: FxHashMap<usize, Vec<usize>>,
    trailing: FxHashMap<usize, Vec<usize>>,
    inner: FxHashMap<usize, Vec<usize>>,
}

impl<'a> CommentIndex<'a> {
    /// An index with no comments
    pub fn empty() -> Self {
        Self {
            comments: &[],
            source: None,
            leading: FxHashMap::default(),
            trailing: FxHashMap::default(),
            inner: FxHashMap::default(),
        }
    }

    /// Attach `comments` to the nodes of `root`
    ///
    /// `source` is the original text, used to tell same-line from next-line
    /// comments and to find blank lines when nodes carry no `loc`. Descent
    /// stops at `max_depth`.
    pub fn build(root: &'a Node, comments: &'a [CommentRecord], source: Option<&'a str>, max_depth: usize) -> Self {
        let mut index = Self {
            comments,
            source,
            ..Self::empty()
        };
        let mut ids: Vec<usize> = (0..comments.len()).collect();
        ids.sort_by_key(|&id| comments[id].range[0]);
        let mut pending = Vec::new();
        if !ids.is_empty() {
            pending.push((root, ids, 0));
        }
        while let Some((node, ids, depth)) = pending.pop() {
            for (child, nested) in index.attach(node, ids, depth < max_depth) {
                pending.push((child, nested, depth + 1));
            }
        }
        index
    }

    /// Attach the comments of `ids` that belong to `node` itself and return
    /// the ones contained in its children, grouped per child
    fn attach(&mut self, node: &'a Node, ids: Vec<usize>, descend: bool) -> Vec<(&'a Node, Vec<usize>)> {
        let children: Vec<&'a Node> = node.children().into_iter().filter(|c| c.range().is_some()).collect();
        let ranges: Vec<[u32; 2]> = children.iter().filter_map(|c| c.range()).collect();
        let mut nested: Vec<Vec<usize>> = vec![Vec::new(); children.len()];

        for id in ids {
            let comment = &self.comments[id];
            if descend {
                if let Some(i) = ranges.iter().position(|r| contains(*r, comment.range)) {
                    nested[i].push(id);
                    continue;
                }
            }
            let next = ranges.iter().position(|r| r[0] >= comment.range[1]);
            let prev = ranges.iter().rposition(|r| r[1] <= comment.range[0]);
            let (target, placement) = match (prev, next) {
                (Some(p), Some(n)) => {
                    if self.on_same_line(children[p], comment) {
                        (children[p], Placement::Trailing)
                    } else {
                        (children[n], Placement::Leading)
                    }
                }
                (None, Some(n)) => (children[n], Placement::Leading),
                (Some(p), None) => (children[p], Placement::Trailing),
                (None, None) => (node, Placement::Inner),
            };
            trace!(
                comment = id,
                node = target.kind(),
                placement = ?placement,
                "attached comment"
            );
            let map = match placement {
                Placement::Leading => &mut self.leading,
                Placement::Trailing => &mut self.trailing,
                Placement::Inner => &mut self.inner,
            };
            map.entry(node_key(target)).or_default().push(id);
        }

        children
            .into_iter()
            .zip(nested)
            .filter(|(_, ids)| !ids.is_empty())
            .collect()
    }

    fn on_same_line(&self, node: &Node, comment: &CommentRecord) -> bool {
        if let (Some(node_loc), Some(comment_loc)) = (&node.meta().loc, &comment.loc) {
            return node_loc.end.line == comment_loc.start.line;
        }
        match (node.range(), self.source) {
            (Some([_, end]), Some(source)) => source
                .get(end as usize..comment.range[0] as usize)
                .is_some_and(|gap| !gap.contains(is_line_terminator)),
            _ => false,
        }
    }

    fn lookup(&self, map: &FxHashMap<usize, Vec<usize>>, node: &Node) -> Vec<(usize, &'a CommentRecord)> {
        let comments = self.comments;
        map.get(&node_key(node))
            .map(|ids| ids.iter().map(|&id| (id, &comments[id])).collect())
            .unwrap_or_default()
    }

    /// Comments to emit before `node`, with their ids
    pub fn leading(&self, node: &Node) -> Vec<(usize, &'a CommentRecord)> {
        self.lookup(&self.leading, node)
    }

    /// Comments to emit after `node`
    pub fn trailing(&self, node: &Node) -> Vec<(usize, &'a CommentRecord)> {
        self.lookup(&self.trailing, node)
    }

    /// Comments inside an otherwise empty `node`
    pub fn inner(&self, node: &Node) -> Vec<(usize, &'a CommentRecord)> {
        self.lookup(&self.inner, node)
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.inner.is_empty()
    }

    /// Whether a blank line separates a span ending at `earlier` from one
    /// starting at `later`
    ///
    /// Uses line numbers when both sides have them, otherwise the source text.
    pub fn blank_line_between(&self, earlier: Span, later: Span) -> bool {
        if let (Some(end_line), Some(start_line)) = (earlier.end_line, later.start_line) {
            return start_line > end_line + 1;
        }
        let Some(source) = self.source else {
            return false;
        };
        let Some(gap) = source.get(earlier.end as usize..later.start as usize) else {
            return false;
        };
        let mut newlines = 0;
        let mut chars = gap.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\r' && chars.peek() == Some(&'\n') {
                continue;
            }
            if is_line_terminator(c) {
                newlines += 1;
            }
        }
        newlines >= 2
    }
}

/// Source extent of a node or comment, for blank-line checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
}

impl Span {
    pub fn of_comment(comment: &CommentRecord) -> Self {
        Span {
            start: comment.range[0],
            end: comment.range[1],
            start_line: comment.loc.as_ref().map(|l| l.start.line),
            end_line: comment.loc.as_ref().map(|l| l.end.line),
        }
    }

    pub fn of_node(node: &Node) -> Option<Self> {
        let [start, end] = node.range()?;
        let loc = node.meta().loc.as_ref();
        Some(Span {
            start,
            end,
            start_line: loc.map(|l| l.start.line),
            end_line: loc.map(|l| l.end.line),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BlockStatement, ExpressionStatement, Identifier, Meta, Program, SourceType};

    fn ident_stmt(name: &str, start: u32) -> Node {
        let end = start + name.len() as u32 + 1;
        Node::ExpressionStatement(ExpressionStatement {
            expression: Box::new(Node::Identifier(Identifier {
                name: name.to_string(),
                meta: Meta::with_range(start, end - 1),
            })),
            directive: None,
            meta: Meta::with_range(start, end),
        })
    }

    fn program(body: Vec<Node>, end: u32) -> Node {
        Node::Program(Program {
            body,
            source_type: SourceType::Script,
            meta: Meta::with_range(0, end),
        })
    }

    #[test]
    fn comment_text() {
        assert_eq!(CommentRecord::line(" hi", 0, 5).text(), "// hi\n");
        assert_eq!(CommentRecord::block(" a\n b ", 0, 10).text(), "/* a\n b */");
    }

    #[test]
    fn between_statements_is_leading_of_next() {
        // a;\n/* c */\nb;
        let source = "a;\n/* c */\nb;";
        let root = program(vec![ident_stmt("a", 0), ident_stmt("b", 11)], 13);
        let comments = vec![CommentRecord::block(" c ", 3, 10)];
        let index = CommentIndex::build(&root, &comments, Some(source), 100);

        let Node::Program(program) = &root else { unreachable!() };
        assert!(index.trailing(&program.body[0]).is_empty());
        let leading = index.leading(&program.body[1]);
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].1.value, " c ");
    }

    #[test]
    fn same_line_comment_trails_previous() {
        let source = "a; // c\nb;";
        let root = program(vec![ident_stmt("a", 0), ident_stmt("b", 8)], 10);
        let comments = vec![CommentRecord::line(" c", 3, 7)];
        let index = CommentIndex::build(&root, &comments, Some(source), 100);

        let Node::Program(program) = &root else { unreachable!() };
        assert_eq!(index.trailing(&program.body[0]).len(), 1);
        assert!(index.leading(&program.body[1]).is_empty());
    }

    #[test]
    fn empty_block_gets_inner_comment() {
        let block = Node::BlockStatement(BlockStatement {
            body: vec![],
            meta: Meta::with_range(0, 12),
        });
        let root = program(vec![block], 12);
        let comments = vec![CommentRecord::block(" empty ", 1, 11)];
        let index = CommentIndex::build(&root, &comments, None, 100);

        let Node::Program(program) = &root else { unreachable!() };
        assert_eq!(index.inner(&program.body[0]).len(), 1);
    }

    #[test]
    fn comments_after_last_child_trail_it() {
        let root = program(vec![ident_stmt("a", 0)], 2);
        let comments = vec![CommentRecord::line(" end", 3, 9)];
        let index = CommentIndex::build(&root, &comments, None, 100);

        let Node::Program(program) = &root else { unreachable!() };
        assert_eq!(index.trailing(&program.body[0]).len(), 1);
    }

    #[test]
    fn blank_lines_from_source() {
        let source = "// a\n\n// b\n// c\n";
        let comments = vec![
            CommentRecord::line(" a", 0, 4),
            CommentRecord::line(" b", 6, 10),
            CommentRecord::line(" c", 11, 15),
        ];
        let index = CommentIndex {
            source: Some(source),
            ..CommentIndex::empty()
        };
        assert!(index.blank_line_between(Span::of_comment(&comments[0]), Span::of_comment(&comments[1])));
        assert!(!index.blank_line_between(Span::of_comment(&comments[1]), Span::of_comment(&comments[2])));
    }

    #[test]
    fn parses_estree_comment_json() {
        let comments =
            comments_from_json(r#"[{"type":"Line","value":" x","range":[0,4]},{"type":"Block","text":"y","range":[5,10]}]"#)
                .unwrap();
        assert!(comments[0].is_line());
        assert_eq!(comments[1].value, "y");
    }
}

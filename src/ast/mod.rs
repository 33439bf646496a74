//! Abstract Syntax Tree (AST) types for ESTree input
//!
//! This module defines the node types the generator consumes. The shapes follow
//! the ESTree specification closely so that the JSON produced by any conforming
//! parser deserializes directly into a [`Node`]. Every child slot is a generic
//! `Node`, exactly as ESTree describes it; the code generator checks that a
//! node is acceptable for the slot it appears in.

mod expr;
mod load;
mod pattern;
mod stmt;

pub use expr::*;
pub use load::{from_json, from_json_with_limit, from_value, from_value_with_limit, is_known_kind};
pub use pattern::*;
pub use stmt::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A line/column position as recorded by the parser (line 1-indexed, column 0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (0-indexed)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The `loc` object of an ESTree node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Start position
    pub start: Position,
    /// End position
    pub end: Position,
    /// Name of the source the node was parsed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Position data and unrecognized fields shared by every node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Byte range `[start, end)` in the original source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[u32; 2]>,
    /// Line/column location in the original source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    /// Any other fields the parser attached (`start`, `end`, verbatim payloads, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Meta {
    /// Meta carrying only a source range
    pub fn with_range(start: u32, end: u32) -> Self {
        Self {
            range: Some([start, end]),
            ..Self::default()
        }
    }
}

/// Program source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Script goal
    #[default]
    Script,
    /// Module goal
    Module,
}

/// A complete program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Top-level statements
    pub body: Vec<Node>,
    /// Script or module
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(flatten)]
    pub meta: Meta,
}

/// An ESTree node, keyed by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Program(Program),

    // Statements
    ExpressionStatement(ExpressionStatement),
    BlockStatement(BlockStatement),
    EmptyStatement(Empty),
    DebuggerStatement(Empty),
    WithStatement(WithStatement),
    ReturnStatement(ReturnStatement),
    LabeledStatement(LabeledStatement),
    BreakStatement(JumpStatement),
    ContinueStatement(JumpStatement),
    IfStatement(IfStatement),
    SwitchStatement(SwitchStatement),
    SwitchCase(SwitchCase),
    ThrowStatement(ThrowStatement),
    TryStatement(TryStatement),
    CatchClause(CatchClause),
    WhileStatement(WhileStatement),
    DoWhileStatement(DoWhileStatement),
    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    ForOfStatement(ForOfStatement),
    FunctionDeclaration(Function),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),
    ClassDeclaration(Class),

    // Expressions
    Identifier(Identifier),
    Literal(Literal),
    ThisExpression(Empty),
    Super(Empty),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    FunctionExpression(Function),
    ArrowFunctionExpression(Function),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(LogicalExpression),
    AssignmentExpression(AssignmentExpression),
    ConditionalExpression(ConditionalExpression),
    CallExpression(CallExpression),
    NewExpression(NewExpression),
    MemberExpression(MemberExpression),
    ChainExpression(ChainExpression),
    SequenceExpression(SequenceExpression),
    YieldExpression(YieldExpression),
    AwaitExpression(AwaitExpression),
    TemplateLiteral(TemplateLiteral),
    TemplateElement(TemplateElement),
    TaggedTemplateExpression(TaggedTemplateExpression),
    SpreadElement(SpreadElement),
    ClassExpression(Class),
    ClassBody(ClassBody),
    MethodDefinition(MethodDefinition),
    MetaProperty(MetaProperty),

    // Patterns
    ObjectPattern(ObjectPattern),
    ArrayPattern(ArrayPattern),
    RestElement(RestElement),
    AssignmentPattern(AssignmentPattern),

    // Modules
    ImportDeclaration(ImportDeclaration),
    ImportSpecifier(ImportSpecifier),
    ImportDefaultSpecifier(ImportLocalSpecifier),
    ImportNamespaceSpecifier(ImportLocalSpecifier),
    ExportNamedDeclaration(ExportNamedDeclaration),
    ExportSpecifier(ExportSpecifier),
    ExportDefaultDeclaration(ExportDefaultDeclaration),
    ExportAllDeclaration(ExportAllDeclaration),
}

/// Which syntactic family a node kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Can appear in a statement list
    Statement,
    /// Can appear in an expression slot
    Expression,
    /// Only valid inside a specific parent (Property, SwitchCase, ...)
    Auxiliary,
}

impl Node {
    /// The ESTree `type` string of this node
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Program(_) => "Program",
            Node::ExpressionStatement(_) => "ExpressionStatement",
            Node::BlockStatement(_) => "BlockStatement",
            Node::EmptyStatement(_) => "EmptyStatement",
            Node::DebuggerStatement(_) => "DebuggerStatement",
            Node::WithStatement(_) => "WithStatement",
            Node::ReturnStatement(_) => "ReturnStatement",
            Node::LabeledStatement(_) => "LabeledStatement",
            Node::BreakStatement(_) => "BreakStatement",
            Node::ContinueStatement(_) => "ContinueStatement",
            Node::IfStatement(_) => "IfStatement",
            Node::SwitchStatement(_) => "SwitchStatement",
            Node::SwitchCase(_) => "SwitchCase",
            Node::ThrowStatement(_) => "ThrowStatement",
            Node::TryStatement(_) => "TryStatement",
            Node::CatchClause(_) => "CatchClause",
            Node::WhileStatement(_) => "WhileStatement",
            Node::DoWhileStatement(_) => "DoWhileStatement",
            Node::ForStatement(_) => "ForStatement",
            Node::ForInStatement(_) => "ForInStatement",
            Node::ForOfStatement(_) => "ForOfStatement",
            Node::FunctionDeclaration(_) => "FunctionDeclaration",
            Node::VariableDeclaration(_) => "VariableDeclaration",
            Node::VariableDeclarator(_) => "VariableDeclarator",
            Node::ClassDeclaration(_) => "ClassDeclaration",
            Node::Identifier(_) => "Identifier",
            Node::Literal(_) => "Literal",
            Node::ThisExpression(_) => "ThisExpression",
            Node::Super(_) => "Super",
            Node::ArrayExpression(_) => "ArrayExpression",
            Node::ObjectExpression(_) => "ObjectExpression",
            Node::Property(_) => "Property",
            Node::FunctionExpression(_) => "FunctionExpression",
            Node::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
            Node::UnaryExpression(_) => "UnaryExpression",
            Node::UpdateExpression(_) => "UpdateExpression",
            Node::BinaryExpression(_) => "BinaryExpression",
            Node::LogicalExpression(_) => "LogicalExpression",
            Node::AssignmentExpression(_) => "AssignmentExpression",
            Node::ConditionalExpression(_) => "ConditionalExpression",
            Node::CallExpression(_) => "CallExpression",
            Node::NewExpression(_) => "NewExpression",
            Node::MemberExpression(_) => "MemberExpression",
            Node::ChainExpression(_) => "ChainExpression",
            Node::SequenceExpression(_) => "SequenceExpression",
            Node::YieldExpression(_) => "YieldExpression",
            Node::AwaitExpression(_) => "AwaitExpression",
            Node::TemplateLiteral(_) => "TemplateLiteral",
            Node::TemplateElement(_) => "TemplateElement",
            Node::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
            Node::SpreadElement(_) => "SpreadElement",
            Node::ClassExpression(_) => "ClassExpression",
            Node::ClassBody(_) => "ClassBody",
            Node::MethodDefinition(_) => "MethodDefinition",
            Node::MetaProperty(_) => "MetaProperty",
            Node::ObjectPattern(_) => "ObjectPattern",
            Node::ArrayPattern(_) => "ArrayPattern",
            Node::RestElement(_) => "RestElement",
            Node::AssignmentPattern(_) => "AssignmentPattern",
            Node::ImportDeclaration(_) => "ImportDeclaration",
            Node::ImportSpecifier(_) => "ImportSpecifier",
            Node::ImportDefaultSpecifier(_) => "ImportDefaultSpecifier",
            Node::ImportNamespaceSpecifier(_) => "ImportNamespaceSpecifier",
            Node::ExportNamedDeclaration(_) => "ExportNamedDeclaration",
            Node::ExportSpecifier(_) => "ExportSpecifier",
            Node::ExportDefaultDeclaration(_) => "ExportDefaultDeclaration",
            Node::ExportAllDeclaration(_) => "ExportAllDeclaration",
        }
    }

    /// Shared position data of this node
    pub fn meta(&self) -> &Meta {
        match self {
            Node::Program(n) => &n.meta,
            Node::ExpressionStatement(n) => &n.meta,
            Node::BlockStatement(n) => &n.meta,
            Node::EmptyStatement(n) | Node::DebuggerStatement(n) => &n.meta,
            Node::ThisExpression(n) | Node::Super(n) => &n.meta,
            Node::WithStatement(n) => &n.meta,
            Node::ReturnStatement(n) => &n.meta,
            Node::LabeledStatement(n) => &n.meta,
            Node::BreakStatement(n) | Node::ContinueStatement(n) => &n.meta,
            Node::IfStatement(n) => &n.meta,
            Node::SwitchStatement(n) => &n.meta,
            Node::SwitchCase(n) => &n.meta,
            Node::ThrowStatement(n) => &n.meta,
            Node::TryStatement(n) => &n.meta,
            Node::CatchClause(n) => &n.meta,
            Node::WhileStatement(n) => &n.meta,
            Node::DoWhileStatement(n) => &n.meta,
            Node::ForStatement(n) => &n.meta,
            Node::ForInStatement(n) => &n.meta,
            Node::ForOfStatement(n) => &n.meta,
            Node::FunctionDeclaration(n)
            | Node::FunctionExpression(n)
            | Node::ArrowFunctionExpression(n) => &n.meta,
            Node::VariableDeclaration(n) => &n.meta,
            Node::VariableDeclarator(n) => &n.meta,
            Node::ClassDeclaration(n) | Node::ClassExpression(n) => &n.meta,
            Node::Identifier(n) => &n.meta,
            Node::Literal(n) => &n.meta,
            Node::ArrayExpression(n) => &n.meta,
            Node::ObjectExpression(n) => &n.meta,
            Node::Property(n) => &n.meta,
            Node::UnaryExpression(n) => &n.meta,
            Node::UpdateExpression(n) => &n.meta,
            Node::BinaryExpression(n) => &n.meta,
            Node::LogicalExpression(n) => &n.meta,
            Node::AssignmentExpression(n) => &n.meta,
            Node::ConditionalExpression(n) => &n.meta,
            Node::CallExpression(n) => &n.meta,
            Node::NewExpression(n) => &n.meta,
            Node::MemberExpression(n) => &n.meta,
            Node::ChainExpression(n) => &n.meta,
            Node::SequenceExpression(n) => &n.meta,
            Node::YieldExpression(n) => &n.meta,
            Node::AwaitExpression(n) => &n.meta,
            Node::TemplateLiteral(n) => &n.meta,
            Node::TemplateElement(n) => &n.meta,
            Node::TaggedTemplateExpression(n) => &n.meta,
            Node::SpreadElement(n) => &n.meta,
            Node::ClassBody(n) => &n.meta,
            Node::MethodDefinition(n) => &n.meta,
            Node::MetaProperty(n) => &n.meta,
            Node::ObjectPattern(n) => &n.meta,
            Node::ArrayPattern(n) => &n.meta,
            Node::RestElement(n) => &n.meta,
            Node::AssignmentPattern(n) => &n.meta,
            Node::ImportDeclaration(n) => &n.meta,
            Node::ImportSpecifier(n) => &n.meta,
            Node::ImportDefaultSpecifier(n) | Node::ImportNamespaceSpecifier(n) => &n.meta,
            Node::ExportNamedDeclaration(n) => &n.meta,
            Node::ExportSpecifier(n) => &n.meta,
            Node::ExportDefaultDeclaration(n) => &n.meta,
            Node::ExportAllDeclaration(n) => &n.meta,
        }
    }

    /// Source range of this node, if known
    pub fn range(&self) -> Option<[u32; 2]> {
        self.meta().range
    }

    /// Syntactic family of this node
    pub fn class(&self) -> NodeClass {
        match self {
            Node::ExpressionStatement(_)
            | Node::BlockStatement(_)
            | Node::EmptyStatement(_)
            | Node::DebuggerStatement(_)
            | Node::WithStatement(_)
            | Node::ReturnStatement(_)
            | Node::LabeledStatement(_)
            | Node::BreakStatement(_)
            | Node::ContinueStatement(_)
            | Node::IfStatement(_)
            | Node::SwitchStatement(_)
            | Node::ThrowStatement(_)
            | Node::TryStatement(_)
            | Node::WhileStatement(_)
            | Node::DoWhileStatement(_)
            | Node::ForStatement(_)
            | Node::ForInStatement(_)
            | Node::ForOfStatement(_)
            | Node::FunctionDeclaration(_)
            | Node::VariableDeclaration(_)
            | Node::ClassDeclaration(_)
            | Node::ImportDeclaration(_)
            | Node::ExportNamedDeclaration(_)
            | Node::ExportDefaultDeclaration(_)
            | Node::ExportAllDeclaration(_) => NodeClass::Statement,
            Node::Identifier(_)
            | Node::Literal(_)
            | Node::ThisExpression(_)
            | Node::ArrayExpression(_)
            | Node::ObjectExpression(_)
            | Node::FunctionExpression(_)
            | Node::ArrowFunctionExpression(_)
            | Node::UnaryExpression(_)
            | Node::UpdateExpression(_)
            | Node::BinaryExpression(_)
            | Node::LogicalExpression(_)
            | Node::AssignmentExpression(_)
            | Node::ConditionalExpression(_)
            | Node::CallExpression(_)
            | Node::NewExpression(_)
            | Node::MemberExpression(_)
            | Node::ChainExpression(_)
            | Node::SequenceExpression(_)
            | Node::YieldExpression(_)
            | Node::AwaitExpression(_)
            | Node::TemplateLiteral(_)
            | Node::TaggedTemplateExpression(_)
            | Node::ClassExpression(_)
            | Node::MetaProperty(_)
            | Node::ObjectPattern(_)
            | Node::ArrayPattern(_)
            | Node::AssignmentPattern(_) => NodeClass::Expression,
            _ => NodeClass::Auxiliary,
        }
    }

    /// Whether this node is a statement
    pub fn is_statement(&self) -> bool {
        self.class() == NodeClass::Statement
    }

    /// Whether this node can fill an expression slot
    pub fn is_expression(&self) -> bool {
        self.class() == NodeClass::Expression
    }

    /// Direct child nodes in source order
    ///
    /// Used by the comment index to find the innermost node bracketing a comment.
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match self {
            Node::Program(n) => out.extend(n.body.iter()),
            Node::ExpressionStatement(n) => out.push(&n.expression),
            Node::BlockStatement(n) => out.extend(n.body.iter()),
            Node::EmptyStatement(_)
            | Node::DebuggerStatement(_)
            | Node::ThisExpression(_)
            | Node::Super(_)
            | Node::Identifier(_)
            | Node::Literal(_)
            | Node::TemplateElement(_) => {}
            Node::WithStatement(n) => {
                out.push(&n.object);
                out.push(&n.body);
            }
            Node::ReturnStatement(n) => out.extend(n.argument.as_deref()),
            Node::LabeledStatement(n) => {
                out.push(&n.label);
                out.push(&n.body);
            }
            Node::BreakStatement(n) | Node::ContinueStatement(n) => out.extend(n.label.as_deref()),
            Node::IfStatement(n) => {
                out.push(&n.test);
                out.push(&n.consequent);
                out.extend(n.alternate.as_deref());
            }
            Node::SwitchStatement(n) => {
                out.push(&n.discriminant);
                out.extend(n.cases.iter());
            }
            Node::SwitchCase(n) => {
                out.extend(n.test.as_deref());
                out.extend(n.consequent.iter());
            }
            Node::ThrowStatement(n) => out.push(&n.argument),
            Node::TryStatement(n) => {
                out.push(&n.block);
                out.extend(n.handler.as_deref());
                out.extend(n.finalizer.as_deref());
            }
            Node::CatchClause(n) => {
                out.extend(n.param.as_deref());
                out.push(&n.body);
            }
            Node::WhileStatement(n) => {
                out.push(&n.test);
                out.push(&n.body);
            }
            Node::DoWhileStatement(n) => {
                out.push(&n.body);
                out.push(&n.test);
            }
            Node::ForStatement(n) => {
                out.extend(n.init.as_deref());
                out.extend(n.test.as_deref());
                out.extend(n.update.as_deref());
                out.push(&n.body);
            }
            Node::ForInStatement(n) => {
                out.push(&n.left);
                out.push(&n.right);
                out.push(&n.body);
            }
            Node::ForOfStatement(n) => {
                out.push(&n.left);
                out.push(&n.right);
                out.push(&n.body);
            }
            Node::FunctionDeclaration(n)
            | Node::FunctionExpression(n)
            | Node::ArrowFunctionExpression(n) => {
                out.extend(n.id.as_deref());
                out.extend(n.params.iter());
                out.push(&n.body);
            }
            Node::VariableDeclaration(n) => out.extend(n.declarations.iter()),
            Node::VariableDeclarator(n) => {
                out.push(&n.id);
                out.extend(n.init.as_deref());
            }
            Node::ClassDeclaration(n) | Node::ClassExpression(n) => {
                out.extend(n.id.as_deref());
                out.extend(n.super_class.as_deref());
                out.push(&n.body);
            }
            Node::ArrayExpression(n) => out.extend(n.elements.iter().flatten()),
            Node::ObjectExpression(n) => out.extend(n.properties.iter()),
            Node::Property(n) => {
                if !n.shorthand {
                    out.push(&n.key);
                }
                out.push(&n.value);
            }
            Node::UnaryExpression(n) => out.push(&n.argument),
            Node::UpdateExpression(n) => out.push(&n.argument),
            Node::BinaryExpression(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            Node::LogicalExpression(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            Node::AssignmentExpression(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            Node::ConditionalExpression(n) => {
                out.push(&n.test);
                out.push(&n.consequent);
                out.push(&n.alternate);
            }
            Node::CallExpression(n) => {
                out.push(&n.callee);
                out.extend(n.arguments.iter());
            }
            Node::NewExpression(n) => {
                out.push(&n.callee);
                out.extend(n.arguments.iter());
            }
            Node::MemberExpression(n) => {
                out.push(&n.object);
                out.push(&n.property);
            }
            Node::ChainExpression(n) => out.push(&n.expression),
            Node::SequenceExpression(n) => out.extend(n.expressions.iter()),
            Node::YieldExpression(n) => out.extend(n.argument.as_deref()),
            Node::AwaitExpression(n) => out.push(&n.argument),
            Node::TemplateLiteral(n) => {
                // quasis and expressions interleave in source order
                for (i, quasi) in n.quasis.iter().enumerate() {
                    out.push(quasi);
                    if let Some(expr) = n.expressions.get(i) {
                        out.push(expr);
                    }
                }
            }
            Node::TaggedTemplateExpression(n) => {
                out.push(&n.tag);
                out.push(&n.quasi);
            }
            Node::SpreadElement(n) => out.push(&n.argument),
            Node::ClassBody(n) => out.extend(n.body.iter()),
            Node::MethodDefinition(n) => {
                out.push(&n.key);
                out.push(&n.value);
            }
            Node::MetaProperty(n) => {
                out.push(&n.meta_object);
                out.push(&n.property);
            }
            Node::ObjectPattern(n) => out.extend(n.properties.iter()),
            Node::ArrayPattern(n) => out.extend(n.elements.iter().flatten()),
            Node::RestElement(n) => out.push(&n.argument),
            Node::AssignmentPattern(n) => {
                out.push(&n.left);
                out.push(&n.right);
            }
            Node::ImportDeclaration(n) => {
                out.extend(n.specifiers.iter());
                out.push(&n.source);
            }
            Node::ImportSpecifier(n) => {
                out.push(&n.imported);
                out.push(&n.local);
            }
            Node::ImportDefaultSpecifier(n) | Node::ImportNamespaceSpecifier(n) => out.push(&n.local),
            Node::ExportNamedDeclaration(n) => {
                out.extend(n.declaration.as_deref());
                out.extend(n.specifiers.iter());
                out.extend(n.source.as_deref());
            }
            Node::ExportSpecifier(n) => {
                out.push(&n.local);
                out.push(&n.exported);
            }
            Node::ExportDefaultDeclaration(n) => out.push(&n.declaration),
            Node::ExportAllDeclaration(n) => {
                out.extend(n.exported.as_deref());
                out.push(&n.source);
            }
        }
        out
    }

    /// Name of an `Identifier` node
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Node::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }
}

/// A node with nothing but position data (`this`, `super`, `;`, `debugger;`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Empty {
    #[serde(flatten)]
    pub meta: Meta,
}

/// An identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: Meta::default(),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_node() {
        let node: Node = serde_json::from_str(
            r#"{"type":"Identifier","name":"x","range":[0,1],"start":0}"#,
        )
        .unwrap();
        assert_eq!(node.kind(), "Identifier");
        assert_eq!(node.range(), Some([0, 1]));
        assert_eq!(node.meta().extra.get("start"), Some(&Value::from(0)));
        assert_eq!(node.identifier_name(), Some("x"));
    }

    #[test]
    fn classes() {
        let id = Node::Identifier(Identifier::new("a"));
        assert!(id.is_expression());
        let stmt = Node::EmptyStatement(Empty::default());
        assert!(stmt.is_statement());
        let case: Node = serde_json::from_str(r#"{"type":"SwitchCase","test":null,"consequent":[]}"#).unwrap();
        assert_eq!(case.class(), NodeClass::Auxiliary);
    }

    #[test]
    fn children_in_source_order() {
        let node: Node = serde_json::from_str(
            r#"{"type":"BinaryExpression","operator":"+",
                "left":{"type":"Identifier","name":"a"},
                "right":{"type":"Identifier","name":"b"}}"#,
        )
        .unwrap();
        let names: Vec<_> = node.children().iter().filter_map(|c| c.identifier_name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}

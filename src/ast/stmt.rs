//! Statement AST node types

use super::*;

/// Expression statement, or a directive such as `'use strict';`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Box<Node>,
    /// Raw text of the directive, without quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Block statement `{ ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// With statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithStatement {
    pub object: Box<Node>,
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Return statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub argument: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Labeled statement `label: body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledStatement {
    pub label: Box<Node>,
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `break` or `continue`, with an optional label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpStatement {
    #[serde(default)]
    pub label: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// If statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    #[serde(default)]
    pub alternate: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Switch statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub discriminant: Box<Node>,
    /// `SwitchCase` nodes
    pub cases: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `case test:` or `default:` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// None for `default`
    #[serde(default)]
    pub test: Option<Box<Node>>,
    pub consequent: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Throw statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub argument: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Try statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStatement {
    pub block: Box<Node>,
    /// `CatchClause`
    #[serde(default)]
    pub handler: Option<Box<Node>>,
    #[serde(default)]
    pub finalizer: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Catch clause; the binding is optional since ES2019
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub param: Option<Box<Node>>,
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// While statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub test: Box<Node>,
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Do-while statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStatement {
    pub body: Box<Node>,
    pub test: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// For statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    /// `VariableDeclaration` or an expression
    #[serde(default)]
    pub init: Option<Box<Node>>,
    #[serde(default)]
    pub test: Option<Box<Node>>,
    #[serde(default)]
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// For-in statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForInStatement {
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// For-of statement, including `for await`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForOfStatement {
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub body: Box<Node>,
    #[serde(default, rename = "await")]
    pub is_await: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    /// Source keyword
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// A variable declaration (`let x = 1, y = 2`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// `VariableDeclarator` nodes
    pub declarations: Vec<Node>,
    pub kind: VariableKind,
    #[serde(flatten)]
    pub meta: Meta,
}

/// A single variable declarator (id = init)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub id: Box<Node>,
    #[serde(default)]
    pub init: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `import a, { b as c } from 'mod';`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub specifiers: Vec<Node>,
    /// String `Literal`
    pub source: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `b as c` inside an import clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub imported: Box<Node>,
    pub local: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Default (`a`) or namespace (`* as a`) import binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportLocalSpecifier {
    pub local: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `export { a as b };`, `export var x;`, `export { a } from 'mod';`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNamedDeclaration {
    #[serde(default)]
    pub declaration: Option<Box<Node>>,
    #[serde(default)]
    pub specifiers: Vec<Node>,
    #[serde(default)]
    pub source: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `a as b` inside an export clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSpecifier {
    pub local: Box<Node>,
    pub exported: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `export default expr;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDefaultDeclaration {
    pub declaration: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// `export * from 'mod';`, `export * as ns from 'mod';`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportAllDeclaration {
    pub source: Box<Node>,
    #[serde(default)]
    pub exported: Option<Box<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

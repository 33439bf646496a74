//! Loading ESTree JSON into typed nodes
//!
//! Parsers hand us JSON. Before handing it to serde we walk it once so that an
//! unknown `type` is reported as [`Error::UnsupportedNodeKind`] and a missing
//! required field as [`Error::MalformedNode`] naming the kind and field,
//! instead of serde's generic messages. The same walk bounds node nesting.

use super::Node;
use crate::error::{Error, NodeContext, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Fields of one node kind: which must be present, and which hold child nodes
struct Shape {
    kind: &'static str,
    required: &'static [&'static str],
    children: &'static [&'static str],
}

macro_rules! shapes {
    ($( $kind:literal => [$($req:literal),*] [$($child:literal),*] ),* $(,)?) => {
        &[$( Shape { kind: $kind, required: &[$($req),*], children: &[$($child),*] } ),*]
    };
}

const SHAPES: &[Shape] = shapes! {
    "Program" => ["body"] ["body"],
    "ExpressionStatement" => ["expression"] ["expression"],
    "BlockStatement" => ["body"] ["body"],
    "EmptyStatement" => [] [],
    "DebuggerStatement" => [] [],
    "WithStatement" => ["object", "body"] ["object", "body"],
    "ReturnStatement" => [] ["argument"],
    "LabeledStatement" => ["label", "body"] ["label", "body"],
    "BreakStatement" => [] ["label"],
    "ContinueStatement" => [] ["label"],
    "IfStatement" => ["test", "consequent"] ["test", "consequent", "alternate"],
    "SwitchStatement" => ["discriminant", "cases"] ["discriminant", "cases"],
    "SwitchCase" => ["consequent"] ["test", "consequent"],
    "ThrowStatement" => ["argument"] ["argument"],
    "TryStatement" => ["block"] ["block", "handler", "finalizer"],
    "CatchClause" => ["body"] ["param", "body"],
    "WhileStatement" => ["test", "body"] ["test", "body"],
    "DoWhileStatement" => ["body", "test"] ["body", "test"],
    "ForStatement" => ["body"] ["init", "test", "update", "body"],
    "ForInStatement" => ["left", "right", "body"] ["left", "right", "body"],
    "ForOfStatement" => ["left", "right", "body"] ["left", "right", "body"],
    "FunctionDeclaration" => ["params", "body"] ["id", "params", "body"],
    "VariableDeclaration" => ["declarations", "kind"] ["declarations"],
    "VariableDeclarator" => ["id"] ["id", "init"],
    "ClassDeclaration" => ["body"] ["id", "superClass", "body"],
    "Identifier" => ["name"] [],
    "Literal" => [] [],
    "ThisExpression" => [] [],
    "Super" => [] [],
    "ArrayExpression" => ["elements"] ["elements"],
    "ObjectExpression" => ["properties"] ["properties"],
    "Property" => ["key", "value"] ["key", "value"],
    "FunctionExpression" => ["params", "body"] ["id", "params", "body"],
    "ArrowFunctionExpression" => ["params", "body"] ["params", "body"],
    "UnaryExpression" => ["operator", "argument"] ["argument"],
    "UpdateExpression" => ["operator", "argument", "prefix"] ["argument"],
    "BinaryExpression" => ["operator", "left", "right"] ["left", "right"],
    "LogicalExpression" => ["operator", "left", "right"] ["left", "right"],
    "AssignmentExpression" => ["operator", "left", "right"] ["left", "right"],
    "ConditionalExpression" => ["test", "consequent", "alternate"] ["test", "consequent", "alternate"],
    "CallExpression" => ["callee", "arguments"] ["callee", "arguments"],
    "NewExpression" => ["callee", "arguments"] ["callee", "arguments"],
    "MemberExpression" => ["object", "property"] ["object", "property"],
    "ChainExpression" => ["expression"] ["expression"],
    "SequenceExpression" => ["expressions"] ["expressions"],
    "YieldExpression" => [] ["argument"],
    "AwaitExpression" => ["argument"] ["argument"],
    "TemplateLiteral" => ["quasis", "expressions"] ["quasis", "expressions"],
    "TemplateElement" => ["value"] [],
    "TaggedTemplateExpression" => ["tag", "quasi"] ["tag", "quasi"],
    "SpreadElement" => ["argument"] ["argument"],
    "ClassExpression" => ["body"] ["id", "superClass", "body"],
    "ClassBody" => ["body"] ["body"],
    "MethodDefinition" => ["key", "value", "kind"] ["key", "value"],
    "MetaProperty" => ["meta", "property"] ["meta", "property"],
    "ObjectPattern" => ["properties"] ["properties"],
    "ArrayPattern" => ["elements"] ["elements"],
    "RestElement" => ["argument"] ["argument"],
    "AssignmentPattern" => ["left", "right"] ["left", "right"],
    "ImportDeclaration" => ["specifiers", "source"] ["specifiers", "source"],
    "ImportSpecifier" => ["imported", "local"] ["imported", "local"],
    "ImportDefaultSpecifier" => ["local"] ["local"],
    "ImportNamespaceSpecifier" => ["local"] ["local"],
    "ExportNamedDeclaration" => [] ["declaration", "specifiers", "source"],
    "ExportSpecifier" => ["local", "exported"] ["local", "exported"],
    "ExportDefaultDeclaration" => ["declaration"] ["declaration"],
    "ExportAllDeclaration" => ["source"] ["source", "exported"],
};

fn shape_of(kind: &str) -> Option<&'static Shape> {
    SHAPES.iter().find(|s| s.kind == kind)
}

/// Whether `kind` names a node type this crate can generate
pub fn is_known_kind(kind: &str) -> bool {
    shape_of(kind).is_some()
}

/// Stack reserved per level of JSON nesting while loading
///
/// Internally tagged enums buffer each level before deserializing it, which
/// makes every level of a deep tree cost several frames.
const STACK_PER_LEVEL: usize = 32 * 1024;
const LOADER_RED_ZONE: usize = 256 * 1024;

/// Parse ESTree JSON text into a node, accepting up to
/// [`DEFAULT_MAX_DEPTH`] levels of node nesting
pub fn from_json(json: &str) -> Result<Node> {
    from_json_with_limit(json, DEFAULT_MAX_DEPTH)
}

/// Parse ESTree JSON text into a node, failing with
/// [`Error::DepthLimitExceeded`] past `max_depth` levels of node nesting
///
/// The text is measured before it is parsed; serde then runs on a stack
/// sized for the measured nesting.
pub fn from_json_with_limit(json: &str, max_depth: usize) -> Result<Node> {
    let nesting = text_nesting(json);
    if nesting > json_limit(max_depth) {
        return Err(Error::DepthLimitExceeded { limit: max_depth });
    }
    with_loader_stack(nesting, || {
        let malformed = |e: serde_json::Error| Error::malformed(NodeContext::new("<json>"), e.to_string());
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de).map_err(malformed)?;
        de.end().map_err(malformed)?;
        load(value, max_depth)
    })
}

/// Convert an ESTree JSON value into a node, accepting up to
/// [`DEFAULT_MAX_DEPTH`] levels of node nesting
pub fn from_value(value: Value) -> Result<Node> {
    from_value_with_limit(value, DEFAULT_MAX_DEPTH)
}

/// Convert an ESTree JSON value into a node, failing with
/// [`Error::DepthLimitExceeded`] past `max_depth` levels of node nesting
pub fn from_value_with_limit(value: Value, max_depth: usize) -> Result<Node> {
    let nesting = value_nesting(&value);
    if nesting > json_limit(max_depth) {
        dismantle(value);
        return Err(Error::DepthLimitExceeded { limit: max_depth });
    }
    with_loader_stack(nesting, move || load(value, max_depth))
}

fn load(value: Value, max_depth: usize) -> Result<Node> {
    check_node(&value, 0, max_depth)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    serde_json::from_value(value).map_err(|e| Error::malformed(NodeContext::new(kind), e.to_string()))
}

/// JSON nesting allowed for `max_depth` node levels: a node inside an array
/// field costs two levels, and `loc` adds two more at the leaves
fn json_limit(max_depth: usize) -> usize {
    max_depth.saturating_mul(2).saturating_add(8)
}

fn with_loader_stack<T>(nesting: usize, load: impl FnOnce() -> T) -> T {
    let needed = nesting.saturating_mul(STACK_PER_LEVEL).saturating_add(LOADER_RED_ZONE);
    stacker::maybe_grow(needed, needed, load)
}

/// Deepest `{`/`[` nesting in JSON text, ignoring string contents
fn text_nesting(json: &str) -> usize {
    let (mut depth, mut deepest) = (0usize, 0usize);
    let mut in_string = false;
    let mut escaped = false;
    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// Deepest array/object nesting of a JSON value
fn value_nesting(value: &Value) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(value, 1usize)];
    while let Some((value, depth)) = pending.pop() {
        match value {
            Value::Array(items) => {
                deepest = deepest.max(depth);
                pending.extend(items.iter().map(|item| (item, depth + 1)));
            }
            Value::Object(obj) => {
                deepest = deepest.max(depth);
                pending.extend(obj.values().map(|item| (item, depth + 1)));
            }
            _ => {}
        }
    }
    deepest
}

/// Drop a JSON value level by level instead of recursively
fn dismantle(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(obj) => pending.extend(obj.into_iter().map(|(_, item)| item)),
            _ => {}
        }
    }
}

fn range_of(obj: &Map<String, Value>) -> Option<[u32; 2]> {
    let range = obj.get("range")?.as_array()?;
    match range.as_slice() {
        [start, end] => Some([
            u32::try_from(start.as_u64()?).ok()?,
            u32::try_from(end.as_u64()?).ok()?,
        ]),
        _ => None,
    }
}

fn check_node(value: &Value, depth: usize, max_depth: usize) -> Result<()> {
    if depth >= max_depth {
        return Err(Error::DepthLimitExceeded { limit: max_depth });
    }
    let obj = match value {
        Value::Object(obj) => obj,
        other => {
            return Err(Error::malformed(
                NodeContext::new("<node>"),
                format!("expected a node object, found {}", json_type_name(other)),
            ))
        }
    };
    let kind = match obj.get("type") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(_) => {
            return Err(Error::malformed(NodeContext::new("<node>"), "`type` is not a string"))
        }
        None => return Err(Error::malformed(NodeContext::new("<node>"), "missing `type`")),
    };
    let shape = shape_of(kind).ok_or_else(|| Error::unsupported(kind))?;

    for field in shape.required {
        match obj.get(*field) {
            None | Some(Value::Null) => {
                return Err(Error::malformed(
                    NodeContext::new(kind).with_range(range_of(obj)),
                    format!("missing required field `{}`", field),
                ))
            }
            Some(_) => {}
        }
    }

    if kind == "Literal" && !obj.contains_key("value") && !obj.contains_key("regex") && !obj.contains_key("bigint") {
        return Err(Error::malformed(
            NodeContext::new(kind).with_range(range_of(obj)),
            "missing required field `value`",
        ));
    }

    for field in shape.children {
        match obj.get(*field) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items {
                    // holes in array literals and patterns
                    if !item.is_null() {
                        check_node(item, depth + 1, max_depth)?;
                    }
                }
            }
            Some(child) => check_node(child, depth + 1, max_depth)?,
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

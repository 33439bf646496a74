//! Shared test helpers for integration tests

use estree_codegen::{ast, generate, generate_with_comments, CommentRecord, GenerationOptions, Node, Output};
use serde_json::{json, Value};

/// Build a tree from an ESTree JSON value
#[allow(dead_code)]
pub fn tree(value: Value) -> Node {
    ast::from_value(value).unwrap_or_else(|e| panic!("bad test tree: {}", e))
}

/// Generate with default options and return the code
#[allow(dead_code)]
pub fn gen(value: Value) -> String {
    gen_with(value, &GenerationOptions::default())
}

/// Generate with compact options and return the code
#[allow(dead_code)]
pub fn gen_compact(value: Value) -> String {
    gen_with(value, &GenerationOptions::compact())
}

/// Generate with the given options and return the code
#[allow(dead_code)]
pub fn gen_with(value: Value, options: &GenerationOptions) -> String {
    code_of(generate(&tree(value), options).unwrap_or_else(|e| panic!("generation failed: {}", e)))
}

/// Generate with comments enabled
#[allow(dead_code)]
pub fn gen_commented(value: Value, comments: &[CommentRecord], source: &str) -> String {
    let options = GenerationOptions::default().with_comments(true).with_source_code(source);
    code_of(generate_with_comments(&tree(value), comments, &options).unwrap_or_else(|e| panic!("generation failed: {}", e)))
}

/// Generate and return the error category
#[allow(dead_code)]
pub fn gen_err(value: Value, options: &GenerationOptions) -> &'static str {
    match generate(&tree(value), options) {
        Ok(output) => panic!("expected an error, got {:?}", output),
        Err(e) => e.category(),
    }
}

#[allow(dead_code)]
pub fn code_of(output: Output) -> String {
    match output {
        Output::Code(code) => code,
        other => panic!("expected plain code, got {:?}", other),
    }
}

/// Collapse every run of whitespace to a single space
#[allow(dead_code)]
pub fn collapse_ws(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn on `RUST_LOG`-driven tracing output for a test run
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ========== Node builders ==========

#[allow(dead_code)]
pub fn id(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

#[allow(dead_code)]
pub fn num(value: f64) -> Value {
    json!({ "type": "Literal", "value": value })
}

#[allow(dead_code)]
pub fn string(value: &str) -> Value {
    json!({ "type": "Literal", "value": value })
}

#[allow(dead_code)]
pub fn binary(operator: &str, left: Value, right: Value) -> Value {
    json!({ "type": "BinaryExpression", "operator": operator, "left": left, "right": right })
}

#[allow(dead_code)]
pub fn logical(operator: &str, left: Value, right: Value) -> Value {
    json!({ "type": "LogicalExpression", "operator": operator, "left": left, "right": right })
}

#[allow(dead_code)]
pub fn unary(operator: &str, argument: Value) -> Value {
    json!({ "type": "UnaryExpression", "operator": operator, "prefix": true, "argument": argument })
}

#[allow(dead_code)]
pub fn assign(left: Value, right: Value) -> Value {
    json!({ "type": "AssignmentExpression", "operator": "=", "left": left, "right": right })
}

#[allow(dead_code)]
pub fn call(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "type": "CallExpression", "callee": callee, "arguments": arguments, "optional": false })
}

#[allow(dead_code)]
pub fn member(object: Value, property: &str) -> Value {
    json!({ "type": "MemberExpression", "object": object, "property": id(property), "computed": false, "optional": false })
}

#[allow(dead_code)]
pub fn array(elements: Vec<Value>) -> Value {
    json!({ "type": "ArrayExpression", "elements": elements })
}

#[allow(dead_code)]
pub fn expr_stmt(expression: Value) -> Value {
    json!({ "type": "ExpressionStatement", "expression": expression })
}

#[allow(dead_code)]
pub fn block(body: Vec<Value>) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

#[allow(dead_code)]
pub fn ret(argument: Option<Value>) -> Value {
    json!({ "type": "ReturnStatement", "argument": argument })
}

#[allow(dead_code)]
pub fn var(kind: &str, name: &str, init: Option<Value>) -> Value {
    json!({
        "type": "VariableDeclaration",
        "kind": kind,
        "declarations": [{ "type": "VariableDeclarator", "id": id(name), "init": init }]
    })
}

#[allow(dead_code)]
pub fn program(body: Vec<Value>) -> Value {
    json!({ "type": "Program", "sourceType": "script", "body": body })
}

#[allow(dead_code)]
pub fn module(body: Vec<Value>) -> Value {
    json!({ "type": "Program", "sourceType": "module", "body": body })
}

/// Attach a `[start, end)` range to a node
#[allow(dead_code)]
pub fn ranged(mut node: Value, start: u32, end: u32) -> Value {
    node["range"] = json!([start, end]);
    node
}

/// Attach a single-line `loc` to a node
#[allow(dead_code)]
pub fn located(mut node: Value, line: u32, column: u32, end_column: u32) -> Value {
    node["loc"] = json!({
        "start": { "line": line, "column": column },
        "end": { "line": line, "column": end_column }
    });
    node
}

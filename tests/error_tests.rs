//! Integration tests for error reporting

mod common;

use common::*;
use estree_codegen::options::DEFAULT_MAX_DEPTH;
use estree_codegen::{ast, generate_json, Error, GenerationOptions};
use pretty_assertions::assert_eq;
use serde_json::json;

mod input {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_node_kind() {
        let err = generate_json(r#"{"type":"JSXElement"}"#, &GenerationOptions::default()).unwrap_err();
        match err {
            Error::UnsupportedNodeKind { kind } => assert_eq!(kind, "JSXElement"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let json = r#"{"type":"IfStatement","test":{"type":"Identifier","name":"a"}}"#;
        let err = generate_json(json, &GenerationOptions::default()).unwrap_err();
        assert_eq!(err.category(), "MalformedNode");
        assert!(err.to_string().contains("consequent"));
    }

    #[test]
    fn test_invalid_json() {
        let err = generate_json("{", &GenerationOptions::default()).unwrap_err();
        assert_eq!(err.category(), "MalformedNode");
    }

    #[test]
    fn test_statement_in_expression_slot() {
        let tree = binary("+", id("a"), json!({ "type": "EmptyStatement" }));
        assert_eq!(gen_err(tree, &GenerationOptions::default()), "MalformedNode");
    }

    #[test]
    fn test_accessor_value_must_be_function() {
        let getter = json!({
            "type": "Property",
            "kind": "get",
            "key": id("x"),
            "value": id("notAFunction")
        });
        let object = json!({ "type": "ObjectExpression", "properties": [getter] });
        assert_eq!(gen_err(object, &GenerationOptions::default()), "MalformedNode");
    }
}

mod options {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_non_whitespace_indent() {
        let options = GenerationOptions::default().with_indent("xx", 0);
        assert_eq!(gen_err(id("a"), &options), "InvalidOption");
    }

    #[test]
    fn test_bad_newline() {
        let mut options = GenerationOptions::default();
        options.format.newline = "n".to_string();
        assert_eq!(gen_err(id("a"), &options), "InvalidOption");
    }

    #[test]
    fn test_options_json_type_mismatch() {
        let err = GenerationOptions::from_json(r#"{ "format": { "compact": "yes" } }"#).unwrap_err();
        assert_eq!(err.category(), "InvalidOption");
    }

    #[test]
    fn test_unknown_quote_style_falls_back() {
        let options = GenerationOptions::from_json(r#"{ "format": { "quotes": "backtick" } }"#).unwrap();
        assert_eq!(gen_with(string("a"), &options), "\"a\"");
    }
}

mod depth {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested_not(levels: usize) -> serde_json::Value {
        (0..levels).fold(id("x"), |inner, _| unary("!", inner))
    }

    #[test]
    fn test_limit_exceeded() {
        let options = GenerationOptions::default().with_max_depth(16);
        assert_eq!(gen_err(nested_not(64), &options), "DepthLimitExceeded");
    }

    #[test]
    fn test_deep_tree_within_limit() {
        let code = gen_with(nested_not(64), &GenerationOptions::default());
        assert_eq!(code, format!("{}x", "!".repeat(64)));
    }

    fn nested_not_text(levels: usize) -> String {
        let mut json = r#"{"type":"Identifier","name":"x"}"#.to_string();
        for _ in 0..levels {
            json = format!(r#"{{"type":"UnaryExpression","operator":"!","prefix":true,"argument":{}}}"#, json);
        }
        json
    }

    #[test]
    fn test_deep_json_fails_cleanly() {
        let json = nested_not_text(5_000);
        let err = generate_json(&json, &GenerationOptions::default()).unwrap_err();
        assert_eq!(err.category(), "DepthLimitExceeded");
        assert_eq!(ast::from_json(&json).unwrap_err().category(), "DepthLimitExceeded");
    }

    #[test]
    fn test_loading_follows_max_depth() {
        let json = nested_not_text(64);
        let options = GenerationOptions::default().with_max_depth(16);
        assert_eq!(generate_json(&json, &options).unwrap_err().category(), "DepthLimitExceeded");
        let code = generate_json(&json, &GenerationOptions::default()).unwrap();
        assert_eq!(code.code(), Some(format!("{}x", "!".repeat(64)).as_str()));
    }

    /// `x + x + ... + x` with `terms` operands, as JSON text
    fn chain_text(terms: usize) -> String {
        let x = r#"{"type":"Identifier","name":"x"}"#;
        (1..terms).fold(x.to_string(), |left, _| {
            format!(r#"{{"type":"BinaryExpression","operator":"+","left":{},"right":{}}}"#, left, x)
        })
    }

    #[test]
    fn test_long_concatenation_renders() {
        let output = generate_json(&chain_text(600), &GenerationOptions::default()).unwrap();
        assert_eq!(output.code(), Some(vec!["x"; 600].join(" + ").as_str()));
    }

    #[test]
    fn test_chain_at_default_limit() {
        let output = generate_json(&chain_text(DEFAULT_MAX_DEPTH), &GenerationOptions::default()).unwrap();
        assert_eq!(output.code().map(|code| code.matches('+').count()), Some(DEFAULT_MAX_DEPTH - 1));

        let err = ast::from_json(&chain_text(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(err.category(), "DepthLimitExceeded");
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let options = GenerationOptions::default().with_max_depth(0);
        assert_eq!(gen_err(id("x"), &options), "InvalidOption");
    }
}

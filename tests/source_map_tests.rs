//! Integration tests for source map output

mod common;

use common::*;
use estree_codegen::options::SourceMapOption;
use estree_codegen::source_map::SourceMapConsumer;
use estree_codegen::{generate, GenerationOptions, Output};
use pretty_assertions::assert_eq;
use serde_json::Value;

/// `a;\nb = c;` with locations
fn located_program() -> Value {
    let a = located(expr_stmt(located(id("a"), 1, 0, 1)), 1, 0, 2);
    let assignment = located(assign(located(id("b"), 2, 0, 1), located(id("c"), 2, 4, 5)), 2, 0, 5);
    let b = located(expr_stmt(assignment), 2, 0, 6);
    program(vec![a, b])
}

fn with_code(source: &str) -> GenerationOptions {
    GenerationOptions::default()
        .with_source_map(source)
        .with_source_map_with_code(true)
}

fn consume(output: &Output) -> SourceMapConsumer {
    let map = output.map().expect("expected a source map").clone();
    SourceMapConsumer::new(map).unwrap()
}

mod mappings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_and_map() {
        let output = generate(&tree(located_program()), &with_code("in.js")).unwrap();
        assert_eq!(output.code(), Some("a;\nb = c;"));

        let map = output.map().unwrap();
        assert_eq!(map.version, 3);
        assert_eq!(map.sources, vec!["in.js".to_string()]);
        assert!(map.names.contains(&"c".to_string()));
    }

    #[test]
    fn test_original_positions() {
        let output = generate(&tree(located_program()), &with_code("in.js")).unwrap();
        let consumer = consume(&output);

        let c = consumer.original_position_for(1, 4).unwrap();
        assert_eq!((c.line, c.column), (1, 4));
        assert_eq!(c.name.as_deref(), Some("c"));

        let a = consumer.original_position_for(0, 0).unwrap();
        assert_eq!((a.source.as_str(), a.line, a.column), ("in.js", 0, 0));
    }

    #[test]
    fn test_mappings_are_monotonic() {
        let output = generate(&tree(located_program()), &with_code("in.js")).unwrap();
        let consumer = consume(&output);
        let positions: Vec<(u32, u32)> = consumer
            .all_mappings()
            .iter()
            .map(|m| (m.generated_line, m.generated_column))
            .collect();
        assert!(!positions.is_empty());
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_generated_position_lookup() {
        let output = generate(&tree(located_program()), &with_code("in.js")).unwrap();
        let consumer = consume(&output);
        let generated = consumer.generated_position_for("in.js", 1, 4).unwrap();
        assert_eq!((generated.line, generated.column), (1, 4));
    }
}

mod options {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_without_code() {
        let options = GenerationOptions::default().with_source_map("in.js");
        let output = generate(&tree(located_program()), &options).unwrap();
        assert!(matches!(output, Output::Map(_)));
        assert_eq!(output.code(), None);
    }

    #[test]
    fn test_file_root_and_content() {
        let mut options = with_code("in.js");
        options.file = Some("out.js".to_string());
        options.source_map_root = Some("src/".to_string());
        options.source_content = Some("a;\nb = c;".to_string());
        let output = generate(&tree(located_program()), &options).unwrap();

        let json = output.map().unwrap().to_json().unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["file"], "out.js");
        assert_eq!(parsed["sourceRoot"], "src/");
        assert_eq!(parsed["sourcesContent"][0], "a;\nb = c;");
    }

    #[test]
    fn test_sources_from_node_locations() {
        let mut node = located(id("x"), 1, 0, 1);
        node["loc"]["source"] = Value::from("lib.js");
        let mut options = with_code("ignored");
        options.source_map = Some(SourceMapOption::Enabled(true));
        let output = generate(&tree(node), &options).unwrap();
        assert_eq!(output.map().unwrap().sources, vec!["lib.js".to_string()]);
    }

    #[test]
    fn test_disabled_map_returns_code() {
        let mut options = with_code("in.js");
        options.source_map = Some(SourceMapOption::Enabled(false));
        let output = generate(&tree(located_program()), &options).unwrap();
        assert_eq!(output, Output::Code("a;\nb = c;".to_string()));
    }
}

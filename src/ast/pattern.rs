//! Pattern AST node types for destructuring

use super::*;

/// Object destructuring pattern `{a, b: c, ...rest}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPattern {
    /// `Property` or `RestElement` nodes
    pub properties: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Array destructuring pattern `[a, , b]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPattern {
    /// Elements (None for elisions)
    pub elements: Vec<Option<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Rest pattern `...rest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestElement {
    pub argument: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Assignment pattern with default value `a = 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPattern {
    pub left: Box<Node>,
    pub right: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Node {
    /// Whether this node is a binding or assignment pattern
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            Node::Identifier(_)
                | Node::ObjectPattern(_)
                | Node::ArrayPattern(_)
                | Node::RestElement(_)
                | Node::AssignmentPattern(_)
                | Node::MemberExpression(_)
        )
    }

    /// All identifiers bound by this pattern
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_bound_names(&mut names);
        names
    }

    fn collect_bound_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Node::Identifier(id) => names.push(&id.name),
            Node::ArrayPattern(arr) => {
                for elem in arr.elements.iter().flatten() {
                    elem.collect_bound_names(names);
                }
            }
            Node::ObjectPattern(obj) => {
                for prop in &obj.properties {
                    match prop {
                        Node::Property(p) => p.value.collect_bound_names(names),
                        other => other.collect_bound_names(names),
                    }
                }
            }
            Node::AssignmentPattern(a) => a.left.collect_bound_names(names),
            Node::RestElement(r) => r.argument.collect_bound_names(names),
            // Member expressions don't bind names in declarations
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_names_of_nested_pattern() {
        let pattern: Node = serde_json::from_str(
            r#"{"type":"ObjectPattern","properties":[
                {"type":"Property","key":{"type":"Identifier","name":"a"},
                 "value":{"type":"Identifier","name":"a"},"shorthand":true},
                {"type":"Property","key":{"type":"Identifier","name":"b"},
                 "value":{"type":"ArrayPattern","elements":[null,{"type":"Identifier","name":"c"}]}},
                {"type":"RestElement","argument":{"type":"Identifier","name":"rest"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(pattern.bound_names(), vec!["a", "c", "rest"]);
    }
}

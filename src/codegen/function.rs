//! Functions, arrows, classes and object members

use super::{CodeGenerator, ExprFlags, Fragment, StmtFlags};
use crate::ast::*;
use crate::error::Result;
use crate::format::skip_trivia;
use crate::precedence::{starts_arrow_body_ambiguously, Precedence};

/// Whether `value` can be written as the shorthand of `key` (`{ a }`, `{ a = 1 }`)
fn is_shorthand_of(key: &Node, value: &Node) -> bool {
    let Some(name) = key.identifier_name() else {
        return false;
    };
    match value {
        Node::Identifier(id) => id.name == name,
        Node::AssignmentPattern(pattern) => pattern.left.identifier_name() == Some(name),
        _ => false,
    }
}

impl<'a> CodeGenerator<'a> {
    // ========== Functions ==========

    pub(super) fn gen_function_declaration(&mut self, node: &Node, function: &Function) -> Result<Fragment> {
        let mut out = self.async_prefix(function);
        out.push_str("function");
        if function.generator {
            out.push_str("*");
            out.push_str(self.space());
        } else {
            out.push_str(self.layout.non_empty_space());
        }
        if let Some(id) = &function.id {
            out.append(self.gen_identifier(id)?);
        }
        Ok(out.then_fragment(self.gen_function_body(node, function, false)?))
    }

    pub(super) fn gen_function_expression(&mut self, node: &Node, function: &Function) -> Result<Fragment> {
        let mut out = self.async_prefix(function);
        out.push_str("function");
        match &function.id {
            Some(id) => {
                if function.generator {
                    out.push_str("*");
                    out.push_str(self.space());
                } else {
                    out.push_str(self.layout.non_empty_space());
                }
                out.append(self.gen_identifier(id)?);
            }
            None => {
                if function.generator {
                    out.push_str("*");
                }
                out.push_str(self.space());
            }
        }
        Ok(out.then_fragment(self.gen_function_body(node, function, false)?))
    }

    pub(super) fn gen_arrow(&mut self, node: &Node, function: &Function) -> Result<Fragment> {
        self.gen_function_body(node, function, true)
    }

    /// `async ` before `function`, where a space is always required
    fn async_prefix(&self, function: &Function) -> Fragment {
        if function.is_async {
            Fragment::from("async").then(self.layout.non_empty_space())
        } else {
            Fragment::new()
        }
    }

    /// Parameters and body; for arrows also the `async` prefix and `=>`
    fn gen_function_body(&mut self, node: &Node, function: &Function, arrow: bool) -> Result<Fragment> {
        let mut out = self.gen_params(function, arrow)?;
        if arrow {
            out.push_str(self.space());
            out.push_str("=>");
        }
        match function.body.as_ref() {
            body @ Node::BlockStatement(_) => {
                out.append(self.gen_maybe_block(body, StmtFlags::ALLOW_IN | StmtFlags::FUNCTION_BODY)?);
            }
            body if arrow => {
                let expression = self.gen_expression(body, Precedence::Assignment, ExprFlags::all())?;
                let expression = if starts_arrow_body_ambiguously(skip_trivia(expression.text())) {
                    expression.parenthesized()
                } else {
                    expression
                };
                out.push_str(self.space());
                out.append(expression);
            }
            _ => return Err(self.malformed(node, "function body must be a BlockStatement")),
        }
        Ok(out)
    }

    fn gen_params(&mut self, function: &Function, arrow: bool) -> Result<Fragment> {
        if arrow {
            if let [param @ Node::Identifier(_)] = function.params.as_slice() {
                let param = self.gen_expression(param, Precedence::Assignment, ExprFlags::all())?;
                return Ok(self.async_prefix(function).then_fragment(param));
            }
        }

        let mut out = if arrow && function.is_async {
            Fragment::from("async").then(self.space())
        } else {
            Fragment::new()
        };
        out.push_str("(");
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
                out.push_str(self.space());
            }
            out.append(self.gen_element(param, ExprFlags::all())?);
        }
        Ok(out.then(")"))
    }

    fn expect_function<'n>(&self, parent: &Node, value: &'n Node) -> Result<&'n Function> {
        match value {
            Node::FunctionExpression(function) => Ok(function),
            _ => Err(self.malformed(parent, format!("method value must be a FunctionExpression, found {}", value.kind()))),
        }
    }

    /// Parameters and body of a method's `FunctionExpression` value
    fn gen_method_value(&mut self, value: &Node, function: &Function) -> Result<Fragment> {
        self.visit(value, |g| g.gen_function_body(value, function, false))
    }

    /// `async ` and `*` in front of a method key
    fn method_prefix(&self, function: &Function, computed: bool) -> Fragment {
        let mut prefix = Fragment::new();
        if function.is_async {
            prefix.push_str("async");
            prefix.push_str(if computed {
                self.space()
            } else {
                self.layout.non_empty_space()
            });
        }
        if function.generator {
            prefix.push_str("*");
        }
        prefix
    }

    fn gen_property_key(&mut self, key: &Node, computed: bool) -> Result<Fragment> {
        if computed {
            let key = self.gen_expression(key, Precedence::Assignment, ExprFlags::all())?;
            return Ok(Fragment::from("[").then_fragment(key).then("]"));
        }
        self.gen_expression(key, Precedence::Sequence, ExprFlags::all())
    }

    // ========== Object members ==========

    pub(super) fn gen_property(&mut self, node: &Node, property: &Property) -> Result<Fragment> {
        self.visit(node, |g| {
            if let PropertyKind::Get | PropertyKind::Set = property.kind {
                let function = g.expect_function(node, &property.value)?;
                let kind = if property.kind == PropertyKind::Get { "get" } else { "set" };
                let key = g.gen_property_key(&property.key, property.computed)?;
                let head = Fragment::from(kind).then(g.layout.non_empty_space()).then_fragment(key);
                return Ok(head.then_fragment(g.gen_method_value(&property.value, function)?));
            }

            if property.shorthand && !property.computed && is_shorthand_of(&property.key, &property.value) {
                return g.gen_expression(&property.value, Precedence::Assignment, ExprFlags::all());
            }

            if property.method {
                let function = g.expect_function(node, &property.value)?;
                let prefix = g.method_prefix(function, property.computed);
                let key = g.gen_property_key(&property.key, property.computed)?;
                return Ok(prefix
                    .then_fragment(key)
                    .then_fragment(g.gen_method_value(&property.value, function)?));
            }

            let key = g.gen_property_key(&property.key, property.computed)?;
            let value = g.gen_expression(&property.value, Precedence::Assignment, ExprFlags::all())?;
            Ok(key.then(":").then(g.space()).then_fragment(value))
        })
    }

    // ========== Classes ==========

    pub(super) fn gen_class(&mut self, class: &Class) -> Result<Fragment> {
        let mut out = Fragment::from("class");
        if let Some(id) = &class.id {
            let id = self.gen_identifier(id)?;
            out = self.join(out, id);
        }
        if let Some(super_class) = &class.super_class {
            let super_class = self.gen_expression(super_class, Precedence::Call, ExprFlags::all())?;
            let heritage = self.join(Fragment::from("extends"), super_class);
            out = self.join(out, heritage);
        }
        out.push_str(self.space());
        Ok(out.then_fragment(self.gen_class_body(&class.body)?))
    }

    pub(super) fn gen_class_body(&mut self, node: &Node) -> Result<Fragment> {
        let Node::ClassBody(body) = node else {
            return Err(self.misplaced(node, "a class body position"));
        };
        self.visit(node, |g| {
            if body.body.is_empty() {
                g.unterminated = false;
                return Ok(g.empty_container(node, "{", "}", false));
            }
            let members = g.with_indent(|g| {
                let mut out = Fragment::new();
                for (i, member) in body.body.iter().enumerate() {
                    if i > 0 && !out.ends_with_line_terminator() {
                        out.push_str(g.newline());
                    }
                    let member = g.gen_class_member(member)?;
                    out.append(g.indented(member));
                }
                Ok(out)
            })?;
            Ok(g.close_block(Fragment::from("{").then(g.newline()).then_fragment(members)))
        })
    }

    pub(super) fn gen_class_member(&mut self, node: &Node) -> Result<Fragment> {
        let Node::MethodDefinition(method) = node else {
            return Err(self.misplaced(node, "a class body"));
        };
        self.visit_clause(node, |g| {
            let function = g.expect_function(node, &method.value)?;
            let fragment = match method.kind {
                MethodKind::Get | MethodKind::Set => {
                    let kind = if method.kind == MethodKind::Get { "get" } else { "set" };
                    let key = g.gen_property_key(&method.key, method.computed)?;
                    let head = g.join(Fragment::from(kind), key);
                    head.then_fragment(g.gen_method_value(&method.value, function)?)
                }
                MethodKind::Constructor | MethodKind::Method => {
                    let prefix = g.method_prefix(function, method.computed);
                    let key = g.gen_property_key(&method.key, method.computed)?;
                    prefix
                        .then_fragment(key)
                        .then_fragment(g.gen_method_value(&method.value, function)?)
                }
            };
            if method.is_static {
                Ok(g.join(Fragment::from("static"), fragment))
            } else {
                Ok(fragment)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::from_json;
    use crate::options::GenerationOptions;
    use crate::{generate, Output};

    fn gen(json: &str, options: &GenerationOptions) -> String {
        match generate(&from_json(json).unwrap(), options).unwrap() {
            Output::Code(code) => code,
            other => panic!("unexpected output {:?}", other),
        }
    }

    fn id(name: &str) -> String {
        format!(r#"{{"type":"Identifier","name":"{}"}}"#, name)
    }

    fn function(kind: &str, extra: &str, params: &str, body: &str) -> String {
        format!(
            r#"{{"type":"{}","id":null,"params":[{}],"body":{}{}}}"#,
            kind, params, body, extra
        )
    }

    const EMPTY_BODY: &str = r#"{"type":"BlockStatement","body":[]}"#;

    #[test]
    fn function_declarations() {
        let json = format!(
            r#"{{"type":"FunctionDeclaration","id":{},"params":[{},{}],"body":{},"async":true,"generator":true}}"#,
            id("f"),
            id("a"),
            id("b"),
            EMPTY_BODY
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "async function* f(a, b) {}");
        assert_eq!(gen(&json, &GenerationOptions::compact()), "async function*f(a,b){}");
    }

    #[test]
    fn anonymous_function_expression() {
        let json = function("FunctionExpression", "", "", EMPTY_BODY);
        assert_eq!(gen(&json, &GenerationOptions::new()), "function () {}");
        assert_eq!(gen(&json, &GenerationOptions::compact()), "function(){}");
    }

    #[test]
    fn arrow_forms() {
        let single = function("ArrowFunctionExpression", "", &id("a"), &id("a"));
        assert_eq!(gen(&single, &GenerationOptions::new()), "a => a");
        assert_eq!(gen(&single, &GenerationOptions::compact()), "a=>a");

        let async_single = function("ArrowFunctionExpression", r#","async":true"#, &id("a"), &id("a"));
        assert_eq!(gen(&async_single, &GenerationOptions::compact()), "async a=>a");

        let pair = function("ArrowFunctionExpression", r#","async":true"#, &format!("{},{}", id("a"), id("b")), EMPTY_BODY);
        assert_eq!(gen(&pair, &GenerationOptions::new()), "async (a, b) => {}");

        let object_body = function(
            "ArrowFunctionExpression",
            "",
            "",
            r#"{"type":"ObjectExpression","properties":[]}"#,
        );
        assert_eq!(gen(&object_body, &GenerationOptions::new()), "() => ({})");
    }

    #[test]
    fn non_block_function_body_is_malformed() {
        let json = function("FunctionExpression", "", "", &id("a"));
        let err = generate(&from_json(&json).unwrap(), &GenerationOptions::new()).unwrap_err();
        assert_eq!(err.category(), "MalformedNode");
    }

    #[test]
    fn getter_property() {
        let body = format!(
            r#"{{"type":"BlockStatement","body":[{{"type":"ReturnStatement","argument":{}}}]}}"#,
            id("m_width")
        );
        let json = format!(
            r#"{{"type":"ObjectExpression","properties":[{{"type":"Property","kind":"get","key":{},"value":{}}}]}}"#,
            id("width"),
            function("FunctionExpression", "", "", &body)
        );
        assert_eq!(
            gen(&json, &GenerationOptions::new()),
            "{\n    get width() {\n        return m_width;\n    }\n}"
        );
        assert_eq!(gen(&json, &GenerationOptions::compact()), "{get width(){return m_width;}}");
    }

    #[test]
    fn shorthand_needs_matching_value() {
        let prop = |key: &str, value: &str| {
            format!(
                r#"{{"type":"ObjectExpression","properties":[{{"type":"Property","kind":"init","shorthand":true,"key":{},"value":{}}}]}}"#,
                id(key),
                id(value)
            )
        };
        assert_eq!(gen(&prop("a", "a"), &GenerationOptions::new()), "{ a }");
        assert_eq!(gen(&prop("a", "b"), &GenerationOptions::new()), "{ a: b }");
    }

    #[test]
    fn methods_with_prefixes() {
        let json = format!(
            r#"{{"type":"ObjectExpression","properties":[{{"type":"Property","kind":"init","method":true,"key":{},"value":{}}}]}}"#,
            id("run"),
            function("FunctionExpression", r#","async":true,"generator":true"#, "", EMPTY_BODY)
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "{ async *run() {} }");
    }

    #[test]
    fn class_with_heritage_and_members() {
        let method = |kind: &str, name: &str, is_static: bool| {
            format!(
                r#"{{"type":"MethodDefinition","kind":"{}","static":{},"key":{},"value":{}}}"#,
                kind,
                is_static,
                id(name),
                function("FunctionExpression", "", "", EMPTY_BODY)
            )
        };
        let json = format!(
            r#"{{"type":"ClassDeclaration","id":{},"superClass":{},"body":{{"type":"ClassBody","body":[{},{},{}]}}}}"#,
            id("A"),
            id("B"),
            method("constructor", "constructor", false),
            method("method", "create", true),
            method("get", "size", false)
        );
        assert_eq!(
            gen(&json, &GenerationOptions::new()),
            "class A extends B {\n    constructor() {}\n    static create() {}\n    get size() {}\n}"
        );
        assert_eq!(
            gen(&json, &GenerationOptions::compact()),
            "class A extends B{constructor(){}static create(){}get size(){}}"
        );
    }

    #[test]
    fn empty_class_body() {
        let json = format!(
            r#"{{"type":"ClassExpression","id":null,"superClass":null,"body":{{"type":"ClassBody","body":[]}}}}"#
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "class {}");
    }
}

//! Import and export declarations

use super::{CodeGenerator, ExprFlags, Fragment, StmtFlags};
use crate::ast::*;
use crate::error::Result;
use crate::format::skip_trivia;
use crate::precedence::{starts_default_export_ambiguously, Precedence};

/// Whether two module export names spell the same binding
fn same_module_name(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Identifier(a), Node::Identifier(b)) => a.name == b.name,
        (Node::Literal(a), Node::Literal(b)) => a.as_str().is_some() && a.as_str() == b.as_str(),
        _ => false,
    }
}

impl<'a> CodeGenerator<'a> {
    // ========== Imports ==========

    pub(super) fn gen_import(&mut self, node: &Node, decl: &ImportDeclaration, flags: StmtFlags) -> Result<Fragment> {
        let source = self.gen_module_source(node, &decl.source)?;
        if decl.specifiers.is_empty() {
            let out = Fragment::from("import").then(self.space()).then_fragment(source);
            return Ok(out.then(self.semicolon(flags)));
        }

        let mut out = Fragment::from("import");
        let mut rest: &[Node] = &decl.specifiers;
        if let Some(first @ Node::ImportDefaultSpecifier(_)) = rest.first() {
            let default = self.gen_specifier(first)?;
            out = self.join(out, default);
            rest = &rest[1..];
        }
        if rest.iter().any(|s| matches!(s, Node::ImportDefaultSpecifier(_))) {
            return Err(self.malformed(node, "default import must come first"));
        }
        if !rest.is_empty() {
            if rest.len() < decl.specifiers.len() {
                out.push_str(",");
            }
            out.push_str(self.space());
            match rest {
                [namespace @ Node::ImportNamespaceSpecifier(_)] => out.append(self.gen_specifier(namespace)?),
                _ if rest.iter().any(|s| matches!(s, Node::ImportNamespaceSpecifier(_))) => {
                    return Err(self.malformed(node, "namespace import cannot be combined with named imports"));
                }
                _ => out.append(self.gen_specifier_list(rest)?),
            }
        }

        let from = Fragment::from("from").then(self.space()).then_fragment(source);
        Ok(self.join(out, from).then(self.semicolon(flags)))
    }

    /// `{ a, b as c }`
    fn gen_specifier_list(&mut self, specifiers: &[Node]) -> Result<Fragment> {
        if specifiers.is_empty() {
            return Ok(Fragment::from("{}"));
        }
        let mut out = Fragment::from("{").then(self.space());
        for (i, specifier) in specifiers.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
                out.push_str(self.space());
            }
            out.append(self.gen_specifier(specifier)?);
        }
        Ok(out.then(self.space()).then("}"))
    }

    pub(super) fn gen_specifier(&mut self, node: &Node) -> Result<Fragment> {
        self.visit(node, |g| match node {
            Node::ImportSpecifier(s) => g.gen_aliased(&s.imported, &s.local),
            Node::ImportDefaultSpecifier(s) => g.gen_module_name(&s.local),
            Node::ImportNamespaceSpecifier(s) => {
                let local = g.gen_module_name(&s.local)?;
                let star = Fragment::from("*").then(g.space()).then("as");
                Ok(g.join(star, local))
            }
            Node::ExportSpecifier(s) => g.gen_aliased(&s.local, &s.exported),
            _ => Err(g.misplaced(node, "a module specifier list")),
        })
    }

    /// `name`, or `name as alias` when the two differ
    fn gen_aliased(&mut self, name: &Node, alias: &Node) -> Result<Fragment> {
        let rendered = self.gen_module_name(name)?;
        if same_module_name(name, alias) {
            return Ok(rendered);
        }
        let alias = self.gen_module_name(alias)?;
        let out = self.join_str(rendered, "as");
        Ok(self.join(out, alias))
    }

    /// An identifier or string literal naming a module binding
    fn gen_module_name(&mut self, node: &Node) -> Result<Fragment> {
        match node {
            Node::Identifier(_) => self.gen_identifier(node),
            Node::Literal(lit) if lit.as_str().is_some() => {
                self.gen_expression(node, Precedence::Primary, ExprFlags::all())
            }
            _ => Err(self.misplaced(node, "a module binding name")),
        }
    }

    fn gen_module_source(&mut self, parent: &Node, source: &Node) -> Result<Fragment> {
        match source {
            Node::Literal(lit) if lit.as_str().is_some() => {
                self.gen_expression(source, Precedence::Primary, ExprFlags::all())
            }
            _ => Err(self.malformed(parent, format!("module source must be a string Literal, found {}", source.kind()))),
        }
    }

    // ========== Exports ==========

    pub(super) fn gen_export_named(
        &mut self,
        node: &Node,
        decl: &ExportNamedDeclaration,
        flags: StmtFlags,
    ) -> Result<Fragment> {
        if let Some(declaration) = &decl.declaration {
            if !matches!(
                declaration.as_ref(),
                Node::VariableDeclaration(_) | Node::FunctionDeclaration(_) | Node::ClassDeclaration(_)
            ) {
                return Err(self.misplaced(declaration, "an export declaration"));
            }
            let declaration = self.gen_statement(declaration, flags)?;
            return Ok(self.join(Fragment::from("export"), declaration));
        }

        let specifiers = self.gen_specifier_list(&decl.specifiers)?;
        let out = Fragment::from("export").then(self.space()).then_fragment(specifiers);
        match &decl.source {
            Some(source) => {
                let source = self.gen_module_source(node, source)?;
                let from = Fragment::from("from").then(self.space()).then_fragment(source);
                Ok(self.join(out, from).then(self.semicolon(flags)))
            }
            None => Ok(out.then(self.semicolon(flags))),
        }
    }

    pub(super) fn gen_export_default(&mut self, decl: &ExportDefaultDeclaration, flags: StmtFlags) -> Result<Fragment> {
        let keyword = Fragment::from("export default");
        let declaration = decl.declaration.as_ref();
        if let Node::FunctionDeclaration(_) | Node::ClassDeclaration(_) = declaration {
            let declaration = self.gen_statement(declaration, flags)?;
            return Ok(self.join(keyword, declaration));
        }

        let expression = self.gen_expression(declaration, Precedence::Assignment, ExprFlags::all())?;
        let expression = if starts_default_export_ambiguously(skip_trivia(expression.text())) {
            expression.parenthesized()
        } else {
            expression
        };
        Ok(self.join(keyword, expression).then(self.semicolon(flags)))
    }

    pub(super) fn gen_export_all(&mut self, node: &Node, decl: &ExportAllDeclaration, flags: StmtFlags) -> Result<Fragment> {
        let mut out = Fragment::from("export").then(self.space()).then("*");
        if let Some(exported) = &decl.exported {
            let exported = self.gen_module_name(exported)?;
            let with_as = self.join_str(out, "as");
            out = self.join(with_as, exported);
        }
        let source = self.gen_module_source(node, &decl.source)?;
        let from = Fragment::from("from").then(self.space()).then_fragment(source);
        Ok(self.join(out, from).then(self.semicolon(flags)))
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

    const SOURCE: &str = r#"{"type":"Literal","value":"m"}"#;

    fn import(specifiers: &str) -> String {
        format!(r#"{{"type":"ImportDeclaration","specifiers":[{}],"source":{}}}"#, specifiers, SOURCE)
    }

    #[test]
    fn import_forms() {
        let default = format!(r#"{{"type":"ImportDefaultSpecifier","local":{}}}"#, id("a"));
        let named = format!(r#"{{"type":"ImportSpecifier","imported":{},"local":{}}}"#, id("b"), id("c"));
        let same = format!(r#"{{"type":"ImportSpecifier","imported":{},"local":{}}}"#, id("d"), id("d"));
        let namespace = format!(r#"{{"type":"ImportNamespaceSpecifier","local":{}}}"#, id("ns"));

        let both = import(&format!("{},{},{}", default, named, same));
        assert_eq!(gen(&both, &GenerationOptions::new()), "import a, { b as c, d } from 'm';");
        assert_eq!(gen(&both, &GenerationOptions::compact()), "import a,{b as c,d}from'm';");
        assert_eq!(gen(&import(&namespace), &GenerationOptions::new()), "import * as ns from 'm';");
        assert_eq!(gen(&import(""), &GenerationOptions::new()), "import 'm';");
    }

    #[test]
    fn export_forms() {
        let spec = format!(r#"{{"type":"ExportSpecifier","local":{},"exported":{}}}"#, id("a"), id("b"));
        let named = format!(
            r#"{{"type":"ExportNamedDeclaration","declaration":null,"specifiers":[{}],"source":{}}}"#,
            spec, SOURCE
        );
        assert_eq!(gen(&named, &GenerationOptions::new()), "export { a as b } from 'm';");

        let all = format!(r#"{{"type":"ExportAllDeclaration","source":{},"exported":{}}}"#, SOURCE, id("ns"));
        assert_eq!(gen(&all, &GenerationOptions::new()), "export * as ns from 'm';");
        assert_eq!(gen(&all, &GenerationOptions::compact()), "export*as ns from'm';");

        let var = format!(
            r#"{{"type":"ExportNamedDeclaration","declaration":{{"type":"VariableDeclaration","kind":"const",
                "declarations":[{{"type":"VariableDeclarator","id":{},"init":{{"type":"Literal","value":1}}}}]}},"specifiers":[]}}"#,
            id("x")
        );
        assert_eq!(gen(&var, &GenerationOptions::new()), "export const x = 1;");
    }

    #[test]
    fn export_default() {
        let function = r#"{"type":"ExportDefaultDeclaration","declaration":{"type":"FunctionDeclaration","id":null,
            "params":[],"body":{"type":"BlockStatement","body":[]}}}"#;
        assert_eq!(gen(function, &GenerationOptions::new()), "export default function () {}");

        let expression = format!(
            r#"{{"type":"ExportDefaultDeclaration","declaration":{{"type":"SequenceExpression","expressions":[{},{}]}}}}"#,
            id("a"),
            id("b")
        );
        assert_eq!(gen(&expression, &GenerationOptions::new()), "export default (a, b);");
    }

    #[test]
    fn non_string_source_is_malformed() {
        let json = format!(r#"{{"type":"ImportDeclaration","specifiers":[],"source":{}}}"#, id("m"));
        let err = generate(&from_json(&json).unwrap(), &GenerationOptions::new()).unwrap_err();
        assert_eq!(err.category(), "MalformedNode");
    }
}

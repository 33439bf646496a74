//! Statement rendering

use super::{CodeGenerator, ExprFlags, Fragment, StmtFlags};
use crate::ast::*;
use crate::error::Result;
use crate::format::{escape_directive, is_asi_hazard, is_line_terminator, skip_trivia};
use crate::precedence::{starts_statement_ambiguously, Precedence};

/// Whether `node` ends in an `if` without `else`, which would capture an
/// `else` written after it
fn ends_with_open_if(node: &Node) -> bool {
    match node {
        Node::IfStatement(s) => match &s.alternate {
            Some(alternate) => ends_with_open_if(alternate),
            None => true,
        },
        Node::LabeledStatement(s) => ends_with_open_if(&s.body),
        Node::WhileStatement(s) => ends_with_open_if(&s.body),
        Node::WithStatement(s) => ends_with_open_if(&s.body),
        Node::ForStatement(s) => ends_with_open_if(&s.body),
        Node::ForInStatement(s) => ends_with_open_if(&s.body),
        Node::ForOfStatement(s) => ends_with_open_if(&s.body),
        _ => false,
    }
}

fn is_string_literal(node: &Node) -> bool {
    matches!(node, Node::Literal(lit) if lit.as_str().is_some())
}

impl<'a> CodeGenerator<'a> {
    // ========== Statements ==========

    pub(crate) fn gen_statement(&mut self, node: &Node, flags: StmtFlags) -> Result<Fragment> {
        let fragment = self.nested(|g| g.gen_statement_kind(node, flags))?;
        Ok(self.decorate(node, fragment, true))
    }

    fn gen_statement_kind(&mut self, node: &Node, flags: StmtFlags) -> Result<Fragment> {
        match node {
            Node::Program(program) => self.gen_program(node, program),
            Node::BlockStatement(block) => self.gen_block(node, block, flags),
            Node::ExpressionStatement(stmt) => self.gen_expression_statement(stmt, flags),
            Node::EmptyStatement(_) => {
                self.unterminated = false;
                Ok(Fragment::from(";"))
            }
            Node::DebuggerStatement(_) => Ok(Fragment::from("debugger").then(self.semicolon(flags))),
            Node::VariableDeclaration(decl) => {
                let declaration = self.gen_variable_declaration(node, decl, flags.contains(StmtFlags::ALLOW_IN))?;
                Ok(declaration.then(self.semicolon(flags)))
            }
            Node::FunctionDeclaration(function) => self.gen_function_declaration(node, function),
            Node::ClassDeclaration(class) => self.gen_class(class),
            Node::IfStatement(stmt) => self.gen_if(stmt, flags),
            Node::WhileStatement(stmt) => {
                let test = self.with_indent(|g| g.gen_expression(&stmt.test, Precedence::Sequence, ExprFlags::all()))?;
                self.gen_loop_like("while", test, &stmt.body, flags)
            }
            Node::WithStatement(stmt) => {
                let object =
                    self.with_indent(|g| g.gen_expression(&stmt.object, Precedence::Sequence, ExprFlags::all()))?;
                self.gen_loop_like("with", object, &stmt.body, flags)
            }
            Node::DoWhileStatement(stmt) => self.gen_do_while(stmt, flags),
            Node::ForStatement(stmt) => self.gen_for(stmt, flags),
            Node::ForInStatement(stmt) => self.gen_for_in_of("in", &stmt.left, &stmt.right, &stmt.body, false, flags),
            Node::ForOfStatement(stmt) => {
                self.gen_for_in_of("of", &stmt.left, &stmt.right, &stmt.body, stmt.is_await, flags)
            }
            Node::LabeledStatement(stmt) => {
                let label = self.gen_expression(&stmt.label, Precedence::Primary, ExprFlags::all())?;
                let body_flags = StmtFlags::ALLOW_IN | (flags & StmtFlags::SEMICOLON_OPTIONAL);
                let body = self.gen_maybe_block(&stmt.body, body_flags)?;
                Ok(label.then(":").then_fragment(body))
            }
            Node::BreakStatement(stmt) => self.gen_jump("break", stmt, flags),
            Node::ContinueStatement(stmt) => self.gen_jump("continue", stmt, flags),
            Node::ReturnStatement(stmt) => {
                let keyword = Fragment::from("return");
                let out = match &stmt.argument {
                    Some(argument) => {
                        let argument = self.gen_expression(argument, Precedence::Sequence, ExprFlags::all())?;
                        self.join(keyword, self.guard_restricted(argument))
                    }
                    None => keyword,
                };
                Ok(out.then(self.semicolon(flags)))
            }
            Node::ThrowStatement(stmt) => {
                let argument = self.gen_expression(&stmt.argument, Precedence::Sequence, ExprFlags::all())?;
                let out = self.join(Fragment::from("throw"), self.guard_restricted(argument));
                Ok(out.then(self.semicolon(flags)))
            }
            Node::TryStatement(stmt) => self.gen_try(node, stmt),
            Node::SwitchStatement(stmt) => self.gen_switch(node, stmt),
            Node::ImportDeclaration(decl) => self.gen_import(node, decl, flags),
            Node::ExportNamedDeclaration(decl) => self.gen_export_named(node, decl, flags),
            Node::ExportDefaultDeclaration(decl) => self.gen_export_default(decl, flags),
            Node::ExportAllDeclaration(decl) => self.gen_export_all(node, decl, flags),
            Node::SwitchCase(_) => Err(self.misplaced(node, "a statement list")),
            Node::CatchClause(_) | Node::VariableDeclarator(_) => Err(self.misplaced(node, "a statement list")),
            _ => Err(self.misplaced(node, "a statement position")),
        }
    }

    fn gen_program(&mut self, node: &Node, program: &Program) -> Result<Fragment> {
        if program.body.is_empty() {
            let comments = if self.options.comment {
                self.take_comments(self.comments.inner(node))
            } else {
                Vec::new()
            };
            let mut out = Fragment::new();
            for comment in comments {
                if !out.is_empty() && !out.ends_with_line_terminator() {
                    out.push_str(self.newline());
                }
                out.push_str(&self.base);
                out.push_str(&comment.text());
            }
            return Ok(out);
        }
        self.gen_statement_list(&program.body, StmtFlags::ALLOW_IN | StmtFlags::DIRECTIVE_CONTEXT, true)
    }

    /// Statements one per line at the current indentation
    ///
    /// The directive context ends at the first statement that is not a
    /// directive. When the previous statement was left without its semicolon
    /// and the next one starts with a character that would continue it, a
    /// `;` is put in front of the next one.
    fn gen_statement_list(&mut self, body: &[Node], mut flags: StmtFlags, semicolon_optional: bool) -> Result<Fragment> {
        let mut out = Fragment::new();
        self.unterminated = false;
        for (i, stmt) in body.iter().enumerate() {
            let mut item_flags = flags;
            if semicolon_optional && i + 1 == body.len() {
                item_flags |= StmtFlags::SEMICOLON_OPTIONAL;
            }
            let open = self.unterminated;
            let blank_line = i > 0 && self.blank_line_between_nodes(&body[i - 1], stmt);
            let mut fragment = self.gen_statement(stmt, item_flags)?;
            if !self.is_directive(stmt) {
                flags.remove(StmtFlags::DIRECTIVE_CONTEXT);
            }

            if i > 0 {
                if !out.ends_with_line_terminator() {
                    out.push_str(self.newline());
                }
                if blank_line {
                    out.push_str(self.newline());
                }
            }
            if open && skip_trivia(fragment.text()).starts_with(is_asi_hazard) {
                self.trace_asi(stmt);
                fragment = fragment.prepend(";");
            }
            out.append(self.indented(fragment));
        }
        Ok(out)
    }

    fn is_directive(&self, stmt: &Node) -> bool {
        matches!(stmt, Node::ExpressionStatement(s) if s.directive.is_some() && is_string_literal(&s.expression))
    }

    fn gen_block(&mut self, node: &Node, block: &BlockStatement, flags: StmtFlags) -> Result<Fragment> {
        if block.body.is_empty() {
            self.unterminated = false;
            return Ok(self.empty_container(node, "{", "}", false));
        }
        let mut body_flags = StmtFlags::ALLOW_IN;
        if flags.contains(StmtFlags::FUNCTION_BODY) {
            body_flags |= StmtFlags::DIRECTIVE_CONTEXT;
        }
        let body = self.with_indent(|g| g.gen_statement_list(&block.body, body_flags, true))?;
        Ok(self.close_block(Fragment::from("{").then(self.newline()).then_fragment(body)))
    }

    /// Finish a `{`-opened body with a line break and the closing brace
    pub(super) fn close_block(&mut self, mut out: Fragment) -> Fragment {
        if !out.ends_with_line_terminator() {
            out.push_str(self.newline());
        }
        out.push_str(&self.base);
        out.push_str("}");
        self.unterminated = false;
        out
    }

    fn gen_expression_statement(&mut self, stmt: &ExpressionStatement, flags: StmtFlags) -> Result<Fragment> {
        let prologue = self.options.directive && flags.contains(StmtFlags::DIRECTIVE_CONTEXT);
        if prologue {
            if let (Some(directive), Node::Literal(lit)) = (&stmt.directive, stmt.expression.as_ref()) {
                if lit.as_str().is_some() {
                    let text = match &lit.raw {
                        Some(raw) if self.options.format.raw => raw.clone(),
                        _ => escape_directive(directive, self.options.format.quotes),
                    };
                    let fragment = self.decorate(&stmt.expression, Fragment::from(text), false);
                    return Ok(fragment.then(self.semicolon(flags)));
                }
            }
        }

        let expression = self.gen_expression(&stmt.expression, Precedence::Sequence, ExprFlags::all())?;
        let wrap = starts_statement_ambiguously(skip_trivia(expression.text()))
            || (prologue && is_string_literal(&stmt.expression));
        let expression = if wrap { expression.parenthesized() } else { expression };
        Ok(expression.then(self.semicolon(flags)))
    }

    /// Variable declaration without its terminator
    pub(crate) fn gen_variable_declaration(
        &mut self,
        node: &Node,
        decl: &VariableDeclaration,
        allow_in: bool,
    ) -> Result<Fragment> {
        if decl.declarations.is_empty() {
            return Err(self.malformed(node, "declaration has no declarators"));
        }
        let flags = if allow_in {
            ExprFlags::all()
        } else {
            ExprFlags::ALLOW_UNPARENTHESIZED_NEW
        };
        let mut out = Fragment::from(decl.kind.as_str()).then(self.layout.non_empty_space());
        for (i, declarator) in decl.declarations.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
                out.push_str(self.space());
            }
            out.append(self.gen_declarator(declarator, flags)?);
        }
        Ok(out)
    }

    pub(super) fn gen_declarator(&mut self, node: &Node, flags: ExprFlags) -> Result<Fragment> {
        let Node::VariableDeclarator(declarator) = node else {
            return Err(self.misplaced(node, "a variable declaration"));
        };
        self.visit(node, |g| {
            let id = g.gen_expression(&declarator.id, Precedence::Assignment, flags)?;
            match &declarator.init {
                Some(init) => {
                    let init = g.gen_expression(init, Precedence::Assignment, flags)?;
                    Ok(id.then(g.space()).then("=").then(g.space()).then_fragment(init))
                }
                None => Ok(id),
            }
        })
    }

    // ========== Compound statements ==========

    /// Body of a compound statement: blocks stay on the header line, anything
    /// else moves to its own line one level deeper
    pub(super) fn gen_maybe_block(&mut self, body: &Node, flags: StmtFlags) -> Result<Fragment> {
        let plain = !self.has_leading_comments(body);
        match body {
            Node::BlockStatement(_) if plain => {
                let block = self.gen_statement(body, flags)?;
                Ok(Fragment::from(self.space()).then_fragment(block))
            }
            Node::EmptyStatement(_) if plain => self.gen_statement(body, flags),
            _ => self.with_indent(|g| {
                let stmt = g.gen_statement(body, flags)?;
                Ok(Fragment::from(g.newline()).then_fragment(g.indented(stmt)))
            }),
        }
    }

    fn is_plain_block(&self, body: &Node) -> bool {
        matches!(body, Node::BlockStatement(_)) && !self.has_leading_comments(body)
    }

    /// Spacing after a compound statement body when another keyword follows
    /// (`else`, `while`, `catch`, `finally`)
    fn gen_maybe_block_suffix(&self, body_is_block: bool, mut out: Fragment) -> Fragment {
        let ends = out.ends_with_line_terminator();
        if body_is_block && !ends {
            out.push_str(self.space());
        } else if ends {
            out.push_str(&self.base);
        } else {
            out.push_str(self.newline());
            out.push_str(&self.base);
        }
        out
    }

    /// `{ stmt }` around a consequent that would otherwise capture a
    /// following `else`
    fn gen_forced_block(&mut self, body: &Node) -> Result<Fragment> {
        let inner = self.with_indent(|g| {
            let stmt = g.gen_statement(body, StmtFlags::ALLOW_IN)?;
            Ok(g.indented(stmt))
        })?;
        let open = Fragment::from(self.space()).then("{").then(self.newline()).then_fragment(inner);
        Ok(self.close_block(open))
    }

    fn gen_if(&mut self, stmt: &IfStatement, flags: StmtFlags) -> Result<Fragment> {
        let test = self.with_indent(|g| g.gen_expression(&stmt.test, Precedence::Sequence, ExprFlags::all()))?;
        let mut out = Fragment::from("if").then(self.space()).then("(").then_fragment(test).then(")");
        let body_flags = StmtFlags::ALLOW_IN | (flags & StmtFlags::SEMICOLON_OPTIONAL);

        let Some(alternate) = &stmt.alternate else {
            out.append(self.gen_maybe_block(&stmt.consequent, body_flags)?);
            return Ok(out);
        };

        if ends_with_open_if(&stmt.consequent) {
            out.append(self.gen_forced_block(&stmt.consequent)?);
            out = self.gen_maybe_block_suffix(true, out);
        } else {
            out.append(self.gen_maybe_block(&stmt.consequent, StmtFlags::ALLOW_IN)?);
            out = self.gen_maybe_block_suffix(self.is_plain_block(&stmt.consequent), out);
        }

        let alternate = if matches!(alternate.as_ref(), Node::IfStatement(_)) {
            let chained = self.gen_statement(alternate, body_flags)?;
            Fragment::from("else ").then_fragment(chained)
        } else {
            let body = self.gen_maybe_block(alternate, body_flags)?;
            self.join(Fragment::from("else"), body)
        };
        Ok(self.join(out, alternate))
    }

    /// `keyword (head) body` for `while` and `with`
    fn gen_loop_like(&mut self, keyword: &str, head: Fragment, body: &Node, flags: StmtFlags) -> Result<Fragment> {
        let out = Fragment::from(keyword).then(self.space()).then("(").then_fragment(head).then(")");
        let body_flags = StmtFlags::ALLOW_IN | (flags & StmtFlags::SEMICOLON_OPTIONAL);
        Ok(out.then_fragment(self.gen_maybe_block(body, body_flags)?))
    }

    fn gen_do_while(&mut self, stmt: &DoWhileStatement, flags: StmtFlags) -> Result<Fragment> {
        let body = self.gen_maybe_block(&stmt.body, StmtFlags::ALLOW_IN)?;
        let out = self.join(Fragment::from("do"), body);
        let out = self.gen_maybe_block_suffix(self.is_plain_block(&stmt.body), out);
        let test = self.gen_expression(&stmt.test, Precedence::Sequence, ExprFlags::all())?;
        let tail = Fragment::from("while").then(self.space()).then("(").then_fragment(test).then(")");
        let tail = tail.then(self.semicolon(flags));
        Ok(self.join(out, tail))
    }

    fn gen_for(&mut self, stmt: &ForStatement, flags: StmtFlags) -> Result<Fragment> {
        let header = self.with_indent(|g| {
            let mut out = Fragment::from("for").then(g.space()).then("(");
            match stmt.init.as_deref() {
                Some(init @ Node::VariableDeclaration(decl)) => {
                    out.append(g.visit(init, |g| g.gen_variable_declaration(init, decl, false))?);
                }
                Some(init) => {
                    out.append(g.gen_expression(init, Precedence::Sequence, ExprFlags::ALLOW_UNPARENTHESIZED_NEW)?);
                }
                None => {}
            }
            out.push_str(";");
            if let Some(test) = &stmt.test {
                out.push_str(g.space());
                out.append(g.gen_expression(test, Precedence::Sequence, ExprFlags::all())?);
            }
            out.push_str(";");
            if let Some(update) = &stmt.update {
                out.push_str(g.space());
                out.append(g.gen_expression(update, Precedence::Sequence, ExprFlags::all())?);
            }
            out.push_str(")");
            Ok(out)
        })?;
        let body_flags = StmtFlags::ALLOW_IN | (flags & StmtFlags::SEMICOLON_OPTIONAL);
        Ok(header.then_fragment(self.gen_maybe_block(&stmt.body, body_flags)?))
    }

    fn gen_for_in_of(
        &mut self,
        keyword: &str,
        left: &Node,
        right: &Node,
        body: &Node,
        is_await: bool,
        flags: StmtFlags,
    ) -> Result<Fragment> {
        let mut out = Fragment::from("for");
        if is_await {
            out.push_str(self.layout.non_empty_space());
            out.push_str("await");
        }
        out.push_str(self.space());
        out.push_str("(");
        let head = self.with_indent(|g| {
            let left = g.gen_for_left(left)?;
            let head = g.join_str(left, keyword);
            // for-of takes an AssignmentExpression, for-in a full Expression
            let right_slot = if keyword == "of" {
                Precedence::Assignment
            } else {
                Precedence::Sequence
            };
            let right = g.gen_expression(right, right_slot, ExprFlags::all())?;
            Ok(g.join(head, right).then(")"))
        })?;
        out.append(head);
        let body_flags = StmtFlags::ALLOW_IN | (flags & StmtFlags::SEMICOLON_OPTIONAL);
        Ok(out.then_fragment(self.gen_maybe_block(body, body_flags)?))
    }

    fn gen_for_left(&mut self, left: &Node) -> Result<Fragment> {
        match left {
            Node::VariableDeclaration(decl) => {
                if decl.declarations.len() != 1 {
                    return Err(self.malformed(left, "for-in/of declaration must bind exactly one declarator"));
                }
                self.visit(left, |g| g.gen_variable_declaration(left, decl, false))
            }
            _ => self.gen_expression(left, Precedence::Call, ExprFlags::all()),
        }
    }

    fn gen_jump(&mut self, keyword: &str, stmt: &JumpStatement, flags: StmtFlags) -> Result<Fragment> {
        let mut out = Fragment::from(keyword);
        if let Some(label) = &stmt.label {
            let label = self.gen_expression(label, Precedence::Primary, ExprFlags::all())?;
            out = self.join(out, label);
        }
        Ok(out.then(self.semicolon(flags)))
    }

    /// Parenthesize an operand whose leading comments would put a line break
    /// right after `return`, `throw` or `yield`
    pub(crate) fn guard_restricted(&self, fragment: Fragment) -> Fragment {
        let breaks_line = {
            let text = fragment.text();
            text[..text.len() - skip_trivia(text).len()].contains(is_line_terminator)
        };
        if breaks_line {
            fragment.parenthesized()
        } else {
            fragment
        }
    }

    fn gen_switch(&mut self, node: &Node, stmt: &SwitchStatement) -> Result<Fragment> {
        let discriminant =
            self.with_indent(|g| g.gen_expression(&stmt.discriminant, Precedence::Sequence, ExprFlags::all()))?;
        let mut out = Fragment::from("switch")
            .then(self.space())
            .then("(")
            .then_fragment(discriminant)
            .then(")")
            .then(self.space());
        if stmt.cases.is_empty() {
            self.unterminated = false;
            return Ok(out.then_fragment(self.empty_container(node, "{", "}", false)));
        }

        out.push_str("{");
        out.push_str(self.newline());
        for (i, case) in stmt.cases.iter().enumerate() {
            let mut case_flags = StmtFlags::ALLOW_IN;
            if i + 1 == stmt.cases.len() {
                case_flags |= StmtFlags::SEMICOLON_OPTIONAL;
            }
            let fragment = self.gen_switch_case(case, case_flags)?;
            out.append(self.indented(fragment));
            if !out.ends_with_line_terminator() {
                out.push_str(self.newline());
            }
        }
        out.push_str(&self.base);
        out.push_str("}");
        self.unterminated = false;
        Ok(out)
    }

    pub(super) fn gen_switch_case(&mut self, node: &Node, flags: StmtFlags) -> Result<Fragment> {
        let Node::SwitchCase(case) = node else {
            return Err(self.misplaced(node, "a switch statement"));
        };
        self.visit_clause(node, |g| {
            g.with_indent(|g| {
                let mut out = match &case.test {
                    Some(test) => {
                        let test = g.gen_expression(test, Precedence::Sequence, ExprFlags::all())?;
                        g.join(Fragment::from("case"), test).then(":")
                    }
                    None => Fragment::from("default:"),
                };
                let mut rest: &[Node] = &case.consequent;
                if let Some(first) = rest.first() {
                    if g.is_plain_block(first) {
                        out.append(g.gen_maybe_block(first, StmtFlags::ALLOW_IN)?);
                        rest = &rest[1..];
                    }
                }
                if !rest.is_empty() {
                    if !out.ends_with_line_terminator() {
                        out.push_str(g.newline());
                    }
                    let semicolon_optional = flags.contains(StmtFlags::SEMICOLON_OPTIONAL);
                    out.append(g.gen_statement_list(rest, StmtFlags::ALLOW_IN, semicolon_optional)?);
                }
                Ok(out)
            })
        })
    }

    fn gen_try(&mut self, node: &Node, stmt: &TryStatement) -> Result<Fragment> {
        if stmt.handler.is_none() && stmt.finalizer.is_none() {
            return Err(self.malformed(node, "try statement needs a catch clause or a finally block"));
        }
        self.expect_block(&stmt.block)?;
        let block = self.gen_maybe_block(&stmt.block, StmtFlags::ALLOW_IN)?;
        let mut out = Fragment::from("try").then_fragment(block);
        out = self.gen_maybe_block_suffix(self.is_plain_block(&stmt.block), out);

        if let Some(handler) = &stmt.handler {
            let clause = self.gen_catch_clause(handler)?;
            out = self.join(out, clause);
            if stmt.finalizer.is_some() {
                let body_is_block = match handler.as_ref() {
                    Node::CatchClause(clause) => self.is_plain_block(&clause.body),
                    _ => false,
                };
                out = self.gen_maybe_block_suffix(body_is_block, out);
            }
        }
        if let Some(finalizer) = &stmt.finalizer {
            self.expect_block(finalizer)?;
            let body = self.gen_maybe_block(finalizer, StmtFlags::ALLOW_IN)?;
            out = self.join(out, Fragment::from("finally").then_fragment(body));
        }
        Ok(out)
    }

    pub(super) fn gen_catch_clause(&mut self, node: &Node) -> Result<Fragment> {
        let Node::CatchClause(clause) = node else {
            return Err(self.misplaced(node, "a try statement"));
        };
        self.expect_block(&clause.body)?;
        self.visit_clause(node, |g| {
            let mut out = match &clause.param {
                Some(param) => {
                    let param = g.with_indent(|g| g.gen_expression(param, Precedence::Sequence, ExprFlags::all()))?;
                    Fragment::from("catch").then(g.space()).then("(").then_fragment(param).then(")")
                }
                None => Fragment::from("catch"),
            };
            out.append(g.gen_maybe_block(&clause.body, StmtFlags::ALLOW_IN)?);
            Ok(out)
        })
    }

    fn expect_block(&self, node: &Node) -> Result<()> {
        match node {
            Node::BlockStatement(_) => Ok(()),
            _ => Err(self.misplaced(node, "a position that requires a block")),
        }
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

    fn program(body: &str) -> String {
        format!(r#"{{"type":"Program","body":[{}]}}"#, body)
    }

    const A: &str = r#"{"type":"ExpressionStatement","expression":{"type":"Identifier","name":"a"}}"#;
    const B: &str = r#"{"type":"ExpressionStatement","expression":{"type":"Identifier","name":"b"}}"#;

    #[test]
    fn if_else_layout() {
        let json = program(&format!(
            r#"{{"type":"IfStatement","test":{{"type":"Identifier","name":"x"}},
                "consequent":{{"type":"BlockStatement","body":[{}]}},
                "alternate":{}}}"#,
            A, B
        ));
        assert_eq!(gen(&json, &GenerationOptions::new()), "if (x) {\n    a;\n} else\n    b;");
        assert_eq!(gen(&json, &GenerationOptions::compact()), "if(x){a;}else b;");
    }

    #[test]
    fn dangling_else_gets_a_block() {
        let inner = format!(
            r#"{{"type":"IfStatement","test":{{"type":"Identifier","name":"y"}},"consequent":{}}}"#,
            A
        );
        let json = program(&format!(
            r#"{{"type":"IfStatement","test":{{"type":"Identifier","name":"x"}},"consequent":{},"alternate":{}}}"#,
            inner, B
        ));
        assert_eq!(gen(&json, &GenerationOptions::compact()), "if(x){if(y)a;}else b;");
    }

    #[test]
    fn empty_block_and_empty_statement() {
        let json = program(
            r#"{"type":"WhileStatement","test":{"type":"Identifier","name":"x"},"body":{"type":"BlockStatement","body":[]}},
               {"type":"WhileStatement","test":{"type":"Identifier","name":"y"},"body":{"type":"EmptyStatement"}}"#,
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "while (x) {}\nwhile (y);");
    }

    #[test]
    fn asi_hazard_gets_leading_semicolon() {
        let array = r#"{"type":"ExpressionStatement","expression":{"type":"ArrayExpression",
            "elements":[{"type":"Identifier","name":"b"},{"type":"Identifier","name":"c"}]}}"#;
        let json = program(&format!("{},{},{}", A, array, B));
        let options = GenerationOptions::new().with_semicolons(false);
        assert_eq!(gen(&json, &options), "a\n;[b, c]\nb");
    }

    #[test]
    fn function_expression_statement_is_wrapped() {
        let json = program(
            r#"{"type":"ExpressionStatement","expression":{"type":"CallExpression",
                "callee":{"type":"FunctionExpression","id":null,"params":[],"body":{"type":"BlockStatement","body":[]}},
                "arguments":[]}}"#,
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "(function () {}());");
    }

    #[test]
    fn for_init_in_is_parenthesized() {
        let json = program(
            r#"{"type":"ForStatement","init":{"type":"VariableDeclaration","kind":"var","declarations":[
                {"type":"VariableDeclarator","id":{"type":"Identifier","name":"x"},
                 "init":{"type":"BinaryExpression","operator":"in",
                         "left":{"type":"Identifier","name":"a"},"right":{"type":"Identifier","name":"b"}}}]},
                "test":null,"update":null,"body":{"type":"EmptyStatement"}}"#,
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "for (var x = (a in b);;);");
    }

    #[test]
    fn switch_layout() {
        let json = program(&format!(
            r#"{{"type":"SwitchStatement","discriminant":{{"type":"Identifier","name":"x"}},"cases":[
                {{"type":"SwitchCase","test":{{"type":"Literal","value":1}},"consequent":[{},{{"type":"BreakStatement","label":null}}]}},
                {{"type":"SwitchCase","test":null,"consequent":[{}]}}]}}"#,
            A, B
        ));
        assert_eq!(
            gen(&json, &GenerationOptions::new()),
            "switch (x) {\ncase 1:\n    a;\n    break;\ndefault:\n    b;\n}"
        );
    }

    #[test]
    fn try_catch_finally() {
        let json = program(&format!(
            r#"{{"type":"TryStatement","block":{{"type":"BlockStatement","body":[{}]}},
                "handler":{{"type":"CatchClause","param":{{"type":"Identifier","name":"e"}},"body":{{"type":"BlockStatement","body":[]}}}},
                "finalizer":{{"type":"BlockStatement","body":[{}]}}}}"#,
            A, B
        ));
        assert_eq!(
            gen(&json, &GenerationOptions::compact()),
            "try{a;}catch(e){}finally{b;}"
        );
    }

    #[test]
    fn directive_prologue() {
        let json = program(
            r#"{"type":"ExpressionStatement","expression":{"type":"Literal","value":"use strict","raw":"'use strict'"},"directive":"use strict"},
               {"type":"ExpressionStatement","expression":{"type":"Literal","value":"x"}}"#,
        );
        assert_eq!(gen(&json, &GenerationOptions::new()), "'use strict';\n'x';");

        let json = program(r#"{"type":"ExpressionStatement","expression":{"type":"Literal","value":"x"}}"#);
        assert_eq!(gen(&json, &GenerationOptions::new()), "('x');");
    }
}

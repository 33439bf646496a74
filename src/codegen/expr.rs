//! Expressions, literals and patterns

use super::{CodeGenerator, ExprFlags, Fragment, StmtFlags};
use crate::ast::*;
use crate::error::Result;
use crate::format::{
    decode_string_literal, escape_string, format_bigint, format_number, format_regexp, parse_numeric_literal,
    tokens_fuse,
};
use crate::precedence::{
    binary_associativity, binary_precedence, logical_precedence, mixes_coalesce, needs_parens,
    new_callee_needs_parens, number_needs_protection, operand_slots, Associativity, Precedence,
};

/// Whether `raw` spells the same value the literal carries
fn raw_matches(lit: &Literal, raw: &str) -> bool {
    match &lit.value {
        LiteralValue::Number(n) => parse_numeric_literal(raw)
            .is_some_and(|v| v == *n && v.is_sign_negative() == n.is_sign_negative()),
        LiteralValue::String(s) => decode_string_literal(raw).is_some_and(|decoded| decoded == *s),
        LiteralValue::Boolean(b) => raw == if *b { "true" } else { "false" },
        LiteralValue::Null => raw == "null",
        LiteralValue::Object(_) => false,
    }
}

impl<'a> CodeGenerator<'a> {
    // ========== Dispatch ==========

    /// Render `node` in a slot that requires at least `slot` precedence
    pub(crate) fn gen_expression(&mut self, node: &Node, slot: Precedence, flags: ExprFlags) -> Result<Fragment> {
        self.gen_operand(node, slot, flags, true, false)
    }

    /// [`gen_expression`](Self::gen_expression) for an operand of an infix
    /// operator; `force` parenthesizes regardless of precedence
    fn gen_operand(
        &mut self,
        node: &Node,
        slot: Precedence,
        flags: ExprFlags,
        is_left: bool,
        force: bool,
    ) -> Result<Fragment> {
        let fragment = self.nested(|g| g.gen_operand_kind(node, slot, flags, is_left, force))?;
        Ok(self.decorate(node, fragment, false))
    }

    fn gen_operand_kind(
        &mut self,
        node: &Node,
        slot: Precedence,
        flags: ExprFlags,
        is_left: bool,
        force: bool,
    ) -> Result<Fragment> {
        if let Some((content, precedence)) = self.verbatim(node)? {
            let text = self.verbatim_text(&content);
            return Ok(if precedence < slot || force {
                text.parenthesized()
            } else {
                text
            });
        }
        if !node.is_expression() && !matches!(node, Node::Super(_)) {
            return Err(self.misplaced(node, "an expression position"));
        }

        let bare_in = !flags.contains(ExprFlags::ALLOW_IN)
            && matches!(node, Node::BinaryExpression(b) if b.operator == BinaryOperator::In);
        let wrap = force || bare_in || needs_parens(node, slot, is_left);
        let inner_flags = if wrap { flags | ExprFlags::ALLOW_IN } else { flags };
        let fragment = self.gen_expression_kind(node, inner_flags)?;
        Ok(if wrap { fragment.parenthesized() } else { fragment })
    }

    fn gen_expression_kind(&mut self, node: &Node, flags: ExprFlags) -> Result<Fragment> {
        match node {
            Node::Identifier(id) => Ok(Fragment::from(id.name.as_str())),
            Node::ThisExpression(_) => Ok(Fragment::from("this")),
            Node::Super(_) => Ok(Fragment::from("super")),
            Node::Literal(lit) => self.gen_literal(node, lit),
            Node::ArrayExpression(array) => self.gen_array(node, &array.elements),
            Node::ArrayPattern(array) => self.gen_array(node, &array.elements),
            Node::ObjectExpression(object) => self.gen_object(node, object),
            Node::ObjectPattern(pattern) => self.gen_object_pattern(node, pattern),
            Node::FunctionExpression(function) => self.gen_function_expression(node, function),
            Node::ArrowFunctionExpression(function) => self.gen_arrow(node, function),
            Node::ClassExpression(class) => self.gen_class(class),
            Node::UnaryExpression(unary) => {
                let argument = self.gen_expression(&unary.argument, Precedence::Unary, flags)?;
                Ok(self.gen_prefix(unary.operator.as_str(), argument))
            }
            Node::UpdateExpression(update) => {
                if update.prefix {
                    let argument = self.gen_expression(&update.argument, Precedence::Unary, flags)?;
                    Ok(self.gen_prefix(update.operator.as_str(), argument))
                } else {
                    let argument = self.gen_expression(&update.argument, Precedence::Postfix, flags)?;
                    Ok(argument.then(update.operator.as_str()))
                }
            }
            Node::BinaryExpression(binary) => {
                let operator = binary.operator;
                self.gen_infix(
                    operator.as_str(),
                    binary_precedence(operator),
                    binary_associativity(operator),
                    (&binary.left, &binary.right),
                    flags,
                    (false, false),
                )
            }
            Node::LogicalExpression(logical) => {
                let operator = logical.operator;
                let force = (mixes_coalesce(operator, &logical.left), mixes_coalesce(operator, &logical.right));
                self.gen_infix(
                    operator.as_str(),
                    logical_precedence(operator),
                    Associativity::Left,
                    (&logical.left, &logical.right),
                    flags,
                    force,
                )
            }
            Node::AssignmentExpression(assign) => {
                self.gen_assignment(&assign.left, assign.operator.as_str(), &assign.right, flags)
            }
            Node::AssignmentPattern(pattern) => self.gen_assignment(&pattern.left, "=", &pattern.right, flags),
            Node::ConditionalExpression(cond) => {
                let test = self.gen_expression(&cond.test, Precedence::Coalesce, flags)?;
                let consequent =
                    self.gen_expression(&cond.consequent, Precedence::Assignment, flags | ExprFlags::ALLOW_IN)?;
                let alternate = self.gen_expression(&cond.alternate, Precedence::Assignment, flags)?;
                Ok(test
                    .then(self.space())
                    .then("?")
                    .then(self.space())
                    .then_fragment(consequent)
                    .then(self.space())
                    .then(":")
                    .then(self.space())
                    .then_fragment(alternate))
            }
            Node::SequenceExpression(seq) => {
                if seq.expressions.is_empty() {
                    return Err(self.malformed(node, "sequence has no expressions"));
                }
                let mut out = Fragment::new();
                for (i, expression) in seq.expressions.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",");
                        out.push_str(self.space());
                    }
                    out.append(self.gen_expression(expression, Precedence::Assignment, flags)?);
                }
                Ok(out)
            }
            Node::CallExpression(call) => {
                let mut out = self.gen_expression(&call.callee, Precedence::Call, ExprFlags::ALLOW_IN)?;
                if call.optional {
                    out.push_str("?.");
                }
                Ok(out.then_fragment(self.gen_arguments(&call.arguments)?))
            }
            Node::NewExpression(new) => self.gen_new(new, flags),
            Node::MemberExpression(member) => self.gen_member(node, member),
            Node::ChainExpression(chain) => self.gen_expression(&chain.expression, Precedence::OptionalChaining, flags),
            Node::TaggedTemplateExpression(tagged) => {
                if !matches!(tagged.quasi.as_ref(), Node::TemplateLiteral(_)) {
                    return Err(self.malformed(node, "tagged template quasi must be a TemplateLiteral"));
                }
                let tag = self.gen_expression(&tagged.tag, Precedence::Call, ExprFlags::ALLOW_IN)?;
                let quasi = self.gen_expression(&tagged.quasi, Precedence::Primary, flags)?;
                Ok(tag.then_fragment(quasi))
            }
            Node::TemplateLiteral(template) => self.gen_template(node, template),
            Node::YieldExpression(yield_expr) => {
                let keyword = Fragment::from(if yield_expr.delegate { "yield*" } else { "yield" });
                match &yield_expr.argument {
                    Some(argument) => {
                        let argument = self.gen_expression(argument, Precedence::Assignment, flags)?;
                        Ok(self.join(keyword, self.guard_restricted(argument)))
                    }
                    None => Ok(keyword),
                }
            }
            Node::AwaitExpression(await_expr) => {
                let argument = self.gen_expression(&await_expr.argument, Precedence::Await, flags)?;
                Ok(self.join(Fragment::from("await"), argument))
            }
            Node::MetaProperty(meta) => {
                let object = self.gen_identifier(&meta.meta_object)?;
                let property = self.gen_identifier(&meta.property)?;
                Ok(object.then(".").then_fragment(property))
            }
            _ => Err(self.misplaced(node, "an expression position")),
        }
    }

    /// Render a node that only appears inside a specific parent, given as the root
    pub(super) fn gen_auxiliary(&mut self, node: &Node) -> Result<Fragment> {
        match node {
            Node::Property(_) => self.gen_object_member(node),
            Node::SpreadElement(_) | Node::RestElement(_) => self.gen_element(node, ExprFlags::all()),
            Node::SwitchCase(_) => self.gen_switch_case(node, StmtFlags::ALLOW_IN | StmtFlags::SEMICOLON_OPTIONAL),
            Node::CatchClause(_) => self.gen_catch_clause(node),
            Node::VariableDeclarator(_) => self.gen_declarator(node, ExprFlags::all()),
            Node::TemplateElement(element) => self.visit(node, |_| Ok(Fragment::from(element.value.raw.as_str()))),
            Node::ClassBody(_) => self.gen_class_body(node),
            Node::MethodDefinition(_) => self.gen_class_member(node),
            Node::ImportSpecifier(_)
            | Node::ImportDefaultSpecifier(_)
            | Node::ImportNamespaceSpecifier(_)
            | Node::ExportSpecifier(_) => self.gen_specifier(node),
            Node::Super(_) => self.gen_expression(node, Precedence::Sequence, ExprFlags::all()),
            _ => Err(self.misplaced(node, "the root position")),
        }
    }

    // ========== Operators ==========

    /// Prefix operator glued to its operand
    ///
    /// Word operators (`typeof`, `void`, `delete`) always get a space; symbol
    /// operators only when the operand would fuse with them (`- -x`).
    fn gen_prefix(&self, operator: &str, argument: Fragment) -> Fragment {
        if operator.len() > 2 {
            return self.join(Fragment::from(operator), argument);
        }
        let fuse = match (operator.chars().next_back(), argument.first_char()) {
            (Some(l), Some(r)) => tokens_fuse(l, r),
            _ => false,
        };
        let out = Fragment::from(operator);
        if fuse {
            out.then(self.layout.non_empty_space()).then_fragment(argument)
        } else {
            out.then_fragment(argument)
        }
    }

    fn gen_infix(
        &mut self,
        operator: &str,
        current: Precedence,
        assoc: Associativity,
        (left, right): (&Node, &Node),
        flags: ExprFlags,
        (force_left, force_right): (bool, bool),
    ) -> Result<Fragment> {
        let (left_slot, right_slot) = operand_slots(current, assoc);
        let left = self.gen_operand(left, left_slot, flags, true, force_left)?;
        let out = self.join_str(left, operator);
        let right = self.gen_operand(right, right_slot, flags, false, force_right)?;
        if operator == "<" && right.text().starts_with("!--") {
            // `<!--` would open an HTML-like comment
            return Ok(out.then(self.layout.non_empty_space()).then_fragment(right));
        }
        Ok(self.join(out, right))
    }

    fn gen_assignment(&mut self, left: &Node, operator: &str, right: &Node, flags: ExprFlags) -> Result<Fragment> {
        let left = self.gen_expression(left, Precedence::Call, flags)?;
        let right = self.gen_expression(right, Precedence::Assignment, flags)?;
        Ok(left
            .then(self.space())
            .then(operator)
            .then(self.space())
            .then_fragment(right))
    }

    fn gen_new(&mut self, new: &NewExpression, flags: ExprFlags) -> Result<Fragment> {
        let drop_parens = new.arguments.is_empty()
            && !self.options.format.parentheses
            && flags.contains(ExprFlags::ALLOW_UNPARENTHESIZED_NEW);
        let callee = self.gen_operand(
            &new.callee,
            Precedence::New,
            ExprFlags::ALLOW_IN,
            true,
            new_callee_needs_parens(&new.callee),
        )?;
        let out = self.join(Fragment::from("new"), callee);
        if drop_parens {
            Ok(out)
        } else {
            Ok(out.then_fragment(self.gen_arguments(&new.arguments)?))
        }
    }

    fn gen_member(&mut self, node: &Node, member: &MemberExpression) -> Result<Fragment> {
        let mut out = self.gen_expression(&member.object, Precedence::Call, ExprFlags::ALLOW_IN)?;
        if member.computed {
            out.push_str(if member.optional { "?.[" } else { "[" });
            out.append(self.gen_expression(&member.property, Precedence::Sequence, ExprFlags::all())?);
            out.push_str("]");
            return Ok(out);
        }

        if !matches!(member.property.as_ref(), Node::Identifier(_)) {
            return Err(self.malformed(node, "non-computed member property must be an Identifier"));
        }
        let numeric_object = matches!(member.object.as_ref(), Node::Literal(lit) if lit.as_number().is_some());
        if numeric_object && !member.optional && number_needs_protection(out.text()) {
            out = out.parenthesized();
        }
        out.push_str(if member.optional { "?." } else { "." });
        Ok(out.then_fragment(self.gen_identifier(&member.property)?))
    }

    /// An `Identifier` in a slot that takes nothing else
    pub(super) fn gen_identifier(&mut self, node: &Node) -> Result<Fragment> {
        match node {
            Node::Identifier(_) => self.gen_expression(node, Precedence::Primary, ExprFlags::all()),
            _ => Err(self.misplaced(node, "an identifier position")),
        }
    }

    /// `(a, ...b)` argument list
    fn gen_arguments(&mut self, arguments: &[Node]) -> Result<Fragment> {
        let mut out = Fragment::from("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
                out.push_str(self.space());
            }
            out.append(self.gen_element(argument, ExprFlags::all())?);
        }
        Ok(out.then(")"))
    }

    /// One element of an array, argument list or parameter list, where
    /// spread and rest are allowed
    pub(super) fn gen_element(&mut self, node: &Node, flags: ExprFlags) -> Result<Fragment> {
        match node {
            Node::SpreadElement(SpreadElement { argument, .. }) | Node::RestElement(RestElement { argument, .. }) => {
                self.visit(node, |g| {
                    let argument = g.gen_expression(argument, Precedence::Assignment, flags)?;
                    Ok(Fragment::from("...").then_fragment(argument))
                })
            }
            _ => self.gen_expression(node, Precedence::Assignment, flags),
        }
    }

    // ========== Literals ==========

    fn gen_literal(&mut self, node: &Node, lit: &Literal) -> Result<Fragment> {
        let format = &self.options.format;
        if let Some(regex) = &lit.regex {
            if format.json {
                return Err(self.malformed(node, "regular expression has no JSON form"));
            }
            if let Some(raw) = lit.raw.as_deref().filter(|raw| format.raw && raw.starts_with('/')) {
                return Ok(Fragment::from(raw));
            }
            return Ok(Fragment::from(format_regexp(&regex.pattern, &regex.flags)));
        }
        if let Some(digits) = &lit.bigint {
            if format.json {
                return Err(self.malformed(node, "BigInt has no JSON form"));
            }
            return format_bigint(digits)
                .map(Fragment::from)
                .ok_or_else(|| self.malformed(node, format!("invalid BigInt digits `{}`", digits)));
        }
        if format.raw && !format.json {
            if let Some(raw) = lit.raw.as_deref().filter(|raw| raw_matches(lit, raw)) {
                return Ok(Fragment::from(raw));
            }
        }

        match &lit.value {
            LiteralValue::Null => Ok(Fragment::from("null")),
            LiteralValue::Boolean(b) => Ok(Fragment::from(if *b { "true" } else { "false" })),
            LiteralValue::String(s) => Ok(Fragment::from(escape_string(
                s,
                format.quotes,
                format.json,
                format.escapeless,
            ))),
            LiteralValue::Number(n) => self.gen_number(node, *n),
            LiteralValue::Object(_) => Err(self.malformed(node, "literal value must be a primitive")),
        }
    }

    fn gen_number(&self, node: &Node, value: f64) -> Result<Fragment> {
        if value.is_nan() {
            return Err(self.malformed(node, "NaN has no literal form"));
        }
        let format = &self.options.format;
        if format.json && value.is_infinite() {
            return Ok(Fragment::from("null"));
        }
        let text = format_number(value.abs(), format.renumber, format.hexadecimal);
        if value.is_sign_negative() {
            Ok(Fragment::from(format!("-{}", text)))
        } else {
            Ok(Fragment::from(text))
        }
    }

    fn gen_template(&mut self, node: &Node, template: &TemplateLiteral) -> Result<Fragment> {
        if template.quasis.len() != template.expressions.len() + 1 {
            return Err(self.malformed(
                node,
                format!(
                    "template has {} quasis for {} expressions",
                    template.quasis.len(),
                    template.expressions.len()
                ),
            ));
        }
        let mut out = Fragment::from("`");
        for (i, quasi) in template.quasis.iter().enumerate() {
            let Node::TemplateElement(element) = quasi else {
                return Err(self.misplaced(quasi, "a template literal"));
            };
            out.append(self.visit(quasi, |_| Ok(Fragment::from(element.value.raw.as_str())))?);
            if let Some(expression) = template.expressions.get(i) {
                out.push_str("${");
                out.push_str(self.space());
                out.append(self.gen_expression(expression, Precedence::Sequence, ExprFlags::all())?);
                out.push_str(self.space());
                out.push_str("}");
            }
        }
        Ok(out.then("`"))
    }

    // ========== Containers ==========

    /// Array literal or array pattern, on one line
    ///
    /// A hole at the end gets its own comma so the length survives.
    fn gen_array(&mut self, node: &Node, elements: &[Option<Node>]) -> Result<Fragment> {
        if elements.is_empty() {
            return Ok(self.empty_container(node, "[", "]", true));
        }
        let mut out = Fragment::from("[");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
                out.push_str(self.space());
            }
            match element {
                Some(element) => out.append(self.gen_element(element, ExprFlags::all())?),
                None if i + 1 == elements.len() => out.push_str(","),
                None => {}
            }
        }
        Ok(out.then("]"))
    }

    /// Object literal: `{ a: 1 }` for one short property, otherwise one
    /// property per line
    fn gen_object(&mut self, node: &Node, object: &ObjectExpression) -> Result<Fragment> {
        let Some((first, rest)) = object.properties.split_first() else {
            return Ok(self.empty_container(node, "{", "}", false));
        };
        let first = self.with_indent(|g| g.gen_object_member(first))?;
        if rest.is_empty() && !first.contains_line_terminator() {
            return Ok(Fragment::from("{")
                .then(self.space())
                .then_fragment(first)
                .then(self.space())
                .then("}"));
        }

        let body = self.with_indent(|g| {
            let mut out = g.indented(first);
            for property in rest {
                out.push_str(",");
                out.push_str(g.newline());
                let property = g.gen_object_member(property)?;
                out.append(g.indented(property));
            }
            Ok(out)
        })?;
        let mut out = Fragment::from("{").then(self.newline()).then_fragment(body);
        if !out.ends_with_line_terminator() {
            out.push_str(self.newline());
        }
        out.push_str(&self.base);
        Ok(out.then("}"))
    }

    /// Object pattern, on one line
    fn gen_object_pattern(&mut self, node: &Node, pattern: &ObjectPattern) -> Result<Fragment> {
        if pattern.properties.is_empty() {
            return Ok(self.empty_container(node, "{", "}", true));
        }
        let mut out = Fragment::from("{").then(self.space());
        for (i, property) in pattern.properties.iter().enumerate() {
            if i > 0 {
                out.push_str(",");
                out.push_str(self.space());
            }
            out.append(self.gen_object_member(property)?);
        }
        Ok(out.then(self.space()).then("}"))
    }

    fn gen_object_member(&mut self, node: &Node) -> Result<Fragment> {
        match node {
            Node::Property(property) => self.gen_property(node, property),
            Node::SpreadElement(_) | Node::RestElement(_) => self.gen_element(node, ExprFlags::all()),
            _ => Err(self.misplaced(node, "an object literal")),
        }
    }
}

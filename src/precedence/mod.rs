//! Operator precedence and parenthesization
//!
//! The generator asks one question before emitting any child expression:
//! does this child, placed in a slot that requires at least precedence `p`,
//! need parentheses? Precedence values follow the ECMAScript grammar from
//! the loosest (`,`) to the tightest (primary expressions).

use crate::ast::{BinaryOperator, LogicalOperator, Node};

/// Precedence levels, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Sequence = 0,
    /// Also the level of `yield`
    Assignment,
    Conditional,
    ArrowFunction,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    BitwiseShift,
    Additive,
    Multiplicative,
    Exponentiation,
    Await,
    Unary,
    Postfix,
    OptionalChaining,
    Call,
    New,
    TaggedTemplate,
    Member,
    Primary,
}

impl Precedence {
    /// Numeric level, as used by verbatim payloads
    ///
    /// Levels group operators that share a grammar tier: `0` sequence,
    /// `1` assignment, `2` conditional, `3` logical or, and so on up to `21`
    /// for primary expressions.
    pub fn level(self) -> u8 {
        use Precedence::*;
        match self {
            Sequence => 0,
            Assignment => 1,
            Conditional | ArrowFunction => 2,
            Coalesce | LogicalOr => 3,
            LogicalAnd => 4,
            BitwiseOr => 5,
            BitwiseXor => 6,
            BitwiseAnd => 7,
            Equality => 8,
            Relational => 9,
            BitwiseShift => 10,
            Additive => 11,
            Multiplicative => 12,
            Exponentiation => 13,
            Await | Unary => 14,
            Postfix => 15,
            OptionalChaining => 16,
            Call => 17,
            New => 18,
            TaggedTemplate => 19,
            Member => 20,
            Primary => 21,
        }
    }

    /// Level from a verbatim payload; out-of-range values clamp to `Primary`
    ///
    /// Shared tiers map to their loosest member.
    pub fn from_level(level: u64) -> Precedence {
        use Precedence::*;
        match level {
            0 => Sequence,
            1 => Assignment,
            2 => Conditional,
            3 => Coalesce,
            4 => LogicalAnd,
            5 => BitwiseOr,
            6 => BitwiseXor,
            7 => BitwiseAnd,
            8 => Equality,
            9 => Relational,
            10 => BitwiseShift,
            11 => Additive,
            12 => Multiplicative,
            13 => Exponentiation,
            14 => Await,
            15 => Postfix,
            16 => OptionalChaining,
            17 => Call,
            18 => New,
            19 => TaggedTemplate,
            20 => Member,
            _ => Primary,
        }
    }
}

/// Grouping direction of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Precedence of a binary operator
pub fn binary_precedence(op: BinaryOperator) -> Precedence {
    use BinaryOperator::*;
    match op {
        BitwiseOr => Precedence::BitwiseOr,
        BitwiseXor => Precedence::BitwiseXor,
        BitwiseAnd => Precedence::BitwiseAnd,
        Eq | Ne | StrictEq | StrictNe => Precedence::Equality,
        Lt | Le | Gt | Ge | In | Instanceof => Precedence::Relational,
        Shl | Shr | UShr => Precedence::BitwiseShift,
        Add | Sub => Precedence::Additive,
        Mul | Div | Mod => Precedence::Multiplicative,
        Pow => Precedence::Exponentiation,
    }
}

/// Associativity of a binary operator
pub fn binary_associativity(op: BinaryOperator) -> Associativity {
    match op {
        BinaryOperator::Pow => Associativity::Right,
        _ => Associativity::Left,
    }
}

/// Precedence of a logical operator
pub fn logical_precedence(op: LogicalOperator) -> Precedence {
    match op {
        LogicalOperator::Or => Precedence::LogicalOr,
        LogicalOperator::And => Precedence::LogicalAnd,
        LogicalOperator::NullishCoalescing => Precedence::Coalesce,
    }
}

/// Slot precedence for the left and right operands of an infix operator
///
/// Both operands of a left-associative operator sit at the operator's own
/// level; [`needs_parens`] then keeps `x - (y - z)` wrapped and lets
/// `(x - y) - z` go bare. `**` is right-associative and its left operand
/// may not be a bare unary expression.
pub fn operand_slots(current: Precedence, assoc: Associativity) -> (Precedence, Precedence) {
    match assoc {
        Associativity::Left => (current, current),
        Associativity::Right => (Precedence::Postfix, current),
    }
}

/// Own precedence of a node when it appears as an expression
pub fn node_precedence(node: &Node) -> Precedence {
    match node {
        Node::SequenceExpression(_) => Precedence::Sequence,
        Node::YieldExpression(_) | Node::AssignmentExpression(_) => Precedence::Assignment,
        Node::ArrowFunctionExpression(_) => Precedence::ArrowFunction,
        Node::ConditionalExpression(_) => Precedence::Conditional,
        Node::LogicalExpression(n) => logical_precedence(n.operator),
        Node::BinaryExpression(n) => binary_precedence(n.operator),
        Node::AwaitExpression(_) => Precedence::Await,
        Node::UnaryExpression(_) => Precedence::Unary,
        Node::UpdateExpression(n) => {
            if n.prefix {
                Precedence::Unary
            } else {
                Precedence::Postfix
            }
        }
        Node::ChainExpression(_) => Precedence::OptionalChaining,
        Node::CallExpression(_) => Precedence::Call,
        Node::NewExpression(_) => Precedence::New,
        Node::TaggedTemplateExpression(_) => Precedence::TaggedTemplate,
        Node::MemberExpression(_) => Precedence::Member,
        Node::Literal(lit) => match lit.as_number() {
            // negative numbers are emitted as unary minus
            Some(n) if n < 0.0 || (n == 0.0 && n.is_sign_negative()) => Precedence::Unary,
            _ => Precedence::Primary,
        },
        _ => Precedence::Primary,
    }
}

/// Whether `child` placed in a slot requiring `slot` precedence must be parenthesized
///
/// `is_left_operand` distinguishes the two sides of an infix parent when the
/// slot precedence equals the child's own: a left operand at equal precedence
/// stays bare, a right operand at equal precedence does not.
pub fn needs_parens(child: &Node, slot: Precedence, is_left_operand: bool) -> bool {
    let own = node_precedence(child);
    if own < slot {
        return true;
    }
    if own == slot && !is_left_operand && is_infix(child) {
        return matches!(infix_associativity(child), Some(Associativity::Left));
    }
    false
}

fn is_infix(node: &Node) -> bool {
    matches!(node, Node::BinaryExpression(_) | Node::LogicalExpression(_))
}

fn infix_associativity(node: &Node) -> Option<Associativity> {
    match node {
        Node::BinaryExpression(n) => Some(binary_associativity(n.operator)),
        Node::LogicalExpression(_) => Some(Associativity::Left),
        _ => None,
    }
}

/// `??` cannot be mixed with `||` or `&&` without parentheses
pub fn mixes_coalesce(parent: LogicalOperator, child: &Node) -> bool {
    let Node::LogicalExpression(child) = child else {
        return false;
    };
    let parent_coalesce = parent == LogicalOperator::NullishCoalescing;
    let child_coalesce = child.operator == LogicalOperator::NullishCoalescing;
    parent_coalesce != child_coalesce
}

/// Whether a `new` callee must be parenthesized
///
/// A call anywhere along the callee's member chain would otherwise be read
/// as the argument list of the `new` itself.
pub fn new_callee_needs_parens(callee: &Node) -> bool {
    match callee {
        Node::CallExpression(_) => true,
        Node::MemberExpression(m) => new_callee_needs_parens(&m.object),
        Node::TaggedTemplateExpression(t) => new_callee_needs_parens(&t.tag),
        Node::ChainExpression(_) => true,
        _ => false,
    }
}

/// Whether a numeric literal spelled `text` needs protecting before a `.` member access
pub fn number_needs_protection(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && !(text.len() >= 2 && text.starts_with('0'))
}

/// Whether expression text at the start of an `ExpressionStatement` would be
/// misread as a declaration, block, or other statement form
pub fn starts_statement_ambiguously(text: &str) -> bool {
    if text.starts_with('{') {
        return true;
    }
    if starts_with_word(text, "function") || starts_with_word(text, "class") {
        return true;
    }
    if let Some(rest) = text.strip_prefix("async") {
        let rest = rest.trim_start_matches([' ', '\t']);
        if starts_with_word(rest, "function") {
            return true;
        }
    }
    if let Some(rest) = text.strip_prefix("let") {
        if rest.trim_start().starts_with('[') {
            return true;
        }
    }
    false
}

/// Whether an `export default` expression would be read as a declaration
pub fn starts_default_export_ambiguously(text: &str) -> bool {
    !text.starts_with('{') && !text.starts_with("let") && starts_statement_ambiguously(text)
}

/// Whether text at the start of an arrow body would be read as a block
pub fn starts_arrow_body_ambiguously(text: &str) -> bool {
    text.starts_with('{')
}

/// Whether `text` starts with `word` followed by a non-identifier character
fn starts_with_word(text: &str, word: &str) -> bool {
    match text.strip_prefix(word) {
        Some(rest) => !rest.chars().next().is_some_and(crate::format::is_identifier_part),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryExpression, Identifier, Literal, LogicalExpression, Meta};

    fn ident(name: &str) -> Node {
        Node::Identifier(Identifier::new(name))
    }

    fn binary(op: BinaryOperator, left: Node, right: Node) -> Node {
        Node::BinaryExpression(BinaryExpression {
            operator: op,
            left: Box::new(left),
            right: Box::new(right),
            meta: Meta::default(),
        })
    }

    #[test]
    fn lower_precedence_child_is_wrapped() {
        let sum = binary(BinaryOperator::Add, ident("a"), ident("b"));
        assert!(needs_parens(&sum, binary_precedence(BinaryOperator::Mul), true));
        assert!(!needs_parens(&sum, Precedence::Sequence, true));
    }

    #[test]
    fn left_associativity() {
        let diff = binary(BinaryOperator::Sub, ident("y"), ident("z"));
        let (left, right) = operand_slots(Precedence::Additive, Associativity::Left);
        assert!(!needs_parens(&diff, left, true));
        assert!(needs_parens(&diff, right, false));
    }

    #[test]
    fn exponent_is_right_associative() {
        let pow = binary(BinaryOperator::Pow, ident("b"), ident("c"));
        let (left, right) = operand_slots(Precedence::Exponentiation, Associativity::Right);
        assert!(!needs_parens(&pow, right, false));
        assert!(needs_parens(&pow, left, true));
    }

    #[test]
    fn negative_literal_is_unary() {
        let neg = Node::Literal(Literal::number(-1.0));
        assert!(needs_parens(&neg, Precedence::Postfix, true));
    }

    #[test]
    fn coalesce_mixing() {
        let or = Node::LogicalExpression(LogicalExpression {
            operator: LogicalOperator::Or,
            left: Box::new(ident("a")),
            right: Box::new(ident("b")),
            meta: Meta::default(),
        });
        assert!(mixes_coalesce(LogicalOperator::NullishCoalescing, &or));
        assert!(!mixes_coalesce(LogicalOperator::And, &or));
    }

    #[test]
    fn statement_start_hazards() {
        assert!(starts_statement_ambiguously("{}.toString()"));
        assert!(starts_statement_ambiguously("function () {}()"));
        assert!(starts_statement_ambiguously("async function f() {}"));
        assert!(starts_statement_ambiguously("class A {}"));
        assert!(starts_statement_ambiguously("let[0] = 1"));
        assert!(!starts_statement_ambiguously("functional()"));
        assert!(!starts_statement_ambiguously("letter[0]"));
        assert!(!starts_statement_ambiguously("async()"));
        assert!(starts_default_export_ambiguously("function () {}.call()"));
        assert!(!starts_default_export_ambiguously("{ a: 1 }"));
    }

    #[test]
    fn number_protection() {
        assert!(number_needs_protection("1"));
        assert!(number_needs_protection("42"));
        assert!(!number_needs_protection("1.5"));
        assert!(!number_needs_protection("1e3"));
        assert!(!number_needs_protection("0x10"));
        assert!(!number_needs_protection("07"));
    }

    #[test]
    fn level_roundtrip() {
        assert_eq!(Precedence::from_level(Precedence::Call.level() as u64), Precedence::Call);
        assert_eq!(Precedence::from_level(999), Precedence::Primary);
        assert_eq!(Precedence::Unary.level(), 14);
        assert_eq!(Precedence::from_level(3), Precedence::Coalesce);
    }
}

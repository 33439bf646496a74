//! Expression AST node types

use super::*;

/// Value carried by a `Literal` node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// null (also the placeholder value of regex and BigInt literals)
    #[default]
    Null,
    /// true or false
    Boolean(bool),
    /// Number; may be non-finite when built in Rust
    Number(f64),
    /// String
    String(String),
    /// Placeholder object some parsers emit for regex literals
    Object(serde_json::Map<String, Value>),
}

/// A literal value
///
/// Regular expressions carry `regex` and BigInts carry `bigint`; their
/// `value` is only a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// The literal value
    #[serde(default)]
    pub value: LiteralValue,
    /// Raw source text, if the parser kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Regular expression pattern and flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegexLiteral>,
    /// Decimal digits of a BigInt literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bigint: Option<String>,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Literal {
    fn with_value(value: LiteralValue) -> Self {
        Self {
            value,
            raw: None,
            regex: None,
            bigint: None,
            meta: Meta::default(),
        }
    }

    /// A string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::with_value(LiteralValue::String(value.into()))
    }

    /// A numeric literal
    pub fn number(value: f64) -> Self {
        Self::with_value(LiteralValue::Number(value))
    }

    /// A boolean literal
    pub fn boolean(value: bool) -> Self {
        Self::with_value(LiteralValue::Boolean(value))
    }

    /// The `null` literal
    pub fn null() -> Self {
        Self::with_value(LiteralValue::Null)
    }

    /// A regular expression literal
    pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            regex: Some(RegexLiteral {
                pattern: pattern.into(),
                flags: flags.into(),
            }),
            ..Self::with_value(LiteralValue::Null)
        }
    }

    /// A BigInt literal from its decimal digits
    pub fn bigint(digits: impl Into<String>) -> Self {
        Self {
            bigint: Some(digits.into()),
            ..Self::with_value(LiteralValue::Null)
        }
    }

    /// Attach raw source text
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Numeric value, if this is a number literal
    pub fn as_number(&self) -> Option<f64> {
        if self.regex.is_some() || self.bigint.is_some() {
            return None;
        }
        match self.value {
            LiteralValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// String value, if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        if self.regex.is_some() {
            return None;
        }
        match &self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Pattern and flags of a regular expression literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexLiteral {
    pub pattern: String,
    #[serde(default)]
    pub flags: String,
}

/// Array literal `[1, , 3]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpression {
    /// Array elements (None for holes like [1,,3])
    pub elements: Vec<Option<Node>>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Object literal `{a: 1, get b() {}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpression {
    /// `Property` or `SpreadElement` nodes
    pub properties: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Kind of an object literal property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
}

/// Object literal or object pattern property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: Box<Node>,
    pub value: Box<Node>,
    #[serde(default)]
    pub kind: PropertyKind,
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub shorthand: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// A function: declaration, expression or arrow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Optional function name
    #[serde(default)]
    pub id: Option<Box<Node>>,
    /// Parameter patterns
    pub params: Vec<Node>,
    /// `BlockStatement`, or any expression for a concise arrow body
    pub body: Box<Node>,
    #[serde(default)]
    pub generator: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    /// Set by some parsers for concise arrow bodies
    #[serde(default)]
    pub expression: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// Unary expression `!x`, `-x`, `typeof x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Node>,
    #[serde(default = "default_true")]
    pub prefix: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Update operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// Update expression `++x`, `x--`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub argument: Box<Node>,
    /// Is prefix (++x) or postfix (x++)
    pub prefix: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNe,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<<")]
    Shl,
    #[serde(rename = ">>")]
    Shr,
    #[serde(rename = ">>>")]
    UShr,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Pow,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

impl BinaryOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNe => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Shl => "<<",
            BinaryOperator::Shr => ">>",
            BinaryOperator::UShr => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::In => "in",
            BinaryOperator::Instanceof => "instanceof",
        }
    }
}

/// Binary expression `x + y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Node>,
    pub right: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    NullishCoalescing,
}

impl LogicalOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::Or => "||",
            LogicalOperator::And => "&&",
            LogicalOperator::NullishCoalescing => "??",
        }
    }
}

/// Logical expression `x && y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Node>,
    pub right: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    ModAssign,
    #[serde(rename = "**=")]
    PowAssign,
    #[serde(rename = "<<=")]
    ShlAssign,
    #[serde(rename = ">>=")]
    ShrAssign,
    #[serde(rename = ">>>=")]
    UShrAssign,
    #[serde(rename = "|=")]
    BitwiseOrAssign,
    #[serde(rename = "^=")]
    BitwiseXorAssign,
    #[serde(rename = "&=")]
    BitwiseAndAssign,
    #[serde(rename = "||=")]
    OrAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "??=")]
    NullishAssign,
}

impl AssignmentOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::ModAssign => "%=",
            AssignmentOperator::PowAssign => "**=",
            AssignmentOperator::ShlAssign => "<<=",
            AssignmentOperator::ShrAssign => ">>=",
            AssignmentOperator::UShrAssign => ">>>=",
            AssignmentOperator::BitwiseOrAssign => "|=",
            AssignmentOperator::BitwiseXorAssign => "^=",
            AssignmentOperator::BitwiseAndAssign => "&=",
            AssignmentOperator::OrAssign => "||=",
            AssignmentOperator::AndAssign => "&&=",
            AssignmentOperator::NullishAssign => "??=",
        }
    }
}

/// Assignment expression `x = y`, `x += y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    /// Identifier, member expression or pattern
    pub left: Box<Node>,
    pub right: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Conditional expression `x ? y : z`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpression {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Call expression `f(a)`, `f?.(a)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// New expression `new Foo(a)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpression {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Member expression `obj.prop`, `obj[expr]`, `obj?.prop`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Node>,
    pub property: Box<Node>,
    /// Is this a computed property access? (obj[prop])
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Wrapper around an optional chain `a?.b.c`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainExpression {
    pub expression: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Sequence expression `a, b, c`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceExpression {
    pub expressions: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Yield expression `yield x`, `yield* x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldExpression {
    #[serde(default)]
    pub argument: Option<Box<Node>>,
    #[serde(default)]
    pub delegate: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Await expression `await x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwaitExpression {
    pub argument: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Template literal `` `a${b}c` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLiteral {
    /// `TemplateElement` nodes, one more than `expressions`
    pub quasis: Vec<Node>,
    pub expressions: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Raw and cooked text of a template chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateValue {
    pub raw: String,
    #[serde(default)]
    pub cooked: Option<String>,
}

/// One literal chunk of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    pub value: TemplateValue,
    #[serde(default)]
    pub tail: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Tagged template `` tag`text` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedTemplateExpression {
    pub tag: Box<Node>,
    pub quasi: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Spread element `...x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadElement {
    pub argument: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Meta property `new.target`, `import.meta`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaProperty {
    #[serde(rename = "meta")]
    pub meta_object: Box<Node>,
    pub property: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Class declaration or expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default)]
    pub id: Option<Box<Node>>,
    #[serde(default)]
    pub super_class: Option<Box<Node>>,
    /// `ClassBody`
    pub body: Box<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Class body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBody {
    /// `MethodDefinition` nodes
    pub body: Vec<Node>,
    #[serde(flatten)]
    pub meta: Meta,
}

/// Kind of a class method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// Class method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub key: Box<Node>,
    /// `FunctionExpression`
    pub value: Box<Node>,
    pub kind: MethodKind,
    #[serde(default)]
    pub computed: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(flatten)]
    pub meta: Meta,
}

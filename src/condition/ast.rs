//! Abstract Syntax Tree and condition catalogue for requirement strings

use std::fmt;
use std::str::FromStr;

/// Condition types understood by the requirement language
///
/// Each condition is written as its three-letter tag immediately followed by
/// the condition value, e.g. `min3` or `equ'foo'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionType {
    /// Always passes (-)
    None,
    /// Equal (equ)
    Equal,
    /// Not equal (neq)
    NotEqual,
    /// Lower bound (min)
    Min,
    /// Upper bound (max)
    Max,
    /// Contains substring, element or key (con)
    Contains,
    /// Does not contain (nco)
    NotContains,
    /// Member of a comma separated list (frm)
    From,
    /// Not a member of a comma separated list (nfr)
    NotFrom,
    /// Regular expression match (rgx)
    Regex,
}

impl ConditionType {
    /// Every condition type, in catalogue order
    pub const ALL: [ConditionType; 10] = [
        ConditionType::None,
        ConditionType::Equal,
        ConditionType::NotEqual,
        ConditionType::Min,
        ConditionType::Max,
        ConditionType::Contains,
        ConditionType::NotContains,
        ConditionType::From,
        ConditionType::NotFrom,
        ConditionType::Regex,
    ];

    /// Canonical literal of this condition type
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::None => "-",
            ConditionType::Equal => "equ",
            ConditionType::NotEqual => "neq",
            ConditionType::Min => "min",
            ConditionType::Max => "max",
            ConditionType::Contains => "con",
            ConditionType::NotContains => "nco",
            ConditionType::From => "frm",
            ConditionType::NotFrom => "nfr",
            ConditionType::Regex => "rgx",
        }
    }
}

impl FromStr for ConditionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConditionType::ALL
            .iter()
            .copied()
            .find(|condition_type| condition_type.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical operators joining sibling elements of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// AND (&&)
    And,
    /// OR (||)
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "&&" => Ok(Operator::And),
            "||" => Ok(Operator::Or),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single condition like `min3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub condition_type: ConditionType,
    /// Raw condition payload, interpreted by the checker for the value category
    pub value: String,
}

impl Condition {
    pub fn new(condition_type: ConditionType, value: impl Into<String>) -> Self {
        Self {
            condition_type,
            value: value.into(),
        }
    }

    /// Condition that always passes
    pub fn is_noop(&self) -> bool {
        self.condition_type == ConditionType::None || self.value.is_empty()
    }
}

/// Node kinds, mirroring the variants of [`AstNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstKind {
    Empty,
    Group,
    Condition,
}

/// AST node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    /// The `-` requirement, always passes
    Empty,
    /// Ordered children, parenthesized or implicit at top level
    Group(Vec<AstValue>),
    /// Leaf condition
    Condition(Condition),
}

/// AST element with its link to the next sibling and its source span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstValue {
    pub node: AstNode,
    /// Relation to the *next* sibling in the parent group; `None` on the last one
    pub operator: Option<Operator>,
    pub start: usize,
    pub end: usize,
}

impl AstValue {
    pub fn new(node: AstNode, start: usize, end: usize) -> Self {
        Self {
            node,
            operator: None,
            start,
            end,
        }
    }

    pub fn kind(&self) -> AstKind {
        match self.node {
            AstNode::Empty => AstKind::Empty,
            AstNode::Group(_) => AstKind::Group,
            AstNode::Condition(_) => AstKind::Condition,
        }
    }

    /// Children of a group node, empty for any other kind
    pub fn children(&self) -> &[AstValue] {
        match &self.node {
            AstNode::Group(children) => children,
            _ => &[],
        }
    }

    /// Structural equality ignoring source spans
    pub fn same_shape(&self, other: &AstValue) -> bool {
        if self.operator != other.operator {
            return false;
        }
        match (&self.node, &other.node) {
            (AstNode::Empty, AstNode::Empty) => true,
            (AstNode::Condition(a), AstNode::Condition(b)) => a == b,
            (AstNode::Group(a), AstNode::Group(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            _ => false,
        }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            AstNode::Empty => f.write_str(ConditionType::None.as_str()),
            AstNode::Condition(condition) if writes_bare(&condition.value) => {
                write!(f, "{}{}", condition.condition_type, condition.value)
            }
            AstNode::Condition(condition) => write!(
                f,
                "{}'{}'",
                condition.condition_type,
                condition.value.replace('\'', "/'")
            ),
            AstNode::Group(children) => {
                f.write_str("(")?;
                write_children(f, children)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for AstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f)?;
        if let Some(operator) = self.operator {
            write!(f, " {}", operator)?;
        }
        Ok(())
    }
}

/// A quoted value ending in `/` would read back as an escaped quote, so such
/// values are written unquoted when the lexer reads them back verbatim
fn writes_bare(value: &str) -> bool {
    value.ends_with('/')
        && !value.starts_with('\'')
        && !value.contains(|c: char| c.is_whitespace() || c == ')')
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[AstValue]) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", child)?;
    }
    Ok(())
}

/// Result of parsing one requirement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNode {
    pub value: AstValue,
}

impl RootNode {
    pub fn new(value: AstValue) -> Self {
        Self { value }
    }

    /// Structural equality ignoring source spans
    pub fn same_shape(&self, other: &RootNode) -> bool {
        self.value.same_shape(&other.value)
    }
}

/// The root group is written without its parentheses since the top level may omit them
impl fmt::Display for RootNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value.node {
            AstNode::Group(children) => write_children(f, children),
            _ => self.value.write_node(f),
        }
    }
}

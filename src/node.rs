//! Syntax tree node model
//!
//! Nodes live in a [`Tree`](crate::tree::Tree) arena and refer to their
//! children by [`NodeId`]. The set of node kinds is closed: rules match on
//! [`NodeKind`] instead of inspecting types at run time.

use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a node inside one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Source location of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First line (1-indexed)
    pub start_line: usize,
    /// Last line (1-indexed)
    pub end_line: usize,
    /// Byte offset of the first character
    pub start_pos: usize,
    /// Byte offset of the last character
    pub end_pos: usize,
}

/// Annotations attached to a node by passes that run before mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    /// Where the node came from, needed to print a mutant back to source
    pub span: Option<Span>,
    /// Free-form annotations (comments, doc markers, ...)
    pub annotations: BTreeMap<String, String>,
}

impl Attributes {
    pub fn at(span: Span) -> Self {
        Self {
            span: Some(span),
            annotations: BTreeMap::new(),
        }
    }
}

/// A (possibly namespaced) identifier such as a constant or function name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    value: String,
    fully_qualified: bool,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            fully_qualified: false,
        }
    }

    /// A name written with a leading namespace separator, e.g. `\in_array`
    pub fn fully_qualified(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            fully_qualified: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_fully_qualified(&self) -> bool {
        self.fully_qualified
    }

    /// Lowercased name without the leading separator, for case-insensitive lookups
    pub fn to_lower_string(&self) -> String {
        self.value.to_lowercase()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fully_qualified {
            write!(f, "\\{}", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// What a function call invokes
#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// A statically known function name: `in_array(...)`
    Name(Name),
    /// Any other callable expression: `$fn(...)`
    Expr(NodeId),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Greater,
    GreaterOrEqual,
    Smaller,
    SmallerOrEqual,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Plus,
    Minus,
    Mul,
    Div,
    Concat,
    BooleanAnd,
    BooleanOr,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::Smaller => "<",
            BinaryOperator::SmallerOrEqual => "<=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Identical => "===",
            BinaryOperator::NotIdentical => "!==",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Concat => ".",
            BinaryOperator::BooleanAnd => "&&",
            BinaryOperator::BooleanOr => "||",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Greater
                | BinaryOperator::GreaterOrEqual
                | BinaryOperator::Smaller
                | BinaryOperator::SmallerOrEqual
                | BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Identical
                | BinaryOperator::NotIdentical
        )
    }
}

/// The syntactic kind of a node together with its kind-specific children
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `$name`
    Variable { name: String },
    /// Integer literal
    Int { value: i64 },
    /// Float literal
    Float { value: f64 },
    /// String literal
    Str { value: String },
    /// Constant reference: `true`, `PHP_EOL`, `\FOO`
    ConstFetch { name: Name },
    /// Array literal: `[a, b => c]`
    Array { items: Vec<NodeId> },
    /// One array entry: `value` or `key => value`
    ArrayItem {
        key: Option<NodeId>,
        value: NodeId,
        by_ref: bool,
        unpack: bool,
    },
    /// One call argument
    Arg {
        value: NodeId,
        by_ref: bool,
        unpack: bool,
    },
    /// `name(args)`; every element of `args` is an [`NodeKind::Arg`]
    FuncCall { name: Callee, args: Vec<NodeId> },
    /// `var->name(args)`
    MethodCall {
        var: NodeId,
        name: Name,
        args: Vec<NodeId>,
    },
    /// `var->name`
    PropertyFetch { var: NodeId, name: Name },
    /// `left op right`
    BinaryOp {
        op: BinaryOperator,
        left: NodeId,
        right: NodeId,
    },
    /// `var = expr`
    Assign { var: NodeId, expr: NodeId },
}

impl NodeKind {
    /// Short kind name used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Variable { .. } => "Variable",
            NodeKind::Int { .. } => "Int",
            NodeKind::Float { .. } => "Float",
            NodeKind::Str { .. } => "Str",
            NodeKind::ConstFetch { .. } => "ConstFetch",
            NodeKind::Array { .. } => "Array",
            NodeKind::ArrayItem { .. } => "ArrayItem",
            NodeKind::Arg { .. } => "Arg",
            NodeKind::FuncCall { .. } => "FuncCall",
            NodeKind::MethodCall { .. } => "MethodCall",
            NodeKind::PropertyFetch { .. } => "PropertyFetch",
            NodeKind::BinaryOp { .. } => "BinaryOp",
            NodeKind::Assign { .. } => "Assign",
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Variable { .. }
            | NodeKind::Int { .. }
            | NodeKind::Float { .. }
            | NodeKind::Str { .. }
            | NodeKind::ConstFetch { .. } => Vec::new(),
            NodeKind::Array { items } => items.clone(),
            NodeKind::ArrayItem { key, value, .. } => key.iter().copied().chain([*value]).collect(),
            NodeKind::Arg { value, .. } => vec![*value],
            NodeKind::FuncCall { name, args } => {
                let mut children = Vec::with_capacity(args.len() + 1);
                if let Callee::Expr(callee) = name {
                    children.push(*callee);
                }
                children.extend(args.iter().copied());
                children
            }
            NodeKind::MethodCall { var, args, .. } => {
                std::iter::once(*var).chain(args.iter().copied()).collect()
            }
            NodeKind::PropertyFetch { var, .. } => vec![*var],
            NodeKind::BinaryOp { left, right, .. } => vec![*left, *right],
            NodeKind::Assign { var, expr } => vec![*var, *expr],
        }
    }
}

/// A syntax tree node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub attributes: Attributes,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::default(),
        }
    }

    pub fn with_attributes(kind: NodeKind, attributes: Attributes) -> Self {
        Self { kind, attributes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_lowercases_without_separator() {
        assert_eq!(Name::new("In_Array").to_lower_string(), "in_array");
        assert_eq!(Name::fully_qualified("TRUE").to_lower_string(), "true");
        assert_eq!(Name::fully_qualified("in_array").to_string(), "\\in_array");
    }

    #[test]
    fn test_array_item_children() {
        let keyed = NodeKind::ArrayItem {
            key: Some(NodeId(1)),
            value: NodeId(2),
            by_ref: false,
            unpack: false,
        };
        assert_eq!(keyed.children(), vec![NodeId(1), NodeId(2)]);

        let plain = NodeKind::ArrayItem {
            key: None,
            value: NodeId(2),
            by_ref: false,
            unpack: false,
        };
        assert_eq!(plain.children(), vec![NodeId(2)]);
    }

    #[test]
    fn test_func_call_children_include_dynamic_callee() {
        let call = NodeKind::FuncCall {
            name: Callee::Expr(NodeId(0)),
            args: vec![NodeId(3)],
        };
        assert_eq!(call.children(), vec![NodeId(0), NodeId(3)]);

        let call = NodeKind::FuncCall {
            name: Callee::Name(Name::new("foo")),
            args: vec![NodeId(3)],
        };
        assert_eq!(call.children(), vec![NodeId(3)]);
    }

    #[test]
    fn test_comparison_operators() {
        assert!(BinaryOperator::Greater.is_comparison());
        assert!(!BinaryOperator::Plus.is_comparison());
        assert_eq!(BinaryOperator::Greater.symbol(), ">");
    }
}

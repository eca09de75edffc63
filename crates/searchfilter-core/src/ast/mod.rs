//! Module: ast
//! Responsibility: query-language expression tree and its builders.
//! Does not own: parsing, evaluation, or filter compilation.
//! Boundary: callers construct trees with the builder methods below.

mod display;


use crate::value::Value;
use derive_more::{Display, From};

///
/// VariableId
///

#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(pub u32);

///
/// Variable
///
/// A named query variable. Identity is the id; the name is for display.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
}

impl Variable {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: VariableId(id),
            name: name.into(),
        }
    }
}

///
/// UnaryOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
}

impl UnaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Not => "NOT ",
            Self::Minus => "-",
            Self::Plus => "+",
        }
    }
}

///
/// BinaryOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum BinaryOp {
    Eq = 0x01,
    Ne = 0x02,
    Lt = 0x03,
    Lte = 0x04,
    Gt = 0x05,
    Gte = 0x06,
    In = 0x07,
    NotIn = 0x08,
    And = 0x09,
    Or = 0x0a,
    Add = 0x0b,
    Sub = 0x0c,
    Mul = 0x0d,
    Div = 0x0e,
    Mod = 0x0f,
}

impl BinaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

///
/// AstNode
///
/// Expression tree node. Literal variants (`Value`, `Array`, `Object`,
/// `Range`) may nest arbitrary expressions; a literal is only constant when
/// everything beneath it is.
///

#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
    Value(Value),
    Array(Vec<Self>),
    Object(Vec<(String, Self)>),
    Range {
        low: Box<Self>,
        high: Box<Self>,
    },
    Reference(Variable),
    AttributeAccess {
        object: Box<Self>,
        name: String,
    },
    IndexedAccess {
        object: Box<Self>,
        index: Box<Self>,
    },
    Expansion {
        object: Box<Self>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Self>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
    Call {
        name: String,
        args: Vec<Self>,
    },
}

impl AstNode {
    //
    // builders
    //

    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    #[must_use]
    pub fn array(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    #[must_use]
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[must_use]
    pub fn range(low: impl Into<Self>, high: impl Into<Self>) -> Self {
        Self::Range {
            low: Box::new(low.into()),
            high: Box::new(high.into()),
        }
    }

    #[must_use]
    pub fn reference(variable: &Variable) -> Self {
        Self::Reference(variable.clone())
    }

    /// `self.name`
    #[must_use]
    pub fn attr(self, name: impl Into<String>) -> Self {
        Self::AttributeAccess {
            object: Box::new(self),
            name: name.into(),
        }
    }

    /// `self[index]`
    #[must_use]
    pub fn index(self, index: impl Into<Self>) -> Self {
        Self::IndexedAccess {
            object: Box::new(self),
            index: Box::new(index.into()),
        }
    }

    /// `self[*]`
    #[must_use]
    pub fn expand(self) -> Self {
        Self::Expansion {
            object: Box::new(self),
        }
    }

    #[must_use]
    pub fn call(name: impl Into<String>, args: impl IntoIterator<Item = Self>) -> Self {
        Self::Call {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn unary(op: UnaryOp, operand: impl Into<Self>) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand.into()),
        }
    }

    #[must_use]
    pub fn binary(op: BinaryOp, lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    #[must_use]
    pub fn in_(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOp::In, lhs, rhs)
    }

    #[must_use]
    pub fn not_in(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOp::NotIn, lhs, rhs)
    }

    #[must_use]
    pub fn eq(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Self::binary(BinaryOp::Eq, lhs, rhs)
    }

    //
    // inspection
    //

    /// Pre-order search; returns `true` as soon as `pred` matches a node.
    pub fn any_node(&self, pred: &mut dyn FnMut(&Self) -> bool) -> bool {
        if pred(self) {
            return true;
        }

        match self {
            Self::Value(_) | Self::Reference(_) => false,
            Self::Array(items) | Self::Call { args: items, .. } => {
                items.iter().any(|item| item.any_node(pred))
            }
            Self::Object(entries) => entries.iter().any(|(_, v)| v.any_node(pred)),
            Self::Range { low, high } => low.any_node(pred) || high.any_node(pred),
            Self::AttributeAccess { object, .. } | Self::Expansion { object } => {
                object.any_node(pred)
            }
            Self::IndexedAccess { object, index } => object.any_node(pred) || index.any_node(pred),
            Self::Unary { operand, .. } => operand.any_node(pred),
            Self::Binary { lhs, rhs, .. } => lhs.any_node(pred) || rhs.any_node(pred),
        }
    }

    /// Whether the variable is read anywhere beneath this node.
    #[must_use]
    pub fn references(&self, variable: VariableId) -> bool {
        self.any_node(&mut |node| matches!(node, Self::Reference(v) if v.id == variable))
    }

    /// Literal made entirely of literals.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Value(_) => true,
            Self::Array(items) => items.iter().all(Self::is_constant),
            Self::Object(entries) => entries.iter().all(|(_, v)| v.is_constant()),
            Self::Range { low, high } => low.is_constant() && high.is_constant(),
            _ => false,
        }
    }

    /// Array, object or range literal, or a literal value holding one.
    #[must_use]
    pub const fn is_structured_literal(&self) -> bool {
        matches!(
            self,
            Self::Array(_)
                | Self::Object(_)
                | Self::Range { .. }
                | Self::Value(Value::Array(_) | Value::Object(_) | Value::Range(_))
        )
    }
}

impl From<Value> for AstNode {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for AstNode {
    fn from(s: &str) -> Self {
        Self::Value(Value::from(s))
    }
}

impl From<i32> for AstNode {
    fn from(n: i32) -> Self {
        Self::Value(Value::from(n))
    }
}

impl From<f64> for AstNode {
    fn from(n: f64) -> Self {
        Self::Value(Value::Number(n))
    }
}

impl From<bool> for AstNode {
    fn from(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }
}

impl From<&Variable> for AstNode {
    fn from(variable: &Variable) -> Self {
        Self::reference(variable)
    }
}

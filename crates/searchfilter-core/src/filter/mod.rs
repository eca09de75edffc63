//! Module: filter
//! Responsibility: the compiled filter tree and its per-document evaluation.
//! Does not own: compilation (see `compile`) or term encoding (see `encode`).
//! Boundary: trees are immutable once built and shared across scan workers.

mod eval;
mod explain;


use crate::{
    ast::{AstNode, VariableId},
    encode::FieldName,
    expr::{Bindings, FunctionRegistry},
};
use derive_more::{Deref, Display};
use std::{ops::Mul, sync::Arc};

///
/// Boost
///
/// Multiplicative relevance weight attached to a filter node.
///

#[derive(Clone, Copy, Debug, Deref, Display, PartialEq, PartialOrd)]
pub struct Boost(f32);

impl Boost {
    pub const NONE: Self = Self(1.0);

    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for Boost {
    fn default() -> Self {
        Self::NONE
    }
}

impl Mul<f32> for Boost {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

///
/// TermFilter
///
/// Exact match of one term in one field.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TermFilter {
    pub field: FieldName,
    pub term: Vec<u8>,
    pub boost: Boost,
}

///
/// GranularRangeFilter
///
/// Numeric range over a numeric field. Bound terms are listed finest first,
/// one per precision level.
///

#[derive(Clone, Debug, PartialEq)]
pub struct GranularRangeFilter {
    pub field: FieldName,
    pub min: f64,
    pub max: f64,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
    pub min_terms: Vec<Vec<u8>>,
    pub max_terms: Vec<Vec<u8>>,
    pub boost: Boost,
}

impl GranularRangeFilter {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        let below = if self.max_inclusive {
            value <= self.max
        } else {
            value < self.max
        };

        above && below
    }
}

///
/// ExpressionFilter
///
/// Leaf evaluated per document by running the expression with the filtered
/// variable bound to the document. Two leaves are equal when they wrap the
/// same expression with the same boost.
///

#[derive(Clone, Debug)]
pub struct ExpressionFilter {
    node: Arc<AstNode>,
    variable: VariableId,
    bindings: Arc<Bindings>,
    functions: Arc<FunctionRegistry>,
    boost: Boost,
}

impl ExpressionFilter {
    #[must_use]
    pub const fn new(
        node: Arc<AstNode>,
        variable: VariableId,
        bindings: Arc<Bindings>,
        functions: Arc<FunctionRegistry>,
        boost: Boost,
    ) -> Self {
        Self {
            node,
            variable,
            bindings,
            functions,
            boost,
        }
    }

    #[must_use]
    pub fn node(&self) -> &AstNode {
        &self.node
    }

    #[must_use]
    pub const fn variable(&self) -> VariableId {
        self.variable
    }

    #[must_use]
    pub const fn boost(&self) -> Boost {
        self.boost
    }
}

impl PartialEq for ExpressionFilter {
    fn eq(&self, other: &Self) -> bool {
        self.variable == other.variable && self.boost == other.boost && self.node == other.node
    }
}

///
/// FilterNode
///

#[derive(Clone, Debug, PartialEq)]
pub enum FilterNode {
    Term(TermFilter),
    GranularRange(GranularRangeFilter),
    Or { children: Vec<Self>, boost: Boost },
    Not(Box<Self>),
    Expression(ExpressionFilter),
    Empty,
    All { boost: Boost },
}

impl FilterNode {
    #[must_use]
    pub fn not(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    #[must_use]
    pub const fn all(boost: Boost) -> Self {
        Self::All { boost }
    }

    /// Stable node kind label for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Term(_) => "TERM",
            Self::GranularRange(_) => "RANGE",
            Self::Or { .. } => "OR",
            Self::Not(_) => "NOT",
            Self::Expression(_) => "EXPRESSION",
            Self::Empty => "EMPTY",
            Self::All { .. } => "ALL",
        }
    }

    /// Boost carried by this node; `Not` and `Empty` carry none.
    #[must_use]
    pub const fn boost(&self) -> Option<Boost> {
        match self {
            Self::Term(TermFilter { boost, .. })
            | Self::GranularRange(GranularRangeFilter { boost, .. })
            | Self::Or { boost, .. }
            | Self::All { boost } => Some(*boost),
            Self::Expression(expr) => Some(expr.boost),
            Self::Not(_) | Self::Empty => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Or { children, .. } => children,
            Self::Not(child) => std::slice::from_ref(child.as_ref()),
            _ => &[],
        }
    }

    /// Pre-order traversal.
    pub fn visit(&self, f: &mut impl FnMut(&Self)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

use crate::{
    ast::{AstNode, VariableId},
    error::CompileError,
    expr::FunctionRegistry,
};

///
/// Classification
///
/// How a value operand can be turned into filter input.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classification {
    /// Scalar literal; used as-is.
    ConstantScalar,
    /// Array or range literal made only of literals.
    ConstantCollection,
    /// Deterministic and free of the filtered variable; evaluated once.
    ClosedFormExpression,
    /// Reads the filtered variable; needs per-document evaluation.
    SelfReferencing,
    /// Calls a non-deterministic function; needs per-document evaluation.
    NonDeterministic,
    /// Array or object in a position that must hold a scalar.
    StructurallyInvalid,
}

impl Classification {
    /// Whether the operand must be evaluated per document.
    #[must_use]
    pub const fn needs_fallback(self) -> bool {
        matches!(self, Self::SelfReferencing | Self::NonDeterministic)
    }
}

///
/// ValueClassifier
///

#[derive(Clone, Copy, Debug)]
pub struct ValueClassifier<'a> {
    variable: VariableId,
    functions: &'a FunctionRegistry,
}

impl<'a> ValueClassifier<'a> {
    #[must_use]
    pub const fn new(variable: VariableId, functions: &'a FunctionRegistry) -> Self {
        Self {
            variable,
            functions,
        }
    }

    /// `false` when any call beneath `node` is non-deterministic.
    pub fn is_deterministic(&self, node: &AstNode) -> Result<bool, CompileError> {
        let mut unknown = None;
        let found = node.any_node(&mut |n| match n {
            AstNode::Call { name, .. } => match self.functions.get(name) {
                Some(function) => !function.is_deterministic(),
                None => {
                    unknown = Some(name.clone());
                    true
                }
            },
            _ => false,
        });

        match unknown {
            Some(name) => Err(CompileError::UnknownFunction { name }),
            None => Ok(!found),
        }
    }

    pub fn classify(&self, node: &AstNode) -> Result<Classification, CompileError> {
        if !self.is_deterministic(node)? {
            return Ok(Classification::NonDeterministic);
        }
        if node.references(self.variable) {
            return Ok(Classification::SelfReferencing);
        }

        Ok(match node {
            AstNode::Value(value) if value.is_scalar() => Classification::ConstantScalar,
            AstNode::Value(_) => Classification::ConstantCollection,
            AstNode::Array(_) | AstNode::Range { .. } if node.is_constant() => {
                Classification::ConstantCollection
            }
            _ => Classification::ClosedFormExpression,
        })
    }

    /// Classification of one membership-list element, where only scalars
    /// are admissible.
    pub fn classify_element(&self, node: &AstNode) -> Result<Classification, CompileError> {
        let class = self.classify(node)?;
        if !class.needs_fallback() && node.is_structured_literal() {
            return Ok(Classification::StructurallyInvalid);
        }

        Ok(class)
    }
}

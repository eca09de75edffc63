//! Module: compile
//! Responsibility: translate membership and range predicates into filter trees.
//! Does not own: predicate parsing, index layout, or scoring.
//! Boundary: `compile`, `probe` and `is_supported` are the only entry points;
//! everything below them is composed from the component builders.

mod classify;
mod context;
mod fallback;
mod membership;
mod path;
mod range;
mod wrapper;

#[cfg(test)]
mod tests;

pub use classify::{Classification, ValueClassifier};
pub use context::{CompileContext, CompileMode, QueryContext};
pub use path::{AttributePath, PathResolver, PathSegment};

use crate::{
    ast::{AstNode, BinaryOp},
    error::CompileError,
    filter::FilterNode,
    value::Value,
};
use fallback::ExpressionFallback;
use membership::MembershipFilterBuilder;
use range::RangeFilterBuilder;

/// Compile `node` into a filter tree over `query.variable`.
pub fn compile(query: &QueryContext, node: &AstNode) -> Result<FilterNode, CompileError> {
    let ctx = CompileContext::root(query)?;
    let filter = Compiler::new(query, CompileMode::Build).compile_node(node, &ctx)?;
    tracing::trace!(predicate = %node, kind = filter.kind(), "compiled filter");

    Ok(filter)
}

/// Check that `node` compiles without evaluating anything bound at runtime.
pub fn probe(query: &QueryContext, node: &AstNode) -> Result<(), CompileError> {
    let ctx = CompileContext::root(query)?;
    Compiler::new(query, CompileMode::Probe).compile_node(node, &ctx)?;

    Ok(())
}

/// Optimizer boundary: unsupported predicates are reported as `false`,
/// every other failure is propagated.
pub fn is_supported(query: &QueryContext, node: &AstNode) -> Result<bool, CompileError> {
    match probe(query, node) {
        Ok(()) => Ok(true),
        Err(err) if err.is_recoverable() => {
            tracing::debug!(predicate = %node, error = %err, "predicate not supported by index");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

///
/// Compiler
///
/// Shared state for one compilation. Builders borrow it to reach the
/// classifier, the path resolver and the evaluator.
///

pub(crate) struct Compiler<'a> {
    query: &'a QueryContext,
    mode: CompileMode,
    classifier: ValueClassifier<'a>,
    paths: PathResolver<'a>,
}

impl<'a> Compiler<'a> {
    fn new(query: &'a QueryContext, mode: CompileMode) -> Self {
        Self {
            query,
            mode,
            classifier: ValueClassifier::new(query.variable.id, &query.functions),
            paths: PathResolver::new(query.variable.id, query.evaluator(), mode),
        }
    }

    pub(crate) fn compile_node(
        &self,
        node: &AstNode,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        match node {
            AstNode::Binary {
                op: op @ (BinaryOp::In | BinaryOp::NotIn),
                lhs,
                rhs,
            } => self.compile_membership(node, lhs, rhs, *op == BinaryOp::NotIn, ctx),
            AstNode::Call { name, args } if wrapper::is_analyzer(name) => {
                self.compile_analyzer(args, ctx)
            }
            AstNode::Call { name, args } if wrapper::is_boost(name) => {
                self.compile_boost(args, ctx)
            }
            other => Err(CompileError::unsupported(format!(
                "'{other}' is not a membership or range predicate"
            ))),
        }
    }

    fn compile_membership(
        &self,
        node: &AstNode,
        lhs: &AstNode,
        rhs: &AstNode,
        negated: bool,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        if let AstNode::Array(elements) = rhs {
            return MembershipFilterBuilder::new(self)
                .build_literal(node, lhs, elements, negated, ctx);
        }

        let fallback = ExpressionFallback::new(self);
        if !self.classifier.is_deterministic(node)?
            || !self.paths.is_attribute_access(lhs)
            || rhs.references(self.query.variable.id)
        {
            return fallback.fold_or_leaf(node, ctx);
        }

        let path = self.paths.resolve(lhs)?;
        if let AstNode::Range { low, high } = rhs {
            return RangeFilterBuilder::new(self).build(&path, low, high, negated, ctx);
        }

        let Some(value) = self.value_of(rhs)? else {
            return Ok(FilterNode::Empty);
        };
        match value {
            Value::Array(items) => {
                MembershipFilterBuilder::new(self).build_values(&path, &items, negated, ctx)
            }
            Value::Range(range) => {
                Ok(RangeFilterBuilder::build_range(&path, range, negated, ctx))
            }
            other => Err(CompileError::unsupported(format!(
                "membership operand '{rhs}' evaluated to {}, expected array or range",
                other.tag()
            ))),
        }
    }

    /// Evaluate a deterministic, variable-free operand once.
    ///
    /// While probing, only literals are evaluated; `None` stands in for the
    /// value of anything else.
    pub(crate) fn value_of(&self, node: &AstNode) -> Result<Option<Value>, CompileError> {
        if self.mode == CompileMode::Probe && !node.is_constant() {
            return Ok(None);
        }

        Ok(Some(self.query.evaluator().evaluate(node)?))
    }
}

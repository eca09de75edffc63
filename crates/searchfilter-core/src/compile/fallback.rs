use crate::{
    ast::AstNode,
    compile::{CompileContext, Compiler},
    error::CompileError,
    filter::{ExpressionFilter, FilterNode},
    value::to_bool,
};
use std::sync::Arc;

///
/// ExpressionFallback
///
/// Wraps sub-expressions the index cannot answer into per-document
/// `Expression` leaves, folding variable-free constants instead.
///

pub(crate) struct ExpressionFallback<'a> {
    compiler: &'a Compiler<'a>,
}

impl<'a> ExpressionFallback<'a> {
    pub(crate) const fn new(compiler: &'a Compiler<'a>) -> Self {
        Self { compiler }
    }

    pub(crate) fn leaf(&self, node: AstNode, ctx: &CompileContext) -> FilterNode {
        tracing::debug!(expression = %node, "falling back to expression evaluation");
        let query = self.compiler.query;

        FilterNode::Expression(ExpressionFilter::new(
            Arc::new(node),
            query.variable.id,
            Arc::clone(&query.bindings),
            Arc::clone(&query.functions),
            ctx.boost,
        ))
    }

    /// `All` or `Empty` when `node` can be decided now, otherwise a leaf.
    pub(crate) fn fold_or_leaf(
        &self,
        node: &AstNode,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let deterministic = self.compiler.classifier.is_deterministic(node)?;
        if !deterministic || node.references(ctx.filtered_variable) {
            return Ok(self.leaf(node.clone(), ctx));
        }

        let Some(value) = self.compiler.value_of(node)? else {
            return Ok(FilterNode::Empty);
        };
        let folded = to_bool(&value);
        tracing::debug!(expression = %node, folded, "folded constant expression");

        Ok(if folded {
            FilterNode::all(ctx.boost)
        } else {
            FilterNode::Empty
        })
    }
}

use crate::{
    ast::AstNode,
    compile::{AttributePath, CompileContext, Compiler},
    encode::{granular_terms, mangle_numeric},
    error::CompileError,
    filter::{FilterNode, GranularRangeFilter},
    value::{Range, to_int64},
};

///
/// RangeFilterBuilder
///
/// `attr IN lo..hi` becomes one inclusive numeric range. Bounds are
/// coerced to integers the same way the range operator coerces them.
///

pub(crate) struct RangeFilterBuilder<'a> {
    compiler: &'a Compiler<'a>,
}

impl<'a> RangeFilterBuilder<'a> {
    pub(crate) const fn new(compiler: &'a Compiler<'a>) -> Self {
        Self { compiler }
    }

    pub(crate) fn build(
        &self,
        path: &AttributePath,
        low: &AstNode,
        high: &AstNode,
        negated: bool,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let (Some(low), Some(high)) = (self.compiler.value_of(low)?, self.compiler.value_of(high)?)
        else {
            return Ok(FilterNode::Empty);
        };
        let range = Range::new(to_int64(&low), to_int64(&high));

        Ok(Self::build_range(path, range, negated, ctx))
    }

    /// The range keeps its bounds as written; `5..1` matches nothing.
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn build_range(
        path: &AttributePath,
        range: Range,
        negated: bool,
        ctx: &CompileContext,
    ) -> FilterNode {
        let min = range.low as f64;
        let max = range.high as f64;
        let field = mangle_numeric(&path.to_string());
        tracing::trace!(field = %field, min, max, "range leaf");

        let filter = FilterNode::GranularRange(GranularRangeFilter {
            field,
            min,
            max,
            min_inclusive: true,
            max_inclusive: true,
            min_terms: granular_terms(min),
            max_terms: granular_terms(max),
            boost: ctx.boost,
        });

        if negated { FilterNode::not(filter) } else { filter }
    }
}

use crate::{
    ast::AstNode,
    compile::{
        AttributePath, Classification, CompileContext, Compiler, fallback::ExpressionFallback,
    },
    encode::TermEncoder,
    error::CompileError,
    filter::{FilterNode, TermFilter},
    value::{Value, ValueTag},
};

///
/// MembershipFilterBuilder
///
/// `attr IN [..]` becomes a disjunction with one child per list element,
/// in list order. The disjunction carries the context boost; its children
/// are built with a neutral boost.
///

pub(crate) struct MembershipFilterBuilder<'a> {
    compiler: &'a Compiler<'a>,
}

impl<'a> MembershipFilterBuilder<'a> {
    pub(crate) const fn new(compiler: &'a Compiler<'a>) -> Self {
        Self { compiler }
    }

    /// Literal list on the right-hand side: `lhs IN [e0, e1, ..]`.
    ///
    /// Either side may hold the attribute. When the left side is not an
    /// attribute access, list elements that are take its place and the
    /// remaining elements are folded or evaluated per document.
    pub(crate) fn build_literal(
        &self,
        node: &AstNode,
        lhs: &AstNode,
        elements: &[AstNode],
        negated: bool,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let compiler = self.compiler;
        let fallback = ExpressionFallback::new(compiler);

        if !compiler.classifier.is_deterministic(lhs)? {
            return fallback.fold_or_leaf(node, ctx);
        }

        let lhs_path = if compiler.paths.is_attribute_access(lhs) {
            Some(compiler.paths.resolve(lhs)?)
        } else if elements.iter().any(|e| compiler.paths.is_attribute_access(e)) {
            None
        } else {
            return fallback.fold_or_leaf(node, ctx);
        };

        if elements.is_empty() {
            return Ok(Self::empty_list(negated, ctx));
        }

        let child_ctx = ctx.child();
        let children = elements
            .iter()
            .enumerate()
            .map(|(index, element)| match &lhs_path {
                Some(path) => self.attribute_element(path, lhs, index, element, &child_ctx),
                None => self.reversed_element(lhs, index, element, &child_ctx),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::finish(children, negated, ctx))
    }

    /// Already-evaluated list: every element must be a scalar.
    pub(crate) fn build_values(
        &self,
        path: &AttributePath,
        values: &[Value],
        negated: bool,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        if values.is_empty() {
            return Ok(Self::empty_list(negated, ctx));
        }

        let child_ctx = ctx.child();
        let children = values
            .iter()
            .enumerate()
            .map(|(index, value)| Self::term(path, index, value, &child_ctx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::finish(children, negated, ctx))
    }

    // `attr == element`
    fn attribute_element(
        &self,
        path: &AttributePath,
        lhs: &AstNode,
        index: usize,
        element: &AstNode,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        match self.compiler.classifier.classify_element(element)? {
            Classification::SelfReferencing | Classification::NonDeterministic => {
                let comparison = AstNode::eq(lhs.clone(), element.clone());
                Ok(ExpressionFallback::new(self.compiler).leaf(comparison, ctx))
            }
            Classification::StructurallyInvalid => Err(CompileError::InvalidCollectionElement {
                index,
                found: Self::literal_tag(element),
            }),
            Classification::ConstantScalar
            | Classification::ConstantCollection
            | Classification::ClosedFormExpression => match self.compiler.value_of(element)? {
                Some(value) => Self::term(path, index, &value, ctx),
                None => Ok(FilterNode::Empty),
            },
        }
    }

    // `element == lhs` with the attribute, if any, on the element side
    fn reversed_element(
        &self,
        lhs: &AstNode,
        index: usize,
        element: &AstNode,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let compiler = self.compiler;
        let comparison = AstNode::eq(lhs.clone(), element.clone());

        if !compiler.paths.is_attribute_access(element)
            || lhs.references(ctx.filtered_variable)
            || !compiler.classifier.is_deterministic(element)?
        {
            return ExpressionFallback::new(compiler).fold_or_leaf(&comparison, ctx);
        }

        let path = compiler.paths.resolve(element)?;
        match compiler.value_of(lhs)? {
            Some(value) => Self::term(&path, index, &value, ctx),
            None => Ok(FilterNode::Empty),
        }
    }

    fn term(
        path: &AttributePath,
        index: usize,
        value: &Value,
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let encoded = TermEncoder::new(ctx.analyzer.as_ref())
            .encode(&path.to_string(), value)
            .ok_or(CompileError::InvalidCollectionElement {
                index,
                found: value.tag(),
            })?;
        tracing::trace!(field = %encoded.field, "term leaf");

        Ok(FilterNode::Term(TermFilter {
            field: encoded.field,
            term: encoded.term,
            boost: ctx.boost,
        }))
    }

    fn literal_tag(element: &AstNode) -> ValueTag {
        match element {
            AstNode::Value(value) => value.tag(),
            AstNode::Object(_) => ValueTag::Object,
            AstNode::Range { .. } => ValueTag::Range,
            _ => ValueTag::Array,
        }
    }

    fn empty_list(negated: bool, ctx: &CompileContext) -> FilterNode {
        if negated {
            FilterNode::all(ctx.boost)
        } else {
            FilterNode::Empty
        }
    }

    fn finish(children: Vec<FilterNode>, negated: bool, ctx: &CompileContext) -> FilterNode {
        let any = FilterNode::Or {
            children,
            boost: ctx.boost,
        };

        if negated { FilterNode::not(any) } else { any }
    }
}

mod membership;
mod range;

use crate::{
    analyzer::IdentityAnalyzer,
    ast::{AstNode, Variable, VariableId},
    compile::{QueryContext, compile, probe},
    encode::{
        full_precision_term, granular_terms, mangle_bool, mangle_null, mangle_numeric,
        mangle_string,
    },
    expr::{Bindings, Function, FunctionRegistry},
    filter::{Boost, ExpressionFilter, FilterNode, GranularRangeFilter, TermFilter},
};
use std::sync::Arc;

///
/// FIXTURES
///

pub(super) fn doc() -> Variable {
    Variable::new(0, "d")
}

pub(super) fn functions() -> FunctionRegistry {
    let mut functions = FunctionRegistry::with_builtins();
    functions.register(Function::new("_FORWARD_", true, 1, Some(1), |args| Ok(args[0].clone())));
    functions.register(Function::new("_NONDETERM_", false, 1, Some(1), |args| {
        Ok(args[0].clone())
    }));
    functions
}

pub(super) fn query() -> QueryContext {
    QueryContext::new(doc()).with_functions(functions())
}

pub(super) fn query_with(bindings: Bindings) -> QueryContext {
    query().with_bindings(bindings)
}

/// `d.<segments joined by dots>`
pub(super) fn attr(path: &str) -> AstNode {
    path.split('.')
        .fold(AstNode::reference(&doc()), AstNode::attr)
}

pub(super) fn string_term(path: &str, value: &str) -> FilterNode {
    FilterNode::Term(TermFilter {
        field: mangle_string(path, &IdentityAnalyzer),
        term: value.as_bytes().to_vec(),
        boost: Boost::NONE,
    })
}

pub(super) fn number_term(path: &str, value: f64) -> FilterNode {
    FilterNode::Term(TermFilter {
        field: mangle_numeric(path),
        term: full_precision_term(value),
        boost: Boost::NONE,
    })
}

pub(super) fn bool_term(path: &str, value: bool) -> FilterNode {
    FilterNode::Term(TermFilter {
        field: mangle_bool(path),
        term: vec![if value { 0xFF } else { 0x00 }],
        boost: Boost::NONE,
    })
}

pub(super) fn null_term(path: &str) -> FilterNode {
    FilterNode::Term(TermFilter {
        field: mangle_null(path),
        term: Vec::new(),
        boost: Boost::NONE,
    })
}

pub(super) fn any_of(children: Vec<FilterNode>, boost: f32) -> FilterNode {
    FilterNode::Or {
        children,
        boost: Boost::new(boost),
    }
}

pub(super) fn range(path: &str, min: f64, max: f64, boost: f32) -> FilterNode {
    FilterNode::GranularRange(GranularRangeFilter {
        field: mangle_numeric(path),
        min,
        max,
        min_inclusive: true,
        max_inclusive: true,
        min_terms: granular_terms(min),
        max_terms: granular_terms(max),
        boost: Boost::new(boost),
    })
}

// Expression leaves compare by expression and boost only.
pub(super) fn expression(node: AstNode, boost: f32) -> FilterNode {
    FilterNode::Expression(ExpressionFilter::new(
        Arc::new(node),
        VariableId(0),
        Arc::new(Bindings::new()),
        Arc::new(FunctionRegistry::empty()),
        Boost::new(boost),
    ))
}

/// Compiles to `expected` and passes the dry run.
#[track_caller]
pub(super) fn assert_compiles(query: &QueryContext, node: &AstNode, expected: &FilterNode) {
    probe(query, node).expect("probe should succeed");
    let actual = compile(query, node).expect("compile should succeed");
    assert_eq!(&actual, expected, "\nactual:\n{actual}\nexpected:\n{expected}");
}

#[test]
fn filter_trees_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FilterNode>();
    assert_send_sync::<QueryContext>();
}

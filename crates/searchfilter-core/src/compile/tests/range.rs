use super::*;
use crate::{
    error::CompileError,
    expr::EvalError,
    value::{Range, Value},
};

#[test]
fn literal_range_becomes_inclusive_numeric_range() {
    let node = AstNode::in_(attr("a.b.c"), AstNode::range(4, 5));

    assert_compiles(&query(), &node, &range("a.b.c", 4.0, 5.0, 1.0));
}

#[test]
fn negated_range_is_wrapped_in_not() {
    let node = AstNode::not_in(attr("a"), AstNode::range(4, 5));

    assert_compiles(&query(), &node, &FilterNode::not(range("a", 4.0, 5.0, 1.0)));
}

#[test]
fn range_bounds_use_integer_coercion() {
    let cases: [(AstNode, AstNode, f64, f64); 9] = [
        (AstNode::from(4.5), AstNode::from(5.0), 4.0, 5.0),
        (AstNode::from("4a"), AstNode::from("5av"), 4.0, 5.0),
        (AstNode::from("a4"), AstNode::from(5), 0.0, 5.0),
        (AstNode::from(false), AstNode::from(true), 0.0, 1.0),
        (AstNode::null(), AstNode::null(), 0.0, 0.0),
        (AstNode::from("a"), AstNode::from(4), 0.0, 4.0),
        (AstNode::from(1), AstNode::null(), 1.0, 0.0),
        (AstNode::from(false), AstNode::from(5.5), 0.0, 5.0),
        (AstNode::from("false"), AstNode::from(1), 0.0, 1.0),
    ];

    for (low, high, min, max) in cases {
        let node = AstNode::in_(attr("a"), AstNode::range(low, high));
        assert_compiles(&query(), &node, &range("a", min, max, 1.0));
    }
}

#[test]
fn nested_range_bound_converts_through_its_members() {
    // (1..4)..5: a multi-member range converts to 0
    let node = AstNode::in_(attr("a"), AstNode::range(AstNode::range(1, 4), 5));

    assert_compiles(&query(), &node, &range("a", 0.0, 5.0, 1.0));
}

#[test]
fn bound_range_compiles_like_a_literal() {
    let x = Variable::new(1, "x");
    let query = query_with(Bindings::new().with(&x, Value::Range(Range::new(1, 3))));

    assert_compiles(
        &query,
        &AstNode::in_(attr("a"), AstNode::reference(&x)),
        &range("a", 1.0, 3.0, 1.0),
    );
    assert_compiles(
        &query,
        &AstNode::not_in(attr("a"), AstNode::reference(&x)),
        &FilterNode::not(range("a", 1.0, 3.0, 1.0)),
    );
}

#[test]
fn bound_bounds_are_evaluated_once() {
    let x = Variable::new(1, "x");
    let query = query_with(Bindings::new().with(&x, Value::from(2)));
    let node = AstNode::in_(attr("a"), AstNode::range(AstNode::reference(&x), 7));

    assert_compiles(&query, &node, &range("a", 2.0, 7.0, 1.0));
}

#[test]
fn unbound_bound_fails_only_when_building() {
    let x = Variable::new(1, "x");
    let node = AstNode::in_(attr("a"), AstNode::range(AstNode::reference(&x), 5));

    assert!(probe(&query(), &node).is_ok());
    assert_eq!(
        compile(&query(), &node),
        Err(CompileError::Evaluation(EvalError::UnboundVariable { name: "x".into() }))
    );
}

#[test]
fn unresolvable_range_predicates_fall_back_whole() {
    let d = doc();
    let cases = [
        AstNode::in_(AstNode::reference(&d), AstNode::range(4, 5)),
        AstNode::in_(AstNode::reference(&d).expand(), AstNode::range(4, 5)),
        AstNode::in_(attr("a").expand(), AstNode::range(4, 5)),
        AstNode::in_(attr("a"), AstNode::range(attr("b"), 5)),
        AstNode::in_(AstNode::range(4, 5), attr("a")),
        AstNode::in_(4, AstNode::range(attr("b"), 5)),
        AstNode::in_(attr("a"), AstNode::range(AstNode::call("RAND", []), 5)),
    ];

    for node in cases {
        assert_compiles(&query(), &node, &expression(node.clone(), 1.0));
    }
}

#[test]
fn constant_range_membership_folds() {
    assert_compiles(
        &query(),
        &AstNode::in_(4, AstNode::range(4, 5)),
        &FilterNode::all(Boost::NONE),
    );
    assert_compiles(&query(), &AstNode::in_(4.3, AstNode::range(4, 5)), &FilterNode::Empty);
    assert_compiles(
        &query(),
        &AstNode::not_in(6, AstNode::range(4, 5)),
        &FilterNode::all(Boost::NONE),
    );
}

#[test]
fn expanded_range_operand_compiles_to_member_terms() {
    let node = AstNode::in_(attr("a"), AstNode::range(1, 3).expand());

    let expected = any_of(
        vec![number_term("a", 1.0), number_term("a", 2.0), number_term("a", 3.0)],
        1.0,
    );
    assert_eq!(compile(&query(), &node), Ok(expected));
}

#[test]
fn oversized_range_expansion_is_rejected() {
    let cases = [
        AstNode::range(-1e19, 1e19),
        AstNode::range(0.0, 1e12),
        AstNode::range(1e12, 0.0),
    ];

    for operand in cases {
        let node = AstNode::in_(attr("a"), operand.expand());
        let err = compile(&query(), &node).expect_err("expansion over the limit must fail");

        assert!(
            matches!(
                err,
                CompileError::Evaluation(EvalError::ExpansionTooLarge { limit, .. })
                    if limit == Range::EXPANSION_LIMIT
            ),
            "unexpected error: {err:?}"
        );
        assert!(!err.is_recoverable());
    }
}

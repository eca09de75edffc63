use super::*;
use crate::{
    ast::BinaryOp,
    compile::is_supported,
    error::CompileError,
    expr::EvalError,
    value::{Value, ValueTag},
};

fn scalar_list() -> AstNode {
    AstNode::array([
        AstNode::from("1"),
        AstNode::from(2),
        AstNode::from(true),
        AstNode::null(),
    ])
}

#[test]
fn literal_list_becomes_disjunction_of_typed_terms() {
    let node = AstNode::in_(attr("a.b.c.e.f"), scalar_list());
    let expected = any_of(
        vec![
            string_term("a.b.c.e.f", "1"),
            number_term("a.b.c.e.f", 2.0),
            bool_term("a.b.c.e.f", true),
            null_term("a.b.c.e.f"),
        ],
        1.0,
    );

    assert_compiles(&query(), &node, &expected);
}

#[test]
fn negated_list_wraps_the_same_disjunction() {
    let positive = compile(&query(), &AstNode::in_(attr("a"), scalar_list())).unwrap();
    let negative = compile(&query(), &AstNode::not_in(attr("a"), scalar_list())).unwrap();

    assert_eq!(negative, FilterNode::not(positive));
}

#[test]
fn empty_list_needs_no_disjunction() {
    let empty = AstNode::array([]);

    assert_compiles(&query(), &AstNode::in_(attr("a"), empty.clone()), &FilterNode::Empty);
    assert_compiles(
        &query(),
        &AstNode::not_in(attr("a"), empty),
        &FilterNode::all(Boost::NONE),
    );
}

#[test]
fn self_referencing_elements_fall_back_per_element() {
    let d = doc();
    let node = AstNode::in_(
        attr("a.b"),
        AstNode::array([
            AstNode::from("1"),
            AstNode::reference(&d),
            attr("e"),
            AstNode::binary(BinaryOp::Add, 1, attr("b")),
            AstNode::from("3"),
        ]),
    );
    let expected = any_of(
        vec![
            string_term("a.b", "1"),
            expression(AstNode::eq(attr("a.b"), AstNode::reference(&d)), 1.0),
            expression(AstNode::eq(attr("a.b"), attr("e")), 1.0),
            expression(
                AstNode::eq(attr("a.b"), AstNode::binary(BinaryOp::Add, 1, attr("b"))),
                1.0,
            ),
            string_term("a.b", "3"),
        ],
        1.0,
    );

    assert_compiles(&query(), &node, &expected);
}

#[test]
fn non_deterministic_element_falls_back_alone() {
    let rand = AstNode::call("RAND", []);
    let node = AstNode::in_(
        attr("a"),
        AstNode::array([AstNode::from("1"), rand.clone(), AstNode::from("3")]),
    );
    let expected = any_of(
        vec![
            string_term("a", "1"),
            expression(AstNode::eq(attr("a"), rand), 1.0),
            string_term("a", "3"),
        ],
        1.0,
    );

    assert_compiles(&query(), &node, &expected);
}

#[test]
fn structured_elements_are_rejected_even_when_probing() {
    let node = AstNode::in_(
        attr("a"),
        AstNode::array([AstNode::from("1"), AstNode::array([AstNode::from(2)])]),
    );
    let expected = CompileError::InvalidCollectionElement {
        index: 1,
        found: ValueTag::Array,
    };

    assert_eq!(probe(&query(), &node), Err(expected.clone()));
    assert_eq!(compile(&query(), &node), Err(expected));

    let node = AstNode::in_(
        attr("a"),
        AstNode::array([AstNode::object([("x", AstNode::from(1))])]),
    );
    assert_eq!(
        compile(&query(), &node),
        Err(CompileError::InvalidCollectionElement {
            index: 0,
            found: ValueTag::Object,
        })
    );
}

#[test]
fn bound_element_holding_an_array_is_rejected() {
    let x = Variable::new(1, "x");
    let query = query_with(Bindings::new().with(&x, Value::Array(vec![Value::from("2")])));
    let node = AstNode::in_(
        attr("a"),
        AstNode::array([AstNode::from("1"), AstNode::reference(&x)]),
    );

    assert!(probe(&query, &node).is_ok());
    assert_eq!(
        compile(&query, &node),
        Err(CompileError::InvalidCollectionElement {
            index: 1,
            found: ValueTag::Array,
        })
    );
}

#[test]
fn closed_form_elements_are_evaluated_once() {
    let x = Variable::new(1, "x");
    let query = query_with(Bindings::new().with(&x, Value::from("abc")));
    let node = AstNode::in_(
        attr("a"),
        AstNode::array([
            AstNode::binary(BinaryOp::Add, 1, 1),
            AstNode::reference(&x),
            AstNode::call("_FORWARD_", [AstNode::from(true)]),
        ]),
    );
    let expected = any_of(
        vec![
            number_term("a", 2.0),
            string_term("a", "abc"),
            bool_term("a", true),
        ],
        1.0,
    );

    assert_compiles(&query, &node, &expected);
}

#[test]
fn unbound_element_fails_only_when_building() {
    let x = Variable::new(1, "x");
    let node = AstNode::in_(
        attr("a"),
        AstNode::array([AstNode::reference(&x).attr("b")]),
    );

    assert!(probe(&query(), &node).is_ok());
    assert_eq!(
        compile(&query(), &node),
        Err(CompileError::Evaluation(EvalError::UnboundVariable { name: "x".into() }))
    );
}

#[test]
fn bound_list_compiles_like_a_literal() {
    let x = Variable::new(1, "x");
    let list = Value::Array(vec![Value::from("1"), Value::from(2), Value::from("3")]);
    let query = query_with(Bindings::new().with(&x, list));
    let expected = any_of(
        vec![
            string_term("a.b", "1"),
            number_term("a.b", 2.0),
            string_term("a.b", "3"),
        ],
        1.0,
    );

    assert_compiles(&query, &AstNode::in_(attr("a.b"), AstNode::reference(&x)), &expected);
    assert_compiles(
        &query,
        &AstNode::not_in(attr("a.b"), AstNode::reference(&x)),
        &FilterNode::not(expected),
    );
}

#[test]
fn bound_scalar_is_not_a_membership_list() {
    let x = Variable::new(1, "x");
    let query = query_with(Bindings::new().with(&x, Value::from(4)));
    let node = AstNode::in_(attr("a"), AstNode::reference(&x));

    let err = compile(&query, &node).unwrap_err();
    assert!(matches!(err, CompileError::Unsupported { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn attribute_on_the_element_side_swaps_roles() {
    let node = AstNode::in_(
        4,
        AstNode::array([AstNode::from(1), attr("b.a"), AstNode::from(4)]),
    );
    let expected = any_of(
        vec![
            FilterNode::Empty,
            number_term("b.a", 4.0),
            FilterNode::all(Boost::NONE),
        ],
        1.0,
    );

    assert_compiles(&query(), &node, &expected);
}

#[test]
fn constant_predicates_fold() {
    let list = |items: &[i32]| AstNode::array(items.iter().map(|&i| AstNode::from(i)));

    assert_compiles(&query(), &AstNode::in_(4, list(&[1, 2, 3])), &FilterNode::Empty);
    assert_compiles(
        &query(),
        &AstNode::in_(4, list(&[1, 2, 3, 4])),
        &FilterNode::all(Boost::NONE),
    );
    assert_compiles(
        &query(),
        &AstNode::not_in(4, list(&[1, 2, 3])),
        &FilterNode::all(Boost::NONE),
    );
    assert_compiles(&query(), &AstNode::in_(AstNode::null(), list(&[1, 2])), &FilterNode::Empty);
    assert_compiles(&query(), &AstNode::in_("d.a", list(&[1, 2])), &FilterNode::Empty);
    assert_compiles(&query(), &AstNode::in_(4, list(&[])), &FilterNode::Empty);
}

#[test]
fn unresolvable_operands_fall_back_whole() {
    let d = doc();
    let cases = [
        AstNode::in_(attr("a"), AstNode::reference(&d)),
        AstNode::in_(attr("a"), AstNode::reference(&d).expand()),
        AstNode::in_(attr("a"), attr("b")),
        AstNode::in_(AstNode::reference(&d), AstNode::array([AstNode::from(1)])),
        AstNode::in_(attr("a").expand(), AstNode::array([AstNode::from(1)])),
        AstNode::in_(
            AstNode::array([AstNode::from(1), AstNode::from(2), AstNode::from("3")]),
            attr("a"),
        ),
        AstNode::in_(
            AstNode::call("_NONDETERM_", [attr("a")]),
            AstNode::array([AstNode::from(1)]),
        ),
    ];

    for node in cases {
        assert_compiles(&query(), &node, &expression(node.clone(), 1.0));
    }
}

#[test]
fn unknown_function_is_a_hard_error() {
    let node = AstNode::in_(attr("a"), AstNode::array([AstNode::call("NOPE", [])]));

    assert_eq!(
        compile(&query(), &node),
        Err(CompileError::UnknownFunction { name: "NOPE".into() })
    );
}

#[test]
fn other_predicates_are_unsupported() {
    let node = AstNode::eq(attr("a"), 1);

    assert!(matches!(
        compile(&query(), &node),
        Err(CompileError::Unsupported { .. })
    ));
    assert_eq!(is_supported(&query(), &node), Ok(false));
    assert_eq!(
        is_supported(&query(), &AstNode::in_(attr("a"), scalar_list())),
        Ok(true)
    );
}

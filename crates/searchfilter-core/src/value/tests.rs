use super::*;
use std::cmp::Ordering;

#[test]
fn to_int64_uses_leading_integer_prefix() {
    assert_eq!(to_int64(&Value::from("4a")), 4);
    assert_eq!(to_int64(&Value::from("5av")), 5);
    assert_eq!(to_int64(&Value::from("a4")), 0);
    assert_eq!(to_int64(&Value::from("  -12x")), -12);
    assert_eq!(to_int64(&Value::from("false")), 0);
    assert_eq!(to_int64(&Value::from("")), 0);
}

#[test]
fn to_int64_truncates_numbers_toward_zero() {
    assert_eq!(to_int64(&Value::Number(4.5)), 4);
    assert_eq!(to_int64(&Value::Number(-4.5)), -4);
    assert_eq!(to_int64(&Value::Number(f64::NAN)), 0);
    assert_eq!(to_int64(&Value::Bool(true)), 1);
    assert_eq!(to_int64(&Value::Null), 0);
}

#[test]
fn collections_convert_through_their_single_element() {
    assert_eq!(to_int64(&Value::Array(vec![Value::from(7)])), 7);
    assert_eq!(to_int64(&Value::Array(vec![Value::from(7), Value::from(8)])), 0);
    assert_eq!(to_int64(&Value::Range(Range::new(3, 3))), 3);
    assert_eq!(to_int64(&Value::Range(Range::new(1, 4))), 0);
    assert!((to_number(&Value::Array(vec![])) - 0.0).abs() < f64::EPSILON);
}

#[test]
fn to_number_requires_whole_string_to_be_numeric() {
    assert!((to_number(&Value::from(" 4.5 ")) - 4.5).abs() < f64::EPSILON);
    assert!((to_number(&Value::from("4a")) - 0.0).abs() < f64::EPSILON);
}

#[test]
fn truthiness_follows_query_language_rules() {
    assert!(!to_bool(&Value::Null));
    assert!(!to_bool(&Value::from("")));
    assert!(!to_bool(&Value::from(0)));
    assert!(to_bool(&Value::from("0")));
    assert!(to_bool(&Value::Array(vec![])));
    assert!(to_bool(&Value::Object(vec![])));
}

#[test]
fn compare_orders_by_type_rank_first() {
    let ordered = [
        Value::Null,
        Value::Bool(false),
        Value::Bool(true),
        Value::from(-1),
        Value::from(10),
        Value::from(""),
        Value::from("a"),
        Value::Array(vec![]),
        Value::Object(vec![]),
    ];
    for pair in ordered.windows(2) {
        assert_eq!(compare(&pair[0], &pair[1]), Ordering::Less, "{} < {}", pair[0], pair[1]);
    }
}

#[test]
fn ranges_compare_equal_to_their_expansion() {
    let range = Value::Range(Range::new(1, 3));
    let array = Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)]);
    assert!(equals(&range, &array));

    let descending = Value::Range(Range::new(3, 1));
    assert_eq!(descending.at(0), Some(Value::from(3)));
    assert_eq!(descending.at(-1), Some(Value::from(1)));
}

#[test]
fn contains_respects_integral_range_members() {
    let range = Value::Range(Range::new(4, 5));
    assert!(contains(&range, &Value::from(4)));
    assert!(!contains(&range, &Value::Number(4.3)));
    assert!(!contains(&range, &Value::from("4")));

    let array = Value::Array(vec![Value::from(1), Value::from("2")]);
    assert!(contains(&array, &Value::from("2")));
    assert!(!contains(&array, &Value::from(2)));
}

#[test]
fn json_documents_convert_recursively() {
    let json: serde_json::Value = serde_json::json!({ "b": 1, "a": [true, null] });
    let value = Value::from(json);

    assert_eq!(value.get("a"), Some(&Value::Array(vec![Value::Bool(true), Value::Null])));
    assert_eq!(value.get("missing"), None);
}

#[test]
fn ranges_compare_like_their_expansions() {
    let expand = |range: Range| {
        let members = Value::Range(range);
        Value::Array(
            (0..range.len())
                .map(|i| members.at(i64::try_from(i).unwrap()).unwrap())
                .collect(),
        )
    };

    for a_low in -2..=2 {
        for a_high in -2..=2 {
            for b_low in -2..=2 {
                for b_high in -2..=2 {
                    let a = Range::new(a_low, a_high);
                    let b = Range::new(b_low, b_high);
                    assert_eq!(
                        compare(&Value::Range(a), &Value::Range(b)),
                        compare(&expand(a), &expand(b)),
                        "{a} vs {b}"
                    );
                }
            }
        }
    }
}

#[test]
fn huge_ranges_compare_without_expanding() {
    let full = Value::Range(Range::new(i64::MIN, i64::MAX));
    let shorter = Value::Range(Range::new(i64::MIN, i64::MAX - 1));

    assert_eq!(compare(&full, &full), Ordering::Equal);
    assert_eq!(compare(&full, &shorter), Ordering::Greater);
    let ascending = Value::Range(Range::new(0, i64::MAX));
    let descending = Value::Range(Range::new(0, -5));
    assert_eq!(compare(&ascending, &descending), Ordering::Greater);

    let prefix = Value::Array(vec![Value::from(1), Value::from(2)]);
    assert_eq!(compare(&prefix, &Value::Range(Range::new(1, i64::MAX))), Ordering::Less);
    assert_eq!(compare(&Value::Range(Range::new(1, i64::MAX)), &prefix), Ordering::Greater);
}

use crate::value::Value;
use std::{cmp::Ordering, collections::BTreeSet};

/// Total order across all runtime values.
///
/// Values of different types order by type rank
/// (`null < bool < number < string < array < object`). Arrays compare
/// element-wise with the shorter side padded by `null`; ranges compare as the
/// arrays they expand to. Objects compare over the sorted union of their keys.
#[must_use]
pub fn compare(lhs: &Value, rhs: &Value) -> Ordering {
    let left_rank = lhs.tag().type_rank();
    let right_rank = rhs.tag().type_rank();
    if left_rank != right_rank {
        return left_rank.cmp(&right_rank);
    }

    match (lhs, rhs) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&str> = a.iter().chain(b).map(|(k, _)| k.as_str()).collect();
            for key in keys {
                let ord = compare(
                    lhs.get(key).unwrap_or(&Value::Null),
                    rhs.get(key).unwrap_or(&Value::Null),
                );
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        }
        (Value::Range(a), Value::Range(b)) => a.cmp_members(b),
        (Value::Array(_) | Value::Range(_), Value::Array(_) | Value::Range(_)) => {
            compare_sequences(lhs, rhs)
        }
        _ => Ordering::Equal,
    }
}

// At least one side is an array. Range members are never null, so a range
// differs from the padding right after the array ends and the loop stops
// within one step past the array length.
fn compare_sequences(lhs: &Value, rhs: &Value) -> Ordering {
    let len = lhs.sequence_len().max(rhs.sequence_len());
    for index in 0..len {
        let a = lhs.sequence_get(index).unwrap_or(Value::Null);
        let b = rhs.sequence_get(index).unwrap_or(Value::Null);
        let ord = compare(&a, &b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Equality as seen by `==`.
#[must_use]
pub fn equals(lhs: &Value, rhs: &Value) -> bool {
    compare(lhs, rhs) == Ordering::Equal
}

/// Membership as seen by `IN`; non-collections contain nothing.
#[must_use]
pub fn contains(collection: &Value, needle: &Value) -> bool {
    match (collection, needle) {
        (Value::Array(items), _) => items.iter().any(|item| equals(item, needle)),
        (Value::Range(range), Value::Number(n)) => range.contains_number(*n),
        _ => false,
    }
}

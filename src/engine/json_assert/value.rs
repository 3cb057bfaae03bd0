use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::domain::error::AssertionFailure;
use crate::domain::predicate::{Condition, Predicate};
use crate::engine::json_assert::Evaluation;

/// Applies the predicate's condition to `object[predicate.key()]`.
///
/// Comparison failures keep `matched == true`; only the reason signals them.
pub fn check_value(object: &Map<String, Value>, predicate: &Predicate) -> Evaluation {
    let key = predicate.key();
    let Some(value) = object.get(key).filter(|value| !value.is_null()) else {
        return Evaluation::not_found();
    };

    match predicate.condition() {
        Condition::Exists => Evaluation::found(),
        Condition::Equals(pattern) => {
            if pattern.is_match(&stringify(value)) {
                Evaluation::found()
            } else {
                Evaluation::mismatched(AssertionFailure::ValueMismatch {
                    key: key.to_string(),
                    pattern: pattern.as_str().to_string(),
                })
            }
        }
        Condition::LessOrEqual(bound) => match value.as_f64() {
            None => not_numeric(key),
            Some(actual) if *bound < actual => {
                Evaluation::mismatched(AssertionFailure::GreaterThan {
                    key: key.to_string(),
                    bound: *bound,
                })
            }
            Some(_) => Evaluation::found(),
        },
        Condition::GreaterOrEqual(bound) => match value.as_f64() {
            None => not_numeric(key),
            Some(actual) if *bound > actual => Evaluation::mismatched(AssertionFailure::LessThan {
                key: key.to_string(),
                bound: *bound,
            }),
            Some(_) => Evaluation::found(),
        },
    }
}

fn not_numeric(key: &str) -> Evaluation {
    Evaluation::mismatched(AssertionFailure::NotNumeric {
        key: key.to_string(),
    })
}

/// Text form used for pattern matching: strings verbatim, everything else
/// as compact JSON.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

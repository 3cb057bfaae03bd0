//! Recursive key search over a decoded JSON document.
//!
//! `evaluate` walks the whole tree looking for objects that carry the
//! predicate's key and hands the first such object on each branch to
//! [`check_value`]. Results from sibling branches are OR-ed together.
//!
//! Two behaviours callers must keep in mind:
//!
//! * `matched` means "the key was found", not "the assertion holds". A
//!   failed comparison comes back as `matched == true` with a reason.
//! * When several branches are combined and one of them holds outright,
//!   the combination holds. Otherwise the reported reason is the one from
//!   the last branch visited. For arrays this includes `None`, so a
//!   trailing element without the key clears an earlier reason.
//!
//! A `null` at the target key counts as absent.

pub mod value;

use serde_json::Value;

use crate::domain::error::AssertionFailure;
use crate::domain::predicate::Predicate;

pub use value::check_value;

/// Outcome of searching one document for one predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub matched: bool,
    pub reason: Option<AssertionFailure>,
}

impl Evaluation {
    pub fn not_found() -> Self {
        Self {
            matched: false,
            reason: None,
        }
    }

    pub fn found() -> Self {
        Self {
            matched: true,
            reason: None,
        }
    }

    /// Key located but the comparison failed.
    pub fn mismatched(reason: AssertionFailure) -> Self {
        Self {
            matched: true,
            reason: Some(reason),
        }
    }

    /// True only when the key was found and no reason was recorded.
    pub fn holds(&self) -> bool {
        self.matched && self.reason.is_none()
    }

    /// Converts the pair into the failure the operator should see, turning
    /// an unmatched search without a reason into `KeyNotFound`.
    pub fn into_failure(self, key: &str) -> Option<AssertionFailure> {
        match (self.matched, self.reason) {
            (_, Some(reason)) => Some(reason),
            (false, None) => Some(AssertionFailure::KeyNotFound {
                key: key.to_string(),
            }),
            (true, None) => None,
        }
    }
}

/// Searches `document` for `predicate.key()` and applies its condition.
pub fn evaluate(document: &Value, predicate: &Predicate) -> Evaluation {
    match document {
        Value::Array(items) => {
            let mut evaluation = Evaluation::not_found();
            let mut satisfied = false;
            for item in items {
                let child = evaluate(item, predicate);
                satisfied |= child.holds();
                evaluation.matched |= child.matched;
                evaluation.reason = child.reason;
            }
            settle(evaluation, satisfied)
        }
        Value::Object(fields) => {
            if fields
                .get(predicate.key())
                .is_some_and(|value| !value.is_null())
            {
                return check_value(fields, predicate);
            }

            let mut evaluation = Evaluation::not_found();
            let mut satisfied = false;
            for child in fields.values() {
                let child = evaluate(child, predicate);
                satisfied |= child.holds();
                evaluation.matched |= child.matched;
                if child.reason.is_some() {
                    evaluation.reason = child.reason;
                }
            }
            settle(evaluation, satisfied)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Evaluation::not_found()
        }
    }
}

fn settle(evaluation: Evaluation, satisfied: bool) -> Evaluation {
    if satisfied {
        Evaluation::found()
    } else {
        evaluation
    }
}

use regex::Regex;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::domain::error::{AssertionFailure, CheckFailure, ConfigError};
use crate::domain::predicate::{Predicate, compile_pattern, parse_flag_pair};
use crate::engine::json_assert::evaluate;

/// Inclusive bounds for the response size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeRange {
    pub min: i64,
    pub max: i64,
}

impl PageSizeRange {
    /// Parses a `--page-size min:max` flag.
    pub fn parse(flag: &str) -> Result<Self, ConfigError> {
        let (min_raw, max_raw) = parse_flag_pair("page-size", flag)?;
        let min = min_raw
            .parse::<i64>()
            .map_err(|_| ConfigError::PageSizeMin {
                raw: min_raw.to_string(),
            })?;
        let max = max_raw
            .parse::<i64>()
            .map_err(|_| ConfigError::PageSizeMax {
                raw: max_raw.to_string(),
            })?;
        if max < min {
            return Err(ConfigError::PageSizeRange);
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, size: i64) -> bool {
        self.min <= size && size <= self.max
    }
}

/// Expected pattern for one response header.
#[derive(Debug, Clone)]
pub struct HeaderExpectation {
    pub name: String,
    pub pattern: Regex,
}

impl HeaderExpectation {
    /// Parses a `--header-equals name:pattern` flag.
    pub fn parse(flag: &str) -> Result<Self, ConfigError> {
        let (name, pattern) = parse_flag_pair("header-equals", flag)?;
        Ok(Self {
            name: name.to_string(),
            pattern: compile_pattern(pattern)?,
        })
    }
}

pub fn check_status(actual: u16, expected: u16) -> Result<(), CheckFailure> {
    if actual != expected {
        return Err(CheckFailure::Status { actual, expected });
    }
    Ok(())
}

pub fn check_page_size(size: i64, range: PageSizeRange) -> Result<(), CheckFailure> {
    if !range.contains(size) {
        return Err(CheckFailure::PageSize {
            size,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

/// Stops at the first expectation that fails. A header with several values
/// passes when any one of them matches.
pub fn check_headers(
    headers: &HeaderMap,
    expectations: &[HeaderExpectation],
) -> Result<(), CheckFailure> {
    for expectation in expectations {
        let name = expectation.name.as_str();
        if !headers.contains_key(name) {
            return Err(CheckFailure::HeaderMissing {
                name: expectation.name.clone(),
            });
        }

        let matched = headers.get_all(name).iter().any(|value| {
            expectation
                .pattern
                .is_match(&String::from_utf8_lossy(value.as_bytes()))
        });
        if !matched {
            return Err(CheckFailure::HeaderMismatch {
                name: expectation.name.clone(),
                pattern: expectation.pattern.as_str().to_string(),
            });
        }
    }
    Ok(())
}

pub fn check_regexp(body: &[u8], pattern: &regex::bytes::Regex) -> Result<(), CheckFailure> {
    if !pattern.is_match(body) {
        return Err(CheckFailure::Regexp {
            pattern: pattern.as_str().to_string(),
        });
    }
    Ok(())
}

/// Evaluates every predicate against `document` and returns the failures in
/// predicate order.
pub fn check_json(document: &Value, predicates: &[Predicate]) -> Vec<AssertionFailure> {
    predicates
        .iter()
        .filter_map(|predicate| {
            let evaluation = evaluate(document, predicate);
            log::debug!(
                "json predicate `{predicate}`: matched={} reason={:?}",
                evaluation.matched,
                evaluation.reason
            );
            evaluation.into_failure(predicate.key())
        })
        .collect()
}

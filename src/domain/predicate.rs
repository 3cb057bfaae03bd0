use std::fmt;

use regex::Regex;

use crate::domain::error::ConfigError;

/// Operator applied once a predicate's key has been located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Exists,
    Equals,
    LessOrEqual,
    GreaterOrEqual,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Equals => "equals",
            Self::LessOrEqual => "lte",
            Self::GreaterOrEqual => "gte",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator together with its typed comparison value.
#[derive(Debug, Clone)]
pub enum Condition {
    Exists,
    /// Matched against the stringified field value, unanchored.
    Equals(Regex),
    LessOrEqual(f64),
    GreaterOrEqual(f64),
}

/// One assertion against a JSON document: find `key` anywhere in the tree
/// and apply `condition` to its value.
#[derive(Debug, Clone)]
pub struct Predicate {
    key: String,
    condition: Condition,
}

impl Predicate {
    pub fn exists(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            condition: Condition::Exists,
        }
    }

    pub fn equals(key: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let regex = compile_pattern(pattern)?;
        Ok(Self {
            key: key.into(),
            condition: Condition::Equals(regex),
        })
    }

    pub fn less_or_equal(key: impl Into<String>, bound: f64) -> Self {
        Self {
            key: key.into(),
            condition: Condition::LessOrEqual(bound),
        }
    }

    pub fn greater_or_equal(key: impl Into<String>, bound: f64) -> Self {
        Self {
            key: key.into(),
            condition: Condition::GreaterOrEqual(bound),
        }
    }

    /// Parses a `--key-exists` flag, which is the bare key name.
    pub fn parse_exists(flag: &str) -> Result<Self, ConfigError> {
        if flag.is_empty() {
            return Err(ConfigError::EmptyKey { flag: "key-exists" });
        }
        Ok(Self::exists(flag))
    }

    /// Parses a `--key-equals key:pattern` flag.
    pub fn parse_equals(flag: &str) -> Result<Self, ConfigError> {
        let (key, pattern) = parse_flag_pair("key-equals", flag)?;
        Self::equals(key, pattern)
    }

    /// Parses a `--key-lte key:number` flag.
    pub fn parse_lte(flag: &str) -> Result<Self, ConfigError> {
        let (key, raw) = parse_flag_pair("key-lte", flag)?;
        Ok(Self::less_or_equal(key, parse_bound(raw)?))
    }

    /// Parses a `--key-gte key:number` flag.
    pub fn parse_gte(flag: &str) -> Result<Self, ConfigError> {
        let (key, raw) = parse_flag_pair("key-gte", flag)?;
        Ok(Self::greater_or_equal(key, parse_bound(raw)?))
    }

    /// Parses the flag text of whichever `--key-*` flag selects `operator`.
    pub fn parse_flag(operator: Operator, flag: &str) -> Result<Self, ConfigError> {
        match operator {
            Operator::Exists => Self::parse_exists(flag),
            Operator::Equals => Self::parse_equals(flag),
            Operator::LessOrEqual => Self::parse_lte(flag),
            Operator::GreaterOrEqual => Self::parse_gte(flag),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn operator(&self) -> Operator {
        match self.condition {
            Condition::Exists => Operator::Exists,
            Condition::Equals(_) => Operator::Equals,
            Condition::LessOrEqual(_) => Operator::LessOrEqual,
            Condition::GreaterOrEqual(_) => Operator::GreaterOrEqual,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Condition::Exists => write!(f, "{} {}", self.operator(), self.key),
            Condition::Equals(regex) => {
                write!(f, "{} {}:{}", self.operator(), self.key, regex.as_str())
            }
            Condition::LessOrEqual(bound) | Condition::GreaterOrEqual(bound) => {
                write!(f, "{} {}:{}", self.operator(), self.key, bound)
            }
        }
    }
}

/// Splits a `key:value` flag at its first colon. Both halves must be
/// non-empty; the value keeps any further colons.
pub fn parse_flag_pair<'a>(
    flag: &'static str,
    value: &'a str,
) -> Result<(&'a str, &'a str), ConfigError> {
    match value.split_once(':') {
        Some((key, rest)) if !key.is_empty() && !rest.is_empty() => Ok((key, rest)),
        _ => Err(ConfigError::FlagFormat { flag }),
    }
}

pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegexp {
        pattern: pattern.to_string(),
        source,
    })
}

fn parse_bound(raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|bound| !bound.is_nan())
        .ok_or_else(|| ConfigError::NotANumber {
            raw: raw.to_string(),
        })
}

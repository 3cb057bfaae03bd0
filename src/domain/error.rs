use thiserror::Error;

use crate::io::IoError;

/// Errors detected while turning flags and config files into checks.
///
/// Every variant is fatal: the probe reports it and exits before any
/// request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Flag {flag} needs to be in 'key:value' format")]
    FlagFormat { flag: &'static str },

    #[error("Flag {flag} needs a key name")]
    EmptyKey { flag: &'static str },

    #[error("Key '{raw}' parameter is not a number")]
    NotANumber { raw: String },

    #[error("Page size min '{raw}' parameter is not an integer")]
    PageSizeMin { raw: String },

    #[error("Page size max '{raw}' parameter is not an integer")]
    PageSizeMax { raw: String },

    #[error("Page size range must be in format min:max")]
    PageSizeRange,

    #[error("String '{pattern}' not a valid regexp: {source}")]
    InvalidRegexp {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Hostname is blank")]
    BlankHostname,

    #[error("HTTP method '{method}' is not valid")]
    InvalidMethod { method: String },

    #[error("Request header '{name}' is not valid")]
    InvalidHeader { name: String },

    #[error("failed to load config file `{path}`: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: IoError,
    },
}

/// Why a JSON predicate did not hold.
///
/// `KeyNotFound` is never produced by the evaluator itself; the caller
/// synthesizes it when a search comes back unmatched without a reason.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionFailure {
    #[error("Key '{key}' not in JSON response")]
    KeyNotFound { key: String },

    #[error("key '{key}' does not equal '{pattern}'")]
    ValueMismatch { key: String, pattern: String },

    #[error("key '{key}' is greater than '{bound}'")]
    GreaterThan { key: String, bound: f64 },

    #[error("key '{key}' is less than '{bound}'")]
    LessThan { key: String, bound: f64 },

    #[error("key '{key}' value is not numeric")]
    NotNumeric { key: String },
}

/// A failed check against the HTTP response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckFailure {
    #[error("HTTP Status Code was '{actual}', expected '{expected}'")]
    Status { actual: u16, expected: u16 },

    #[error("HTTP Response Size was '{size}', out side of range '{min}-{max}'")]
    PageSize { size: i64, min: i64, max: i64 },

    #[error("Header '{name}' not in HTTP response")]
    HeaderMissing { name: String },

    #[error("Header '{name}' does not equal '{pattern}'")]
    HeaderMismatch { name: String, pattern: String },

    #[error("Regexp '{pattern}' not in HTTP response")]
    Regexp { pattern: String },

    #[error(transparent)]
    Json(#[from] AssertionFailure),
}

/// Errors that stop the probe from judging the response at all.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to decode JSON response body: {source}")]
    JsonBody {
        #[source]
        source: serde_json::Error,
    },
}

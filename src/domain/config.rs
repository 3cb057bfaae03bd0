use serde::Deserialize;

use crate::domain::predicate::Operator;

/// A `--key-*` command-line flag, tagged with the operator it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFlag {
    pub operator: Operator,
    pub value: String,
}

impl KeyFlag {
    pub fn new(operator: Operator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }
}

/// Raw probe configuration as given by flags or a config file.
///
/// Nothing here is validated yet; `cmd::probe` turns it into checks and a
/// request, reporting malformed values as `ConfigError`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProbeConfig {
    pub hostname: Option<String>,
    pub uri: Option<String>,
    pub method: Option<String>,
    pub post: Option<String>,
    pub authorization: Option<String>,
    pub ssl: Option<bool>,
    #[serde(alias = "header")]
    pub headers: Vec<String>,
    pub timeout: Option<u64>,
    pub verbose: Option<bool>,

    pub status: Option<u16>,
    pub page_size: Option<String>,
    pub header_equals: Vec<String>,
    pub regexp: Option<String>,
    pub key_exists: Vec<String>,
    pub key_equals: Vec<String>,
    pub key_lte: Vec<String>,
    pub key_gte: Vec<String>,
    /// Command-line JSON key flags in the order they were given.
    #[serde(skip)]
    pub key_flags: Vec<KeyFlag>,
}

pub const DEFAULT_URI: &str = "/";
pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl ProbeConfig {
    /// Layers `overrides` on top of `self`: scalar values from `overrides`
    /// win, list values are appended after the ones in `self`.
    pub fn merge(self, overrides: ProbeConfig) -> ProbeConfig {
        ProbeConfig {
            hostname: overrides.hostname.or(self.hostname),
            uri: overrides.uri.or(self.uri),
            method: overrides.method.or(self.method),
            post: overrides.post.or(self.post),
            authorization: overrides.authorization.or(self.authorization),
            ssl: overrides.ssl.or(self.ssl),
            headers: concat(self.headers, overrides.headers),
            timeout: overrides.timeout.or(self.timeout),
            verbose: overrides.verbose.or(self.verbose),
            status: overrides.status.or(self.status),
            page_size: overrides.page_size.or(self.page_size),
            header_equals: concat(self.header_equals, overrides.header_equals),
            regexp: overrides.regexp.or(self.regexp),
            key_exists: concat(self.key_exists, overrides.key_exists),
            key_equals: concat(self.key_equals, overrides.key_equals),
            key_lte: concat(self.key_lte, overrides.key_lte),
            key_gte: concat(self.key_gte, overrides.key_gte),
            key_flags: concat(self.key_flags, overrides.key_flags),
        }
    }

    /// Every JSON key check in evaluation order. A config file has no
    /// ordering across its per-operator lists, so those come first grouped
    /// by operator, followed by command-line flags as given.
    pub fn key_checks(&self) -> Vec<(Operator, &str)> {
        let grouped = [
            (Operator::Exists, &self.key_exists),
            (Operator::Equals, &self.key_equals),
            (Operator::LessOrEqual, &self.key_lte),
            (Operator::GreaterOrEqual, &self.key_gte),
        ];
        grouped
            .into_iter()
            .flat_map(|(operator, flags)| flags.iter().map(move |flag| (operator, flag.as_str())))
            .chain(
                self.key_flags
                    .iter()
                    .map(|flag| (flag.operator, flag.value.as_str())),
            )
            .collect()
    }

    pub fn uri(&self) -> &str {
        self.uri.as_deref().unwrap_or(DEFAULT_URI)
    }

    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    pub fn ssl(&self) -> bool {
        self.ssl.unwrap_or(false)
    }
}

fn concat<T>(mut base: Vec<T>, extra: Vec<T>) -> Vec<T> {
    base.extend(extra);
    base
}

use std::io::Read;
use std::time::Duration;

use regex::bytes::Regex as BytesRegex;

use crate::domain::config::ProbeConfig;
use crate::domain::error::{ConfigError, ProbeError};
use crate::domain::predicate::Predicate;
use crate::domain::report::{NagiosStatus, ProbeReport};
use crate::engine::checks::{HeaderExpectation, PageSizeRange};
use crate::engine::probe::{ProbeChecks, evaluate_response};
use crate::io::IoError;
use crate::io::http::{self, ProbeRequest, ProbeResponse};
use crate::io::reader::{self, BodySource};
use crate::util::template;

/// Final Nagios status line and its exit code mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCommandResponse {
    pub status: NagiosStatus,
    pub message: String,
}

impl ProbeCommandResponse {
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    pub fn line(&self) -> String {
        format!("{}: {}", self.status, self.message)
    }

    fn from_report(report: &ProbeReport) -> Self {
        Self {
            status: report.status(),
            message: report.summary(),
        }
    }
}

/// Runs the probe against the network, reading a `--post stdin` body from
/// `stdin`.
pub fn run_with_stdin<R: Read>(config: &ProbeConfig, stdin: R) -> ProbeCommandResponse {
    run_with(config, stdin, http::fetch)
}

/// Same as [`run_with_stdin`] with the transport supplied by the caller.
pub fn run_with<R, F>(config: &ProbeConfig, stdin: R, fetch: F) -> ProbeCommandResponse
where
    R: Read,
    F: FnOnce(&ProbeRequest) -> Result<ProbeResponse, IoError>,
{
    match execute(config, stdin, fetch) {
        Ok(report) => ProbeCommandResponse::from_report(&report),
        Err(CommandError::Config(error)) => ProbeCommandResponse {
            status: NagiosStatus::Critical,
            message: error.to_string(),
        },
        Err(CommandError::Io(error)) => ProbeCommandResponse {
            status: NagiosStatus::Unknown,
            message: error.to_string(),
        },
        Err(CommandError::Probe(error)) => ProbeCommandResponse {
            status: NagiosStatus::Unknown,
            message: error.to_string(),
        },
    }
}

fn execute<R, F>(config: &ProbeConfig, stdin: R, fetch: F) -> Result<ProbeReport, CommandError>
where
    R: Read,
    F: FnOnce(&ProbeRequest) -> Result<ProbeResponse, IoError>,
{
    let checks = build_checks(config)?;
    if checks.is_empty() {
        log::warn!("no checks configured; the probe only verifies the request succeeds");
    }
    let request = build_request(config, stdin)?;
    let response = fetch(&request)?;
    Ok(evaluate_response(&checks, &response)?)
}

/// Validates every check flag. Runs before any request is built.
pub fn build_checks(config: &ProbeConfig) -> Result<ProbeChecks, ConfigError> {
    let page_size = config
        .page_size
        .as_deref()
        .map(PageSizeRange::parse)
        .transpose()?;
    let headers = config
        .header_equals
        .iter()
        .map(|flag| HeaderExpectation::parse(flag))
        .collect::<Result<Vec<_>, _>>()?;
    let body_pattern = config
        .regexp
        .as_deref()
        .map(|pattern| {
            BytesRegex::new(pattern).map_err(|source| ConfigError::InvalidRegexp {
                pattern: pattern.to_string(),
                source,
            })
        })
        .transpose()?;

    let predicates = config
        .key_checks()
        .into_iter()
        .map(|(operator, flag)| Predicate::parse_flag(operator, flag))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProbeChecks {
        status: config.status,
        page_size,
        headers,
        body_pattern,
        predicates,
    })
}

pub fn build_request<R: Read>(
    config: &ProbeConfig,
    stdin: R,
) -> Result<ProbeRequest, CommandError> {
    let hostname = config.hostname.as_deref().unwrap_or_default();
    let url = http::build_url(config.ssl(), hostname, config.uri())?;
    let method = http::parse_method(config.method())?;
    let headers = http::build_headers(&config.headers, config.authorization.as_deref())?;

    let body = match config.post.as_deref().and_then(BodySource::from_flag) {
        Some(source) => {
            let raw = reader::read_body(&source, stdin)?;
            if template::has_template(&raw) {
                log::debug!("expanding templates in request body");
            }
            Some(template::expand(&raw).into_owned())
        }
        None => None,
    };

    Ok(ProbeRequest {
        method,
        url,
        headers,
        body,
        timeout: Duration::from_secs(config.timeout_secs()),
    })
}

#[derive(Debug)]
pub enum CommandError {
    Config(ConfigError),
    Io(IoError),
    Probe(ProbeError),
}

impl From<ConfigError> for CommandError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<IoError> for CommandError {
    fn from(error: IoError) -> Self {
        Self::Io(error)
    }
}

impl From<ProbeError> for CommandError {
    fn from(error: ProbeError) -> Self {
        Self::Probe(error)
    }
}

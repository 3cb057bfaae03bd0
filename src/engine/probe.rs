use regex::bytes::Regex as BytesRegex;
use serde_json::Value;

use crate::domain::error::{CheckFailure, ProbeError};
use crate::domain::predicate::Predicate;
use crate::domain::report::ProbeReport;
use crate::engine::checks::{
    HeaderExpectation, PageSizeRange, check_headers, check_json, check_page_size, check_regexp,
    check_status,
};
use crate::io::http::ProbeResponse;

/// Every check configured for one probe run.
#[derive(Debug, Clone, Default)]
pub struct ProbeChecks {
    pub status: Option<u16>,
    pub page_size: Option<PageSizeRange>,
    pub headers: Vec<HeaderExpectation>,
    pub body_pattern: Option<BytesRegex>,
    pub predicates: Vec<Predicate>,
}

impl ProbeChecks {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.page_size.is_none()
            && self.headers.is_empty()
            && self.body_pattern.is_none()
            && self.predicates.is_empty()
    }
}

/// Runs status, page-size, header, body and JSON checks in that order and
/// collects every failure.
///
/// The body is decoded as JSON only when predicates are configured; a body
/// that does not decode is an error rather than a failed check.
pub fn evaluate_response(
    checks: &ProbeChecks,
    response: &ProbeResponse,
) -> Result<ProbeReport, ProbeError> {
    let mut failures = Vec::new();

    if let Some(expected) = checks.status {
        collect(&mut failures, check_status(response.status, expected));
    }
    if let Some(range) = checks.page_size {
        collect(&mut failures, check_page_size(response.size, range));
    }
    if !checks.headers.is_empty() {
        collect(&mut failures, check_headers(&response.headers, &checks.headers));
    }
    if let Some(pattern) = &checks.body_pattern {
        collect(&mut failures, check_regexp(&response.body, pattern));
    }
    if !checks.predicates.is_empty() {
        let document: Value = serde_json::from_slice(&response.body)
            .map_err(|source| ProbeError::JsonBody { source })?;
        failures.extend(
            check_json(&document, &checks.predicates)
                .into_iter()
                .map(CheckFailure::from),
        );
    }

    Ok(ProbeReport { failures })
}

fn collect(failures: &mut Vec<CheckFailure>, result: Result<(), CheckFailure>) {
    if let Err(failure) = result {
        log::debug!("check failed: {failure}");
        failures.push(failure);
    }
}

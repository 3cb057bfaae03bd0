use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::domain::error::ConfigError;
use crate::io::IoError;
use crate::util::template;

/// A fully resolved request, ready to send.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Declared `Content-Length`, or the received body length without one.
    pub size: i64,
}

/// Joins scheme, host and a template-expanded uri. An empty uri becomes `/`.
pub fn build_url(ssl: bool, hostname: &str, uri: &str) -> Result<String, ConfigError> {
    if hostname.is_empty() {
        return Err(ConfigError::BlankHostname);
    }

    let expanded = template::expand(uri);
    let path = if expanded.is_empty() { "/" } else { &*expanded };
    let scheme = if ssl { "https://" } else { "http://" };
    Ok(format!("{scheme}{hostname}{path}"))
}

pub fn parse_method(method: &str) -> Result<Method, ConfigError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(|_| {
        ConfigError::InvalidMethod {
            method: method.to_string(),
        }
    })
}

/// Builds request headers from `name:value` flags, replacing earlier
/// values of the same name. Credentials given as `user:password` become a
/// basic `Authorization` header applied last.
pub fn build_headers(
    flags: &[String],
    authorization: Option<&str>,
) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    for flag in flags {
        let (name, value) = flag
            .split_once(':')
            .ok_or(ConfigError::FlagFormat { flag: "header" })?;
        let name = name.trim();
        let invalid = || ConfigError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }

    if let Some(credentials) = authorization {
        let value = HeaderValue::from_str(&basic_auth_value(credentials)).map_err(|_| {
            ConfigError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

pub fn basic_auth_value(credentials: &str) -> String {
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

pub fn fetch(request: &ProbeRequest) -> Result<ProbeResponse, IoError> {
    let client = Client::builder()
        .timeout(request.timeout)
        .user_agent(concat!("check-http-json/", env!("CARGO_PKG_VERSION")))
        .build()?;

    log::debug!("> {} {}", request.method, request.url);
    for (name, value) in &request.headers {
        log::debug!("> {name}: {}", String::from_utf8_lossy(value.as_bytes()));
    }

    let mut builder = client
        .request(request.method.clone(), request.url.as_str())
        .headers(request.headers.clone());
    if let Some(body) = &request.body {
        log::debug!("> {body}");
        builder = builder.body(body.clone());
    }

    let response = builder.send()?;
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let declared_size = response.content_length();
    let body = response.bytes()?.to_vec();
    let size = declared_size
        .map(|length| i64::try_from(length).unwrap_or(i64::MAX))
        .unwrap_or_else(|| i64::try_from(body.len()).unwrap_or(i64::MAX));

    log::debug!("< {status}");
    for (name, value) in &headers {
        log::debug!("< {name}: {}", String::from_utf8_lossy(value.as_bytes()));
    }
    log::debug!("< {}", String::from_utf8_lossy(&body));

    Ok(ProbeResponse {
        status,
        headers,
        body,
        size,
    })
}

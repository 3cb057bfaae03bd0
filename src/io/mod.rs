pub mod error;
pub mod http;
pub mod reader;

use std::path::Path;
use std::str::FromStr;

pub use error::IoError;

/// Config file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl FromStr for Format {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(IoError::UnsupportedPathExtension {
                path: other.to_string(),
            }),
        }
    }
}

pub fn resolve_config_format(path: &Path) -> Result<Format, IoError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .ok_or_else(|| IoError::UnsupportedPathExtension {
            path: path.to_string_lossy().into_owned(),
        })
}

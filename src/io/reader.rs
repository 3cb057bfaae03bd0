use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::config::ProbeConfig;
use crate::io::{Format, IoError, resolve_config_format};

/// Where the request body comes from, as given by `--post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    Stdin,
    File(PathBuf),
}

impl BodySource {
    /// An empty flag means no body; the literal `stdin` reads standard input.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "" => None,
            "stdin" => Some(Self::Stdin),
            path => Some(Self::File(PathBuf::from(path))),
        }
    }
}

pub fn read_body<R: Read>(source: &BodySource, mut stdin: R) -> Result<String, IoError> {
    match source {
        BodySource::Stdin => {
            let mut body = String::new();
            stdin.read_to_string(&mut body)?;
            Ok(body)
        }
        BodySource::File(path) => {
            fs::read_to_string(path).map_err(|source| IoError::RequestBody {
                path: path.display().to_string(),
                source,
            })
        }
    }
}

pub fn read_config(path: &Path) -> Result<ProbeConfig, IoError> {
    let format = resolve_config_format(path)?;
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    parse_config(&text, format)
}

pub fn parse_config(text: &str, format: Format) -> Result<ProbeConfig, IoError> {
    Ok(match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Toml => toml::from_str(text)?,
    })
}

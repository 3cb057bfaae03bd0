use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported config file extension: {path}")]
    UnsupportedPathExtension { path: String },

    #[error("json parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("yaml parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read request body `{path}`: {source}")]
    RequestBody {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

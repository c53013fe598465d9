use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid server config name '{0}'")]
    InvalidConfigName(String),
    #[error("server config '{name}' could not be loaded: {source}")]
    ConfigUnavailable {
        name: String,
        #[source]
        source: Box<DataError>,
    },
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;

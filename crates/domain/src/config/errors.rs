use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn is_read(&self) -> bool {
        matches!(self, ConfigError::Read { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ConfigError::Parse { .. })
    }
}

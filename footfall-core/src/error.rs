use footfall_loader::LoadError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup errors: the datasets could not be turned into a usable index.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("{table} table, row {row}: missing required field '{column}'")]
    MissingField {
        table: &'static str,
        row: usize,
        column: &'static str,
    },

    #[error("{table} table, row {row}: '{value}' in column '{column}' is not a valid number")]
    InvalidNumber {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{table} table, row {row}: '{value}' in column '{column}' must not be negative")]
    NegativeCount {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Failed to read dataset: {0}")]
    Source(#[from] LoadError),
}

pub type Result<T> = std::result::Result<T, DataLoadError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

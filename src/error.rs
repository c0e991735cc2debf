//! Error types for schema operations

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    /// Missing or malformed configuration (Solr URL, version, group names).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Solr answered, but not with what was asked for.
    #[error("{0}")]
    Api(String),

    #[error("Error executing request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error executing request to {url}: HTTP {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl SchemaError {
    pub fn is_api(&self) -> bool {
        matches!(self, SchemaError::Api(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, SchemaError::Config(_))
    }
}

pub mod client;
pub mod solr5;
pub mod solr8;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use log::info;

use crate::config::SchemaConfig;
use crate::connection::SolrConnection;
use crate::error::{ Result, SchemaError };
use crate::schema::{ SchemaGroup, SolrSchema };

pub use client::SolrClient;
pub use solr5::Solr5Facade;
pub use solr8::Solr8Facade;

/// Read and clear access to one collection's schema, whatever the Solr version.
#[async_trait]
pub trait SchemaFacade: Send + Sync {
    fn version(&self) -> SolrVersion;

    fn connection(&self) -> &SolrConnection;

    async fn get_full_schema(&self) -> Result<SolrSchema>;

    /// Entries of `group`, all of them or the one matching `identifier`.
    async fn get_group(&self, group: SchemaGroup, identifier: Option<&str>) -> Result<Vec<Value>>;

    async fn clear_schema(&self, groups: &[SchemaGroup]) -> Result<()>;

    async fn get_field_types(&self, name: Option<&str>) -> Result<Vec<Value>> {
        self.get_group(SchemaGroup::FieldType, name).await
    }

    async fn get_fields(&self, name: Option<&str>) -> Result<Vec<Value>> {
        self.get_group(SchemaGroup::Field, name).await
    }

    async fn get_dynamic_fields(&self, name: Option<&str>) -> Result<Vec<Value>> {
        self.get_group(SchemaGroup::DynamicField, name).await
    }

    /// Copy fields have no name; they are matched on `source`.
    async fn get_copy_fields(&self, source: Option<&str>) -> Result<Vec<Value>> {
        self.get_group(SchemaGroup::CopyField, source).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolrVersion {
    Solr5,
    #[default]
    Solr8,
}

impl fmt::Display for SolrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolrVersion::Solr5 => f.write_str("solr5"),
            SolrVersion::Solr8 => f.write_str("solr8"),
        }
    }
}

impl FromStr for SolrVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        get_solr_version(s)
    }
}

pub fn get_solr_version(version_str: &str) -> Result<SolrVersion> {
    match version_str.trim().to_lowercase().as_str() {
        "5" | "solr5" => Ok(SolrVersion::Solr5),
        "8" | "solr8" => Ok(SolrVersion::Solr8),
        _ => Err(SchemaError::Config(format!("Unsupported Solr version: {}", version_str))),
    }
}

/// Build the facade matching the configured Solr version.
pub fn connect(config: &SchemaConfig) -> Result<Arc<dyn SchemaFacade>> {
    let connection = config.connection()?;
    info!(
        "Connecting {} schema facade to collection '{}' at {}",
        config.version,
        connection.collection(),
        connection.base_url()
    );
    let client = SolrClient::new(connection);

    match config.version {
        SolrVersion::Solr5 => Ok(Arc::new(Solr5Facade::new(client))),
        SolrVersion::Solr8 => {
            Ok(Arc::new(Solr8Facade::new(client, config.fixed_fields.clone())))
        }
    }
}

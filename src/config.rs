//! Configuration for reaching a Solr collection.
//!
//! Values come from the environment:
//!
//! - `SEARCH_SCHEMA_SOLR_URL` (or `CKAN_SOLR_URL`): full collection URL,
//!   e.g. `http://localhost:8983/solr/ckan`
//! - `SEARCH_SCHEMA_SOLR_VERSION`: `5` or `8`, defaults to `8`
//! - `SEARCH_SCHEMA_BASE_URL`, `SEARCH_SCHEMA_COLLECTION`: override the parts
//!   parsed from the Solr URL
//! - `SEARCH_SCHEMA_FIXED_FIELD`, `SEARCH_SCHEMA_FIXED_FIELD_TYPE`,
//!   `SEARCH_SCHEMA_FIXED_DYNAMIC_FIELD`, `SEARCH_SCHEMA_FIXED_COPY_FIELD`:
//!   comma-separated names replacing the default fixed set of that group

use std::env;

use crate::connection::SolrConnection;
use crate::error::Result;
use crate::facade::{ get_solr_version, SolrVersion };
use crate::schema::{ FixedFields, SchemaGroup };

const ENV_PREFIX: &str = "SEARCH_SCHEMA";

#[derive(Clone, Debug, Default)]
pub struct SchemaConfig {
    pub solr_url: Option<String>,
    pub base_url: Option<String>,
    pub collection: Option<String>,
    pub version: SolrVersion,
    pub fixed_fields: FixedFields,
}

impl SchemaConfig {
    pub fn new(solr_url: impl Into<String>) -> Self {
        Self {
            solr_url: Some(solr_url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source shaped like the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}_{}", ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };

        let version = match var("SOLR_VERSION") {
            Some(v) => get_solr_version(&v)?,
            None => SolrVersion::default(),
        };

        let mut fixed_fields = FixedFields::default();
        for group in SchemaGroup::ALL {
            let name = format!("FIXED_{}", group.as_str().to_uppercase().replace('-', "_"));
            if let Some(names) = var(&name) {
                fixed_fields.set(
                    group,
                    names
                        .split(',')
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                );
            }
        }

        Ok(Self {
            solr_url: var("SOLR_URL").or_else(|| lookup("CKAN_SOLR_URL")),
            base_url: var("BASE_URL"),
            collection: var("COLLECTION"),
            version,
            fixed_fields,
        })
    }

    pub fn connection(&self) -> Result<SolrConnection> {
        SolrConnection::with_overrides(
            self.solr_url.as_deref(),
            self.base_url.as_deref(),
            self.collection.as_deref()
        )
    }
}

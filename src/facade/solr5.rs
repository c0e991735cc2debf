use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use log::{ debug, warn };

use super::{ SchemaFacade, SolrClient, SolrVersion };
use crate::connection::SolrConnection;
use crate::error::{ Result, SchemaError };
use crate::schema::{ SchemaGroup, SolrSchema };

/// Solr 5 exposes each schema group as its own read-only sub-resource.
pub struct Solr5Facade {
    client: SolrClient,
}

impl Solr5Facade {
    pub fn new(client: SolrClient) -> Self {
        Self { client }
    }

    async fn list(&self, group: SchemaGroup) -> Result<Vec<Value>> {
        let mut response = self.client.get(&format!("schema/{}", group.rest_resource())).await?;

        match response.get_mut(group.schema_key()).map(Value::take) {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Err(SchemaError::Api(format!("Solr response has no `{}` list", group.schema_key()))),
        }
    }

    async fn single(&self, group: SchemaGroup, key: &str, name: &str) -> Result<Vec<Value>> {
        let endpoint = format!("schema/{}", group.rest_resource());

        let mut response = match self.client.get_named(&endpoint, name).await {
            Ok(response) => response,
            Err(SchemaError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                return Err(group.not_found(name));
            }
            Err(e) => {
                return Err(e);
            }
        };

        match response.get_mut(key).map(Value::take) {
            Some(entry @ Value::Object(_)) => Ok(vec![entry]),
            _ => Err(group.not_found(name)),
        }
    }
}

#[async_trait]
impl SchemaFacade for Solr5Facade {
    fn version(&self) -> SolrVersion {
        SolrVersion::Solr5
    }

    fn connection(&self) -> &SolrConnection {
        self.client.connection()
    }

    async fn get_full_schema(&self) -> Result<SolrSchema> {
        self.client.full_schema().await
    }

    async fn get_group(&self, group: SchemaGroup, identifier: Option<&str>) -> Result<Vec<Value>> {
        match (identifier, group.rest_single_key()) {
            (Some(name), Some(key)) => self.single(group, key, name).await,
            _ => {
                let entries = self.list(group).await?;
                debug!("Solr returned {} {}", entries.len(), group.schema_key());
                group.select(&entries, identifier)
            }
        }
    }

    async fn clear_schema(&self, groups: &[SchemaGroup]) -> Result<()> {
        warn!(
            "Clearing the schema is not supported for Solr 5, leaving {:?} untouched",
            groups
        );
        Ok(())
    }
}

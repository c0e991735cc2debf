use async_trait::async_trait;
use serde_json::Value;
use log::info;

use super::{ SchemaFacade, SolrClient, SolrVersion };
use crate::connection::SolrConnection;
use crate::error::{ Result, SchemaError };
use crate::schema::{ FixedFields, SchemaGroup, SolrSchema };

/// Solr 8 serves everything from `/schema` and accepts bulk schema commands.
pub struct Solr8Facade {
    client: SolrClient,
    fixed_fields: FixedFields,
}

impl Solr8Facade {
    pub fn new(client: SolrClient, fixed_fields: FixedFields) -> Self {
        Self { client, fixed_fields }
    }
}

#[async_trait]
impl SchemaFacade for Solr8Facade {
    fn version(&self) -> SolrVersion {
        SolrVersion::Solr8
    }

    fn connection(&self) -> &SolrConnection {
        self.client.connection()
    }

    async fn get_full_schema(&self) -> Result<SolrSchema> {
        self.client.full_schema().await
    }

    async fn get_group(&self, group: SchemaGroup, identifier: Option<&str>) -> Result<Vec<Value>> {
        self.get_full_schema().await?.entries(group, identifier)
    }

    async fn clear_schema(&self, groups: &[SchemaGroup]) -> Result<()> {
        let schema = self.get_full_schema().await?;
        let commands = schema.clear_commands(groups, &self.fixed_fields)?;

        if commands.is_empty() {
            info!("Solr schema API. Nothing to clear");
            return Ok(());
        }

        let response = self.client.post("schema", &Value::Object(commands)).await?;

        if let Some(errors) = response.get("error").or_else(|| response.get("errors")) {
            return Err(SchemaError::Api(format!("Solr rejected the schema update: {}", errors)));
        }

        info!("Solr schema API. Schema has been cleared");
        Ok(())
    }
}

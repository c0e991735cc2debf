use reqwest::{ Client, Method };
use reqwest::header::{ ACCEPT, CONTENT_TYPE };
use serde_json::Value;
use log::{ debug, error };

use crate::connection::SolrConnection;
use crate::error::{ Result, SchemaError };
use crate::schema::SolrSchema;

/// Request plumbing shared by every Solr version.
pub struct SolrClient {
    client: Client,
    connection: SolrConnection,
}

impl SolrClient {
    pub fn new(connection: SolrConnection) -> Self {
        Self {
            client: Client::new(),
            connection,
        }
    }

    pub fn connection(&self) -> &SolrConnection {
        &self.connection
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.send_request(Method::GET, self.connection.url(endpoint), None).await
    }

    /// GET `endpoint/<name>`, with `name` encoded as a single path segment.
    pub async fn get_named(&self, endpoint: &str, name: &str) -> Result<Value> {
        let url = self.connection.segment_url(endpoint, &[name])?;
        self.send_request(Method::GET, url, None).await
    }

    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.send_request(Method::POST, self.connection.url(endpoint), Some(body)).await
    }

    async fn send_request(&self, method: Method, url: String, body: Option<&Value>) -> Result<Value> {
        debug!("Solr {} {}", method, url);

        let mut request = self.client
            .request(method, &url)
            .query(&[("wt", "json")])
            .header(ACCEPT, "application/json");

        if let Some(b) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(b);
        }

        let response = request
            .send().await
            .map_err(|source| SchemaError::Transport { url: url.clone(), source })?;
        let status = response.status();
        let text = response
            .text().await
            .map_err(|source| SchemaError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            error!("Solr request to {} failed (Status: {}): {}", url, status, text);
            return Err(SchemaError::Status { url, status, body: text });
        }

        serde_json::from_str(&text)
            .map_err(|e| SchemaError::Api(format!("Malformed JSON from {}: {}", url, e)))
    }

    /// Fetch `/schema` and unwrap its `schema` object.
    pub async fn full_schema(&self) -> Result<SolrSchema> {
        let mut response = self.get("schema").await?;

        match response.get_mut("schema").map(Value::take) {
            Some(Value::Object(schema)) => Ok(SolrSchema::from(schema)),
            _ => Err(SchemaError::Api("Solr response has no `schema` object".into())),
        }
    }
}

//! Shared fixtures for the integration tests
#![allow(dead_code)]
use mockito::{ Matcher, Mock, ServerGuard };
use serde_json::Value;

use search_schema::{ SchemaConfig, SolrVersion };

pub const SOLR8_SCHEMA: &str = include_str!("../fixtures/solr8_schema.json");

/// A config pointing at the `ckan` collection on the mock server.
pub fn config_for(server: &ServerGuard, version: SolrVersion) -> SchemaConfig {
    let mut config = SchemaConfig::new(format!("{}/solr/ckan", server.url()));
    config.version = version;
    config
}

/// The `schema` object of the fixture, as Solr would send it.
pub fn fixture_schema() -> Value {
    let response: Value = serde_json::from_str(SOLR8_SCHEMA).unwrap();
    response["schema"].clone()
}

/// Serve `body` for `GET path?wt=json`.
pub async fn mock_get(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("wt".into(), "json".into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async().await
}

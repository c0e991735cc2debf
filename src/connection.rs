//! Resolves where a Solr collection lives from a single configured URL.

use log::debug;
use url::{ Position, Url };

use crate::error::{ Result, SchemaError };

/// Base URL and collection of a Solr core, fixed for the lifetime of a facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrConnection {
    base_url: String,
    collection: String,
}

impl SolrConnection {
    /// Parse a URL like `http://localhost:8983/solr/ckan` into
    /// `http://localhost:8983` and `ckan`.
    pub fn from_url(solr_url: Option<&str>) -> Result<Self> {
        Self::with_overrides(solr_url, None, None)
    }

    /// Same as [`SolrConnection::from_url`], but an explicit base URL or
    /// collection wins over the parsed one. The Solr URL is required either way.
    pub fn with_overrides(
        solr_url: Option<&str>,
        base_url: Option<&str>,
        collection: Option<&str>
    ) -> Result<Self> {
        let solr_url = solr_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| SchemaError::Config("The solr_url is missing from configuration".into()))?;

        let base_url = match base_url.map(str::trim).filter(|b| !b.is_empty()) {
            Some(b) => b.trim_end_matches('/').to_string(),
            None => Self::base_url_of(&Self::parse(solr_url)?)?,
        };

        let collection = match collection {
            Some(c) => c.trim().trim_matches('/').to_string(),
            None => Self::collection_of(&Self::parse(solr_url)?),
        };

        if collection.is_empty() {
            return Err(SchemaError::Config("The solr_url doesn't contain collection".into()));
        }

        debug!("Resolved Solr base URL '{}' and collection '{}'", base_url, collection);

        Ok(Self { base_url, collection })
    }

    fn parse(solr_url: &str) -> Result<Url> {
        Url::parse(solr_url).map_err(|e| {
            SchemaError::Config(format!("The solr_url '{}' is not a valid URL: {}", solr_url, e))
        })
    }

    fn base_url_of(url: &Url) -> Result<String> {
        if !url.has_host() {
            return Err(SchemaError::Config(format!("The solr_url '{}' has no host", url)));
        }
        Ok(url[..Position::BeforePath].to_string())
    }

    fn collection_of(url: &Url) -> String {
        url.path().trim_matches('/').split('/').nth(1).unwrap_or_default().to_string()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// `{base_url}/solr/{collection}/{endpoint}`
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/solr/{}/{}",
            self.base_url,
            self.collection,
            endpoint.trim_start_matches('/')
        )
    }

    /// Like [`SolrConnection::url`], then `segments` appended one path
    /// segment each, percent-encoded so `/`, `?` or `#` stay part of a name.
    pub fn segment_url(&self, endpoint: &str, segments: &[&str]) -> Result<String> {
        let mut url = Self::parse(&self.url(endpoint))?;
        url
            .path_segments_mut()
            .map_err(|_| {
                SchemaError::Config(format!("The Solr URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_and_collection() {
        let conn = SolrConnection::from_url(Some("http://localhost:8983/solr/ckan")).unwrap();
        assert_eq!(conn.base_url(), "http://localhost:8983");
        assert_eq!(conn.collection(), "ckan");
    }

    #[test]
    fn test_parse_ignores_trailing_path() {
        let conn = SolrConnection::from_url(
            Some("https://solr.example.org:8443/solr/datasets/select/")
        ).unwrap();
        assert_eq!(conn.base_url(), "https://solr.example.org:8443");
        assert_eq!(conn.collection(), "datasets");
    }

    #[test]
    fn test_missing_collection_is_config_error() {
        for url in ["http://localhost:8983/solr", "http://localhost:8983/solr/", "http://localhost:8983"] {
            let err = SolrConnection::from_url(Some(url)).unwrap_err();
            assert!(err.is_config(), "{} should fail with a config error", url);
        }
    }

    #[test]
    fn test_missing_url_is_config_error() {
        assert!(SolrConnection::from_url(None).unwrap_err().is_config());
        assert!(SolrConnection::from_url(Some("  ")).unwrap_err().is_config());
        assert!(SolrConnection::from_url(Some("not a url")).unwrap_err().is_config());
    }

    #[test]
    fn test_overrides_win() {
        let conn = SolrConnection::with_overrides(
            Some("http://localhost:8983/solr/ckan"),
            Some("http://solr:8983/"),
            Some("other")
        ).unwrap();
        assert_eq!(conn.base_url(), "http://solr:8983");
        assert_eq!(conn.collection(), "other");

        let err = SolrConnection::with_overrides(
            Some("http://localhost:8983/solr/ckan"),
            None,
            Some("")
        ).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_endpoint_url() {
        let conn = SolrConnection::from_url(Some("http://localhost:8983/solr/ckan")).unwrap();
        assert_eq!(conn.url("schema"), "http://localhost:8983/solr/ckan/schema");
        assert_eq!(conn.url("/schema/fields/id"), "http://localhost:8983/solr/ckan/schema/fields/id");
    }

    #[test]
    fn test_segment_url_encodes_names() {
        let conn = SolrConnection::from_url(Some("http://localhost:8983/solr/ckan")).unwrap();
        assert_eq!(
            conn.segment_url("schema/fields", &["a#b"]).unwrap(),
            "http://localhost:8983/solr/ckan/schema/fields/a%23b"
        );
        assert_eq!(
            conn.segment_url("schema/fields", &["a/b?c"]).unwrap(),
            "http://localhost:8983/solr/ckan/schema/fields/a%2Fb%3Fc"
        );
        assert_eq!(
            conn.segment_url("schema/dynamicfields", &["*_s"]).unwrap(),
            "http://localhost:8983/solr/ckan/schema/dynamicfields/*_s"
        );
    }
}

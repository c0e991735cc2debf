pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod facade;
pub mod schema;
pub use config::SchemaConfig;
pub use connection::SolrConnection;
pub use error::{ Result, SchemaError };
pub use facade::{ connect, get_solr_version, SchemaFacade, Solr5Facade, Solr8Facade, SolrClient, SolrVersion };
pub use schema::{ FixedFields, SchemaGroup, SolrSchema };

//! `search-schema` command line interface

use anyhow::{ Context, Result };
use clap::{ Parser, Subcommand };
use serde::Serialize;
use serde_json::ser::{ PrettyFormatter, Serializer };
use serde_json::Value;
use log::info;
use std::fmt;
use std::io::{ IsTerminal, Stderr, Stdout, Write };
use std::process::ExitCode;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

use crate::config::SchemaConfig;
use crate::error::SchemaError;
use crate::facade::{ connect, SolrVersion };
use crate::schema::SchemaGroup;

#[derive(Subcommand)]
enum Command {
    /// Get a full search schema definition
    Definition,
    /// Get a list of all field types, or a specific one by name
    FieldTypes {
        name: Option<String>,
    },
    /// Get a specific field definition
    Field {
        name: String,
    },
    /// Get a list of all dynamic fields, or a specific one by name
    DynamicFields {
        name: Option<String>,
    },
    /// Get copy field rules, optionally only those copying from `source`
    CopyFields {
        source: Option<String>,
    },
    /// Delete every entry of the given groups, except fixed fields
    Clear {
        /// Group to clear (field-type, field, dynamic-field, copy-field).
        /// Repeat for several; all groups when omitted.
        #[arg(long = "group")]
        groups: Vec<SchemaGroup>,

        /// Confirm that the schema should really be cleared
        #[arg(long, action, default_value = "false")]
        yes: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about = "search_schema command line interface", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Full Solr collection URL, e.g. http://localhost:8983/solr/ckan
    #[arg(long, global = true)]
    solr_url: Option<String>,

    /// Solr major version (5 or 8)
    #[arg(long, global = true)]
    solr_version: Option<SolrVersion>,

    /// Override the base URL parsed from the Solr URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the collection parsed from the Solr URL
    #[arg(long, global = true)]
    collection: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Flags given on the command line win over `config`.
    fn apply(&self, mut config: SchemaConfig) -> SchemaConfig {
        if let Some(solr_url) = &self.solr_url {
            config.solr_url = Some(solr_url.clone());
        }
        if let Some(version) = self.solr_version {
            config.version = version;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(collection) = &self.collection {
            config.collection = Some(collection.clone());
        }
        config
    }
}

/// Where command output goes: JSON on `out`, user-facing errors on `err`.
pub struct Console<O: Write, E: Write> {
    pub out: O,
    pub err: E,
    pub color: bool,
}

impl Console<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self {
            out: std::io::stdout(),
            err: std::io::stderr(),
            color: std::io::stderr().is_terminal(),
        }
    }
}

impl<O: Write, E: Write> Console<O, E> {
    fn json(&mut self, value: &Value) -> Result<()> {
        let json = to_pretty_json(value).context("Failed to render JSON")?;
        writeln!(self.out, "{}", json)?;
        Ok(())
    }

    fn error(&mut self, message: impl fmt::Display) -> Result<()> {
        if self.color {
            writeln!(self.err, "\x1b[31m{}\x1b[0m", message)?;
        } else {
            writeln!(self.err, "{}", message)?;
        }
        Ok(())
    }
}

pub async fn run() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    execute(args, SchemaConfig::from_env()?, &mut Console::stdio()).await
}

/// Run one parsed command. Lookup misses are reported on the console and
/// give a failing exit code; every other error is returned.
pub async fn execute<O: Write, E: Write>(
    args: Cli,
    config: SchemaConfig,
    console: &mut Console<O, E>
) -> Result<ExitCode> {
    let config = args.apply(config);
    let conn = connect(&config)?;

    let lookup = match args.command {
        Command::Definition => {
            let schema = conn.get_full_schema().await?;
            info!(
                "Fetched schema '{}' (unique key: {})",
                schema.name().unwrap_or("unnamed"),
                schema.unique_key().unwrap_or("none")
            );
            console.json(&schema.into_value())?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Clear { groups, yes } => {
            if !yes {
                console.error("Refusing to clear the schema without --yes")?;
                return Ok(ExitCode::FAILURE);
            }
            let groups = if groups.is_empty() { SchemaGroup::ALL.to_vec() } else { groups };
            conn.clear_schema(&groups).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::FieldTypes { name } => conn.get_field_types(name.as_deref()).await,
        Command::Field { name } => conn.get_fields(Some(name.as_str())).await,
        Command::DynamicFields { name } => conn.get_dynamic_fields(name.as_deref()).await,
        Command::CopyFields { source } => conn.get_copy_fields(source.as_deref()).await,
    };

    match lookup {
        Ok(entries) => {
            console.json(&Value::Array(entries))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ SchemaError::Api(_)) => {
            console.error(&e)?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Pretty JSON with a four space indent.
pub fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clear_groups() {
        let cli = Cli::try_parse_from(
            ["search-schema", "clear", "--group", "field", "--group", "copy-field", "--yes"]
        ).unwrap();
        match cli.command {
            Command::Clear { groups, yes } => {
                assert!(yes);
                assert_eq!(groups, [SchemaGroup::Field, SchemaGroup::CopyField]);
            }
            _ => panic!("expected clear"),
        }
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from(
            ["search-schema", "field-types", "text_general", "--solr-version", "5"]
        ).unwrap();
        assert_eq!(cli.solr_version, Some(SolrVersion::Solr5));
        assert!(matches!(cli.command, Command::FieldTypes { name: Some(ref n) } if n == "text_general"));
        assert!(Cli::try_parse_from(["search-schema", "field"]).is_err());
    }

    #[test]
    fn test_pretty_json_indent() {
        let out = to_pretty_json(&json!({ "name": "id" })).unwrap();
        assert_eq!(out, "{\n    \"name\": \"id\"\n}");
    }
}

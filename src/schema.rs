use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use serde_json::{ json, Map, Value };
use std::collections::{ BTreeSet, HashMap };
use std::fmt;
use std::str::FromStr;

use crate::error::{ Result, SchemaError };

/// The four kinds of entries a Solr schema is made of.
///
/// Variants are ordered so that dependents come first: copy fields refer to
/// fields, fields refer to field types. Deletions follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaGroup {
    CopyField,
    DynamicField,
    Field,
    FieldType,
}

impl SchemaGroup {
    pub const ALL: [SchemaGroup; 4] = [
        SchemaGroup::CopyField,
        SchemaGroup::DynamicField,
        SchemaGroup::Field,
        SchemaGroup::FieldType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaGroup::CopyField => "copy-field",
            SchemaGroup::DynamicField => "dynamic-field",
            SchemaGroup::Field => "field",
            SchemaGroup::FieldType => "field-type",
        }
    }

    /// Key of this group's list in the `/schema` response.
    pub fn schema_key(&self) -> &'static str {
        match self {
            SchemaGroup::CopyField => "copyFields",
            SchemaGroup::DynamicField => "dynamicFields",
            SchemaGroup::Field => "fields",
            SchemaGroup::FieldType => "fieldTypes",
        }
    }

    /// Schema API command that removes entries of this group.
    pub fn delete_command(&self) -> &'static str {
        match self {
            SchemaGroup::CopyField => "delete-copy-field",
            SchemaGroup::DynamicField => "delete-dynamic-field",
            SchemaGroup::Field => "delete-field",
            SchemaGroup::FieldType => "delete-field-type",
        }
    }

    /// Sub-resource under `/schema` that lists this group on its own.
    pub fn rest_resource(&self) -> &'static str {
        match self {
            SchemaGroup::CopyField => "copyfields",
            SchemaGroup::DynamicField => "dynamicfields",
            SchemaGroup::Field => "fields",
            SchemaGroup::FieldType => "fieldtypes",
        }
    }

    /// Response key when a single entry is fetched by name. Copy fields
    /// cannot be addressed that way.
    pub fn rest_single_key(&self) -> Option<&'static str> {
        match self {
            SchemaGroup::CopyField => None,
            SchemaGroup::DynamicField => Some("dynamicField"),
            SchemaGroup::Field => Some("field"),
            SchemaGroup::FieldType => Some("fieldType"),
        }
    }

    /// Attribute used to look an entry up. Copy fields have no name.
    pub fn identifier_key(&self) -> &'static str {
        match self {
            SchemaGroup::CopyField => "source",
            _ => "name",
        }
    }

    pub(crate) fn not_found(&self, identifier: &str) -> SchemaError {
        SchemaError::Api(format!("{} `{}` doesn't exist", self.schema_key(), identifier))
    }

    /// Pick entries out of a group list. Without an identifier the whole list
    /// comes back. With one, named groups give their single exact match and
    /// copy fields give every rule sharing that source; no match is an error.
    pub fn select(&self, entries: &[Value], identifier: Option<&str>) -> Result<Vec<Value>> {
        let Some(identifier) = identifier else {
            return Ok(entries.to_vec());
        };

        let key = self.identifier_key();
        let mut matches = entries
            .iter()
            .filter(|entry| entry.get(key).and_then(Value::as_str) == Some(identifier));

        let found: Vec<Value> = match self {
            SchemaGroup::CopyField => matches.cloned().collect(),
            _ => matches.next().cloned().into_iter().collect(),
        };

        if found.is_empty() {
            return Err(self.not_found(identifier));
        }
        Ok(found)
    }
}

impl fmt::Display for SchemaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaGroup {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "copy-field" | "copyfields" => Ok(SchemaGroup::CopyField),
            "dynamic-field" | "dynamicfields" => Ok(SchemaGroup::DynamicField),
            "field" | "fields" => Ok(SchemaGroup::Field),
            "field-type" | "fieldtypes" => Ok(SchemaGroup::FieldType),
            _ => Err(SchemaError::Config(format!("Unsupported schema group: {}", s))),
        }
    }
}

/// The object Solr returns under the `schema` key of `/schema`.
///
/// Kept as raw JSON so a fetched schema prints back exactly as Solr sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolrSchema(Map<String, Value>);

impl SolrSchema {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn unique_key(&self) -> Option<&str> {
        self.0.get("uniqueKey").and_then(Value::as_str)
    }

    pub fn group(&self, group: SchemaGroup) -> Result<&[Value]> {
        self.0
            .get(group.schema_key())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                SchemaError::Api(format!("Solr schema has no `{}` list", group.schema_key()))
            })
    }

    pub fn entries(&self, group: SchemaGroup, identifier: Option<&str>) -> Result<Vec<Value>> {
        group.select(self.group(group)?, identifier)
    }

    /// Build the body of a schema API request deleting every entry of
    /// `groups`, except fixed ones. Groups with nothing to delete get no
    /// command at all.
    pub fn clear_commands(
        &self,
        groups: &[SchemaGroup],
        fixed: &FixedFields
    ) -> Result<Map<String, Value>> {
        let groups: BTreeSet<SchemaGroup> = groups.iter().copied().collect();
        let mut commands = Map::new();

        for group in groups {
            let members = self.group(group)?;

            if members.is_empty() {
                debug!("Solr {} group is already empty", group.schema_key());
                continue;
            }

            let deletions: Vec<Value> = match group {
                SchemaGroup::CopyField => members.to_vec(),
                _ =>
                    members
                        .iter()
                        .filter_map(|entry| {
                            let name = entry.get("name").and_then(Value::as_str);
                            if name.is_none() {
                                warn!("Skipping {} entry without a name: {}", group, entry);
                            }
                            name
                        })
                        .filter(|name| !fixed.contains(group, name))
                        .map(|name| json!({ "name": name }))
                        .collect(),
            };

            if deletions.is_empty() {
                debug!("Solr {} group only holds fixed entries", group.schema_key());
                continue;
            }

            info!("Solr schema API. Clearing {} {} entries", deletions.len(), group.schema_key());
            commands.insert(group.delete_command().to_string(), Value::Array(deletions));
        }

        Ok(commands)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for SolrSchema {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Names per group that a clear must leave alone. Solr refuses to work
/// without its internal fields and the types they use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFields(HashMap<SchemaGroup, BTreeSet<String>>);

impl FixedFields {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Replace the fixed names of one group.
    pub fn set<I, S>(&mut self, group: SchemaGroup, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(group, names.into_iter().map(Into::into).collect());
    }

    pub fn with<I, S>(mut self, group: SchemaGroup, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(group, names);
        self
    }

    pub fn contains(&self, group: SchemaGroup, name: &str) -> bool {
        self.0.get(&group).is_some_and(|names| names.contains(name))
    }

    pub fn names(&self, group: SchemaGroup) -> impl Iterator<Item = &str> {
        self.0
            .get(&group)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }
}

impl Default for FixedFields {
    fn default() -> Self {
        Self::empty()
            .with(SchemaGroup::Field, ["id", "_version_", "_root_", "_nest_path_", "_text_"])
            .with(SchemaGroup::FieldType, ["string", "plong", "text_general", "_nest_path_"])
    }
}

//! Handles the engine passes to a client.

use core::fmt;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name of the catalog a client serves, e.g. `sqlserver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(String);

impl ConnectorId {
    /// Creates a connector id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unit of scan work against one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcSplit {
    /// Catalog the split belongs to.
    pub connector_id: ConnectorId,
    /// Remote catalog (database), if any.
    pub catalog_name: Option<String>,
    /// Remote schema.
    pub schema_name: Option<String>,
    /// Remote table.
    pub table_name: String,
    /// URL the split must be read from.
    pub connection_url: String,
    /// Split-specific connection properties.
    #[serde(default)]
    pub connection_properties: HashMap<String, String>,
}

impl JdbcSplit {
    /// Creates a split with no split-specific properties.
    #[must_use]
    pub fn new(
        connector_id: ConnectorId,
        table_name: impl Into<String>,
        connection_url: impl Into<String>,
    ) -> Self {
        Self {
            connector_id,
            catalog_name: None,
            schema_name: None,
            table_name: table_name.into(),
            connection_url: connection_url.into(),
            connection_properties: HashMap::new(),
        }
    }

    /// Sets the remote schema.
    #[must_use]
    pub fn schema(mut self, schema_name: impl Into<String>) -> Self {
        self.schema_name = Some(schema_name.into());
        self
    }

    /// Adds a split-specific connection property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.connection_properties.insert(key.into(), value.into());
        self
    }
}

/// Destination table of a write.
///
/// Clients open output connections from their own configuration; nothing
/// in this handle is used to build the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcOutputTableHandle {
    /// Catalog the table belongs to.
    pub connector_id: ConnectorId,
    /// Remote catalog (database), if any.
    pub catalog_name: Option<String>,
    /// Remote schema.
    pub schema_name: Option<String>,
    /// Final table name.
    pub table_name: String,
    /// Column names, in insert order.
    pub column_names: Vec<String>,
    /// Column SQL type names, parallel to `column_names`.
    pub column_types: Vec<String>,
    /// Staging table rows are written to before the final rename.
    pub temporary_table_name: String,
}

impl JdbcOutputTableHandle {
    /// Creates a handle with no columns.
    #[must_use]
    pub fn new(
        connector_id: ConnectorId,
        table_name: impl Into<String>,
        temporary_table_name: impl Into<String>,
    ) -> Self {
        Self {
            connector_id,
            catalog_name: None,
            schema_name: None,
            table_name: table_name.into(),
            column_names: Vec::new(),
            column_types: Vec::new(),
            temporary_table_name: temporary_table_name.into(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.column_names.push(name.into());
        self.column_types.push(sql_type.into());
        self
    }
}

//! SQL Server catalog configuration.

use std::collections::HashMap;
use std::path::Path;

use oxide_jdbc_core::config::BaseJdbcConfig;
use oxide_jdbc_core::{IsolationLevel, JdbcError, Result};
use serde::{Deserialize, Serialize};

/// Catalog property holding the isolation level, as the JDBC constant or
/// the level name.
pub const ISOLATION_LEVEL: &str = "mssql.isolation-level";

/// Settings specific to SQL Server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MsSqlConfig {
    /// Isolation level applied to every connection.
    #[serde(default)]
    pub isolation_level: IsolationLevel,
}

impl MsSqlConfig {
    /// Creates a configuration with the given isolation level.
    #[must_use]
    pub const fn new(isolation_level: IsolationLevel) -> Self {
        Self { isolation_level }
    }

    /// Reads `mssql.isolation-level` from flat catalog properties. The
    /// value may be the JDBC constant (`2`) or the level name
    /// (`READ_COMMITTED`); when absent the level is `READ_COMMITTED`.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] for an unrecognized level.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let isolation_level = properties
            .get(ISOLATION_LEVEL)
            .map(|value| value.parse::<IsolationLevel>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { isolation_level })
    }
}

/// Everything needed to build a [`MsSqlClient`](crate::MsSqlClient), as
/// stored in a catalog file.
///
/// ```json
/// {
///   "connection-url": "jdbc:jtds:sqlserver://db:1433/sales",
///   "connection-user": "presto",
///   "connection-password": "secret",
///   "mssql.isolation-level": 1
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsSqlCatalogConfig {
    /// Connection settings.
    #[serde(flatten)]
    pub base: BaseJdbcConfig,
    /// Isolation level applied to every connection.
    #[serde(rename = "mssql.isolation-level", default)]
    pub isolation_level: IsolationLevel,
}

impl MsSqlCatalogConfig {
    /// Reads both configurations from flat catalog properties.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] if either part is invalid.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let base = BaseJdbcConfig::from_properties(properties)?;
        let MsSqlConfig { isolation_level } = MsSqlConfig::from_properties(properties)?;
        Ok(Self {
            base,
            isolation_level,
        })
    }

    /// Parses a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] if the document is malformed
    /// or the connection URL is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| JdbcError::Configuration(format!("invalid catalog config: {e}")))?;
        config.base.validate()?;
        Ok(config)
    }

    /// Reads a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] if the file cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            JdbcError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// The SQL Server specific part.
    #[must_use]
    pub const fn mssql(&self) -> MsSqlConfig {
        MsSqlConfig::new(self.isolation_level)
    }
}

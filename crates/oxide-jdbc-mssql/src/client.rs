//! SQL Server client.

use std::collections::HashMap;
use std::sync::Arc;

use oxide_jdbc_core::{
    BaseJdbcClient, BaseJdbcConfig, Connection, ConnectionGuard, ConnectionProperties,
    ConnectorId, Dialect, Driver, DriverError, EngineType, IsolationLevel, JdbcClient, JdbcError,
    JdbcOutputTableHandle, JdbcSplit, Result,
};
use tracing::info;

use crate::config::{MsSqlCatalogConfig, MsSqlConfig};
use crate::dialect::MsSqlDialect;

/// Driver property controlling whether a null catalog means "the current
/// catalog" in metadata calls.
pub const NULL_CATALOG_MEANS_CURRENT: &str = "nullCatalogMeansCurrent";

/// Driver property carrying the transaction isolation constant.
pub const TRANSACTION_ISOLATION: &str = "transactionIsolation";

/// [`JdbcClient`] for SQL Server.
///
/// Wraps a [`BaseJdbcClient`] and changes three things:
///
/// - every connection gets `nullCatalogMeansCurrent=false` and
///   `transactionIsolation=<level>`, because the driver does not accept
///   these through the URL;
/// - split connections are read-only, and every connection has the
///   isolation level set on it directly after opening, whether or not
///   the driver honored the property;
/// - generic type names are rewritten where SQL Server spells them
///   differently (see [`MsSqlDialect`]).
#[derive(Debug, Clone)]
pub struct MsSqlClient {
    base: BaseJdbcClient,
    dialect: MsSqlDialect,
    isolation_level: IsolationLevel,
}

impl MsSqlClient {
    /// Creates a client, instantiating the driver with `load_driver`.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] if `config` is invalid and
    /// [`JdbcError::DriverInitialization`] if `load_driver` fails.
    pub fn new<D, F>(
        connector_id: ConnectorId,
        config: &BaseJdbcConfig,
        mssql_config: &MsSqlConfig,
        load_driver: F,
    ) -> Result<Self>
    where
        D: Driver + 'static,
        F: FnOnce() -> std::result::Result<D, DriverError>,
    {
        config.validate()?;
        let driver = load_driver().map_err(JdbcError::DriverInitialization)?;

        let dialect = MsSqlDialect::new();
        let mut base = BaseJdbcClient::new(
            connector_id,
            config,
            dialect.identifier_quote().to_string(),
            Arc::new(driver),
        )?;

        let isolation_level = mssql_config.isolation_level;
        let properties = base.connection_properties_mut();
        properties.set(NULL_CATALOG_MEANS_CURRENT, "false");
        properties.set(
            TRANSACTION_ISOLATION,
            isolation_level.as_i32().to_string(),
        );

        info!(
            connector = %base.connector_id(),
            driver = base.driver().name(),
            isolation = %isolation_level,
            "created SQL Server client"
        );

        Ok(Self {
            base,
            dialect,
            isolation_level,
        })
    }

    /// Creates a client from flat catalog properties (`connection-url`,
    /// `connection-user`, `connection-password`, `mssql.isolation-level`).
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_properties<D, F>(
        connector_id: ConnectorId,
        properties: &HashMap<String, String>,
        load_driver: F,
    ) -> Result<Self>
    where
        D: Driver + 'static,
        F: FnOnce() -> std::result::Result<D, DriverError>,
    {
        let config = MsSqlCatalogConfig::from_properties(properties)?;
        Self::new(connector_id, &config.base, &config.mssql(), load_driver)
    }

    /// Isolation level applied to every connection.
    #[must_use]
    pub const fn isolation_level(&self) -> IsolationLevel {
        self.isolation_level
    }

    /// The wrapped generic client.
    #[must_use]
    pub const fn base(&self) -> &BaseJdbcClient {
        &self.base
    }

    /// The SQL Server dialect.
    #[must_use]
    pub const fn dialect(&self) -> &MsSqlDialect {
        &self.dialect
    }

    /// Properties every connection starts from.
    #[must_use]
    pub const fn connection_properties(&self) -> &ConnectionProperties {
        self.base.connection_properties()
    }

    /// Properties for a split connection: the base properties with the
    /// split's applied on top, except that the isolation level stays the
    /// configured one.
    #[must_use]
    pub fn split_properties(&self, split: &JdbcSplit) -> ConnectionProperties {
        let mut properties = self.base.split_properties(split);
        properties.set(
            TRANSACTION_ISOLATION,
            self.isolation_level.as_i32().to_string(),
        );
        properties
    }

    /// Quotes an identifier for SQL Server.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        self.dialect.quote_identifier(name)
    }
}

impl JdbcClient for MsSqlClient {
    fn connector_id(&self) -> &ConnectorId {
        self.base.connector_id()
    }

    fn identifier_quote(&self) -> &str {
        self.base.identifier_quote()
    }

    fn connection_for_split(&self, split: &JdbcSplit) -> Result<Box<dyn Connection>> {
        let connection = self
            .base
            .connect(&split.connection_url, &self.split_properties(split))?;
        let mut guard = ConnectionGuard::new(connection);
        guard.connection().set_read_only(true)?;
        guard
            .connection()
            .set_transaction_isolation(self.isolation_level)?;
        Ok(guard.release())
    }

    fn connection_for_output(
        &self,
        _handle: &JdbcOutputTableHandle,
    ) -> Result<Box<dyn Connection>> {
        let connection = self
            .base
            .connect(self.base.connection_url(), self.base.connection_properties())?;
        let mut guard = ConnectionGuard::new(connection);
        guard
            .connection()
            .set_transaction_isolation(self.isolation_level)?;
        Ok(guard.release())
    }

    fn to_sql_type(&self, ty: &EngineType) -> Result<String> {
        self.base.dialect_sql_type(&self.dialect, ty)
    }
}

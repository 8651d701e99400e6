//! The client contract and its generic implementation.

use std::sync::Arc;

use tracing::debug;

use crate::config::BaseJdbcConfig;
use crate::dialect::Dialect;
use crate::driver::{Connection, Driver};
use crate::error::{JdbcError, Result};
use crate::handle::{ConnectorId, JdbcOutputTableHandle, JdbcSplit};
use crate::properties::ConnectionProperties;
use crate::types::{EngineType, CHAR_MAX_LENGTH};

/// Driver property carrying the user name.
pub const USER_PROPERTY: &str = "user";
/// Driver property carrying the password.
pub const PASSWORD_PROPERTY: &str = "password";

/// What the engine needs from a connector client.
///
/// Split connections are used while scanning, output connections while
/// writing, and [`to_sql_type`](Self::to_sql_type) while creating tables.
pub trait JdbcClient: Send + Sync {
    /// Catalog this client serves.
    fn connector_id(&self) -> &ConnectorId;

    /// Identifier quote string used when generating SQL.
    fn identifier_quote(&self) -> &str;

    /// Opens a connection for scanning `split`.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Connection`] if the driver fails.
    fn connection_for_split(&self, split: &JdbcSplit) -> Result<Box<dyn Connection>>;

    /// Opens a connection for writing to `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Connection`] if the driver fails.
    fn connection_for_output(&self, handle: &JdbcOutputTableHandle)
        -> Result<Box<dyn Connection>>;

    /// Returns the SQL type name used to create a column of `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::UnsupportedType`] if `ty` has no SQL name.
    fn to_sql_type(&self, ty: &EngineType) -> Result<String>;
}

/// Generic client: connects through a driver with the configured URL and
/// properties, and maps engine types to standard SQL names.
///
/// Dialect clients wrap one of these and adjust its behavior.
#[derive(Debug, Clone)]
pub struct BaseJdbcClient {
    connector_id: ConnectorId,
    driver: Arc<dyn Driver>,
    identifier_quote: String,
    connection_url: String,
    connection_properties: ConnectionProperties,
}

impl BaseJdbcClient {
    /// Creates a client.
    ///
    /// The connection properties are seeded with `user` and `password`
    /// when the configuration has them.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] if `config` is invalid.
    pub fn new(
        connector_id: ConnectorId,
        config: &BaseJdbcConfig,
        identifier_quote: impl Into<String>,
        driver: Arc<dyn Driver>,
    ) -> Result<Self> {
        config.validate()?;

        let mut connection_properties = ConnectionProperties::new();
        if let Some(user) = &config.connection_user {
            connection_properties.set(USER_PROPERTY, user.as_str());
        }
        if let Some(password) = &config.connection_password {
            connection_properties.set(PASSWORD_PROPERTY, password.as_str());
        }

        Ok(Self {
            connector_id,
            driver,
            identifier_quote: identifier_quote.into(),
            connection_url: config.connection_url.clone(),
            connection_properties,
        })
    }

    /// The driver connections are opened with.
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// URL used for output connections.
    #[must_use]
    pub fn connection_url(&self) -> &str {
        &self.connection_url
    }

    /// Properties every connection starts from.
    #[must_use]
    pub const fn connection_properties(&self) -> &ConnectionProperties {
        &self.connection_properties
    }

    /// Mutable access to the base properties, for dialect clients while
    /// they are being constructed.
    pub fn connection_properties_mut(&mut self) -> &mut ConnectionProperties {
        &mut self.connection_properties
    }

    /// Quotes `name` with the registered quote string, doubling embedded
    /// quotes.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = &self.identifier_quote;
        let escaped = name.replace(quote.as_str(), &quote.repeat(2));
        format!("{quote}{escaped}{quote}")
    }

    /// Opens a connection to `url` with `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Connection`] carrying the driver error.
    pub fn connect(
        &self,
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Box<dyn Connection>> {
        debug!(
            connector = %self.connector_id,
            driver = self.driver.name(),
            url = loggable_url(url),
            properties = ?properties.keys().collect::<Vec<_>>(),
            "opening connection"
        );
        Ok(self.driver.connect(url, properties)?)
    }

    /// Base properties with the split's properties applied on top.
    #[must_use]
    pub fn split_properties(&self, split: &JdbcSplit) -> ConnectionProperties {
        self.connection_properties
            .merged_with(&split.connection_properties)
    }

    /// Maps an engine type to its standard SQL name.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::UnsupportedType`] for types with no SQL
    /// counterpart.
    pub fn default_sql_type(&self, ty: &EngineType) -> Result<String> {
        let name = match ty {
            EngineType::Boolean => "boolean",
            EngineType::Tinyint => "tinyint",
            EngineType::Smallint => "smallint",
            EngineType::Integer => "integer",
            EngineType::Bigint => "bigint",
            EngineType::Real => "real",
            EngineType::Double => "double precision",
            EngineType::Decimal { precision, scale } => {
                return Ok(format!("decimal({precision}, {scale})"));
            }
            EngineType::Char(len) if *len == CHAR_MAX_LENGTH => "char",
            EngineType::Char(len) => return Ok(format!("char({len})")),
            EngineType::Varchar(None) => "varchar",
            EngineType::Varchar(Some(len)) => return Ok(format!("varchar({len})")),
            EngineType::Varbinary => "varbinary",
            EngineType::Date => "date",
            EngineType::Time => "time",
            EngineType::TimeWithTimeZone => "time with timezone",
            EngineType::Timestamp => "timestamp",
            EngineType::TimestampWithTimeZone => "timestamp with timezone",
            EngineType::Json | EngineType::Uuid | EngineType::Array(_) => {
                return Err(JdbcError::UnsupportedType(ty.display_name()));
            }
        };
        Ok(name.to_string())
    }

    /// Maps an engine type through [`default_sql_type`](Self::default_sql_type)
    /// and then `dialect`'s overrides.
    ///
    /// # Errors
    ///
    /// Propagates [`JdbcError::UnsupportedType`] from the default mapping.
    pub fn dialect_sql_type(&self, dialect: &dyn Dialect, ty: &EngineType) -> Result<String> {
        self.default_sql_type(ty).map(|generic| dialect.type_name(generic))
    }
}

impl JdbcClient for BaseJdbcClient {
    fn connector_id(&self) -> &ConnectorId {
        &self.connector_id
    }

    fn identifier_quote(&self) -> &str {
        &self.identifier_quote
    }

    fn connection_for_split(&self, split: &JdbcSplit) -> Result<Box<dyn Connection>> {
        self.connect(&split.connection_url, &self.split_properties(split))
    }

    fn connection_for_output(
        &self,
        _handle: &JdbcOutputTableHandle,
    ) -> Result<Box<dyn Connection>> {
        self.connect(&self.connection_url, &self.connection_properties)
    }

    fn to_sql_type(&self, ty: &EngineType) -> Result<String> {
        self.default_sql_type(ty)
    }
}

/// The part of a JDBC URL before the first `;`. Drivers accept
/// `;name=value` pairs there, including `password`, which must not reach
/// the logs.
fn loggable_url(url: &str) -> &str {
    url.split_once(';').map_or(url, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Failures, RecordingDriver};

    const URL: &str = "jdbc:jtds:sqlserver://db:1433/sales";

    fn client(driver: &RecordingDriver) -> BaseJdbcClient {
        let config = BaseJdbcConfig::new(URL).user("sa").password("secret");
        BaseJdbcClient::new(
            ConnectorId::new("sqlserver"),
            &config,
            "\"",
            Arc::new(driver.clone()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_seeds_credentials() {
        let client = client(&RecordingDriver::new());
        assert_eq!(client.connection_properties().get("user"), Some("sa"));
        assert_eq!(client.connection_properties().get("password"), Some("secret"));
        assert_eq!(client.connection_url(), URL);
        assert_eq!(client.driver().name(), "recording");
    }

    #[test]
    fn test_new_without_credentials() {
        let client = BaseJdbcClient::new(
            ConnectorId::new("sqlserver"),
            &BaseJdbcConfig::new(URL),
            "\"",
            Arc::new(RecordingDriver::new()),
        )
        .unwrap();
        assert!(client.connection_properties().is_empty());
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let err = BaseJdbcClient::new(
            ConnectorId::new("sqlserver"),
            &BaseJdbcConfig::new("db:1433"),
            "\"",
            Arc::new(RecordingDriver::new()),
        )
        .unwrap_err();
        assert!(matches!(err, JdbcError::Configuration(_)));
    }

    #[test]
    fn test_split_connection_merges_properties() {
        let driver = RecordingDriver::new();
        let client = client(&driver);
        let split = JdbcSplit::new(
            ConnectorId::new("sqlserver"),
            "orders",
            "jdbc:jtds:sqlserver://replica:1433/sales",
        )
        .property("user", "reader");

        let connection = client.connection_for_split(&split).unwrap();
        assert!(!connection.is_read_only());

        let opened = driver.last_opened().unwrap();
        assert_eq!(opened.url, "jdbc:jtds:sqlserver://replica:1433/sales");
        assert_eq!(opened.properties.get("user"), Some("reader"));
        assert_eq!(opened.properties.get("password"), Some("secret"));
        assert_eq!(client.connection_properties().get("user"), Some("sa"));
    }

    #[test]
    fn test_output_connection_uses_base_url() {
        let driver = RecordingDriver::new();
        let client = client(&driver);
        let handle = JdbcOutputTableHandle::new(
            ConnectorId::new("other"),
            "orders",
            "tmp_orders",
        );
        client.connection_for_output(&handle).unwrap();

        let opened = driver.last_opened().unwrap();
        assert_eq!(opened.url, URL);
        assert_eq!(&opened.properties, client.connection_properties());
    }

    #[test]
    fn test_connect_error_is_passed_through() {
        let driver = RecordingDriver::failing(Failures {
            connect: true,
            ..Failures::default()
        });
        let client = client(&driver);
        let split = JdbcSplit::new(ConnectorId::new("sqlserver"), "t", URL);
        let err = client.connection_for_split(&split).unwrap_err();
        match err {
            JdbcError::Connection(driver_err) => {
                assert_eq!(driver_err.sql_state.as_deref(), Some("08S01"));
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_sql_types() {
        let client = client(&RecordingDriver::new());
        let cases = [
            (EngineType::Boolean, "boolean"),
            (EngineType::Tinyint, "tinyint"),
            (EngineType::Smallint, "smallint"),
            (EngineType::Integer, "integer"),
            (EngineType::Bigint, "bigint"),
            (EngineType::Real, "real"),
            (EngineType::Double, "double precision"),
            (
                EngineType::Decimal {
                    precision: 10,
                    scale: 2,
                },
                "decimal(10, 2)",
            ),
            (EngineType::Char(3), "char(3)"),
            (EngineType::Char(CHAR_MAX_LENGTH), "char"),
            (EngineType::Varchar(None), "varchar"),
            (EngineType::Varchar(Some(255)), "varchar(255)"),
            (EngineType::Varbinary, "varbinary"),
            (EngineType::Date, "date"),
            (EngineType::Time, "time"),
            (EngineType::TimeWithTimeZone, "time with timezone"),
            (EngineType::Timestamp, "timestamp"),
            (EngineType::TimestampWithTimeZone, "timestamp with timezone"),
        ];
        for (ty, expected) in cases {
            assert_eq!(client.to_sql_type(&ty).unwrap(), expected, "{ty}");
        }
    }

    #[test]
    fn test_unsupported_types() {
        let client = client(&RecordingDriver::new());
        for ty in [
            EngineType::Json,
            EngineType::Uuid,
            EngineType::Array(Box::new(EngineType::Bigint)),
        ] {
            let err = client.to_sql_type(&ty).unwrap_err();
            assert!(matches!(err, JdbcError::UnsupportedType(name) if name == ty.display_name()));
        }
    }

    struct Legacy;

    impl Dialect for Legacy {
        fn name(&self) -> &'static str {
            "legacy"
        }

        fn override_type_name(&self, generic: &str) -> Option<&'static str> {
            (generic == "timestamp").then_some("datetime")
        }
    }

    #[test]
    fn test_dialect_sql_type_applies_overrides() {
        let client = client(&RecordingDriver::new());
        assert_eq!(
            client
                .dialect_sql_type(&Legacy, &EngineType::Timestamp)
                .unwrap(),
            "datetime"
        );
        assert_eq!(
            client.dialect_sql_type(&Legacy, &EngineType::Bigint).unwrap(),
            "bigint"
        );
    }

    #[test]
    fn test_loggable_url_drops_property_pairs() {
        assert_eq!(
            loggable_url("jdbc:jtds:sqlserver://db:1433/sales;user=sa;password=secret"),
            "jdbc:jtds:sqlserver://db:1433/sales"
        );
        assert_eq!(
            loggable_url("jdbc:sqlserver://db:1433;password=secret"),
            "jdbc:sqlserver://db:1433"
        );
        assert_eq!(loggable_url(URL), URL);
    }

    #[test]
    fn test_quote_identifier() {
        let client = client(&RecordingDriver::new());
        assert_eq!(client.identifier_quote(), "\"");
        assert_eq!(client.quote_identifier("order lines"), "\"order lines\"");
        assert_eq!(client.quote_identifier("x\"y"), "\"x\"\"y\"");
    }
}

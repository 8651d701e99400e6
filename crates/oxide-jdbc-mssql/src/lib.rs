//! # oxide-jdbc-mssql
//!
//! SQL Server client for `oxide-jdbc-core`.
//!
//! # How SQL Server differs from the generic client
//!
//! - **Connection properties**: the driver does not take every setting
//!   through the connection URL, so the client adds
//!   `nullCatalogMeansCurrent=false` (the engine addresses catalogs
//!   explicitly) and `transactionIsolation=<level>` to every connection.
//! - **[Isolation level]**: the configured level is also set on each
//!   connection right after it is opened, since the property is not
//!   honored on every code path of the driver.
//! - **Read-only scans**: split connections are switched to read-only.
//! - **Identifier quoting**: double quotes (`"`), valid while
//!   [`QUOTED_IDENTIFIER`] is on, which is the default for driver
//!   sessions.
//! - **[Type names]**: `timestamp` and `timestamp with timezone` become
//!   `datetime2`, `time with timezone` becomes `time`, and
//!   `double precision` becomes `float`.
//!
//! [Isolation level]: https://learn.microsoft.com/en-us/sql/t-sql/statements/set-transaction-isolation-level-transact-sql
//! [`QUOTED_IDENTIFIER`]: https://learn.microsoft.com/en-us/sql/t-sql/statements/set-quoted-identifier-transact-sql
//! [Type names]: https://learn.microsoft.com/en-us/sql/t-sql/data-types/data-types-transact-sql
//!
//! ## Example
//!
//! ```rust,ignore
//! use oxide_jdbc_core::{BaseJdbcConfig, ConnectorId, EngineType, IsolationLevel, JdbcClient};
//! use oxide_jdbc_mssql::{MsSqlClient, MsSqlConfig};
//!
//! let client = MsSqlClient::new(
//!     ConnectorId::new("sqlserver"),
//!     &BaseJdbcConfig::new("jdbc:jtds:sqlserver://db:1433/sales").user("presto"),
//!     &MsSqlConfig::new(IsolationLevel::ReadUncommitted),
//!     || jtds::Driver::load(),
//! )?;
//!
//! assert_eq!(client.to_sql_type(&EngineType::Timestamp)?, "datetime2");
//! let connection = client.connection_for_split(&split)?;
//! assert!(connection.is_read_only());
//! ```

mod client;
pub mod config;
mod dialect;

pub use client::{MsSqlClient, NULL_CATALOG_MEANS_CURRENT, TRANSACTION_ISOLATION};
pub use config::{MsSqlCatalogConfig, MsSqlConfig};
pub use dialect::MsSqlDialect;

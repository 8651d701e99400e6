//! # oxide-jdbc-core
//!
//! The contract between a distributed query engine and the clients that
//! connect it to external databases through JDBC-style drivers.
//!
//! This crate provides:
//! - [`Driver`] and [`Connection`] traits standing in for a database driver
//! - [`IsolationLevel`] and [`ConnectionProperties`], the knobs a client
//!   turns on every connection
//! - [`JdbcSplit`] and [`JdbcOutputTableHandle`], the handles the engine
//!   passes in when scanning and writing
//! - [`EngineType`] and the standard mapping to SQL type names
//! - [`BaseJdbcClient`], the generic [`JdbcClient`] that dialect crates
//!   wrap and adjust
//!
//! Connection pooling, metadata discovery and split planning live in the
//! engine; a client only produces configured connections and type names.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use oxide_jdbc_core::testing::RecordingDriver;
//! use oxide_jdbc_core::{BaseJdbcClient, BaseJdbcConfig, ConnectorId, EngineType, JdbcClient};
//!
//! let config = BaseJdbcConfig::new("jdbc:jtds:sqlserver://db:1433/sales").user("sa");
//! let client = BaseJdbcClient::new(
//!     ConnectorId::new("sqlserver"),
//!     &config,
//!     "\"",
//!     Arc::new(RecordingDriver::new()),
//! )
//! .unwrap();
//!
//! assert_eq!(client.to_sql_type(&EngineType::Double).unwrap(), "double precision");
//! ```

pub mod client;
pub mod config;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod guard;
pub mod handle;
pub mod isolation;
pub mod properties;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use client::{BaseJdbcClient, JdbcClient};
pub use config::BaseJdbcConfig;
pub use dialect::Dialect;
pub use driver::{Connection, Driver, DriverError};
pub use error::{JdbcError, Result};
pub use guard::ConnectionGuard;
pub use handle::{ConnectorId, JdbcOutputTableHandle, JdbcSplit};
pub use isolation::IsolationLevel;
pub use properties::ConnectionProperties;
pub use types::EngineType;

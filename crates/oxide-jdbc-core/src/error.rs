//! Error types for JDBC clients.

use thiserror::Error;

use crate::driver::DriverError;

/// Errors raised while configuring a client or producing connections.
#[derive(Debug, Error)]
pub enum JdbcError {
    /// Invalid isolation level or malformed base configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The driver could not be instantiated.
    #[error("failed to initialize driver: {0}")]
    DriverInitialization(#[source] DriverError),

    /// Opening or configuring a physical connection failed.
    ///
    /// The driver error is carried as-is.
    #[error(transparent)]
    Connection(#[from] DriverError),

    /// The engine type has no SQL type name.
    #[error("unsupported column type: {0}")]
    UnsupportedType(String),
}

/// Result type alias for JDBC client operations.
pub type Result<T> = std::result::Result<T, JdbcError>;

//! Driver and connection abstractions.
//!
//! These mirror the small part of the JDBC `Driver` / `Connection`
//! surface that connector clients need: opening a connection and
//! adjusting its read-only flag and transaction isolation.

use core::fmt;

use thiserror::Error;

use crate::isolation::IsolationLevel;
use crate::properties::ConnectionProperties;

/// A failure reported by a driver or one of its connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", .sql_state.as_ref().map(|s| format!(" (SQLSTATE {s})")).unwrap_or_default())]
pub struct DriverError {
    /// Human-readable description.
    pub message: String,
    /// Five-character SQLSTATE code, when the driver provides one.
    pub sql_state: Option<String>,
}

impl DriverError {
    /// Creates an error without a SQLSTATE.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sql_state: None,
        }
    }

    /// Attaches a SQLSTATE code.
    #[must_use]
    pub fn with_sql_state(mut self, sql_state: impl Into<String>) -> Self {
        self.sql_state = Some(sql_state.into());
        self
    }
}

/// An open physical connection to the external database.
pub trait Connection: fmt::Debug + Send {
    /// Puts the connection in or out of read-only mode.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the mode cannot be changed.
    fn set_read_only(&mut self, read_only: bool) -> Result<(), DriverError>;

    /// Returns whether the connection is read-only.
    fn is_read_only(&self) -> bool;

    /// Sets the transaction isolation level.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the level is rejected.
    fn set_transaction_isolation(&mut self, level: IsolationLevel) -> Result<(), DriverError>;

    /// Returns the current transaction isolation level.
    fn transaction_isolation(&self) -> IsolationLevel;

    /// Closes the connection. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the connection cannot be released
    /// cleanly.
    fn close(&mut self) -> Result<(), DriverError>;

    /// Returns whether [`close`](Self::close) has been called.
    fn is_closed(&self) -> bool;
}

/// A database driver able to open connections from a URL.
pub trait Driver: fmt::Debug + Send + Sync {
    /// Returns the driver name, used in logs.
    fn name(&self) -> &str;

    /// Opens a connection to `url` with the given properties.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the connection cannot be opened.
    fn connect(
        &self,
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Box<dyn Connection>, DriverError>;
}

//! In-memory driver for tests.
//!
//! [`RecordingDriver`] never touches the network. It records every
//! `connect` call together with the properties it received and hands out
//! [`RecordingConnection`]s whose state is observable through a shared
//! [`ConnectionLog`]. Individual steps can be made to fail.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::driver::{Connection, Driver, DriverError};
use crate::isolation::IsolationLevel;
use crate::properties::ConnectionProperties;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Steps a [`RecordingDriver`] should fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Failures {
    /// `Driver::connect` fails.
    pub connect: bool,
    /// `Connection::set_read_only` fails.
    pub read_only: bool,
    /// `Connection::set_transaction_isolation` fails.
    pub isolation: bool,
    /// `Connection::close` fails (the connection is still marked closed).
    pub close: bool,
}

#[derive(Debug)]
struct ConnectionState {
    read_only: bool,
    isolation: IsolationLevel,
    close_calls: usize,
    closed: bool,
    failures: Failures,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            read_only: false,
            // SQL Server's server-side default.
            isolation: IsolationLevel::ReadCommitted,
            close_calls: 0,
            closed: false,
            failures: Failures::default(),
        }
    }
}

/// Shared view of a [`RecordingConnection`]'s state.
#[derive(Debug, Clone, Default)]
pub struct ConnectionLog {
    state: Arc<Mutex<ConnectionState>>,
}

impl ConnectionLog {
    fn with_failures(failures: Failures) -> Self {
        let log = Self::default();
        lock(&log.state).failures = failures;
        log
    }

    /// Makes subsequent `close` calls fail.
    pub fn fail_close(&self, fail: bool) {
        lock(&self.state).failures.close = fail;
    }

    /// Number of times `close` was called.
    #[must_use]
    pub fn close_calls(&self) -> usize {
        lock(&self.state).close_calls
    }

    /// Whether the connection was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    /// Whether the connection is read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        lock(&self.state).read_only
    }

    /// Current isolation level of the connection.
    #[must_use]
    pub fn isolation(&self) -> IsolationLevel {
        lock(&self.state).isolation
    }
}

/// Connection handed out by [`RecordingDriver`].
#[derive(Debug)]
pub struct RecordingConnection {
    log: ConnectionLog,
}

impl RecordingConnection {
    /// Creates a connection backed by `log`.
    #[must_use]
    pub const fn new(log: ConnectionLog) -> Self {
        Self { log }
    }
}

impl Connection for RecordingConnection {
    fn set_read_only(&mut self, read_only: bool) -> Result<(), DriverError> {
        let mut state = lock(&self.log.state);
        if state.failures.read_only {
            return Err(DriverError::new("setReadOnly not supported").with_sql_state("HY000"));
        }
        state.read_only = read_only;
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.log.is_read_only()
    }

    fn set_transaction_isolation(&mut self, level: IsolationLevel) -> Result<(), DriverError> {
        let mut state = lock(&self.log.state);
        if state.failures.isolation {
            return Err(
                DriverError::new(format!("cannot set isolation level {level}"))
                    .with_sql_state("HY024"),
            );
        }
        state.isolation = level;
        Ok(())
    }

    fn transaction_isolation(&self) -> IsolationLevel {
        self.log.isolation()
    }

    fn close(&mut self) -> Result<(), DriverError> {
        let mut state = lock(&self.log.state);
        state.close_calls += 1;
        state.closed = true;
        if state.failures.close {
            return Err(DriverError::new("socket already reset").with_sql_state("08S01"));
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.log.is_closed()
    }
}

/// One recorded `connect` call.
#[derive(Debug, Clone)]
pub struct OpenedConnection {
    /// URL passed to `connect`.
    pub url: String,
    /// Properties passed to `connect`.
    pub properties: ConnectionProperties,
    /// State of the connection that was returned.
    pub log: ConnectionLog,
}

#[derive(Debug, Default)]
struct DriverState {
    failures: Failures,
    attempts: usize,
    opened: Vec<OpenedConnection>,
}

/// Driver that records connections instead of opening sockets.
///
/// Clones share their recording, so a test can keep one handle and
/// give another to the client under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    state: Arc<Mutex<DriverState>>,
}

impl RecordingDriver {
    /// Creates a driver where every step succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver failing the given steps.
    #[must_use]
    pub fn failing(failures: Failures) -> Self {
        let driver = Self::default();
        driver.set_failures(failures);
        driver
    }

    /// Replaces the failure configuration for subsequent connections.
    pub fn set_failures(&self, failures: Failures) {
        lock(&self.state).failures = failures;
    }

    /// Number of `connect` calls, including failed ones.
    #[must_use]
    pub fn connect_attempts(&self) -> usize {
        lock(&self.state).attempts
    }

    /// Connections successfully opened so far, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<OpenedConnection> {
        lock(&self.state).opened.clone()
    }

    /// The most recently opened connection.
    #[must_use]
    pub fn last_opened(&self) -> Option<OpenedConnection> {
        lock(&self.state).opened.last().cloned()
    }
}

impl Driver for RecordingDriver {
    fn name(&self) -> &str {
        "recording"
    }

    fn connect(
        &self,
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Box<dyn Connection>, DriverError> {
        let mut state = lock(&self.state);
        state.attempts += 1;
        if state.failures.connect {
            return Err(
                DriverError::new(format!("network error connecting to {url}"))
                    .with_sql_state("08S01"),
            );
        }
        let log = ConnectionLog::with_failures(state.failures);
        state.opened.push(OpenedConnection {
            url: url.to_string(),
            properties: properties.clone(),
            log: log.clone(),
        });
        Ok(Box::new(RecordingConnection::new(log)))
    }
}

//! Scoped ownership of a freshly opened connection.

use tracing::warn;

use crate::driver::Connection;

/// Holds a connection while it is being configured.
///
/// Dropping the guard closes the connection, so an early return through
/// `?` never leaks it. A failure while closing is logged and dropped so
/// it cannot shadow the error that caused the early return. Call
/// [`release`](Self::release) once configuration succeeded.
#[derive(Debug)]
pub struct ConnectionGuard {
    connection: Option<Box<dyn Connection>>,
}

impl ConnectionGuard {
    /// Takes ownership of `connection`.
    #[must_use]
    pub fn new(connection: Box<dyn Connection>) -> Self {
        Self {
            connection: Some(connection),
        }
    }

    /// Gives mutable access to the guarded connection.
    ///
    /// # Panics
    ///
    /// Never in practice: the connection is only taken by `release`,
    /// which consumes the guard.
    pub fn connection(&mut self) -> &mut dyn Connection {
        self.connection
            .as_deref_mut()
            .expect("connection is present until the guard is released")
    }

    /// Disarms the guard and hands the connection to the caller.
    ///
    /// # Panics
    ///
    /// Never in practice, for the same reason as [`connection`](Self::connection).
    #[must_use]
    pub fn release(mut self) -> Box<dyn Connection> {
        self.connection
            .take()
            .expect("connection is present until the guard is released")
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            if let Err(err) = connection.close() {
                warn!(error = %err, "failed to close connection after setup error");
            }
        }
    }
}

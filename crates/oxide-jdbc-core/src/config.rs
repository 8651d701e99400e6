//! Connection configuration shared by every JDBC client.

use core::fmt;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{JdbcError, Result};

/// Catalog property holding the connection URL.
pub const CONNECTION_URL: &str = "connection-url";
/// Catalog property holding the user name.
pub const CONNECTION_USER: &str = "connection-user";
/// Catalog property holding the password.
pub const CONNECTION_PASSWORD: &str = "connection-password";

static JDBC_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^jdbc:[A-Za-z][A-Za-z0-9+.-]*:.+$").expect("JDBC URL pattern is valid")
});

/// Where and as whom a client connects.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BaseJdbcConfig {
    /// JDBC URL, e.g. `jdbc:jtds:sqlserver://db:1433/sales`.
    pub connection_url: String,
    /// User name, passed to the driver as the `user` property.
    #[serde(default)]
    pub connection_user: Option<String>,
    /// Password, passed to the driver as the `password` property.
    #[serde(default)]
    pub connection_password: Option<String>,
}

impl BaseJdbcConfig {
    /// Creates a configuration for `connection_url` without credentials.
    #[must_use]
    pub fn new(connection_url: impl Into<String>) -> Self {
        Self {
            connection_url: connection_url.into(),
            connection_user: None,
            connection_password: None,
        }
    }

    /// Sets the user name.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.connection_user = Some(user.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.connection_password = Some(password.into());
        self
    }

    /// Reads the configuration from flat catalog properties.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] if `connection-url` is missing
    /// or the resulting configuration is invalid.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let connection_url = properties.get(CONNECTION_URL).cloned().ok_or_else(|| {
            JdbcError::Configuration(format!("missing '{CONNECTION_URL}' property"))
        })?;
        let config = Self {
            connection_url,
            connection_user: properties.get(CONNECTION_USER).cloned(),
            connection_password: properties.get(CONNECTION_PASSWORD).cloned(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the URL has the `jdbc:<subprotocol>:<rest>` shape.
    /// The rest is driver-specific and may contain spaces inside
    /// `;name=value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`JdbcError::Configuration`] describing the problem.
    pub fn validate(&self) -> Result<()> {
        if self.connection_url.trim().is_empty() {
            return Err(JdbcError::Configuration(format!(
                "'{CONNECTION_URL}' must not be empty"
            )));
        }
        if !JDBC_URL.is_match(&self.connection_url) {
            return Err(JdbcError::Configuration(format!(
                "'{CONNECTION_URL}' is not a JDBC URL: {}",
                self.connection_url
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for BaseJdbcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseJdbcConfig")
            .field("connection_url", &self.connection_url)
            .field("connection_user", &self.connection_user)
            .field(
                "connection_password",
                &self.connection_password.as_ref().map(|_| "****"),
            )
            .finish()
    }
}

//! Transaction isolation levels.
//!
//! The integer values match the `TRANSACTION_*` constants of the JDBC
//! `Connection` interface, which is also what drivers expect in the
//! `transactionIsolation` connection property.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JdbcError;

/// Standard SQL transaction isolation level.
///
/// Serializes as the JDBC integer constant; deserializes from either the
/// constant or a name accepted by [`FromStr`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IsolationLevelRepr", into = "i32")]
pub enum IsolationLevel {
    /// Dirty reads, non-repeatable reads and phantom reads can occur.
    ReadUncommitted,
    /// Dirty reads are prevented.
    #[default]
    ReadCommitted,
    /// Dirty and non-repeatable reads are prevented.
    RepeatableRead,
    /// Fully serializable.
    Serializable,
}

impl IsolationLevel {
    /// All recognized levels, weakest first.
    pub const ALL: [Self; 4] = [
        Self::ReadUncommitted,
        Self::ReadCommitted,
        Self::RepeatableRead,
        Self::Serializable,
    ];

    /// Returns the JDBC integer constant for this level.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::ReadUncommitted => 1,
            Self::ReadCommitted => 2,
            Self::RepeatableRead => 4,
            Self::Serializable => 8,
        }
    }

    /// Returns the upper-case constant name, e.g. `READ_COMMITTED`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ_UNCOMMITTED",
            Self::ReadCommitted => "READ_COMMITTED",
            Self::RepeatableRead => "REPEATABLE_READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

impl TryFrom<i32> for IsolationLevel {
    type Error = JdbcError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_i32() == value)
            .ok_or_else(|| {
                JdbcError::Configuration(format!(
                    "unrecognized transaction isolation level: {value}"
                ))
            })
    }
}

/// Wire form accepted when deserializing an [`IsolationLevel`].
#[derive(Deserialize)]
#[serde(untagged)]
enum IsolationLevelRepr {
    Code(i32),
    Name(String),
}

impl TryFrom<IsolationLevelRepr> for IsolationLevel {
    type Error = JdbcError;

    fn try_from(repr: IsolationLevelRepr) -> Result<Self, Self::Error> {
        match repr {
            IsolationLevelRepr::Code(value) => Self::try_from(value),
            IsolationLevelRepr::Name(name) => name.parse(),
        }
    }
}

impl From<IsolationLevel> for i32 {
    fn from(level: IsolationLevel) -> Self {
        level.as_i32()
    }
}

impl FromStr for IsolationLevel {
    type Err = JdbcError;

    /// Accepts the integer constant (`"2"`) or the level name
    /// (`"read committed"`, `"READ_COMMITTED"`, `"read-committed"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Self::try_from(value);
        }
        let normalized = trimmed.to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|level| level.name() == normalized)
            .ok_or_else(|| {
                JdbcError::Configuration(format!(
                    "unrecognized transaction isolation level: {trimmed:?}"
                ))
            })
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

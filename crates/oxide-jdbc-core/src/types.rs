//! Engine-level column types.

use core::fmt;
use core::str::FromStr;

use crate::error::JdbcError;

/// Largest length of a `char(n)` type; `char` of this length is written
/// without a length.
pub const CHAR_MAX_LENGTH: u32 = 65_536;

/// Default precision of an unqualified `decimal`.
pub const DECIMAL_DEFAULT_PRECISION: u8 = 38;

/// Logical column types of the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngineType {
    /// Boolean.
    Boolean,
    /// 1-byte integer.
    Tinyint,
    /// 2-byte integer.
    Smallint,
    /// 4-byte integer.
    Integer,
    /// 8-byte integer.
    Bigint,
    /// 4-byte float.
    Real,
    /// 8-byte float.
    Double,
    /// Fixed-point decimal.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Number of digits after the decimal point.
        scale: u8,
    },
    /// Fixed-length character string.
    Char(u32),
    /// Variable-length character string; `None` means unbounded.
    Varchar(Option<u32>),
    /// Variable-length binary.
    Varbinary,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Time of day with a zone offset.
    TimeWithTimeZone,
    /// Date and time.
    Timestamp,
    /// Date and time with a zone.
    TimestampWithTimeZone,
    /// JSON document.
    Json,
    /// UUID.
    Uuid,
    /// Array of another type.
    Array(Box<EngineType>),
}

impl EngineType {
    /// Returns the engine's display name, e.g. `timestamp with time zone`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Boolean => String::from("boolean"),
            Self::Tinyint => String::from("tinyint"),
            Self::Smallint => String::from("smallint"),
            Self::Integer => String::from("integer"),
            Self::Bigint => String::from("bigint"),
            Self::Real => String::from("real"),
            Self::Double => String::from("double"),
            Self::Decimal { precision, scale } => format!("decimal({precision},{scale})"),
            Self::Char(len) => format!("char({len})"),
            Self::Varchar(None) => String::from("varchar"),
            Self::Varchar(Some(len)) => format!("varchar({len})"),
            Self::Varbinary => String::from("varbinary"),
            Self::Date => String::from("date"),
            Self::Time => String::from("time"),
            Self::TimeWithTimeZone => String::from("time with time zone"),
            Self::Timestamp => String::from("timestamp"),
            Self::TimestampWithTimeZone => String::from("timestamp with time zone"),
            Self::Json => String::from("json"),
            Self::Uuid => String::from("uuid"),
            Self::Array(element) => format!("array({element})"),
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn unknown(input: &str) -> JdbcError {
    JdbcError::UnsupportedType(format!("unknown type {input:?}"))
}

fn parse_number<T: FromStr>(arg: &str, input: &str) -> Result<T, JdbcError> {
    arg.trim().parse().map_err(|_| unknown(input))
}

impl FromStr for EngineType {
    type Err = JdbcError;

    /// Parses a type written the way the engine displays it, e.g.
    /// `varchar(20)`, `decimal(10, 2)` or `array(bigint)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let normalized = normalized.to_ascii_lowercase();

        let (name, args) = match normalized.find('(') {
            Some(open) => {
                let args = normalized[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| unknown(s))?;
                (normalized[..open].trim(), Some(args))
            }
            None => (normalized.as_str(), None),
        };

        let ty = match (name, args) {
            ("boolean", None) => Self::Boolean,
            ("tinyint", None) => Self::Tinyint,
            ("smallint", None) => Self::Smallint,
            ("integer" | "int", None) => Self::Integer,
            ("bigint", None) => Self::Bigint,
            ("real", None) => Self::Real,
            ("double", None) => Self::Double,
            ("decimal", None) => Self::Decimal {
                precision: DECIMAL_DEFAULT_PRECISION,
                scale: 0,
            },
            ("decimal", Some(args)) => match args.split_once(',') {
                Some((precision, scale)) => Self::Decimal {
                    precision: parse_number(precision, s)?,
                    scale: parse_number(scale, s)?,
                },
                None => Self::Decimal {
                    precision: parse_number(args, s)?,
                    scale: 0,
                },
            },
            ("char", None) => Self::Char(1),
            ("char", Some(len)) => Self::Char(parse_number(len, s)?),
            ("varchar", None) => Self::Varchar(None),
            ("varchar", Some(len)) => Self::Varchar(Some(parse_number(len, s)?)),
            ("varbinary", None) => Self::Varbinary,
            ("date", None) => Self::Date,
            ("time", None) => Self::Time,
            ("time with time zone", None) => Self::TimeWithTimeZone,
            ("timestamp", None) => Self::Timestamp,
            ("timestamp with time zone", None) => Self::TimestampWithTimeZone,
            ("json", None) => Self::Json,
            ("uuid", None) => Self::Uuid,
            ("array", Some(element)) => Self::Array(Box::new(element.parse()?)),
            _ => return Err(unknown(s)),
        };
        Ok(ty)
    }
}

//! SQL Server dialect implementation.

use oxide_jdbc_core::dialect::Dialect;

/// SQL Server dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsSqlDialect;

impl MsSqlDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MsSqlDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn identifier_quote(&self) -> char {
        '"' // QUOTED_IDENTIFIER is on for ODBC/JDBC sessions
    }

    fn override_type_name(&self, generic: &str) -> Option<&'static str> {
        match generic {
            "time with timezone" => Some("time"),
            "timestamp" | "timestamp with timezone" => Some("datetime2"),
            "double precision" => Some("float"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mssql_dialect() {
        let dialect = MsSqlDialect::new();
        assert_eq!(dialect.name(), "sqlserver");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.quote_identifier("Order Details"), "\"Order Details\"");
    }

    #[test]
    fn test_type_overrides() {
        let dialect = MsSqlDialect::new();
        assert_eq!(dialect.type_name("time with timezone".into()), "time");
        assert_eq!(dialect.type_name("timestamp".into()), "datetime2");
        assert_eq!(dialect.type_name("timestamp with timezone".into()), "datetime2");
        assert_eq!(dialect.type_name("double precision".into()), "float");
    }

    #[test]
    fn test_other_names_pass_through() {
        let dialect = MsSqlDialect::new();
        for name in [
            "varchar",
            "varchar(10)",
            "time",
            "real",
            "boolean",
            "TIMESTAMP",
            "timestamp with time zone",
            "decimal(10, 2)",
        ] {
            assert_eq!(dialect.override_type_name(name), None, "{name}");
            assert_eq!(dialect.type_name(name.to_string()), name);
        }
    }
}

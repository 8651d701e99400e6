//! SQL dialect support.
//!
//! A dialect carries what differs between remote databases at the
//! connector level: how identifiers are quoted and which SQL type names
//! replace the generic ones when creating tables.

/// Trait for dialect-specific naming behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling any embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Returns the dialect's replacement for a generic SQL type name, or
    /// `None` to keep the generic name.
    fn override_type_name(&self, generic: &str) -> Option<&'static str> {
        let _ = generic;
        None
    }

    /// Applies [`override_type_name`](Self::override_type_name) to a
    /// generic SQL type name.
    fn type_name(&self, generic: String) -> String {
        self.override_type_name(&generic)
            .map_or(generic, ToString::to_string)
    }
}

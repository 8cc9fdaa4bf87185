//! Per-backend SQL text rules: string escaping, literal rendering, and the few syntax points
//! where the supported servers disagree.

use std::fmt::Write;

use crate::translation::PlaceholderStyle;
use crate::types::{Method, RowValues};

/// SQL flavour spoken by a [`Method`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Mysql,
    /// Transact-SQL (SQL Server)
    TSql,
    Postgres,
    Sqlite,
}

impl From<Method> for Dialect {
    fn from(method: Method) -> Self {
        match method {
            Method::Mysql => Dialect::Mysql,
            Method::Mssql => Dialect::TSql,
            Method::Postgres => Dialect::Postgres,
            Method::Sqlite => Dialect::Sqlite,
        }
    }
}

impl Dialect {
    /// Quote `value` as a string literal.
    ///
    /// ```rust
    /// use sql_facade::dialect::Dialect;
    ///
    /// assert_eq!(Dialect::TSql.escape("O'Brien"), "'O''Brien'");
    /// assert_eq!(Dialect::Mysql.escape("O'Brien"), r"'O\'Brien'");
    /// ```
    #[must_use]
    pub fn escape(self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        match self {
            Dialect::Mysql => {
                // Same set of characters as mysql_real_escape_string.
                for ch in value.chars() {
                    match ch {
                        '\0' => out.push_str("\\0"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '"' => out.push_str("\\\""),
                        '\x1a' => out.push_str("\\Z"),
                        other => out.push(other),
                    }
                }
            }
            Dialect::TSql | Dialect::Postgres | Dialect::Sqlite => {
                for ch in value.chars() {
                    if ch == '\'' {
                        out.push('\'');
                    }
                    out.push(ch);
                }
            }
        }
        out.push('\'');
        out
    }

    /// Render a value as an inline SQL literal.
    ///
    /// Every non-NULL value goes through [`Dialect::escape`], so numbers come out quoted
    /// (`'1'`); the servers coerce them back on comparison.
    #[must_use]
    pub fn literal(self, value: &RowValues) -> String {
        match value {
            RowValues::Null => "NULL".to_string(),
            RowValues::Blob(bytes) => self.blob_literal(bytes),
            other => {
                let text = other.to_text().unwrap_or_default();
                self.escape(&text)
            }
        }
    }

    fn blob_literal(self, bytes: &[u8]) -> String {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for b in bytes {
            let _ = write!(hex, "{b:02X}");
        }
        match self {
            Dialect::Mysql | Dialect::Sqlite => format!("X'{hex}'"),
            Dialect::TSql => format!("0x{hex}"),
            Dialect::Postgres => format!("'\\x{hex}'::bytea"),
        }
    }

    /// Column attribute that makes a column generate its own values.
    #[must_use]
    pub fn auto_increment(self) -> &'static str {
        match self {
            Dialect::Mysql => "AUTO_INCREMENT",
            Dialect::TSql => "IDENTITY(1,1)",
            Dialect::Postgres => "GENERATED BY DEFAULT AS IDENTITY",
            Dialect::Sqlite => "AUTOINCREMENT",
        }
    }

    /// Whether `CREATE TABLE IF NOT EXISTS` is accepted as written.
    #[must_use]
    pub fn supports_if_not_exists(self) -> bool {
        !matches!(self, Dialect::TSql)
    }

    /// Whether row limits go right after the verb (`SELECT TOP n`) rather than at the end.
    #[must_use]
    pub fn uses_top(self) -> bool {
        matches!(self, Dialect::TSql)
    }

    /// Whether UPDATE and DELETE accept a row limit.
    #[must_use]
    pub fn supports_dml_limit(self) -> bool {
        matches!(self, Dialect::Mysql | Dialect::TSql)
    }

    #[must_use]
    pub fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Dialect::Mysql => PlaceholderStyle::Mysql,
            Dialect::TSql => PlaceholderStyle::Mssql,
            Dialect::Postgres => PlaceholderStyle::Postgres,
            Dialect::Sqlite => PlaceholderStyle::Sqlite,
        }
    }

    /// Catalog query listing the tables of the current database, one `TABLE_NAME` per row.
    #[must_use]
    pub fn tables_query(self) -> &'static str {
        match self {
            Dialect::Mysql => {
                "SELECT DISTINCT TABLE_NAME FROM information_schema.TABLES WHERE TABLE_SCHEMA = DATABASE()"
            }
            Dialect::TSql => "SELECT DISTINCT TABLE_NAME FROM information_schema.TABLES",
            Dialect::Postgres => {
                "SELECT DISTINCT table_name AS \"TABLE_NAME\" FROM information_schema.tables WHERE table_schema = current_schema()"
            }
            Dialect::Sqlite => {
                "SELECT name AS TABLE_NAME FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn mysql_escape_matches_real_escape_string() {
        assert_eq!(
            Dialect::Mysql.escape("a'b\"c\\d\ne\rf\0g\x1a"),
            r#"'a\'b\"c\\d\ne\rf\0g\Z'"#
        );
    }

    #[test]
    fn quote_doubling_dialects() {
        for dialect in [Dialect::TSql, Dialect::Postgres, Dialect::Sqlite] {
            assert_eq!(dialect.escape("it's"), "'it''s'");
            assert_eq!(dialect.escape("back\\slash"), "'back\\slash'");
        }
    }

    #[test]
    fn literals_quote_everything_but_null() {
        let d = Dialect::Sqlite;
        assert_eq!(d.literal(&RowValues::Int(1)), "'1'");
        assert_eq!(d.literal(&RowValues::Bool(true)), "'1'");
        assert_eq!(d.literal(&RowValues::Float(2.5)), "'2.5'");
        assert_eq!(d.literal(&RowValues::Null), "NULL");
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(13, 4, 5)
            .unwrap();
        assert_eq!(d.literal(&RowValues::Timestamp(ts)), "'2024-05-01 13:04:05'");
    }

    #[test]
    fn blob_literals_per_dialect() {
        let blob = RowValues::Blob(vec![0xDE, 0xAD]);
        assert_eq!(Dialect::Mysql.literal(&blob), "X'DEAD'");
        assert_eq!(Dialect::TSql.literal(&blob), "0xDEAD");
        assert_eq!(Dialect::Postgres.literal(&blob), "'\\xDEAD'::bytea");
    }

    #[test]
    fn method_maps_to_dialect() {
        assert_eq!(Dialect::from(Method::Mssql), Dialect::TSql);
        assert_eq!(Dialect::from(Method::Mysql), Dialect::Mysql);
    }
}

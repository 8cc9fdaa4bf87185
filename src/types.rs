use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::SqlFacadeError;

/// Values that can be stored in a database row or used as query parameters.
///
/// Reuse the same enum across backends so helper functions do not need to branch on driver
/// types:
/// ```rust
/// use sql_facade::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Render the value as plain text, the form fed to a dialect's escape function.
    ///
    /// Returns `None` for `Null` and for blobs, which have no text form.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            RowValues::Int(i) => Some(i.to_string()),
            RowValues::Float(f) => Some(f.to_string()),
            RowValues::Text(s) => Some(s.clone()),
            RowValues::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            RowValues::Timestamp(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            RowValues::JSON(value) => Some(value.to_string()),
            RowValues::Null | RowValues::Blob(_) => None,
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

impl From<JsonValue> for RowValues {
    fn from(value: JsonValue) -> Self {
        RowValues::JSON(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// The driver method a [`Database`](crate::Database) talks through.
///
/// Parsing is case-insensitive and accepts the historical driver names, so configuration written
/// for `mysqli`, `sqlsrv`, or `pdo_mysql` keeps working:
/// ```rust
/// use sql_facade::prelude::*;
///
/// assert_eq!("mysqli".parse::<Method>().unwrap(), Method::Mysql);
/// assert_eq!("PDO_SQLSRV".parse::<Method>().unwrap(), Method::Mssql);
/// assert!("oracle".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Method {
    /// MySQL / MariaDB
    #[value(aliases = ["mysqli", "pdo_mysql"])]
    Mysql,
    /// SQL Server
    #[value(aliases = ["sqlsrv", "pdo_mssql", "pdo_sqlsrv", "pdo_dblib"])]
    Mssql,
    /// `PostgreSQL`
    #[value(aliases = ["postgresql", "pgsql", "pdo_pgsql"])]
    Postgres,
    /// `SQLite`
    #[value(aliases = ["sqlite3", "pdo_sqlite"])]
    Sqlite,
}

impl Method {
    /// True for the SQL Server family, whose statements use T-SQL.
    #[must_use]
    pub fn is_mssql_type(self) -> bool {
        matches!(self, Method::Mssql)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Mysql => "mysql",
            Method::Mssql => "mssql",
            Method::Postgres => "postgres",
            Method::Sqlite => "sqlite",
        }
    }

    /// Port used when the configuration leaves it unset. `SQLite` has none.
    #[must_use]
    pub fn default_port(self) -> Option<u16> {
        match self {
            Method::Mysql => Some(3306),
            Method::Mssql => Some(1433),
            Method::Postgres => Some(5432),
            Method::Sqlite => None,
        }
    }
}

impl FromStr for Method {
    type Err = SqlFacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mysqli" | "pdo_mysql" => Ok(Method::Mysql),
            "mssql" | "sqlsrv" | "pdo_mssql" | "pdo_sqlsrv" | "pdo_dblib" => Ok(Method::Mssql),
            "postgres" | "postgresql" | "pgsql" | "pdo_pgsql" => Ok(Method::Postgres),
            "sqlite" | "sqlite3" | "pdo_sqlite" => Ok(Method::Sqlite),
            other => Err(SqlFacadeError::ConfigError(format!(
                "Unsupported method: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = SqlFacadeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The conversion "mode".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionMode {
    /// When the converted parameters will be used in a query (SELECT)
    Query,
    /// When the converted parameters will be used for statement execution (INSERT/UPDATE/etc.)
    Execute,
}

/// Convert a slice of `RowValues` into database-specific parameters.
/// This trait provides a unified interface for converting generic `RowValues`
/// to database-specific parameter types.
pub trait ParamConverter<'a> {
    type Converted;

    /// Convert a slice of `RowValues` into the backend's parameter type.
    ///
    /// # Errors
    ///
    /// Returns `SqlFacadeError` if the conversion fails for any parameter.
    fn convert_sql_params(
        params: &'a [RowValues],
        mode: ConversionMode,
    ) -> Result<Self::Converted, SqlFacadeError>;

    /// Check if this converter supports the given mode
    #[must_use]
    fn supports_mode(_mode: ConversionMode) -> bool {
        true // By default, support both modes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_aliases_cover_legacy_driver_names() {
        for name in ["mysqli", "mysql", "pdo_mysql"] {
            assert_eq!(name.parse::<Method>().unwrap(), Method::Mysql);
        }
        for name in ["mssql", "sqlsrv", "pdo_mssql", "pdo_sqlsrv"] {
            let method = name.parse::<Method>().unwrap();
            assert!(method.is_mssql_type());
        }
        assert!(matches!(
            "odbc".parse::<Method>(),
            Err(SqlFacadeError::ConfigError(_))
        ));
    }

    #[test]
    fn method_deserializes_from_alias() {
        let method: Method = serde_json::from_str("\"sqlsrv\"").unwrap();
        assert_eq!(method, Method::Mssql);
        assert_eq!(serde_json::to_string(&Method::Postgres).unwrap(), "\"postgres\"");
    }

    #[test]
    fn text_form_of_values() {
        assert_eq!(RowValues::Int(1).to_text().as_deref(), Some("1"));
        assert_eq!(RowValues::Bool(false).to_text().as_deref(), Some("0"));
        assert_eq!(RowValues::Null.to_text(), None);
        assert_eq!(RowValues::from(Some("x")), RowValues::Text("x".into()));
        assert_eq!(RowValues::from(None::<i64>), RowValues::Null);
    }
}

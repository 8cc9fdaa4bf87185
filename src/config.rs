use std::fmt;

use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::SqlFacadeError;
use crate::types::Method;

/// Everything needed to reach one database.
///
/// Missing fields take their defaults when deserializing, so a minimal config is enough:
/// ```rust
/// use sql_facade::prelude::*;
///
/// let cfg: DatabaseConfig =
///     serde_json::from_str(r#"{ "method": "sqlite3", "database": ":memory:" }"#).unwrap();
/// assert_eq!(cfg.method, Method::Sqlite);
/// assert!(cfg.translate_placeholders);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    /// Database name, or for SQLite the file path (`:memory:` allowed).
    pub database: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub method: Method,
    /// Falls back to [`Method::default_port`] when unset.
    pub port: Option<u16>,
    /// SQL Server named instance, resolved through SQL Browser.
    pub instance_name: Option<String>,
    /// Rewrite `?`, `?N`, and `$N` placeholders into the backend's style in `prepared`.
    pub translate_placeholders: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            database: String::new(),
            username: String::new(),
            password: String::new(),
            method: Method::Mysql,
            port: None,
            instance_name: None,
            translate_placeholders: true,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("method", &self.method)
            .field("port", &self.port)
            .field("instance_name", &self.instance_name)
            .field("translate_placeholders", &self.translate_placeholders)
            .finish()
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn builder(method: Method) -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::new(method)
    }

    /// Configured port, or the method's default.
    #[must_use]
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or_else(|| self.method.default_port())
    }

    /// Check that the fields the method needs are present.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ConfigError` naming the first missing field.
    pub fn validate(&self) -> Result<(), SqlFacadeError> {
        if self.database.trim().is_empty() {
            let what = if self.method == Method::Sqlite {
                "database path is required for sqlite (use :memory: for an in-memory database)"
            } else {
                "database is required"
            };
            return Err(SqlFacadeError::ConfigError(what.to_string()));
        }
        if self.method != Method::Sqlite && self.host.trim().is_empty() {
            return Err(SqlFacadeError::ConfigError(format!(
                "host is required for {}",
                self.method
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`DatabaseConfig`].
#[derive(Debug, Clone)]
pub struct DatabaseConfigBuilder {
    opts: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            opts: DatabaseConfig {
                method,
                ..DatabaseConfig::default()
            },
        }
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.opts.host = host.into();
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.opts.database = database.into();
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.opts.username = username.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = password.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: Option<u16>) -> Self {
        self.opts.port = port;
        self
    }

    #[must_use]
    pub fn instance_name(mut self, instance_name: Option<String>) -> Self {
        self.opts.instance_name = instance_name;
        self
    }

    #[must_use]
    pub fn translation(mut self, translate_placeholders: bool) -> Self {
        self.opts.translate_placeholders = translate_placeholders;
        self
    }

    #[must_use]
    pub fn finish(self) -> DatabaseConfig {
        self.opts
    }

    /// Build the config and open a [`Database`] on it.
    ///
    /// # Errors
    ///
    /// Returns `SqlFacadeError` if validation or connecting fails.
    pub async fn connect(self) -> Result<Database, SqlFacadeError> {
        Database::open(self.finish()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let cfg = DatabaseConfig::builder(Method::Mssql)
            .host("db")
            .database("app")
            .password("hunter2")
            .finish();
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn validation_per_method() {
        let sqlite = DatabaseConfig::builder(Method::Sqlite).host("").finish();
        assert!(matches!(sqlite.validate(), Err(SqlFacadeError::ConfigError(_))));
        let sqlite = DatabaseConfig::builder(Method::Sqlite).host("").database(":memory:").finish();
        assert!(sqlite.validate().is_ok());

        let pg = DatabaseConfig::builder(Method::Postgres).host(" ").database("app").finish();
        assert!(pg.validate().is_err());
    }

    #[test]
    fn ports_default_by_method() {
        let cfg = DatabaseConfig::builder(Method::Mssql).finish();
        assert_eq!(cfg.effective_port(), Some(1433));
        let cfg = DatabaseConfig::builder(Method::Mysql).port(Some(3307)).finish();
        assert_eq!(cfg.effective_port(), Some(3307));
    }
}

//! The [`Database`] facade: one connection, one method, plus logs of what happened on it.

use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::connection::Connection;
use crate::dialect::Dialect;
use crate::error::SqlFacadeError;
use crate::query::{LoggedError, QueryAndParams};
use crate::results::QueryOutcome;
use crate::statement;
use crate::status::Status;
use crate::types::Method;

mod crud;
mod query;

/// A single database connection chosen by [`Method`], with query and error logs.
///
/// Every operation records its outcome in [`get_status`](Database::get_status), and failures are
/// appended to [`get_errors`](Database::get_errors) as well as returned:
/// ```rust,no_run
/// use sql_facade::prelude::*;
///
/// # async fn demo() -> Result<(), SqlFacadeError> {
/// let mut db = DatabaseConfig::builder(Method::Sqlite)
///     .database(":memory:")
///     .connect()
///     .await?;
/// db.query("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)").await?;
/// let id = db.insert("t", &[("name", "alice".into())]).await?.insert_id();
/// assert_eq!(id, Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Database {
    config: DatabaseConfig,
    conn: Option<Connection>,
    queries: Vec<QueryAndParams>,
    errors: Vec<LoggedError>,
    status: Status,
    last: Option<QueryOutcome>,
}

impl Database {
    /// A facade for `config` that has not connected yet.
    #[must_use]
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            conn: None,
            queries: Vec::new(),
            errors: Vec::new(),
            status: Status::NotConnected,
            last: None,
        }
    }

    /// Create the facade and connect right away.
    ///
    /// # Errors
    /// Returns the validation or connection error.
    pub async fn open(config: DatabaseConfig) -> Result<Self, SqlFacadeError> {
        let mut db = Self::new(config);
        db.connect().await?;
        Ok(db)
    }

    /// Open the configured backend. Does nothing when already connected.
    ///
    /// # Errors
    /// Returns `ConfigError` for an incomplete config, `DriverUnavailable` when the method's
    /// backend is not compiled in, or the backend's connect error.
    pub async fn connect(&mut self) -> Result<(), SqlFacadeError> {
        if self.conn.is_some() {
            return Ok(());
        }
        if let Err(err) = self.config.validate() {
            return Err(self.record(err, None));
        }

        match Connection::open(&self.config).await {
            Ok(conn) => {
                info!(
                    method = %self.config.method,
                    host = %self.config.host,
                    database = %self.config.database,
                    "connected"
                );
                self.conn = Some(conn);
                self.status = Status::Success;
                Ok(())
            }
            Err(err) => {
                let status = match err.status() {
                    Status::QueryFailed => Status::ConnectionFailed,
                    other => other,
                };
                self.log_error(status, err.to_string(), None);
                self.status = status;
                Err(err)
            }
        }
    }

    /// Close the connection. Closing a facade that is not connected is a no-op.
    ///
    /// # Errors
    /// Returns the backend's error from shutting down; the connection is gone either way.
    pub async fn close(&mut self) -> Result<(), SqlFacadeError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        let method = conn.method();
        let closed = conn.close().await;
        info!(%method, "disconnected");
        self.status = Status::NotConnected;
        closed.map_err(|err| self.record(err, None))
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.config.method
    }

    #[must_use]
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// SQL flavour used by the builders and [`escape`](Database::escape).
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        Dialect::from(self.config.method)
    }

    #[must_use]
    pub fn is_mssql_type(&self) -> bool {
        self.config.method.is_mssql_type()
    }

    /// Quote `value` as a string literal for this database. Needs no connection.
    #[must_use]
    pub fn escape(&self, value: &str) -> String {
        self.dialect().escape(value)
    }

    /// Outcome of the last statement that succeeded, cleared when a statement fails.
    #[must_use]
    pub fn get_results(&self) -> Option<&QueryOutcome> {
        self.last.as_ref()
    }

    /// Every statement issued, in order.
    #[must_use]
    pub fn get_queries(&self) -> &[QueryAndParams] {
        &self.queries
    }

    #[must_use]
    pub fn get_errors(&self) -> &[LoggedError] {
        &self.errors
    }

    #[must_use]
    pub fn get_status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_select(&self, sql: &str) -> bool {
        statement::is_select(sql)
    }

    #[must_use]
    pub fn is_insert(&self, sql: &str) -> bool {
        statement::is_insert(sql)
    }

    #[must_use]
    pub fn is_update(&self, sql: &str) -> bool {
        statement::is_update(sql)
    }

    #[must_use]
    pub fn is_delete(&self, sql: &str) -> bool {
        statement::is_delete(sql)
    }

    /// Log `err`, make its status current, and hand it back for returning.
    fn record(&mut self, err: SqlFacadeError, sql: Option<&str>) -> SqlFacadeError {
        let status = err.status();
        self.log_error(status, err.to_string(), sql);
        self.status = status;
        err
    }

    fn log_error(&mut self, status: Status, message: String, sql: Option<&str>) {
        warn!(code = status.code(), %message, sql = sql.unwrap_or_default(), "database error");
        self.errors.push(LoggedError {
            status,
            message,
            sql: sql.map(str::to_owned),
        });
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            debug!(method = %conn.method(), "releasing connection on drop");
        }
    }
}

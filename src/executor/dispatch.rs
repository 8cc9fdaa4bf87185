use tracing::debug;

use super::ExecSummary;
use crate::connection::Connection;
use crate::error::SqlFacadeError;
use crate::results::ResultSet;
use crate::statement::StatementKind;
use crate::types::RowValues;

#[cfg(feature = "mssql")]
use crate::mssql;
#[cfg(feature = "mysql")]
use crate::mysql;
#[cfg(feature = "postgres")]
use crate::postgres;
#[cfg(feature = "sqlite")]
use crate::sqlite;

impl Connection {
    /// Run a row-returning statement by delegating to the backend module.
    ///
    /// # Errors
    /// Returns an error if the backend cannot run the statement or decode its rows.
    pub async fn fetch(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlFacadeError> {
        match self {
            #[cfg(feature = "mysql")]
            Connection::Mysql(conn) => mysql::execute_select(conn, query, params).await,
            #[cfg(feature = "mssql")]
            Connection::Mssql(conn) => mssql::execute_select(conn, query, params).await,
            #[cfg(feature = "postgres")]
            Connection::Postgres(conn) => postgres::execute_select(conn, query, params).await,
            #[cfg(feature = "sqlite")]
            Connection::Sqlite(conn) => sqlite::execute_select(conn, query, params).await,
        }
    }

    /// Run a statement without result rows by delegating to the backend module.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the statement.
    pub async fn execute(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ExecSummary, SqlFacadeError> {
        let kind = StatementKind::classify(query);
        match self {
            #[cfg(feature = "mysql")]
            Connection::Mysql(conn) => mysql::execute_dml(conn, query, params, kind).await,
            #[cfg(feature = "mssql")]
            Connection::Mssql(conn) => mssql::execute_dml(conn, query, params, kind).await,
            #[cfg(feature = "postgres")]
            Connection::Postgres(conn) => postgres::execute_dml(conn, query, params, kind).await,
            #[cfg(feature = "sqlite")]
            Connection::Sqlite(conn) => sqlite::execute_dml(conn, query, params, kind).await,
        }
    }

    /// Shut the connection down, consuming it.
    ///
    /// # Errors
    /// Returns an error if the backend's goodbye fails; the handle is released either way.
    pub async fn close(self) -> Result<(), SqlFacadeError> {
        let method = self.method();
        match self {
            #[cfg(feature = "mysql")]
            Connection::Mysql(conn) => conn.close().await?,
            #[cfg(feature = "mssql")]
            Connection::Mssql(conn) => conn.close().await?,
            #[cfg(feature = "postgres")]
            Connection::Postgres(conn) => conn.close().await,
            #[cfg(feature = "sqlite")]
            Connection::Sqlite(conn) => drop(conn),
        }
        debug!(%method, "connection closed");
        Ok(())
    }
}

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::spawn_blocking;

use crate::error::SqlFacadeError;
use crate::executor::ExecSummary;
use crate::results::ResultSet;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// A single rusqlite connection driven from async code.
///
/// Every call hops onto the blocking pool and locks the connection for its duration.
pub struct SqliteConnection {
    conn: SharedSqliteConnection,
    path: String,
}

impl SqliteConnection {
    pub(crate) fn new(conn: rusqlite::Connection, path: String) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        }
    }

    /// Path (or `:memory:`) the connection was opened on.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run one or more statements with no parameters and no result rows.
    pub async fn execute_batch(&self, query: &str) -> Result<(), SqlFacadeError> {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            guard.execute_batch(&sql_owned)?;
            Ok(())
        })
        .await
    }

    /// Prepare `query` and hand the statement to `builder` to materialize rows.
    pub async fn execute_select<F>(
        &self,
        query: &str,
        params: Vec<rusqlite::types::Value>,
        builder: F,
    ) -> Result<ResultSet, SqlFacadeError>
    where
        F: FnOnce(
                &mut rusqlite::Statement<'_>,
                &[rusqlite::types::Value],
            ) -> Result<ResultSet, SqlFacadeError>
            + Send
            + 'static,
    {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            builder(&mut stmt, &params)
        })
        .await
    }

    /// Execute a single statement, reporting rows changed and the last inserted rowid.
    pub async fn execute_dml(
        &self,
        query: &str,
        params: Vec<rusqlite::types::Value>,
    ) -> Result<ExecSummary, SqlFacadeError> {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            let rows_affected = stmt.execute(rusqlite::params_from_iter(params.iter()))?;
            drop(stmt);
            Ok(ExecSummary {
                rows_affected,
                last_insert_id: Some(guard.last_insert_rowid()),
            })
        })
        .await
    }

    fn conn_handle(&self) -> SharedSqliteConnection {
        Arc::clone(&self.conn)
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, SqlFacadeError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlFacadeError> + Send + 'static,
    R: Send + 'static,
{
    spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| SqlFacadeError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}

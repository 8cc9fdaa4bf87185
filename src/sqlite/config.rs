use tokio::task::spawn_blocking;

use super::connection::SqliteConnection;
use crate::config::DatabaseConfig;
use crate::error::SqlFacadeError;

const MEMORY: &str = ":memory:";

/// Open the SQLite database named by `config.database` (a file path or `:memory:`).
///
/// File databases are switched to WAL journaling.
///
/// # Errors
/// Returns `SqlFacadeError::DatabaseNotSelected` if the file cannot be opened.
pub async fn open(config: &DatabaseConfig) -> Result<SqliteConnection, SqlFacadeError> {
    let path = config.database.trim().to_string();
    let open_path = path.clone();

    let conn = spawn_blocking(move || -> Result<rusqlite::Connection, SqlFacadeError> {
        let conn = if open_path == MEMORY {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(&open_path)
        }
        .map_err(|e| {
            SqlFacadeError::DatabaseNotSelected(format!("cannot open {open_path}: {e}"))
        })?;
        if open_path != MEMORY {
            // journal_mode hands back a row, so it goes through query_row
            let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        Ok(conn)
    })
    .await
    .map_err(|e| SqlFacadeError::ConnectionError(format!("sqlite open join error: {e}")))??;

    Ok(SqliteConnection::new(conn, path))
}

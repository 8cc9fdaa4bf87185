use std::fmt;

use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlDatabaseError};

use crate::config::DatabaseConfig;
use crate::error::SqlFacadeError;

/// `ER_BAD_DB_ERROR`: unknown database.
const ER_BAD_DB_ERROR: u16 = 1049;

/// One live MySQL session.
pub struct MysqlConnection {
    pub(crate) conn: MySqlConnection,
}

impl MysqlConnection {
    /// Send `COM_QUIT` and close the socket.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::MysqlError` if the goodbye fails.
    pub async fn close(self) -> Result<(), SqlFacadeError> {
        self.conn.close().await?;
        Ok(())
    }
}

impl fmt::Debug for MysqlConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConnection").finish_non_exhaustive()
    }
}

/// Connect with the host, credentials, port, and database from `config`.
///
/// # Errors
/// Returns `SqlFacadeError::DatabaseNotSelected` for an unknown database,
/// `SqlFacadeError::ConnectionError` for any other failure.
pub async fn connect(config: &DatabaseConfig) -> Result<MysqlConnection, SqlFacadeError> {
    let mut opts = MySqlConnectOptions::new()
        .host(&config.host)
        .username(&config.username)
        .database(&config.database);
    if let Some(port) = config.effective_port() {
        opts = opts.port(port);
    }
    if !config.password.is_empty() {
        opts = opts.password(&config.password);
    }

    let conn = MySqlConnection::connect_with(&opts).await.map_err(|e| {
        let unknown_db = e
            .as_database_error()
            .and_then(|db| db.try_downcast_ref::<MySqlDatabaseError>())
            .is_some_and(|db| db.number() == ER_BAD_DB_ERROR);
        if unknown_db {
            SqlFacadeError::DatabaseNotSelected(format!("{}: {e}", config.database))
        } else {
            SqlFacadeError::ConnectionError(format!("Failed to connect to MySQL: {e}"))
        }
    })?;

    Ok(MysqlConnection { conn })
}

use std::fmt;

use tokio::task::JoinHandle;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls};
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::error::SqlFacadeError;

/// A `tokio_postgres` client plus the task driving its socket.
pub struct PostgresConnection {
    pub(crate) client: Client,
    driver: JoinHandle<()>,
}

impl PostgresConnection {
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Drop the client and wait for the connection task to wind down.
    pub async fn close(self) {
        drop(self.client);
        if let Err(e) = self.driver.await {
            warn!(error = %e, "postgres connection task did not shut down cleanly");
        }
    }
}

impl fmt::Debug for PostgresConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConnection")
            .field("closed", &self.client.is_closed())
            .finish_non_exhaustive()
    }
}

/// Connect to PostgreSQL without TLS and spawn the connection task on the current runtime.
///
/// # Errors
/// Returns `SqlFacadeError::DatabaseNotSelected` when the server reports an unknown database,
/// `SqlFacadeError::ConnectionError` for any other failure.
pub async fn connect(config: &DatabaseConfig) -> Result<PostgresConnection, SqlFacadeError> {
    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host)
        .dbname(&config.database)
        .user(&config.username);
    if let Some(port) = config.effective_port() {
        pg.port(port);
    }
    if !config.password.is_empty() {
        pg.password(&config.password);
    }

    let (client, connection) = pg.connect(NoTls).await.map_err(|e| {
        if e.code() == Some(&SqlState::INVALID_CATALOG_NAME) {
            SqlFacadeError::DatabaseNotSelected(format!("{}: {e}", config.database))
        } else {
            SqlFacadeError::ConnectionError(format!("Failed to connect to Postgres: {e}"))
        }
    })?;

    let driver = tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!(error = %e, "postgres connection closed with an error");
        }
    });

    Ok(PostgresConnection { client, driver })
}

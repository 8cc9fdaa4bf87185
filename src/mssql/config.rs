use std::fmt;

use tiberius::Client;
use tokio::net::TcpStream;
use tokio_util::compat::Compat;

use super::client::create_mssql_client;
use crate::config::DatabaseConfig;
use crate::error::SqlFacadeError;

/// Type alias for SQL Server client
pub type MssqlClient = Client<Compat<TcpStream>>;

/// One live SQL Server session.
pub struct MssqlConnection {
    pub(crate) client: MssqlClient,
}

impl MssqlConnection {
    /// Log out and close the socket.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::MssqlError` if the server rejects the shutdown.
    pub async fn close(self) -> Result<(), SqlFacadeError> {
        self.client.close().await?;
        Ok(())
    }
}

impl fmt::Debug for MssqlConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MssqlConnection").finish_non_exhaustive()
    }
}

/// Connect using the host, credentials, port, and instance name from `config`.
///
/// # Errors
/// Propagates the errors of [`create_mssql_client`].
pub async fn connect(config: &DatabaseConfig) -> Result<MssqlConnection, SqlFacadeError> {
    let client = create_mssql_client(
        &config.host,
        &config.database,
        &config.username,
        &config.password,
        config.effective_port(),
        config.instance_name.as_deref(),
    )
    .await?;
    Ok(MssqlConnection { client })
}

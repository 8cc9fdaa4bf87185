use tiberius::{AuthMethod, Client, Config, SqlBrowser};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncWriteCompatExt;

use super::config::MssqlClient;
use crate::error::SqlFacadeError;

/// Error number SQL Server sends when the login's database cannot be opened.
const CANNOT_OPEN_DATABASE: u32 = 4060;

/// Open a new SQL Server connection.
///
/// A named instance is located through the SQL Browser service; otherwise the TCP port is used
/// directly.
///
/// # Errors
/// Returns `SqlFacadeError::DatabaseNotSelected` when the server refuses the database,
/// `SqlFacadeError::ConnectionError` for any other failure.
pub async fn create_mssql_client(
    server: &str,
    database: &str,
    user: &str,
    password: &str,
    port: Option<u16>,
    instance_name: Option<&str>,
) -> Result<MssqlClient, SqlFacadeError> {
    let mut config = Config::new();
    config.host(server);
    config.database(database);
    config.authentication(AuthMethod::sql_server(user, password));
    config.port(port.unwrap_or(1433));
    if let Some(instance) = instance_name {
        config.instance_name(instance);
    }
    config.trust_cert();

    let tcp = if instance_name.is_some() {
        TcpStream::connect_named(&config).await.map_err(|e| {
            SqlFacadeError::ConnectionError(format!("SQL Browser lookup failed: {e}"))
        })?
    } else {
        TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| SqlFacadeError::ConnectionError(format!("TCP connection error: {e}")))?
    };
    tcp.set_nodelay(true)
        .map_err(|e| SqlFacadeError::ConnectionError(format!("TCP setup error: {e}")))?;

    Client::connect(config, tcp.compat_write())
        .await
        .map_err(|e| match &e {
            tiberius::error::Error::Server(token) if token.code() == CANNOT_OPEN_DATABASE => {
                SqlFacadeError::DatabaseNotSelected(format!("{database}: {e}"))
            }
            _ => SqlFacadeError::ConnectionError(format!("SQL Server connection error: {e}")),
        })
}

use crate::config::DatabaseConfig;
use crate::error::SqlFacadeError;
use crate::types::Method;

#[cfg(feature = "mssql")]
use crate::mssql::MssqlConnection;
#[cfg(feature = "mysql")]
use crate::mysql::MysqlConnection;
#[cfg(feature = "postgres")]
use crate::postgres::PostgresConnection;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteConnection;

/// The live handle of whichever backend the configured method selected.
pub enum Connection {
    #[cfg(feature = "mysql")]
    Mysql(MysqlConnection),
    #[cfg(feature = "mssql")]
    Mssql(MssqlConnection),
    #[cfg(feature = "postgres")]
    Postgres(PostgresConnection),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteConnection),
}

// Manual Debug so driver handles never print credentials or socket internals
impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "mysql")]
            Self::Mysql(conn) => f.debug_tuple("Mysql").field(conn).finish(),
            #[cfg(feature = "mssql")]
            Self::Mssql(conn) => f.debug_tuple("Mssql").field(conn).finish(),
            #[cfg(feature = "postgres")]
            Self::Postgres(conn) => f.debug_tuple("Postgres").field(conn).finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(conn) => f.debug_tuple("Sqlite").field(conn).finish(),
        }
    }
}

impl Connection {
    /// Open a connection for `config.method`.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::DriverUnavailable` when the method's backend is not compiled in,
    /// otherwise whatever the backend reports while connecting.
    pub async fn open(config: &DatabaseConfig) -> Result<Connection, SqlFacadeError> {
        match config.method {
            #[cfg(feature = "mysql")]
            Method::Mysql => Ok(Connection::Mysql(crate::mysql::connect(config).await?)),
            #[cfg(feature = "mssql")]
            Method::Mssql => Ok(Connection::Mssql(crate::mssql::connect(config).await?)),
            #[cfg(feature = "postgres")]
            Method::Postgres => Ok(Connection::Postgres(crate::postgres::connect(config).await?)),
            #[cfg(feature = "sqlite")]
            Method::Sqlite => Ok(Connection::Sqlite(crate::sqlite::open(config).await?)),
            #[allow(unreachable_patterns)]
            other => Err(SqlFacadeError::DriverUnavailable(format!(
                "{other} support is not compiled in (enable the `{other}` feature)"
            ))),
        }
    }

    /// The method this connection speaks.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            #[cfg(feature = "mysql")]
            Self::Mysql(_) => Method::Mysql,
            #[cfg(feature = "mssql")]
            Self::Mssql(_) => Method::Mssql,
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => Method::Postgres,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => Method::Sqlite,
        }
    }
}

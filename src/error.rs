use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;
#[cfg(feature = "mysql")]
use sqlx;
#[cfg(feature = "mssql")]
use tiberius;
#[cfg(feature = "postgres")]
use tokio_postgres;

use crate::status::Status;

#[derive(Debug, Error)]
pub enum SqlFacadeError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "mssql")]
    #[error(transparent)]
    MssqlError(#[from] tiberius::error::Error),

    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MysqlError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Could not select database: {0}")]
    DatabaseNotSelected(String),

    #[error("Not connected to a database server")]
    NotConnected,

    #[error("No query provided")]
    EmptyQuery,

    #[error("Driver unavailable: {0}")]
    DriverUnavailable(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("Other database error: {0}")]
    Other(String),
}

impl SqlFacadeError {
    /// The status code recorded when this error ends an operation.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::ConfigError(_) | Self::ConnectionError(_) => Status::ConnectionFailed,
            Self::DatabaseNotSelected(_) => Status::DatabaseNotSelected,
            Self::NotConnected => Status::NotConnected,
            Self::EmptyQuery => Status::EmptyQuery,
            Self::DriverUnavailable(_) => Status::DriverUnavailable,
            Self::InvalidStatement(_) => Status::InvalidStatement,
            _ => Status::QueryFailed,
        }
    }
}

//! One facade for connecting, querying, escaping, and CRUD statement building across MySQL,
//! SQL Server, PostgreSQL, and SQLite.
//!
//! ```rust,no_run
//! use sql_facade::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlFacadeError> {
//! let config: DatabaseConfig = serde_json::from_str(
//!     r#"{ "method": "pgsql", "host": "localhost", "database": "app", "username": "app" }"#,
//! )
//! .map_err(|e| SqlFacadeError::ConfigError(e.to_string()))?;
//! let mut db = Database::open(config).await?;
//!
//! let users = db
//!     .select("users", &Conditions::new().eq("active", true), "id, name")
//!     .await?;
//! println!("{} active users", users.rows().map_or(0, ResultSet::len));
//! db.close().await?;
//! # Ok(())
//! # }
//! ```

mod adapters;

pub mod config;
pub mod connection;
pub mod conversion;
pub mod database;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod query;
pub mod query_builder;
pub mod results;
pub mod statement;
pub mod status;
pub mod translation;
pub mod types;

#[cfg(feature = "mssql")]
pub mod mssql;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::{DatabaseConfig, DatabaseConfigBuilder};
pub use connection::Connection;
pub use database::Database;
pub use dialect::Dialect;
pub use error::SqlFacadeError;
pub use executor::ExecSummary;
pub use query::{LoggedError, QueryAndParams};
pub use results::{CustomDbRow, QueryOutcome, ResultSet};
pub use status::Status;
pub use types::{ConversionMode, Method, ParamConverter, RowValues};

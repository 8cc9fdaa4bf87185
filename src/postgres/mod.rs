// PostgreSQL backend over a single tokio-postgres client.

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{PostgresConnection, connect};
pub use executor::{execute_dml, execute_select};
pub use params::Params;
pub use query::{build_result_set_from_statement, postgres_extract_value};

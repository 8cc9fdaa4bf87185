// SQL Server backend over a single tiberius client.
//
// - client: raw TCP + TDS connection setup
// - config: connection wrapper and config-driven connect
// - params: RowValues -> tiberius parameters
// - query: result extraction and building
// - executor: statement execution

pub mod client;
pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use client::create_mssql_client;
pub use config::{MssqlClient, MssqlConnection, connect};
pub use executor::{execute_dml, execute_select};
pub use params::Params;
pub use query::build_result_set;

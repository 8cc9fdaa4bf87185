// MySQL / MariaDB backend over a single sqlx connection.

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{MysqlConnection, connect};
pub use executor::{execute_dml, execute_select};
pub use params::Params;
pub use query::build_result_set;

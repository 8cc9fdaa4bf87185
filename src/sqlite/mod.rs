// SQLite backend over a single rusqlite connection.
//
// - config: opening the database file
// - connection: async wrapper that runs rusqlite calls on the blocking pool
// - params: RowValues -> rusqlite values
// - query: result extraction and building
// - executor: statement execution

pub mod config;
pub mod connection;
pub mod executor;
pub mod params;
pub mod query;

pub use config::open;
pub use connection::SqliteConnection;
pub use executor::{execute_dml, execute_select};
pub use params::Params;
pub use query::build_result_set;

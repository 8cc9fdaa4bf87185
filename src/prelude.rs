//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::config::{DatabaseConfig, DatabaseConfigBuilder};
pub use crate::database::Database;
pub use crate::dialect::Dialect;
pub use crate::error::SqlFacadeError;
pub use crate::query::{LoggedError, QueryAndParams};
pub use crate::query_builder::{ColumnDef, Conditions, Conjunction, SortOrder};
pub use crate::results::{CustomDbRow, QueryOutcome, ResultSet};
pub use crate::statement::{StatementKind, is_delete, is_insert, is_select, is_update};
pub use crate::status::Status;
pub use crate::translation::{PlaceholderStyle, translate_placeholders};
pub use crate::types::{ConversionMode, Method, RowValues};

pub use crate::conversion::convert_sql_params;

use std::fmt;

use serde::Serialize;

use crate::status::Status;
use crate::types::RowValues;

/// A SQL string and its bound parameters bundled together.
///
/// Every statement a [`Database`](crate::Database) issues is recorded in this form:
/// ```rust
/// use sql_facade::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "INSERT INTO t (id, name) VALUES (?1, ?2)",
///     vec![RowValues::Int(1), RowValues::Text("alice".into())],
/// );
/// assert_eq!(qp.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters bound to the query
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }
}

/// One entry of a [`Database`](crate::Database)'s error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedError {
    pub status: Status,
    /// Driver message, or the status message when there is none.
    pub message: String,
    /// The statement that failed, if the failure belonged to one.
    pub sql: Option<String>,
}

impl fmt::Display for LoggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.code(), self.message)?;
        if let Some(sql) = &self.sql {
            write!(f, " ({sql})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_error_display_includes_code_and_sql() {
        let entry = LoggedError {
            status: Status::QueryFailed,
            message: "no such table: nope".to_string(),
            sql: Some("SELECT * FROM nope".to_string()),
        };
        assert_eq!(
            entry.to_string(),
            "[4] no such table: nope (SELECT * FROM nope)"
        );
    }
}

use super::ResultSet;
use crate::types::RowValues;

/// Normalized result of running one statement.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The statement produced rows (SELECT, or DML with `RETURNING` / `OUTPUT INSERTED`).
    Rows(ResultSet),
    /// An INSERT without a row-returning clause.
    Inserted {
        /// Identity generated by the insert, when the backend reports one.
        id: Option<i64>,
        rows_affected: usize,
    },
    /// Any other statement.
    Affected(usize),
}

impl QueryOutcome {
    #[must_use]
    pub fn rows(&self) -> Option<&ResultSet> {
        match self {
            QueryOutcome::Rows(rs) => Some(rs),
            _ => None,
        }
    }

    /// The generated identity of an insert.
    ///
    /// For inserts that returned rows, the first column of the first row is used, which is what
    /// `OUTPUT INSERTED.id` and `RETURNING id` produce.
    #[must_use]
    pub fn insert_id(&self) -> Option<i64> {
        match self {
            QueryOutcome::Inserted { id, .. } => *id,
            QueryOutcome::Rows(rs) => rs
                .results
                .first()
                .and_then(|row| row.get_by_index(0))
                .and_then(RowValues::as_int)
                .copied(),
            QueryOutcome::Affected(_) => None,
        }
    }

    #[must_use]
    pub fn rows_affected(&self) -> usize {
        match self {
            QueryOutcome::Rows(rs) => rs.rows_affected,
            QueryOutcome::Inserted { rows_affected, .. } => *rows_affected,
            QueryOutcome::Affected(n) => *n,
        }
    }
}

use tracing::debug;

use super::Database;
use crate::connection::Connection;
use crate::dialect::Dialect;
use crate::error::SqlFacadeError;
use crate::query::QueryAndParams;
use crate::results::QueryOutcome;
use crate::statement::{is_insert, returns_rows};
use crate::status::Status;
use crate::translation::translate_placeholders;
use crate::types::RowValues;

impl Database {
    /// Run a SQL string as written.
    ///
    /// Statements that return rows give [`QueryOutcome::Rows`]; an empty row set is still `Ok`
    /// but leaves the status at [`Status::NoResults`]. Inserts give
    /// [`QueryOutcome::Inserted`] with the backend's generated id, anything else
    /// [`QueryOutcome::Affected`].
    ///
    /// # Errors
    /// `EmptyQuery` for blank SQL, `NotConnected` without a connection, or the driver's error.
    pub async fn query(&mut self, sql: &str) -> Result<&QueryOutcome, SqlFacadeError> {
        self.run(sql, Vec::new()).await
    }

    /// Run a parameterized statement.
    ///
    /// Placeholders may be written as `?`, `?N`, or `$N`; unless translation is turned off in the
    /// config they are rewritten into the backend's own style first.
    ///
    /// # Errors
    /// As [`query`](Database::query), plus `ParameterError` when a placeholder has no value.
    pub async fn prepared(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let style = self.dialect().placeholder_style();
        let translated = translate_placeholders(sql, style, self.config.translate_placeholders);
        let arranged = match translated.arrange(params) {
            Ok(arranged) => arranged.into_owned(),
            Err(err) => return Err(self.record(err, Some(sql))),
        };
        let sql = translated.sql.into_owned();
        self.run(&sql, arranged).await
    }

    pub(super) async fn run(
        &mut self,
        sql: &str,
        params: Vec<RowValues>,
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        self.last = None;
        if sql.trim().is_empty() {
            return Err(self.record(SqlFacadeError::EmptyQuery, None));
        }
        if self.conn.is_none() {
            return Err(self.record(SqlFacadeError::NotConnected, Some(sql)));
        }

        debug!(method = %self.config.method, sql, params = params.len(), "issuing statement");
        self.queries.push(QueryAndParams::new(sql, params.clone()));

        let dialect = self.dialect();
        let result = match self.conn.as_mut() {
            Some(conn) => dispatch(conn, dialect, sql, &params).await,
            None => Err(SqlFacadeError::NotConnected),
        };

        match result {
            Ok(outcome) => {
                if matches!(&outcome, QueryOutcome::Rows(rows) if rows.is_empty()) {
                    self.log_error(Status::NoResults, Status::NoResults.message().to_string(), Some(sql));
                    self.status = Status::NoResults;
                } else {
                    self.status = Status::Success;
                }
                Ok(self.last.insert(outcome))
            }
            Err(err) => Err(self.record(err, Some(sql))),
        }
    }
}

async fn dispatch(
    conn: &mut Connection,
    dialect: Dialect,
    sql: &str,
    params: &[RowValues],
) -> Result<QueryOutcome, SqlFacadeError> {
    if returns_rows(sql, dialect) {
        return conn.fetch(sql, params).await.map(QueryOutcome::Rows);
    }
    let summary = conn.execute(sql, params).await?;
    Ok(if is_insert(sql) {
        QueryOutcome::Inserted {
            id: summary.last_insert_id,
            rows_affected: summary.rows_affected,
        }
    } else {
        QueryOutcome::Affected(summary.rows_affected)
    })
}

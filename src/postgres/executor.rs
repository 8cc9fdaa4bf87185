use super::config::PostgresConnection;
use super::params::Params;
use super::query::build_result_set_from_statement;
use crate::conversion::convert_sql_params;
use crate::error::SqlFacadeError;
use crate::executor::ExecSummary;
use crate::results::ResultSet;
use crate::statement::StatementKind;
use crate::types::{ConversionMode, RowValues};

/// Prepare and run a row-returning statement.
///
/// # Errors
/// Returns errors from preparation, parameter binding, or result set building.
pub async fn execute_select(
    conn: &PostgresConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlFacadeError> {
    let stmt = conn.client.prepare(query).await?;
    let converted = convert_sql_params::<Params>(params, ConversionMode::Query)?;
    let rows = conn.client.query(&stmt, converted.as_refs()).await?;
    build_result_set_from_statement(&stmt, &rows)
}

/// Run a statement that returns no rows.
///
/// Postgres has no session-wide last insert id; inserts that need one use `RETURNING`.
///
/// # Errors
/// Returns errors from parameter conversion or execution.
pub async fn execute_dml(
    conn: &PostgresConnection,
    query: &str,
    params: &[RowValues],
    kind: StatementKind,
) -> Result<ExecSummary, SqlFacadeError> {
    if params.is_empty() && kind == StatementKind::Other {
        conn.client.batch_execute(query).await?;
        return Ok(ExecSummary::default());
    }
    let converted = convert_sql_params::<Params>(params, ConversionMode::Execute)?;
    let rows = conn.client.execute(query, converted.as_refs()).await?;
    let rows_affected = usize::try_from(rows).map_err(|e| {
        SqlFacadeError::ExecutionError(format!("postgres affected rows conversion error: {e}"))
    })?;
    Ok(ExecSummary {
        rows_affected,
        last_insert_id: None,
    })
}

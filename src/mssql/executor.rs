use super::config::MssqlConnection;
use super::params::Params;
use super::query::{build_result_set, last_identity};
use crate::conversion::convert_sql_params;
use crate::error::SqlFacadeError;
use crate::executor::ExecSummary;
use crate::results::ResultSet;
use crate::statement::StatementKind;
use crate::types::{ConversionMode, RowValues};

/// Run a row-returning statement (SELECT, or DML with `OUTPUT INSERTED.`).
///
/// # Errors
///
/// Returns `SqlFacadeError` if execution or result processing fails.
pub async fn execute_select(
    conn: &mut MssqlConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlFacadeError> {
    build_result_set(&mut conn.client, query, params).await
}

/// Run a statement that returns no rows.
///
/// Inserts follow up with `@@IDENTITY` to report the generated key.
///
/// # Errors
///
/// Returns `SqlFacadeError` if execution fails or rows affected cannot be converted.
pub async fn execute_dml(
    conn: &mut MssqlConnection,
    query: &str,
    params: &[RowValues],
    kind: StatementKind,
) -> Result<ExecSummary, SqlFacadeError> {
    let converted = convert_sql_params::<Params>(params, ConversionMode::Execute)?;
    let exec_result = conn.client.execute(query, converted.as_refs()).await?;
    let rows_affected: u64 = exec_result.rows_affected().iter().sum();
    let rows_affected = usize::try_from(rows_affected).map_err(|e| {
        SqlFacadeError::ExecutionError(format!("Invalid rows affected count: {e}"))
    })?;

    let last_insert_id = if kind == StatementKind::Insert {
        last_identity(&mut conn.client).await?
    } else {
        None
    };

    Ok(ExecSummary {
        rows_affected,
        last_insert_id,
    })
}

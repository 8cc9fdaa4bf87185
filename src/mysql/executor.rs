use sqlx::Executor;

use super::config::MysqlConnection;
use super::params::Params;
use super::query::build_result_set;
use crate::conversion::convert_sql_params;
use crate::error::SqlFacadeError;
use crate::executor::ExecSummary;
use crate::results::ResultSet;
use crate::statement::StatementKind;
use crate::types::{ConversionMode, RowValues};

/// Run a row-returning statement.
///
/// # Errors
///
/// Returns `SqlFacadeError` if execution or result processing fails.
pub async fn execute_select(
    conn: &mut MysqlConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlFacadeError> {
    build_result_set(conn, query, params).await
}

/// Run a statement that returns no rows.
///
/// Parameterless statements that are not DML use the text protocol, which accepts statements
/// the prepared-statement protocol refuses. The insert id comes from the OK packet; zero means
/// no AUTO_INCREMENT value was generated.
///
/// # Errors
///
/// Returns `SqlFacadeError` if execution fails.
pub async fn execute_dml(
    conn: &mut MysqlConnection,
    query: &str,
    params: &[RowValues],
    kind: StatementKind,
) -> Result<ExecSummary, SqlFacadeError> {
    let result = if params.is_empty() && kind == StatementKind::Other {
        (&mut conn.conn).execute(query).await?
    } else {
        let args = convert_sql_params::<Params>(params, ConversionMode::Execute)?.into_arguments();
        sqlx::query_with(query, args).execute(&mut conn.conn).await?
    };

    let rows_affected = usize::try_from(result.rows_affected()).map_err(|e| {
        SqlFacadeError::ExecutionError(format!("mysql affected rows conversion error: {e}"))
    })?;
    let last_insert_id = match (kind, result.last_insert_id()) {
        (StatementKind::Insert, id) if id > 0 => i64::try_from(id).ok(),
        _ => None,
    };

    Ok(ExecSummary {
        rows_affected,
        last_insert_id,
    })
}

use crate::conversion::convert_sql_params;
use crate::error::SqlFacadeError;
use crate::executor::ExecSummary;
use crate::results::ResultSet;
use crate::statement::StatementKind;
use crate::types::{ConversionMode, RowValues};

use super::connection::SqliteConnection;
use super::params::Params;
use super::query::build_result_set;

/// Run a row-returning statement in `SQLite`.
///
/// # Errors
///
/// Returns `SqlFacadeError` if execution or result processing fails.
pub async fn execute_select(
    sqlite_client: &SqliteConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlFacadeError> {
    let params_owned = convert_sql_params::<Params>(params, ConversionMode::Query)?.into_values();
    sqlite_client
        .execute_select(query, params_owned, build_result_set)
        .await
}

/// Run a statement that returns no rows.
///
/// Parameterless statements that are not DML go through `execute_batch`, so DDL scripts with
/// several statements work; they report no affected rows.
///
/// # Errors
///
/// Returns `SqlFacadeError` if execution fails.
pub async fn execute_dml(
    sqlite_client: &SqliteConnection,
    query: &str,
    params: &[RowValues],
    kind: StatementKind,
) -> Result<ExecSummary, SqlFacadeError> {
    if params.is_empty() && kind == StatementKind::Other {
        sqlite_client.execute_batch(query).await?;
        return Ok(ExecSummary::default());
    }
    let params_owned = convert_sql_params::<Params>(params, ConversionMode::Execute)?.into_values();
    let mut summary = sqlite_client.execute_dml(query, params_owned).await?;
    if kind != StatementKind::Insert {
        summary.last_insert_id = None;
    }
    Ok(summary)
}

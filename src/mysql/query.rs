use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Executor, Row, Statement, TypeInfo, ValueRef};

use super::config::MysqlConnection;
use super::params::Params;
use crate::adapters::result_set::init_result_set;
use crate::conversion::convert_sql_params;
use crate::error::SqlFacadeError;
use crate::results::ResultSet;
use crate::types::{ConversionMode, RowValues};

/// Run a row-returning statement and collect every row.
///
/// The statement is prepared first so an empty result still carries its column names.
///
/// # Errors
/// Returns `SqlFacadeError` if preparation, execution, or decoding fails.
pub async fn build_result_set(
    conn: &mut MysqlConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlFacadeError> {
    let args = convert_sql_params::<Params>(params, ConversionMode::Query)?.into_arguments();
    let stmt = (&mut conn.conn).prepare(query).await?;
    let column_names: Vec<String> = stmt
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let col_count = column_names.len();

    let rows = sqlx::query_with(query, args).fetch_all(&mut conn.conn).await?;
    let mut result_set = init_result_set(column_names, rows.len());
    for row in &rows {
        let mut row_values = Vec::with_capacity(col_count);
        for idx in 0..col_count {
            row_values.push(mysql_extract_value(row, idx)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Decode one column by its declared MySQL type.
///
/// `DECIMAL` arrives as text on the wire and becomes a float when it parses as one.
///
/// # Errors
/// Returns `SqlFacadeError::MysqlError` if the value cannot be decoded.
pub fn mysql_extract_value(row: &MySqlRow, idx: usize) -> Result<RowValues, SqlFacadeError> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(RowValues::Null);
    }
    let type_name = raw.type_info().name().to_ascii_uppercase();

    let value = match type_name.as_str() {
        "BOOLEAN" => RowValues::Bool(row.try_get::<bool, _>(idx)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            RowValues::Int(row.try_get::<i64, _>(idx)?)
        }
        name if name.ends_with("UNSIGNED") => {
            let v = row.try_get::<u64, _>(idx)?;
            i64::try_from(v).map_or_else(|_| RowValues::Text(v.to_string()), RowValues::Int)
        }
        "FLOAT" => RowValues::Float(f64::from(row.try_get::<f32, _>(idx)?)),
        "DOUBLE" => RowValues::Float(row.try_get::<f64, _>(idx)?),
        "DECIMAL" => {
            let text = row.try_get_unchecked::<String, _>(idx)?;
            text.parse::<f64>()
                .map_or(RowValues::Text(text), RowValues::Float)
        }
        "DATETIME" | "TIMESTAMP" => RowValues::Timestamp(row.try_get::<NaiveDateTime, _>(idx)?),
        "DATE" => RowValues::Timestamp(row.try_get::<NaiveDate, _>(idx)?.and_time(NaiveTime::MIN)),
        "TIME" => RowValues::Text(
            row.try_get::<NaiveTime, _>(idx)?
                .format("%H:%M:%S%.f")
                .to_string(),
        ),
        "JSON" => RowValues::JSON(row.try_get::<JsonValue, _>(idx)?),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => RowValues::Blob(row.try_get::<Vec<u8>, _>(idx)?),
        _ => RowValues::Text(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}

use futures_util::TryStreamExt;
use tiberius::numeric::Numeric;
use tiberius::time::chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tiberius::{ColumnType, Row};

use super::config::MssqlClient;
use super::params::Params;
use crate::adapters::result_set::init_result_set;
use crate::conversion::convert_sql_params;
use crate::error::SqlFacadeError;
use crate::results::ResultSet;
use crate::types::{ConversionMode, RowValues};

/// Run a row-returning statement and stream its first result set into a [`ResultSet`].
///
/// # Errors
/// Returns `SqlFacadeError` if execution or value extraction fails.
pub async fn build_result_set(
    client: &mut MssqlClient,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlFacadeError> {
    let converted = convert_sql_params::<Params>(params, ConversionMode::Query)?;
    let mut stream = client.query(query, converted.as_refs()).await?;

    let column_names: Vec<String> = stream
        .columns()
        .await?
        .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    let col_count = column_names.len();

    let mut result_set = init_result_set(column_names, 0);
    let mut rows = stream.into_row_stream();
    while let Some(row) = rows.try_next().await? {
        // later result sets are drained but not collected
        if row.result_index() > 0 {
            continue;
        }
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(extract_value(&row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Read the session's last identity value, if any insert produced one.
///
/// # Errors
/// Returns `SqlFacadeError::MssqlError` if the lookup fails.
pub async fn last_identity(client: &mut MssqlClient) -> Result<Option<i64>, SqlFacadeError> {
    let row = client
        .simple_query("SELECT CAST(@@IDENTITY AS BIGINT)")
        .await?
        .into_row()
        .await?;
    match row {
        Some(row) => Ok(row.try_get::<i64, _>(0)?),
        None => Ok(None),
    }
}

/// Extract a value from a row at a specific index.
///
/// Nullable integer and float columns arrive as `Intn` / `Floatn` without a fixed width, so
/// those fall through to trying each width in turn.
fn extract_value(row: &Row, idx: usize) -> Result<RowValues, SqlFacadeError> {
    let value = match row.columns()[idx].column_type() {
        ColumnType::Null => None,
        ColumnType::Bit | ColumnType::Bitn => row.try_get::<bool, _>(idx)?.map(RowValues::Bool),
        ColumnType::Int1 => row
            .try_get::<u8, _>(idx)?
            .map(|v| RowValues::Int(i64::from(v))),
        ColumnType::Int2 => row
            .try_get::<i16, _>(idx)?
            .map(|v| RowValues::Int(i64::from(v))),
        ColumnType::Int4 => row
            .try_get::<i32, _>(idx)?
            .map(|v| RowValues::Int(i64::from(v))),
        ColumnType::Int8 => row.try_get::<i64, _>(idx)?.map(RowValues::Int),
        ColumnType::Float4 => row
            .try_get::<f32, _>(idx)?
            .map(|v| RowValues::Float(f64::from(v))),
        ColumnType::Float8 | ColumnType::Money | ColumnType::Money4 => {
            row.try_get::<f64, _>(idx)?.map(RowValues::Float)
        }
        ColumnType::Decimaln | ColumnType::Numericn => {
            row.try_get::<Numeric, _>(idx)?.map(|v| {
                let text = v.to_string();
                text.parse::<f64>()
                    .map_or(RowValues::Text(text), RowValues::Float)
            })
        }
        ColumnType::Datetime
        | ColumnType::Datetime4
        | ColumnType::Datetime2
        | ColumnType::Datetimen => row
            .try_get::<NaiveDateTime, _>(idx)?
            .map(RowValues::Timestamp),
        ColumnType::Daten => row
            .try_get::<NaiveDate, _>(idx)?
            .map(|v| RowValues::Timestamp(v.and_time(NaiveTime::MIN))),
        ColumnType::Timen => row
            .try_get::<NaiveTime, _>(idx)?
            .map(|v| RowValues::Text(v.format("%H:%M:%S%.f").to_string())),
        ColumnType::DatetimeOffsetn => row
            .try_get::<DateTime<FixedOffset>, _>(idx)?
            .map(|v| RowValues::Timestamp(v.naive_utc())),
        ColumnType::Guid => row
            .try_get::<tiberius::Uuid, _>(idx)?
            .map(|v| RowValues::Text(v.to_string())),
        ColumnType::BigVarBin | ColumnType::BigBinary | ColumnType::Image => row
            .try_get::<&[u8], _>(idx)?
            .map(|v| RowValues::Blob(v.to_vec())),
        ColumnType::BigVarChar
        | ColumnType::BigChar
        | ColumnType::NVarchar
        | ColumnType::NChar
        | ColumnType::Text
        | ColumnType::NText
        | ColumnType::Xml => row
            .try_get::<&str, _>(idx)?
            .map(|v| RowValues::Text(v.to_string())),
        _ => sized_number(row, idx),
    };
    Ok(value.unwrap_or(RowValues::Null))
}

/// `Intn` / `Floatn` and anything else without a fixed layout.
fn sized_number(row: &Row, idx: usize) -> Option<RowValues> {
    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return v.map(RowValues::Int);
    }
    if let Ok(v) = row.try_get::<i32, _>(idx) {
        return v.map(|v| RowValues::Int(i64::from(v)));
    }
    if let Ok(v) = row.try_get::<i16, _>(idx) {
        return v.map(|v| RowValues::Int(i64::from(v)));
    }
    if let Ok(v) = row.try_get::<u8, _>(idx) {
        return v.map(|v| RowValues::Int(i64::from(v)));
    }
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return v.map(RowValues::Float);
    }
    if let Ok(v) = row.try_get::<f32, _>(idx) {
        return v.map(|v| RowValues::Float(f64::from(v)));
    }
    row.try_get::<&str, _>(idx)
        .ok()
        .flatten()
        .map(|v| RowValues::Text(v.to_string()))
}

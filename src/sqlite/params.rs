use rusqlite::types::Value;

use crate::error::SqlFacadeError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Convert a single `RowValues` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Owned SQLite parameters, ready to move onto the blocking pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert row values into `SQLite` values.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other backends' converters.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlFacadeError> {
        Ok(Params(params.iter().map(row_value_to_sqlite_value).collect()))
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl ParamConverter<'_> for Params {
    type Converted = Params;

    fn convert_sql_params(
        params: &[RowValues],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, SqlFacadeError> {
        Self::convert(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn booleans_and_timestamps_become_sqlite_affinities() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let params = Params::convert(&[
            RowValues::Bool(true),
            RowValues::Timestamp(ts),
            RowValues::JSON(serde_json::json!({"a": 1})),
        ])
        .unwrap();
        assert_eq!(
            params.into_values(),
            vec![
                Value::Integer(1),
                Value::Text("2024-01-02 03:04:05".into()),
                Value::Text("{\"a\":1}".into()),
            ]
        );
    }
}

//! Parameter conversion into each backend's native form.

use crate::error::SqlFacadeError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Convert a slice of `RowValues` into a backend's parameter container.
///
/// # Errors
///
/// Returns `SqlFacadeError::ParameterError` if the converter does not support `mode`, or
/// whatever error the converter reports for an individual value.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "sqlite")] {
/// use sql_facade::prelude::*;
/// use sql_facade::conversion::convert_sql_params;
/// use sql_facade::sqlite::Params as SqliteParams;
///
/// let values = [RowValues::Int(1), RowValues::Bool(true)];
/// let params = convert_sql_params::<SqliteParams>(&values, ConversionMode::Execute).unwrap();
/// assert_eq!(params.0.len(), 2);
/// # }
/// ```
pub fn convert_sql_params<'a, T: ParamConverter<'a>>(
    params: &'a [RowValues],
    mode: ConversionMode,
) -> Result<T::Converted, SqlFacadeError> {
    if !T::supports_mode(mode) {
        return Err(SqlFacadeError::ParameterError(format!(
            "Converter doesn't support mode: {mode:?}"
        )));
    }
    T::convert_sql_params(params, mode)
}

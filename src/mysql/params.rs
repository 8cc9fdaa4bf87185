use sqlx::Arguments;
use sqlx::mysql::MySqlArguments;

use crate::error::SqlFacadeError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Encoded MySQL arguments for the positional `?` placeholders.
#[derive(Default)]
pub struct Params(pub(crate) MySqlArguments);

impl Params {
    /// Encode each `RowValues` in order.
    ///
    /// # Errors
    ///
    /// Returns `SqlFacadeError::ParameterError` if a value cannot be encoded.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlFacadeError> {
        let mut args = MySqlArguments::default();
        for (i, param) in params.iter().enumerate() {
            let added = match param {
                RowValues::Int(v) => args.add(*v),
                RowValues::Float(v) => args.add(*v),
                RowValues::Text(v) => args.add(v.clone()),
                RowValues::Bool(v) => args.add(*v),
                RowValues::Timestamp(v) => args.add(*v),
                RowValues::Null => args.add(None::<String>),
                RowValues::JSON(v) => args.add(v.clone()),
                RowValues::Blob(v) => args.add(v.clone()),
            };
            added.map_err(|e| {
                SqlFacadeError::ParameterError(format!("cannot encode parameter {}: {e}", i + 1))
            })?;
        }
        Ok(Params(args))
    }

    #[must_use]
    pub fn into_arguments(self) -> MySqlArguments {
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

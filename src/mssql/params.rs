use std::borrow::Cow;

use tiberius::{ColumnData, ToSql};

use crate::error::SqlFacadeError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Borrowed SQL Server parameters, bound as `@P1..@Pn`.
pub struct Params<'a> {
    pub(crate) references: Vec<&'a dyn ToSql>,
}

impl<'a> Params<'a> {
    /// Borrow each `RowValues` as a SQL Server parameter.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other backends' converters.
    pub fn convert(params: &'a [RowValues]) -> Result<Params<'a>, SqlFacadeError> {
        let references = params.iter().map(|p| p as &dyn ToSql).collect();
        Ok(Params { references })
    }

    #[must_use]
    pub fn as_refs(&self) -> &[&dyn ToSql] {
        &self.references
    }
}

impl<'a> ParamConverter<'a> for Params<'a> {
    type Converted = Params<'a>;

    fn convert_sql_params(
        params: &'a [RowValues],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, SqlFacadeError> {
        Self::convert(params)
    }
}

impl ToSql for RowValues {
    fn to_sql(&self) -> ColumnData<'_> {
        match self {
            RowValues::Int(i) => ColumnData::I64(Some(*i)),
            RowValues::Float(f) => ColumnData::F64(Some(*f)),
            RowValues::Text(s) => ColumnData::String(Some(Cow::from(s.as_str()))),
            RowValues::Bool(b) => ColumnData::Bit(Some(*b)),
            RowValues::Timestamp(dt) => dt.to_sql(),
            RowValues::Null => ColumnData::String(None),
            RowValues::JSON(jsval) => ColumnData::String(Some(Cow::from(jsval.to_string()))),
            RowValues::Blob(bytes) => ColumnData::Binary(Some(Cow::from(bytes.as_slice()))),
        }
    }
}

use std::error::Error;

use bytes::BytesMut;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType, to_sql_checked};

use crate::error::SqlFacadeError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Borrowed Postgres parameters.
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    /// Borrow each `RowValues` as a Postgres parameter.
    ///
    /// # Errors
    ///
    /// Never fails; type mismatches surface when the statement binds.
    pub fn convert(params: &'a [RowValues]) -> Result<Params<'a>, SqlFacadeError> {
        let references = params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Ok(Params { references })
    }

    #[must_use]
    pub fn as_refs(&self) -> &[&(dyn ToSql + Sync)] {
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

/// Binds according to the parameter type the server inferred, so `Int` fits `int2`/`int4`
/// columns and `Timestamp` fits `timestamptz` and `date`.
///
/// A value is only written in a type's wire format when it converts without loss; any other
/// pairing is refused with `WrongType` rather than sending another type's bytes.
impl ToSql for RowValues {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            RowValues::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*i)?.to_sql(ty, out),
                Type::INT8 => i.to_sql(ty, out),
                #[allow(clippy::cast_precision_loss)]
                Type::FLOAT4 => (*i as f32).to_sql(ty, out),
                #[allow(clippy::cast_precision_loss)]
                Type::FLOAT8 => (*i as f64).to_sql(ty, out),
                Type::BOOL => match *i {
                    0 => false.to_sql(ty, out),
                    1 => true.to_sql(ty, out),
                    other => Err(format!("integer {other} is not a boolean").into()),
                },
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    i.to_string().to_sql(ty, out)
                }
                _ => Err(wrong_type(ty)),
            },
            RowValues::Float(f) => match *ty {
                #[allow(clippy::cast_possible_truncation)]
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                Type::FLOAT8 => f.to_sql(ty, out),
                Type::INT2 | Type::INT4 | Type::INT8 => match integral(*f) {
                    Some(i) => RowValues::Int(i).to_sql(ty, out),
                    None => Err(format!("{f} does not fit an integer parameter").into()),
                },
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    f.to_string().to_sql(ty, out)
                }
                _ => Err(wrong_type(ty)),
            },
            RowValues::Text(s) => match *ty {
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => s.to_sql(ty, out),
                Type::JSON | Type::JSONB => {
                    serde_json::from_str::<serde_json::Value>(s)?.to_sql(ty, out)
                }
                Type::INT2 | Type::INT4 | Type::INT8 => {
                    RowValues::Int(s.trim().parse()?).to_sql(ty, out)
                }
                Type::FLOAT4 | Type::FLOAT8 => RowValues::Float(s.trim().parse()?).to_sql(ty, out),
                Type::BOOL => s.trim().parse::<bool>()?.to_sql(ty, out),
                _ => Err(wrong_type(ty)),
            },
            RowValues::Bool(b) => match *ty {
                Type::BOOL => b.to_sql(ty, out),
                Type::INT2 | Type::INT4 | Type::INT8 => RowValues::Int(i64::from(*b)).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    b.to_string().to_sql(ty, out)
                }
                _ => Err(wrong_type(ty)),
            },
            RowValues::Timestamp(dt) => match *ty {
                Type::TIMESTAMP => dt.to_sql(ty, out),
                Type::TIMESTAMPTZ => dt.and_utc().to_sql(ty, out),
                Type::DATE => dt.date().to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    dt.format("%Y-%m-%d %H:%M:%S%.f").to_string().to_sql(ty, out)
                }
                _ => Err(wrong_type(ty)),
            },
            RowValues::Null => Ok(IsNull::Yes),
            RowValues::JSON(jsval) => match *ty {
                Type::JSON | Type::JSONB => jsval.to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    jsval.to_string().to_sql(ty, out)
                }
                _ => Err(wrong_type(ty)),
            },
            RowValues::Blob(bytes) => match *ty {
                Type::BYTEA => bytes.to_sql(ty, out),
                _ => Err(wrong_type(ty)),
            },
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::BOOL
                | Type::TIMESTAMP
                | Type::TIMESTAMPTZ
                | Type::DATE
                | Type::JSON
                | Type::JSONB
                | Type::BYTEA
        )
    }

    to_sql_checked!();
}

fn wrong_type(ty: &Type) -> Box<dyn Error + Sync + Send> {
    Box::new(WrongType::new::<RowValues>(ty.clone()))
}

/// `f` as an `i64` when it is a whole number in range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then_some(f as i64)
}

//! SQL text builders for the CRUD helpers on [`Database`](crate::Database).
//!
//! Values are inlined as escaped literals through [`Dialect::literal`]; identifiers are
//! validated, never escaped, so anything that is not a plain (optionally dotted or quoted) name is
//! rejected.

use std::fmt::Write;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::Dialect;
use crate::error::SqlFacadeError;
use crate::types::RowValues;

mod create;
mod dml;
mod select;

pub use create::{ColumnDef, build_create};
pub use dml::{build_delete, build_insert, build_update};
pub use select::build_select;

static MYSQL_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| identifier_pattern("`[^`]+`"));
static TSQL_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| identifier_pattern(r#"\[[^\]]+\]|"[^"]+""#));
static POSTGRES_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| identifier_pattern(r#""[^"]+""#));
static SQLITE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| identifier_pattern(r#"\[[^\]]+\]|`[^`]+`|"[^"]+""#));

/// Plain names, or names in the given quoted forms, optionally dotted.
fn identifier_pattern(quoted: &str) -> Regex {
    let part = format!(r"(?:[A-Za-z_][A-Za-z0-9_$]*|{quoted})");
    Regex::new(&format!(r"^{part}(?:\.{part})*$")).expect("identifier pattern is valid")
}

/// Reject anything but a plain or dotted identifier, or one quoted the way `dialect` quotes
/// names: backticks for MySQL, brackets or double quotes for SQL Server, double quotes for
/// PostgreSQL, and any of the three for SQLite.
pub(crate) fn check_identifier<'a>(
    dialect: Dialect,
    kind: &str,
    name: &'a str,
) -> Result<&'a str, SqlFacadeError> {
    let pattern = match dialect {
        Dialect::Mysql => &MYSQL_IDENTIFIER,
        Dialect::TSql => &TSQL_IDENTIFIER,
        Dialect::Postgres => &POSTGRES_IDENTIFIER,
        Dialect::Sqlite => &SQLITE_IDENTIFIER,
    };
    if pattern.is_match(name) {
        Ok(name)
    } else {
        Err(SqlFacadeError::InvalidStatement(format!(
            "invalid {kind} name for {dialect:?}: {name:?}"
        )))
    }
}

/// Binary comparison used in a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
}

impl Comparison {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::NotEq => "<>",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Like => "LIKE",
            Comparison::NotLike => "NOT LIKE",
        }
    }
}

impl FromStr for Comparison {
    type Err = SqlFacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "=" | "==" => Ok(Comparison::Eq),
            "<>" | "!=" => Ok(Comparison::NotEq),
            "<" => Ok(Comparison::Lt),
            "<=" => Ok(Comparison::Lte),
            ">" => Ok(Comparison::Gt),
            ">=" => Ok(Comparison::Gte),
            "LIKE" => Ok(Comparison::Like),
            "NOT LIKE" => Ok(Comparison::NotLike),
            other => Err(SqlFacadeError::InvalidStatement(format!(
                "unknown operator: {other}"
            ))),
        }
    }
}

/// Test applied to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare(Comparison, RowValues),
    In(Vec<RowValues>),
    NotIn(Vec<RowValues>),
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub predicate: Predicate,
}

/// How conditions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// WHERE / ORDER BY / LIMIT parts shared by select, update, and delete.
///
/// ```rust
/// use sql_facade::dialect::Dialect;
/// use sql_facade::query_builder::{Conditions, build_select};
///
/// let sql = build_select(Dialect::Mysql, "users", &Conditions::new().eq("id", 1), "*").unwrap();
/// assert_eq!(sql, "SELECT * FROM users WHERE id = '1'");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conditions {
    pub clauses: Vec<Condition>,
    pub conjunction: Conjunction,
    pub order_by: Vec<(String, SortOrder)>,
    pub limit: Option<u64>,
}

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comparison against a value.
    #[must_use]
    pub fn compare(
        mut self,
        column: impl Into<String>,
        comparison: Comparison,
        value: impl Into<RowValues>,
    ) -> Self {
        self.clauses.push(Condition {
            column: column.into(),
            predicate: Predicate::Compare(comparison, value.into()),
        });
        self
    }

    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::Eq, value)
    }

    #[must_use]
    pub fn not_eq(self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::NotEq, value)
    }

    #[must_use]
    pub fn lt(self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::Lt, value)
    }

    #[must_use]
    pub fn lte(self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::Lte, value)
    }

    #[must_use]
    pub fn gt(self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::Gt, value)
    }

    #[must_use]
    pub fn gte(self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::Gte, value)
    }

    #[must_use]
    pub fn like(self, column: impl Into<String>, pattern: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::Like, pattern)
    }

    #[must_use]
    pub fn not_like(self, column: impl Into<String>, pattern: impl Into<RowValues>) -> Self {
        self.compare(column, Comparison::NotLike, pattern)
    }

    #[must_use]
    pub fn in_list(mut self, column: impl Into<String>, values: Vec<RowValues>) -> Self {
        self.clauses.push(Condition {
            column: column.into(),
            predicate: Predicate::In(values),
        });
        self
    }

    #[must_use]
    pub fn not_in_list(mut self, column: impl Into<String>, values: Vec<RowValues>) -> Self {
        self.clauses.push(Condition {
            column: column.into(),
            predicate: Predicate::NotIn(values),
        });
        self
    }

    #[must_use]
    pub fn is_null(mut self, column: impl Into<String>) -> Self {
        self.clauses.push(Condition {
            column: column.into(),
            predicate: Predicate::IsNull,
        });
        self
    }

    #[must_use]
    pub fn is_not_null(mut self, column: impl Into<String>) -> Self {
        self.clauses.push(Condition {
            column: column.into(),
            predicate: Predicate::IsNotNull,
        });
        self
    }

    /// Join the conditions with OR instead of AND.
    #[must_use]
    pub fn any(mut self) -> Self {
        self.conjunction = Conjunction::Or;
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push((column.into(), order));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.order_by.is_empty() && self.limit.is_none()
    }

    /// ` WHERE ...`, or an empty string when there are no clauses.
    pub(crate) fn where_clause(&self, dialect: Dialect) -> Result<String, SqlFacadeError> {
        if self.clauses.is_empty() {
            return Ok(String::new());
        }
        let joiner = match self.conjunction {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        };
        let mut parts = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            parts.push(render_condition(dialect, clause)?);
        }
        Ok(format!(" WHERE {}", parts.join(joiner)))
    }

    /// ` ORDER BY ...`, or an empty string.
    pub(crate) fn order_clause(&self, dialect: Dialect) -> Result<String, SqlFacadeError> {
        if self.order_by.is_empty() {
            return Ok(String::new());
        }
        let mut out = String::from(" ORDER BY ");
        for (i, (column, order)) in self.order_by.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let column = check_identifier(dialect, "column", column)?;
            let dir = match order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            let _ = write!(out, "{column} {dir}");
        }
        Ok(out)
    }
}

fn render_condition(dialect: Dialect, condition: &Condition) -> Result<String, SqlFacadeError> {
    let column = check_identifier(dialect, "column", &condition.column)?;
    let rendered = match &condition.predicate {
        Predicate::Compare(Comparison::Eq, RowValues::Null) | Predicate::IsNull => {
            format!("{column} IS NULL")
        }
        Predicate::Compare(Comparison::NotEq, RowValues::Null) | Predicate::IsNotNull => {
            format!("{column} IS NOT NULL")
        }
        Predicate::Compare(comparison, value) => {
            format!("{column} {} {}", comparison.as_sql(), dialect.literal(value))
        }
        Predicate::In(values) => format!("{column} IN ({})", literal_list(dialect, column, values)?),
        Predicate::NotIn(values) => {
            format!("{column} NOT IN ({})", literal_list(dialect, column, values)?)
        }
    };
    Ok(rendered)
}

fn literal_list(
    dialect: Dialect,
    column: &str,
    values: &[RowValues],
) -> Result<String, SqlFacadeError> {
    if values.is_empty() {
        return Err(SqlFacadeError::InvalidStatement(format!(
            "empty IN list for column {column}"
        )));
    }
    Ok(values
        .iter()
        .map(|v| dialect.literal(v))
        .collect::<Vec<_>>()
        .join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_accept_plain_dotted_and_quoted_names() {
        for dialect in [Dialect::Mysql, Dialect::TSql, Dialect::Postgres, Dialect::Sqlite] {
            for ok in ["users", "dbo.users", "_t$1"] {
                assert!(check_identifier(dialect, "table", ok).is_ok(), "{ok}");
            }
            for bad in ["", "users; DROP TABLE x", "1abc", "a b", "users--", "a.", "[x"] {
                assert!(check_identifier(dialect, "table", bad).is_err(), "{bad}");
            }
        }
        assert!(check_identifier(Dialect::TSql, "table", "[order details]").is_ok());
        assert!(check_identifier(Dialect::Mysql, "table", "`select`").is_ok());
        assert!(check_identifier(Dialect::Postgres, "table", "\"Mixed Case\"").is_ok());
    }

    #[test]
    fn quoting_is_checked_against_the_dialect() {
        let accepted = |dialect, name| check_identifier(dialect, "column", name).is_ok();

        assert!(accepted(Dialect::Mysql, "`a b`"));
        assert!(!accepted(Dialect::Mysql, "[a b]"));
        assert!(!accepted(Dialect::Mysql, "\"a b\""));

        assert!(accepted(Dialect::TSql, "[dbo].[a b]"));
        assert!(accepted(Dialect::TSql, "\"a b\""));
        assert!(!accepted(Dialect::TSql, "`a b`"));

        assert!(accepted(Dialect::Postgres, "public.\"a b\""));
        assert!(!accepted(Dialect::Postgres, "[a b]"));
        assert!(!accepted(Dialect::Postgres, "`a b`"));

        for name in ["[a b]", "`a b`", "\"a b\""] {
            assert!(accepted(Dialect::Sqlite, name), "{name}");
        }

        let order = Conditions::new().order_by("[a b]", SortOrder::Asc);
        assert!(order.order_clause(Dialect::Postgres).is_err());
        assert_eq!(order.order_clause(Dialect::TSql).unwrap(), " ORDER BY [a b] ASC");
    }

    #[test]
    fn where_clause_joins_and_renders_null_tests() {
        let c = Conditions::new()
            .eq("a", 1)
            .eq("b", RowValues::Null)
            .not_eq("c", RowValues::Null)
            .like("d", "x%")
            .in_list("e", vec![RowValues::Int(1), RowValues::Int(2)]);
        assert_eq!(
            c.where_clause(Dialect::Postgres).unwrap(),
            " WHERE a = '1' AND b IS NULL AND c IS NOT NULL AND d LIKE 'x%' AND e IN ('1', '2')"
        );
        let c = Conditions::new().eq("a", 1).gt("b", 2).any();
        assert_eq!(
            c.where_clause(Dialect::Sqlite).unwrap(),
            " WHERE a = '1' OR b > '2'"
        );
    }

    #[test]
    fn empty_in_list_is_rejected() {
        let c = Conditions::new().in_list("a", vec![]);
        assert!(matches!(
            c.where_clause(Dialect::Mysql),
            Err(SqlFacadeError::InvalidStatement(_))
        ));
    }

    #[test]
    fn parses_operator_strings() {
        assert_eq!("!=".parse::<Comparison>().unwrap(), Comparison::NotEq);
        assert_eq!("not like".parse::<Comparison>().unwrap(), Comparison::NotLike);
        assert!("~~".parse::<Comparison>().is_err());
    }
}

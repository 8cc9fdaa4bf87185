use super::{Conditions, check_identifier};
use crate::dialect::Dialect;
use crate::error::SqlFacadeError;
use crate::types::RowValues;

/// Build an `UPDATE` setting each `(column, value)` pair.
///
/// # Errors
/// Returns `SqlFacadeError::InvalidStatement` when there is nothing to set, a name is invalid,
/// or the dialect cannot honour the requested limit or ordering.
pub fn build_update<S: AsRef<str>>(
    dialect: Dialect,
    table: &str,
    assignments: &[(S, RowValues)],
    conditions: &Conditions,
) -> Result<String, SqlFacadeError> {
    let table = check_identifier(dialect, "table", table)?;
    if assignments.is_empty() {
        return Err(SqlFacadeError::InvalidStatement(format!(
            "no columns to update in {table}"
        )));
    }

    let mut sets = Vec::with_capacity(assignments.len());
    for (column, value) in assignments {
        let column = check_identifier(dialect, "column", column.as_ref())?;
        sets.push(format!("{column} = {}", dialect.literal(value)));
    }

    let (top, tail) = dml_limit(dialect, conditions)?;
    Ok(format!(
        "UPDATE {top}{table} SET {}{}{tail}",
        sets.join(", "),
        conditions.where_clause(dialect)?
    ))
}

/// Build an `INSERT` of one row.
///
/// With `returning` set, the statement hands back that column of the new row (`OUTPUT INSERTED.`
/// on SQL Server, `RETURNING` on PostgreSQL and SQLite). MySQL has no such clause and relies on
/// the driver's last insert id instead.
///
/// # Errors
/// Returns `SqlFacadeError::InvalidStatement` when `values` is empty or a name is invalid.
pub fn build_insert<S: AsRef<str>>(
    dialect: Dialect,
    table: &str,
    values: &[(S, RowValues)],
    returning: Option<&str>,
) -> Result<String, SqlFacadeError> {
    let table = check_identifier(dialect, "table", table)?;
    if values.is_empty() {
        return Err(SqlFacadeError::InvalidStatement(format!(
            "no values to insert into {table}"
        )));
    }
    let returning = returning
        .map(|col| check_identifier(dialect, "column", col))
        .transpose()?;

    let mut columns = Vec::with_capacity(values.len());
    let mut literals = Vec::with_capacity(values.len());
    for (column, value) in values {
        columns.push(check_identifier(dialect, "column", column.as_ref())?);
        literals.push(dialect.literal(value));
    }

    let mut sql = format!("INSERT INTO {table} ({})", columns.join(", "));
    match (dialect, returning) {
        (Dialect::TSql, Some(col)) => {
            sql.push_str(&format!(" OUTPUT INSERTED.{col} VALUES ({})", literals.join(", ")));
        }
        (Dialect::Postgres | Dialect::Sqlite, Some(col)) => {
            sql.push_str(&format!(" VALUES ({}) RETURNING {col}", literals.join(", ")));
        }
        _ => sql.push_str(&format!(" VALUES ({})", literals.join(", "))),
    }
    Ok(sql)
}

/// Build a `DELETE`. Without conditions every row goes.
///
/// # Errors
/// Returns `SqlFacadeError::InvalidStatement` for an invalid name or an unsupported limit.
pub fn build_delete(
    dialect: Dialect,
    table: &str,
    conditions: &Conditions,
) -> Result<String, SqlFacadeError> {
    let table = check_identifier(dialect, "table", table)?;
    let (top, tail) = dml_limit(dialect, conditions)?;
    Ok(format!(
        "DELETE {top}FROM {table}{}{tail}",
        conditions.where_clause(dialect)?
    ))
}

/// Row-limit pieces for UPDATE/DELETE: a `TOP (n) ` prefix for T-SQL, or an
/// ` ORDER BY ... LIMIT n` suffix for MySQL.
fn dml_limit(
    dialect: Dialect,
    conditions: &Conditions,
) -> Result<(String, String), SqlFacadeError> {
    if !conditions.order_by.is_empty() && dialect != Dialect::Mysql {
        return Err(SqlFacadeError::InvalidStatement(format!(
            "{dialect:?} does not accept ORDER BY on UPDATE or DELETE"
        )));
    }
    match conditions.limit {
        None => Ok((String::new(), conditions.order_clause(dialect)?)),
        Some(_) if !dialect.supports_dml_limit() => Err(SqlFacadeError::InvalidStatement(
            format!("{dialect:?} does not accept a row limit on UPDATE or DELETE"),
        )),
        Some(n) if dialect.uses_top() => Ok((format!("TOP ({n}) "), String::new())),
        Some(n) => Ok((
            String::new(),
            format!("{} LIMIT {n}", conditions.order_clause(dialect)?),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sets_literals_and_nulls() {
        let sql = build_update(
            Dialect::Postgres,
            "users",
            &[("name", RowValues::from("O'Brien")), ("email", RowValues::Null)],
            &Conditions::new().eq("id", 7),
        )
        .unwrap();
        assert_eq!(
            sql,
            "UPDATE users SET name = 'O''Brien', email = NULL WHERE id = '7'"
        );
    }

    #[test]
    fn update_limits() {
        let values = [("active", RowValues::Bool(false))];
        let c = Conditions::new().eq("active", true).limit(10);
        assert_eq!(
            build_update(Dialect::Mysql, "users", &values, &c).unwrap(),
            "UPDATE users SET active = '0' WHERE active = '1' LIMIT 10"
        );
        assert_eq!(
            build_update(Dialect::TSql, "users", &values, &c).unwrap(),
            "UPDATE TOP (10) users SET active = '0' WHERE active = '1'"
        );
        assert!(build_update(Dialect::Sqlite, "users", &values, &c).is_err());
    }

    #[test]
    fn update_without_assignments_fails() {
        let empty: [(&str, RowValues); 0] = [];
        assert!(matches!(
            build_update(Dialect::Mysql, "users", &empty, &Conditions::new()),
            Err(SqlFacadeError::InvalidStatement(_))
        ));
    }

    #[test]
    fn insert_returning_per_dialect() {
        let values = [("name", RowValues::from("alice")), ("age", RowValues::Int(30))];
        assert_eq!(
            build_insert(Dialect::Mysql, "users", &values, Some("id")).unwrap(),
            "INSERT INTO users (name, age) VALUES ('alice', '30')"
        );
        assert_eq!(
            build_insert(Dialect::TSql, "users", &values, Some("id")).unwrap(),
            "INSERT INTO users (name, age) OUTPUT INSERTED.id VALUES ('alice', '30')"
        );
        assert_eq!(
            build_insert(Dialect::Postgres, "users", &values, Some("id")).unwrap(),
            "INSERT INTO users (name, age) VALUES ('alice', '30') RETURNING id"
        );
        assert_eq!(
            build_insert(Dialect::Sqlite, "users", &values, None).unwrap(),
            "INSERT INTO users (name, age) VALUES ('alice', '30')"
        );
    }

    #[test]
    fn delete_variants() {
        assert_eq!(
            build_delete(Dialect::Sqlite, "users", &Conditions::new()).unwrap(),
            "DELETE FROM users"
        );
        let c = Conditions::new()
            .lt("age", 18)
            .order_by("age", crate::query_builder::SortOrder::Asc)
            .limit(1);
        assert_eq!(
            build_delete(Dialect::Mysql, "users", &c).unwrap(),
            "DELETE FROM users WHERE age < '18' ORDER BY age ASC LIMIT 1"
        );
        assert!(build_delete(Dialect::TSql, "users", &c).is_err());
        assert_eq!(
            build_delete(Dialect::TSql, "users", &Conditions::new().limit(2)).unwrap(),
            "DELETE TOP (2) FROM users"
        );
    }
}

use super::{Conditions, check_identifier};
use crate::dialect::Dialect;
use crate::error::SqlFacadeError;

/// Build a `SELECT` over one table.
///
/// `columns` is copied verbatim; an empty or blank list selects `*`.
///
/// # Errors
/// Returns `SqlFacadeError::InvalidStatement` for an invalid table or column name, or an empty
/// `IN` list.
pub fn build_select(
    dialect: Dialect,
    table: &str,
    conditions: &Conditions,
    columns: &str,
) -> Result<String, SqlFacadeError> {
    let table = check_identifier(dialect, "table", table)?;
    let columns = match columns.trim() {
        "" => "*",
        cols => cols,
    };

    let mut sql = String::from("SELECT ");
    if let (Some(limit), true) = (conditions.limit, dialect.uses_top()) {
        sql.push_str(&format!("TOP {limit} "));
    }
    sql.push_str(columns);
    sql.push_str(" FROM ");
    sql.push_str(table);
    sql.push_str(&conditions.where_clause(dialect)?);
    sql.push_str(&conditions.order_clause(dialect)?);
    if let (Some(limit), false) = (conditions.limit, dialect.uses_top()) {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::SortOrder;

    #[test]
    fn plain_select_with_equality() {
        let sql = build_select(Dialect::Mysql, "users", &Conditions::new().eq("id", 1), "*").unwrap();
        assert_eq!(sql, "SELECT * FROM users WHERE id = '1'");
    }

    #[test]
    fn blank_columns_select_everything() {
        let sql = build_select(Dialect::Sqlite, "users", &Conditions::new(), "  ").unwrap();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn limit_placement_depends_on_dialect() {
        let c = Conditions::new()
            .gt("age", 30)
            .order_by("name", SortOrder::Desc)
            .limit(5);
        assert_eq!(
            build_select(Dialect::TSql, "dbo.users", &c, "id, name").unwrap(),
            "SELECT TOP 5 id, name FROM dbo.users WHERE age > '30' ORDER BY name DESC"
        );
        assert_eq!(
            build_select(Dialect::Postgres, "users", &c, "id, name").unwrap(),
            "SELECT id, name FROM users WHERE age > '30' ORDER BY name DESC LIMIT 5"
        );
    }

    #[test]
    fn rejects_injected_table_names() {
        let err = build_select(Dialect::Mysql, "users; DROP TABLE users", &Conditions::new(), "*")
            .unwrap_err();
        assert!(matches!(err, SqlFacadeError::InvalidStatement(_)));
    }
}

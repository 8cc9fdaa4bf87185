use super::check_identifier;
use crate::dialect::Dialect;
use crate::error::SqlFacadeError;
use crate::types::RowValues;

/// One column of a `CREATE TABLE`.
///
/// ```rust
/// use sql_facade::query_builder::ColumnDef;
///
/// let id = ColumnDef::new("id", "INTEGER").primary_key().auto_increment();
/// let name = ColumnDef::new("name", "TEXT").not_null();
/// # let _ = (id, name);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub default: Option<RowValues>,
}

impl ColumnDef {
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            primary_key: false,
            auto_increment: false,
            unique: false,
            default: None,
        }
    }

    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<RowValues>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn render(&self, dialect: Dialect, inline_key: bool) -> Result<String, SqlFacadeError> {
        let name = check_identifier(dialect, "column", &self.name)?;
        let sql_type = self.sql_type.trim();
        if sql_type.is_empty() || sql_type.contains([';', '\'']) || sql_type.contains("--") {
            return Err(SqlFacadeError::InvalidStatement(format!(
                "invalid type for column {name}: {:?}",
                self.sql_type
            )));
        }

        let mut parts = vec![format!("{name} {sql_type}")];
        if self.auto_increment && matches!(dialect, Dialect::TSql | Dialect::Postgres) {
            parts.push(dialect.auto_increment().to_string());
        }
        if !self.nullable {
            parts.push("NOT NULL".to_string());
        }
        if let (Some(default), false) = (&self.default, self.auto_increment) {
            parts.push(format!("DEFAULT {}", dialect.literal(default)));
        }
        if self.unique && !(self.primary_key && inline_key) {
            parts.push("UNIQUE".to_string());
        }
        if self.primary_key && inline_key {
            parts.push("PRIMARY KEY".to_string());
        }
        if self.auto_increment {
            match dialect {
                Dialect::Mysql => parts.push(dialect.auto_increment().to_string()),
                Dialect::Sqlite => {
                    if !(inline_key && self.primary_key && sql_type.eq_ignore_ascii_case("INTEGER"))
                    {
                        return Err(SqlFacadeError::InvalidStatement(format!(
                            "SQLite AUTOINCREMENT needs {name} to be the INTEGER PRIMARY KEY"
                        )));
                    }
                    parts.push(dialect.auto_increment().to_string());
                }
                Dialect::TSql | Dialect::Postgres => {}
            }
        }
        Ok(parts.join(" "))
    }
}

/// Build a `CREATE TABLE`.
///
/// A single primary-key column carries `PRIMARY KEY` inline; several become a table-level
/// `PRIMARY KEY (a, b)` constraint.
///
/// # Errors
/// Returns `SqlFacadeError::InvalidStatement` when `columns` is empty, a name or type is invalid,
/// or SQLite auto-increment is asked of anything but an `INTEGER PRIMARY KEY`.
pub fn build_create(
    dialect: Dialect,
    table: &str,
    columns: &[ColumnDef],
    if_not_exists: bool,
) -> Result<String, SqlFacadeError> {
    let table = check_identifier(dialect, "table", table)?;
    if columns.is_empty() {
        return Err(SqlFacadeError::InvalidStatement(format!(
            "no columns given for table {table}"
        )));
    }

    let keys: Vec<&str> = columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    let inline_key = keys.len() == 1;

    let mut defs = Vec::with_capacity(columns.len() + 1);
    for column in columns {
        defs.push(column.render(dialect, inline_key)?);
    }
    if keys.len() > 1 {
        defs.push(format!("PRIMARY KEY ({})", keys.join(", ")));
    }
    let body = format!("{table} ({})", defs.join(", "));

    Ok(match (if_not_exists, dialect.supports_if_not_exists()) {
        (false, _) => format!("CREATE TABLE {body}"),
        (true, true) => format!("CREATE TABLE IF NOT EXISTS {body}"),
        (true, false) => format!(
            "IF OBJECT_ID(N'{}', N'U') IS NULL CREATE TABLE {body}",
            table.replace('\'', "''")
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("id", "INTEGER").primary_key().auto_increment(),
            ColumnDef::new("name", "VARCHAR(100)").not_null(),
            ColumnDef::new("active", "INT").default_value(1),
        ]
    }

    #[test]
    fn sqlite_create() {
        assert_eq!(
            build_create(Dialect::Sqlite, "users", &users(), true).unwrap(),
            "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name VARCHAR(100) NOT NULL, active INT DEFAULT '1')"
        );
    }

    #[test]
    fn auto_increment_keyword_per_dialect() {
        assert_eq!(
            build_create(Dialect::Mysql, "users", &users()[..1], false).unwrap(),
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTO_INCREMENT)"
        );
        assert_eq!(
            build_create(Dialect::Postgres, "users", &users()[..1], false).unwrap(),
            "CREATE TABLE users (id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY)"
        );
        assert_eq!(
            build_create(Dialect::TSql, "users", &users()[..1], true).unwrap(),
            "IF OBJECT_ID(N'users', N'U') IS NULL CREATE TABLE users \
             (id INTEGER IDENTITY(1,1) PRIMARY KEY)"
        );
    }

    #[test]
    fn composite_key_becomes_table_constraint() {
        let cols = [
            ColumnDef::new("a", "INT").primary_key(),
            ColumnDef::new("b", "INT").primary_key(),
        ];
        assert_eq!(
            build_create(Dialect::Postgres, "pairs", &cols, false).unwrap(),
            "CREATE TABLE pairs (a INT, b INT, PRIMARY KEY (a, b))"
        );
    }

    #[test]
    fn sqlite_autoincrement_needs_integer_key() {
        let cols = [ColumnDef::new("id", "BIGINT").primary_key().auto_increment()];
        assert!(build_create(Dialect::Sqlite, "t", &cols, false).is_err());
        assert!(build_create(Dialect::Sqlite, "t", &[], false).is_err());
    }
}

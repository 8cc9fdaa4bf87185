//! Statement classification by leading keyword.

use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::Dialect;
use crate::translation::scan_outside_literals;

static RETURNING_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:RETURNING\b|OUTPUT\s+(?:INSERTED|DELETED)\.)")
        .expect("returning clause pattern is valid")
});

/// What a statement does, judged from its first keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    #[must_use]
    pub fn classify(sql: &str) -> StatementKind {
        if starts_with_keyword(sql, "SELECT") {
            StatementKind::Select
        } else if starts_with_keyword(sql, "INSERT") {
            StatementKind::Insert
        } else if starts_with_keyword(sql, "UPDATE") {
            StatementKind::Update
        } else if starts_with_keyword(sql, "DELETE") {
            StatementKind::Delete
        } else {
            StatementKind::Other
        }
    }
}

/// Case-insensitive prefix test on the trimmed statement.
fn starts_with_keyword(sql: &str, keyword: &str) -> bool {
    sql.trim_start()
        .get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

#[must_use]
pub fn is_select(sql: &str) -> bool {
    starts_with_keyword(sql, "SELECT")
}

#[must_use]
pub fn is_insert(sql: &str) -> bool {
    starts_with_keyword(sql, "INSERT")
}

#[must_use]
pub fn is_update(sql: &str) -> bool {
    starts_with_keyword(sql, "UPDATE")
}

#[must_use]
pub fn is_delete(sql: &str) -> bool {
    starts_with_keyword(sql, "DELETE")
}

/// True when running the statement yields a row set: a SELECT, or DML that carries a
/// `RETURNING` clause or an `OUTPUT INSERTED.` / `OUTPUT DELETED.` clause.
///
/// Quoted text and comments are not searched, so `'returning'` as a value does not count.
#[must_use]
pub fn returns_rows(sql: &str, dialect: Dialect) -> bool {
    match StatementKind::classify(sql) {
        StatementKind::Select => true,
        StatementKind::Insert | StatementKind::Update | StatementKind::Delete => {
            RETURNING_CLAUSE.is_match(&scan_outside_literals(sql, dialect.placeholder_style()))
        }
        StatementKind::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_on_trimmed_leading_keyword() {
        assert!(is_select("  select * from t"));
        assert!(is_insert("\n\tINSERT INTO t VALUES (1)"));
        assert!(is_update("Update t SET a = 1"));
        assert!(is_delete("delete from t"));
        assert!(!is_select("WITH x AS (SELECT 1) SELECT * FROM x"));
        assert!(!is_select("SEL"));
        assert_eq!(StatementKind::classify("CREATE TABLE t (a INT)"), StatementKind::Other);
    }

    #[test]
    fn keyword_match_is_a_prefix_match() {
        assert!(is_select("SELECTED_ROWS"));
        assert!(!is_insert("é INSERT"));
    }

    #[test]
    fn detects_row_returning_dml() {
        assert!(returns_rows("SELECT 1", Dialect::Sqlite));
        assert!(returns_rows(
            "INSERT INTO t (a) OUTPUT INSERTED.id VALUES ('x')",
            Dialect::TSql
        ));
        assert!(returns_rows(
            "INSERT INTO t (a) OUTPUT INSERTED.[id] VALUES ('x')",
            Dialect::TSql
        ));
        assert!(returns_rows("insert into t (a) values ('x') returning id", Dialect::Postgres));
        assert!(returns_rows("DELETE FROM t OUTPUT DELETED.id WHERE a = '1'", Dialect::TSql));
        assert!(!returns_rows("INSERT INTO t (a) VALUES ('x')", Dialect::Postgres));
        assert!(!returns_rows("CREATE TABLE returning_things (a INT)", Dialect::Sqlite));
    }

    #[test]
    fn clause_words_inside_literals_and_comments_are_ignored() {
        assert!(!returns_rows(
            "INSERT INTO t (note) VALUES ('returning customer')",
            Dialect::Sqlite
        ));
        assert!(!returns_rows(
            "UPDATE t SET note = 'output inserted.x' WHERE id = '1'",
            Dialect::TSql
        ));
        assert!(!returns_rows(
            r"INSERT INTO t (note) VALUES ('it\'s returning')",
            Dialect::Mysql
        ));
        assert!(!returns_rows(
            "DELETE FROM t WHERE \"returning\" = '1' -- returning id",
            Dialect::Postgres
        ));
        assert!(!returns_rows(
            "UPDATE t SET body = $b$ RETURNING id $b$",
            Dialect::Postgres
        ));
        assert!(returns_rows(
            "INSERT INTO t (note) VALUES ('returning') RETURNING id",
            Dialect::Postgres
        ));
    }
}

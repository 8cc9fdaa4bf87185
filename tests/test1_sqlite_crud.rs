#![cfg(feature = "sqlite")]

use sql_facade::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn memory_db() -> Result<Database, SqlFacadeError> {
    DatabaseConfig::builder(Method::Sqlite)
        .database(":memory:")
        .connect()
        .await
}

async fn users_table(db: &mut Database) -> Result<(), SqlFacadeError> {
    db.create(
        "users",
        &[
            ColumnDef::new("id", "INTEGER").primary_key().auto_increment(),
            ColumnDef::new("name", "TEXT").not_null(),
            ColumnDef::new("score", "REAL"),
            ColumnDef::new("active", "INTEGER").default_value(1),
        ],
        true,
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn insert_select_update_delete_round() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut db = memory_db().await?;
    assert!(db.is_connected());
    assert_eq!(db.get_status(), Status::Success);
    users_table(&mut db).await?;

    let first = db
        .insert("users", &[("name", "alice".into()), ("score", 9.5.into())])
        .await?
        .insert_id();
    assert_eq!(first, Some(1));
    let second = db
        .insert("users", &[("name", RowValues::from("o'brien")), ("score", RowValues::Null)])
        .await?
        .insert_id();
    assert_eq!(second, Some(2));

    let rows = db
        .select("users", &Conditions::new().order_by("id", SortOrder::Asc), "")
        .await?
        .rows()
        .cloned()
        .ok_or("expected rows")?;
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows.get_column_names().map(|c| c.as_slice().to_vec()),
        Some(vec![
            "id".to_string(),
            "name".to_string(),
            "score".to_string(),
            "active".to_string()
        ])
    );
    assert_eq!(rows.results[0].get("name"), Some(&RowValues::Text("alice".into())));
    assert_eq!(rows.results[0].get("score"), Some(&RowValues::Float(9.5)));
    assert_eq!(rows.results[0].get("active"), Some(&RowValues::Int(1)));
    assert_eq!(rows.results[1].get("name"), Some(&RowValues::Text("o'brien".into())));
    assert!(rows.results[1].get("score").is_some_and(RowValues::is_null));

    let updated = db
        .update(
            "users",
            &[("active", RowValues::Bool(false))],
            &Conditions::new().eq("name", "o'brien"),
        )
        .await?;
    assert_eq!(updated.rows_affected(), 1);
    assert!(matches!(updated, QueryOutcome::Affected(1)));

    let inactive = db
        .select("users", &Conditions::new().eq("active", 0), "name")
        .await?
        .rows()
        .map(|rs| rs.column_values("name").into_iter().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(inactive, vec![RowValues::Text("o'brien".into())]);

    let deleted = db.delete("users", &Conditions::new().lt("id", 2)).await?;
    assert_eq!(deleted.rows_affected(), 1);

    let left = db.select("users", &Conditions::new(), "COUNT(*) AS n").await?;
    let count = left
        .rows()
        .and_then(|rs| rs.results.first())
        .and_then(|row| row.get("n"))
        .and_then(RowValues::as_int)
        .copied();
    assert_eq!(count, Some(1));

    db.close().await?;
    assert!(!db.is_connected());
    assert_eq!(db.get_status(), Status::NotConnected);
    Ok(())
}

#[tokio::test]
async fn insert_returning_reads_the_new_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_db().await?;
    users_table(&mut db).await?;
    db.insert("users", &[("name", "seed".into())]).await?;

    let outcome = db
        .insert_returning("users", &[("name", "returned".into())], "id")
        .await?;
    assert!(outcome.rows().is_some());
    assert_eq!(outcome.insert_id(), Some(2));
    Ok(())
}

#[tokio::test]
async fn clause_words_in_values_do_not_turn_dml_into_selects()
-> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_db().await?;
    db.query("CREATE TABLE t (id INTEGER PRIMARY KEY, note TEXT)").await?;

    let inserted = db.insert("t", &[("note", "returning customer".into())]).await?;
    assert!(matches!(inserted, QueryOutcome::Inserted { id: Some(1), rows_affected: 1 }));
    assert_eq!(db.get_status(), Status::Success);

    let updated = db
        .update(
            "t",
            &[("note", "output inserted.x".into())],
            &Conditions::new().eq("id", 1),
        )
        .await?;
    assert!(matches!(updated, QueryOutcome::Affected(1)));
    assert_eq!(db.get_status(), Status::Success);
    assert!(db.get_errors().is_empty());

    let notes = db
        .select("t", &Conditions::new(), "note")
        .await?
        .rows()
        .map(|rs| rs.column_values("note").into_iter().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(notes, vec![RowValues::Text("output inserted.x".into())]);
    Ok(())
}

#[tokio::test]
async fn prepared_statements_translate_placeholders() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_db().await?;
    users_table(&mut db).await?;

    db.prepared(
        "INSERT INTO users (name, score) VALUES (?, ?)",
        &[RowValues::Text("bob".into()), RowValues::Float(3.0)],
    )
    .await?;
    db.prepared(
        "INSERT INTO users (name, score) VALUES ($1, $2)",
        &[RowValues::Text("carol".into()), RowValues::Float(4.0)],
    )
    .await?;

    let found = db
        .prepared(
            "SELECT name FROM users WHERE score > ?1 AND name <> '?' ORDER BY id",
            &[RowValues::Float(3.5)],
        )
        .await?;
    let names: Vec<_> = found
        .rows()
        .map(|rs| rs.column_values("name").into_iter().cloned().collect())
        .unwrap_or_default();
    assert_eq!(names, vec![RowValues::Text("carol".into())]);

    let logged = db.get_queries().last().ok_or("query log is empty")?;
    assert_eq!(logged.params, vec![RowValues::Float(3.5)]);
    Ok(())
}

#[tokio::test]
async fn tables_lists_created_tables() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_db().await?;
    assert!(db.tables().await?.is_empty());
    assert_eq!(db.get_status(), Status::NoResults);

    users_table(&mut db).await?;
    db.query("CREATE TABLE audit (id INTEGER PRIMARY KEY, note TEXT)").await?;
    assert_eq!(db.tables().await?, vec!["audit".to_string(), "users".to_string()]);
    assert_eq!(db.get_status(), Status::Success);
    Ok(())
}

#[tokio::test]
async fn create_if_not_exists_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = memory_db().await?;
    users_table(&mut db).await?;
    users_table(&mut db).await?;

    let err = db
        .create("users", &[ColumnDef::new("id", "INTEGER")], false)
        .await
        .unwrap_err();
    assert!(matches!(err, SqlFacadeError::SqliteError(_)));
    assert_eq!(db.get_status(), Status::QueryFailed);
    Ok(())
}

#![cfg(feature = "sqlite")]

use sql_facade::prelude::*;
use tempfile::tempdir;

#[tokio::test]
async fn file_database_persists_across_connections() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("facade.db").to_string_lossy().into_owned();
    let config = DatabaseConfig::builder(Method::Sqlite).database(path.clone()).finish();

    let mut db = Database::open(config.clone()).await?;
    db.query(
        "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL);
         CREATE INDEX notes_body ON notes (body);",
    )
    .await?;
    db.insert("notes", &[("body", "kept".into())]).await?;
    db.close().await?;

    let mut db = Database::open(config).await?;
    let rows = db.select("notes", &Conditions::new(), "body").await?;
    assert_eq!(
        rows.rows().map(|rs| rs.column_values("body").into_iter().cloned().collect::<Vec<_>>()),
        Some(vec![RowValues::Text("kept".into())])
    );
    Ok(())
}

#[tokio::test]
async fn empty_select_reports_no_results() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = DatabaseConfig::builder(Method::Sqlite)
        .database(":memory:")
        .connect()
        .await?;
    db.query("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)").await?;
    assert!(db.get_errors().is_empty());

    let outcome = db.select("t", &Conditions::new().eq("id", 1), "id, name").await?;
    let rs = outcome.rows().ok_or("expected a row set")?;
    assert!(rs.is_empty());
    assert_eq!(rs.get_column_names().map(|c| c.len()), Some(2));

    assert_eq!(db.get_status(), Status::NoResults);
    let logged = db.get_errors().last().ok_or("no error logged")?;
    assert_eq!(logged.message, "No results were returned.");
    assert_eq!(logged.sql.as_deref(), Some("SELECT id, name FROM t WHERE id = '1'"));
    assert!(db.get_results().is_some());
    Ok(())
}

#[tokio::test]
async fn driver_failure_sets_query_failed() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = DatabaseConfig::builder(Method::Sqlite)
        .database(":memory:")
        .connect()
        .await?;

    let err = db.query("SELECT * FROM missing").await.unwrap_err();
    assert!(matches!(err, SqlFacadeError::SqliteError(_)));
    assert_eq!(db.get_status(), Status::QueryFailed);
    assert!(db.get_results().is_none());
    assert_eq!(db.get_queries().len(), 1);
    let logged = db.get_errors().last().ok_or("no error logged")?;
    assert!(logged.message.contains("missing"));

    // the connection is still usable afterwards
    db.query("SELECT 1").await?;
    assert_eq!(db.get_status(), Status::Success);
    Ok(())
}

#[tokio::test]
async fn connect_twice_reuses_the_connection() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::new(DatabaseConfig::builder(Method::Sqlite).database(":memory:").finish());
    db.connect().await?;
    db.query("CREATE TABLE kept (id INTEGER)").await?;
    db.connect().await?;
    assert_eq!(db.tables().await?, vec!["kept".to_string()]);
    Ok(())
}

#[tokio::test]
async fn unopenable_path_is_database_not_selected() {
    let mut db = Database::new(
        DatabaseConfig::builder(Method::Sqlite)
            .database("/nonexistent-dir/for/sure/x.db")
            .finish(),
    );
    let err = db.connect().await.unwrap_err();
    assert!(matches!(err, SqlFacadeError::DatabaseNotSelected(_)));
    assert_eq!(db.get_status(), Status::DatabaseNotSelected);
}

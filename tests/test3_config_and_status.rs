use sql_facade::prelude::*;

#[test]
fn config_loads_from_json_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let cfg: DatabaseConfig = serde_json::from_str(
        r#"{
            "host": "sql01",
            "database": "inventory",
            "username": "app",
            "password": "s3cret",
            "method": "sqlsrv",
            "instance_name": "SQLEXPRESS"
        }"#,
    )?;
    assert_eq!(cfg.method, Method::Mssql);
    assert_eq!(cfg.effective_port(), Some(1433));
    assert_eq!(cfg.instance_name.as_deref(), Some("SQLEXPRESS"));
    assert!(cfg.translate_placeholders);
    cfg.validate()?;

    let serialized = serde_json::to_string(&cfg)?;
    assert!(!serialized.contains("s3cret"));
    Ok(())
}

#[test]
fn legacy_method_names_parse() {
    for (name, method) in [
        ("mysqli", Method::Mysql),
        ("pdo_mysql", Method::Mysql),
        ("mssql", Method::Mssql),
        ("pdo_dblib", Method::Mssql),
        ("pgsql", Method::Postgres),
        ("pdo_sqlite", Method::Sqlite),
    ] {
        assert_eq!(name.parse::<Method>().ok(), Some(method), "{name}");
    }

    let unknown: Result<DatabaseConfig, _> = serde_json::from_str(r#"{ "method": "oracle" }"#);
    assert!(unknown.is_err());
}

#[tokio::test]
async fn query_without_connection_is_logged() {
    let mut db = Database::new(DatabaseConfig::builder(Method::Postgres).database("app").finish());

    let err = db.query("SELECT 1").await.unwrap_err();
    assert!(matches!(err, SqlFacadeError::NotConnected));
    assert_eq!(db.get_status(), Status::NotConnected);
    assert!(db.get_queries().is_empty());
    assert_eq!(db.get_errors()[0].sql.as_deref(), Some("SELECT 1"));

    let err = db.query("   ").await.unwrap_err();
    assert!(matches!(err, SqlFacadeError::EmptyQuery));
    assert_eq!(db.get_status(), Status::EmptyQuery);
    assert_eq!(db.get_status().code(), 3);
    assert_eq!(db.get_errors().len(), 2);
}

#[tokio::test]
async fn builder_errors_are_invalid_statements() {
    let mut db = Database::new(DatabaseConfig::builder(Method::Mysql).database("app").finish());
    let none: [(&str, RowValues); 0] = [];

    let err = db.insert("t", &none).await.unwrap_err();
    assert!(matches!(err, SqlFacadeError::InvalidStatement(_)));
    assert_eq!(db.get_status(), Status::InvalidStatement);
    assert_eq!(db.get_errors().last().map(|e| e.status), Some(Status::InvalidStatement));
}

#[cfg(not(feature = "mysql"))]
#[tokio::test]
async fn missing_backend_is_driver_unavailable() {
    let mut db = Database::new(DatabaseConfig::builder(Method::Mysql).database("app").finish());
    let err = db.connect().await.unwrap_err();
    assert!(matches!(err, SqlFacadeError::DriverUnavailable(_)));
    assert_eq!(db.get_status(), Status::DriverUnavailable);
    assert_eq!(db.get_status().code(), 7);
}

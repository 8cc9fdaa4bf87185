use super::Database;
use crate::error::SqlFacadeError;
use crate::query_builder::{
    ColumnDef, Conditions, build_create, build_delete, build_insert, build_select, build_update,
};
use crate::results::QueryOutcome;
use crate::types::RowValues;

/// Statement helpers: build the SQL in this database's dialect, then run it through
/// [`Database::query`].
impl Database {
    /// `SELECT {columns} FROM {table}` filtered by `conditions`. Blank `columns` selects `*`.
    ///
    /// # Errors
    /// `InvalidStatement` when the statement cannot be built, otherwise as [`Database::query`].
    pub async fn select(
        &mut self,
        table: &str,
        conditions: &Conditions,
        columns: &str,
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let sql = build_select(self.dialect(), table, conditions, columns);
        let sql = self.built(sql)?;
        self.run(&sql, Vec::new()).await
    }

    /// # Errors
    /// `InvalidStatement` when `assignments` is empty or a name is invalid, otherwise as
    /// [`Database::query`].
    pub async fn update<S: AsRef<str>>(
        &mut self,
        table: &str,
        assignments: &[(S, RowValues)],
        conditions: &Conditions,
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let sql = build_update(self.dialect(), table, assignments, conditions);
        let sql = self.built(sql)?;
        self.run(&sql, Vec::new()).await
    }

    /// Insert one row; the outcome carries the generated id when the backend reports one.
    ///
    /// # Errors
    /// `InvalidStatement` when `values` is empty or a name is invalid, otherwise as
    /// [`Database::query`].
    pub async fn insert<S: AsRef<str>>(
        &mut self,
        table: &str,
        values: &[(S, RowValues)],
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let sql = build_insert(self.dialect(), table, values, None);
        let sql = self.built(sql)?;
        self.run(&sql, Vec::new()).await
    }

    /// Insert one row and read `id_column` of the new row back.
    ///
    /// SQL Server, PostgreSQL, and SQLite return it as a one-row result; MySQL falls back to the
    /// driver's last insert id. Either way [`QueryOutcome::insert_id`] yields it.
    ///
    /// # Errors
    /// As [`insert`](Database::insert).
    pub async fn insert_returning<S: AsRef<str>>(
        &mut self,
        table: &str,
        values: &[(S, RowValues)],
        id_column: &str,
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let sql = build_insert(self.dialect(), table, values, Some(id_column));
        let sql = self.built(sql)?;
        self.run(&sql, Vec::new()).await
    }

    /// # Errors
    /// `InvalidStatement` when the statement cannot be built, otherwise as [`Database::query`].
    pub async fn delete(
        &mut self,
        table: &str,
        conditions: &Conditions,
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let sql = build_delete(self.dialect(), table, conditions);
        let sql = self.built(sql)?;
        self.run(&sql, Vec::new()).await
    }

    /// # Errors
    /// `InvalidStatement` when `columns` is empty or invalid, otherwise as [`Database::query`].
    pub async fn create(
        &mut self,
        table: &str,
        columns: &[ColumnDef],
        if_not_exists: bool,
    ) -> Result<&QueryOutcome, SqlFacadeError> {
        let sql = build_create(self.dialect(), table, columns, if_not_exists);
        let sql = self.built(sql)?;
        self.run(&sql, Vec::new()).await
    }

    /// Names of the tables in the current database.
    ///
    /// # Errors
    /// As [`Database::query`].
    pub async fn tables(&mut self) -> Result<Vec<String>, SqlFacadeError> {
        let sql = self.dialect().tables_query();
        let outcome = self.run(sql, Vec::new()).await?;
        Ok(outcome
            .rows()
            .map(|rows| {
                rows.results
                    .iter()
                    .filter_map(|row| row.get_by_index(0))
                    .filter_map(RowValues::to_text)
                    .collect()
            })
            .unwrap_or_default())
    }

    fn built(&mut self, sql: Result<String, SqlFacadeError>) -> Result<String, SqlFacadeError> {
        sql.map_err(|err| self.record(err, None))
    }
}

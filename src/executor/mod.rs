mod dispatch;

/// What a statement without result rows reported back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecSummary {
    pub rows_affected: usize,
    /// Key generated by an insert, when the backend exposes one.
    pub last_insert_id: Option<i64>,
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("duplicate transaction id: {0}")]
    DuplicateId(String),
    #[error("transaction not found: {0}")]
    NotFound(String),
    #[error("ledger JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

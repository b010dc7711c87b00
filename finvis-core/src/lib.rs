//! finvis-core: transaction and ledger types shared by the finvis crates

pub mod error;
pub mod ledger;
pub mod time;
pub mod transaction;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use transaction::{new_id, Transaction, CSV_IMPORT_SOURCE};

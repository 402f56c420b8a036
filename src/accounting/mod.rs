use thiserror::Error;

pub mod ledger;
pub mod period;
pub mod transaction;


pub use ledger::{Ledger, Summary};
pub use period::{DateWindow, Period};
pub use transaction::{Kind, Transaction};

#[derive(Debug, PartialEq, Error)]
pub enum LedgerError {
    #[error("unknown transaction kind: {0}")]
    UnknownKind(String),
}

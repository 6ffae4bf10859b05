pub mod ids;
pub mod ledger;
pub mod models;
mod money;
mod result;

pub use ledger::{AccountLedger, LedgerError};
pub use models::{Account, AccountError};
pub use money::{Money, MoneyError};
pub use result::Result;

mod account;
mod statement;

pub use account::{Account, AccountError};
pub use statement::MiniStatement;

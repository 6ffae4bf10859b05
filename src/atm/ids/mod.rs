mod account_id;
mod pin;

pub use account_id::AccountId;
pub use pin::Pin;

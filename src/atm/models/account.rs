use crate::ids::{AccountId, Pin};
use crate::models::MiniStatement;
use crate::Money;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be positive, got \u{20b9}{0}")]
    InvalidAmount(Money),

    #[error("Insufficient funds: balance is \u{20b9}{balance}, requested \u{20b9}{requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    #[error("Balance overflow on account {0}")]
    BalanceOverflow(AccountId),
}

/// A single bank account: balance, credential, and a bounded record of
/// recent activity.
///
/// Every mutating operation either fully applies and records a statement
/// entry, or rejects with an [`AccountError`] and changes nothing. The
/// balance never goes negative.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    holder_name: String,
    pin: Pin,
    balance: Money,
    statement: MiniStatement,
}

impl Account {
    pub fn new(id: AccountId, holder_name: impl Into<String>, pin: Pin, balance: Money) -> Self {
        let mut account = Self {
            id,
            holder_name: holder_name.into(),
            pin,
            balance,
            statement: MiniStatement::new(),
        };

        account.record(&format!("Account opened with balance \u{20b9}{balance}"));

        account
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Pure comparison; attempt limiting is the caller's concern.
    pub fn verify_pin(&self, candidate: Pin) -> bool {
        self.pin == candidate
    }

    /// Replaces the credential unconditionally. Format validation belongs to
    /// the caller; the statement entry never contains the PIN value.
    pub fn change_pin(&mut self, new_pin: Pin) {
        self.pin = new_pin;
        self.record("PIN changed");
    }

    pub fn deposit(&mut self, amount: Money) -> Result<Money, AccountError> {
        if !amount.is_positive() {
            Err(AccountError::InvalidAmount(amount))?
        }

        let credited = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow(self.id))?;

        self.balance = credited;
        self.record(&format!(
            "Deposited \u{20b9}{amount}, new balance \u{20b9}{credited}"
        ));

        Ok(credited)
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<Money, AccountError> {
        if !amount.is_positive() {
            Err(AccountError::InvalidAmount(amount))?
        }

        if amount > self.balance {
            Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            })?
        }

        let debited = self
            .balance
            .checked_sub(amount)
            .ok_or(AccountError::BalanceOverflow(self.id))?;

        self.balance = debited;
        self.record(&format!(
            "Withdrawn \u{20b9}{amount}, new balance \u{20b9}{debited}"
        ));

        Ok(debited)
    }

    /// Moves `amount` from this account to `other` as a single atomic unit.
    ///
    /// Both sides are validated before either is touched, so a rejection
    /// leaves both balances and both statements unchanged. On success the
    /// sender records a "transferred" entry, the recipient a "received" one.
    pub fn transfer_to(&mut self, other: &mut Account, amount: Money) -> Result<Money, AccountError> {
        if !amount.is_positive() {
            Err(AccountError::InvalidAmount(amount))?
        }

        if amount > self.balance {
            Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            })?
        }

        let debited = self
            .balance
            .checked_sub(amount)
            .ok_or(AccountError::BalanceOverflow(self.id))?;
        let credited = other
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow(other.id))?;

        self.balance = debited;
        other.balance = credited;

        self.record(&format!(
            "Transferred \u{20b9}{amount} to {}, new balance \u{20b9}{debited}",
            other.id
        ));
        other.record(&format!(
            "Received \u{20b9}{amount} from {}, new balance \u{20b9}{credited}",
            self.id
        ));

        Ok(debited)
    }

    /// Owned copy of the recent-activity entries, oldest first.
    pub fn mini_statement(&self) -> Vec<String> {
        self.statement.snapshot()
    }

    fn record(&mut self, text: &str) {
        self.statement.record(text);
    }
}

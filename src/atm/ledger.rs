use crate::ids::{AccountId, Pin};
use crate::models::{Account, AccountError};
use crate::Money;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Cannot transfer from account {0} to itself")]
    SameAccountTransfer(AccountId),

    #[error(transparent)]
    Account(#[from] AccountError),
}

/// The registry of accounts and the operations that mutate them.
///
/// Seeded once at startup; accounts are never added or removed afterwards.
/// Every mutating operation takes `&mut self`, so the borrow checker enforces
/// the single-writer discipline: no two operations can interleave on the same
/// account, and a transfer holds the one exclusive borrow across the whole
/// debit+credit. Sharing a ledger between threads means wrapping it in a
/// lock around whole operations, which preserves the same guarantee.
#[derive(Debug)]
pub struct AccountLedger {
    accounts: HashMap<AccountId, Account>,
}

impl AccountLedger {
    /// Builds the registry from the seed accounts. A duplicate id keeps the
    /// later account and logs the collision.
    pub fn seed(accounts: Vec<Account>) -> Self {
        let mut registry = HashMap::with_capacity(accounts.len());

        for account in accounts {
            if let Some(existing) = registry.insert(account.id(), account) {
                log::warn!("Duplicate seed account {}, replacing it", existing.id());
            }
        }

        Self { accounts: registry }
    }

    pub fn lookup(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn verify_pin(&self, id: AccountId, candidate: Pin) -> Result<bool, LedgerError> {
        Ok(self.find(id)?.verify_pin(candidate))
    }

    pub fn balance(&self, id: AccountId) -> Result<Money, LedgerError> {
        Ok(self.find(id)?.balance())
    }

    pub fn deposit(&mut self, id: AccountId, amount: Money) -> Result<Money, LedgerError> {
        Ok(self.find_mut(id)?.deposit(amount)?)
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Money) -> Result<Money, LedgerError> {
        Ok(self.find_mut(id)?.withdraw(amount)?)
    }

    /// Atomic two-account transfer: the debit and credit either both apply
    /// or neither does. Returns the sender's new balance.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> Result<Money, LedgerError> {
        if from == to {
            Err(LedgerError::SameAccountTransfer(from))?
        }

        let [sender, recipient] = self.accounts.get_disjoint_mut([&from, &to]);

        let sender = sender.ok_or(LedgerError::AccountNotFound(from))?;
        let recipient = recipient.ok_or(LedgerError::AccountNotFound(to))?;

        Ok(sender.transfer_to(recipient, amount)?)
    }

    pub fn change_pin(&mut self, id: AccountId, new_pin: Pin) -> Result<(), LedgerError> {
        self.find_mut(id)?.change_pin(new_pin);
        Ok(())
    }

    pub fn mini_statement(&self, id: AccountId) -> Result<Vec<String>, LedgerError> {
        Ok(self.find(id)?.mini_statement())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn find(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&id)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn find_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))
    }
}

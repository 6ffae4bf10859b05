use atm::ids::{AccountId, Pin};
use atm::{Account, Money};

/// Pre-provisioned sample accounts: number, holder, PIN, opening balance.
pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account::new(AccountId(1001), "Amit Kumar", Pin(1111), Money(500000)),
        Account::new(AccountId(1002), "Bhavana Singh", Pin(2222), Money(1200000)),
        Account::new(AccountId(1003), "Charan Patel", Pin(3333), Money(75050)),
    ]
}

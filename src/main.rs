mod config;
mod seed;
mod session;

use atm::{AccountLedger, Result};

use std::io;

use session::Session;

fn main() -> Result {
    config::configure_app()?;

    log::debug!("Application configured. Seeding accounts...");

    let mut ledger = AccountLedger::seed(seed::demo_accounts());

    log::debug!("Seeded {} accounts. Starting session...", ledger.len());

    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.run(&mut ledger)?;

    log::debug!("Session ended.");

    Ok(())
}

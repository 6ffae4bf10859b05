use atm::ids::{AccountId, Pin};
use atm::{AccountLedger, Money, Result};

use std::io::{BufRead, Write};

const MAX_PIN_ATTEMPTS: u32 = 3;

enum MenuOutcome {
    Logout,
    Exit,
}

/// Drives one terminal banking session against a ledger: login handshake,
/// then a menu loop forwarding each selection to the corresponding ledger
/// operation and rendering the outcome as text.
///
/// Generic over its streams so tests can script it with in-memory buffers.
pub struct Session<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn run(&mut self, ledger: &mut AccountLedger) -> Result {
        writeln!(self.writer, "====== Welcome to the ATM Simulator ======")?;

        loop {
            writeln!(self.writer, "\nPlease choose:")?;
            writeln!(self.writer, "1. Login")?;
            writeln!(self.writer, "2. Exit")?;
            self.prompt("Enter choice: ")?;

            let choice = match self.read_line()? {
                Some(choice) => choice,
                None => break,
            };

            match choice.as_str() {
                "1" => {
                    if let Some(account_id) = self.login(ledger)? {
                        if let MenuOutcome::Exit = self.menu_loop(ledger, account_id)? {
                            break;
                        }
                    }
                }
                "2" => {
                    writeln!(self.writer, "Thank you for banking with us. Goodbye!")?;
                    break;
                }
                _ => writeln!(self.writer, "Invalid option. Try again.")?,
            }
        }

        Ok(())
    }

    /// Resolves an account number and gives the user a bounded number of PIN
    /// attempts. Returns the authenticated account id, or `None` back to the
    /// outer menu.
    fn login(&mut self, ledger: &AccountLedger) -> Result<Option<AccountId>> {
        self.prompt("Enter account number: ")?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let account_id = match line.parse::<u32>() {
            Ok(number) => AccountId(number),
            Err(_) => {
                writeln!(self.writer, "Account number should be numeric.")?;
                return Ok(None);
            }
        };

        let holder = match ledger.lookup(account_id) {
            Some(account) => account.holder_name().to_string(),
            None => {
                writeln!(self.writer, "Account not found.")?;
                return Ok(None);
            }
        };

        let mut attempts = 0;
        while attempts < MAX_PIN_ATTEMPTS {
            self.prompt("Enter 4-digit PIN: ")?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            let candidate = match line.parse::<u32>() {
                Ok(pin) => Pin(pin),
                Err(_) => {
                    writeln!(self.writer, "PIN should be numeric.")?;
                    attempts += 1;
                    continue;
                }
            };

            if ledger.verify_pin(account_id, candidate)? {
                writeln!(self.writer, "Login successful. Welcome, {holder}!")?;
                return Ok(Some(account_id));
            }

            attempts += 1;
            writeln!(
                self.writer,
                "Incorrect PIN. Attempts left: {}",
                MAX_PIN_ATTEMPTS - attempts
            )?;
        }

        writeln!(
            self.writer,
            "Too many incorrect attempts. Returning to main menu."
        )?;

        Ok(None)
    }

    fn menu_loop(
        &mut self,
        ledger: &mut AccountLedger,
        account_id: AccountId,
    ) -> Result<MenuOutcome> {
        loop {
            self.print_menu()?;
            self.prompt("Choose an option: ")?;

            let option = match self.read_line()? {
                Some(option) => option,
                None => return Ok(MenuOutcome::Exit),
            };

            match option.as_str() {
                "1" => {
                    let balance = ledger.balance(account_id)?;
                    writeln!(self.writer, "Current Balance: \u{20b9}{balance}")?;
                }
                "2" => self.do_deposit(ledger, account_id)?,
                "3" => self.do_withdraw(ledger, account_id)?,
                "4" => self.do_transfer(ledger, account_id)?,
                "5" => self.show_mini_statement(ledger, account_id)?,
                "6" => self.change_pin(ledger, account_id)?,
                "7" => {
                    writeln!(self.writer, "Logging out...")?;
                    return Ok(MenuOutcome::Logout);
                }
                "8" => {
                    writeln!(self.writer, "Exiting ATM. Goodbye!")?;
                    return Ok(MenuOutcome::Exit);
                }
                _ => writeln!(self.writer, "Invalid option. Try again.")?,
            }
        }
    }

    fn print_menu(&mut self) -> Result {
        writeln!(self.writer, "\n------ ATM Menu ------")?;
        writeln!(self.writer, "1. Check Balance")?;
        writeln!(self.writer, "2. Deposit")?;
        writeln!(self.writer, "3. Withdraw")?;
        writeln!(self.writer, "4. Transfer")?;
        writeln!(self.writer, "5. Mini Statement")?;
        writeln!(self.writer, "6. Change PIN")?;
        writeln!(self.writer, "7. Logout")?;
        writeln!(self.writer, "8. Exit")?;

        Ok(())
    }

    fn do_deposit(&mut self, ledger: &mut AccountLedger, account_id: AccountId) -> Result {
        let amount = match self.read_amount("Enter amount to deposit: \u{20b9}")? {
            Some(amount) => amount,
            None => return Ok(()),
        };

        match ledger.deposit(account_id, amount) {
            Ok(balance) => writeln!(
                self.writer,
                "Deposit successful. New balance: \u{20b9}{balance}"
            )?,
            Err(e) => writeln!(self.writer, "Deposit failed: {e}")?,
        }

        Ok(())
    }

    fn do_withdraw(&mut self, ledger: &mut AccountLedger, account_id: AccountId) -> Result {
        let amount = match self.read_amount("Enter amount to withdraw: \u{20b9}")? {
            Some(amount) => amount,
            None => return Ok(()),
        };

        match ledger.withdraw(account_id, amount) {
            Ok(balance) => writeln!(
                self.writer,
                "Please collect cash. New balance: \u{20b9}{balance}"
            )?,
            Err(e) => writeln!(self.writer, "Withdrawal failed: {e}")?,
        }

        Ok(())
    }

    fn do_transfer(&mut self, ledger: &mut AccountLedger, account_id: AccountId) -> Result {
        self.prompt("Enter recipient account number: ")?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        let recipient = match line.parse::<u32>() {
            Ok(number) => AccountId(number),
            Err(_) => {
                writeln!(self.writer, "Account number should be numeric.")?;
                return Ok(());
            }
        };

        // The ledger rejects this too; catching it here saves the amount prompt.
        if recipient == account_id {
            writeln!(self.writer, "Cannot transfer to the same account.")?;
            return Ok(());
        }

        if ledger.lookup(recipient).is_none() {
            writeln!(self.writer, "Recipient account not found.")?;
            return Ok(());
        }

        let amount = match self.read_amount("Enter amount to transfer: \u{20b9}")? {
            Some(amount) => amount,
            None => return Ok(()),
        };

        match ledger.transfer(account_id, recipient, amount) {
            Ok(balance) => writeln!(
                self.writer,
                "Transfer successful. New balance: \u{20b9}{balance}"
            )?,
            Err(e) => writeln!(self.writer, "Transfer failed: {e}")?,
        }

        Ok(())
    }

    fn show_mini_statement(&mut self, ledger: &AccountLedger, account_id: AccountId) -> Result {
        writeln!(self.writer, "\n--- Mini Statement (latest transactions) ---")?;

        let entries = ledger.mini_statement(account_id)?;

        if entries.is_empty() {
            writeln!(self.writer, "No transactions yet.")?;
        } else {
            for entry in entries {
                writeln!(self.writer, "{entry}")?;
            }
        }

        Ok(())
    }

    fn change_pin(&mut self, ledger: &mut AccountLedger, account_id: AccountId) -> Result {
        self.prompt("Enter current PIN: ")?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        let current = match line.parse::<u32>() {
            Ok(pin) => Pin(pin),
            Err(_) => {
                writeln!(self.writer, "PIN should be numeric.")?;
                return Ok(());
            }
        };

        if !ledger.verify_pin(account_id, current)? {
            writeln!(self.writer, "Incorrect current PIN.")?;
            return Ok(());
        }

        self.prompt("Enter new 4-digit PIN: ")?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        let new_pin = match line.parse::<u32>() {
            Ok(pin) => pin,
            Err(_) => {
                writeln!(self.writer, "PIN should be numeric.")?;
                return Ok(());
            }
        };

        // The ledger accepts any PIN; the 4-digit rule is input validation.
        if !(1000..=9999).contains(&new_pin) {
            writeln!(self.writer, "PIN must be 4 digits.")?;
            return Ok(());
        }

        ledger.change_pin(account_id, Pin(new_pin))?;
        writeln!(self.writer, "PIN changed successfully.")?;

        Ok(())
    }

    /// Prompts for a monetary amount; parse failures and non-positive values
    /// are reported and swallowed so the menu loop continues.
    fn read_amount(&mut self, prompt: &str) -> Result<Option<Money>> {
        self.prompt(prompt)?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let amount = match Money::parse(&line) {
            Ok(amount) => amount,
            Err(e) => {
                log::debug!("{e}");
                writeln!(self.writer, "Invalid amount.")?;
                return Ok(None);
            }
        };

        if !amount.is_positive() {
            writeln!(self.writer, "Amount must be positive.")?;
            return Ok(None);
        }

        Ok(Some(amount))
    }

    /// One trimmed input line, or `None` on end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();

        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result {
        write!(self.writer, "{text}")?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::seed;

    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let mut ledger = AccountLedger::seed(seed::demo_accounts());
        let mut output = Vec::new();

        Session::new(Cursor::new(script), &mut output)
            .run(&mut ledger)
            .unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn login_and_check_balance() {
        let output = run_script("1\n1001\n1111\n1\n7\n2\n");

        assert!(output.contains("Login successful. Welcome, Amit Kumar!"));
        assert!(output.contains("Current Balance: \u{20b9}5000.00"));
        assert!(output.contains("Logging out..."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn three_wrong_pins_lock_the_attempt() {
        let output = run_script("1\n1001\n9999\n8888\n7777\n2\n");

        assert!(output.contains("Incorrect PIN. Attempts left: 2"));
        assert!(output.contains("Incorrect PIN. Attempts left: 0"));
        assert!(output.contains("Too many incorrect attempts. Returning to main menu."));
        assert!(!output.contains("Login successful"));
    }

    #[test]
    fn non_numeric_pin_costs_an_attempt() {
        let output = run_script("1\n1001\nabcd\n9999\n8888\n2\n");

        assert!(output.contains("PIN should be numeric."));
        assert!(output.contains("Too many incorrect attempts. Returning to main menu."));
    }

    #[test]
    fn unknown_account_returns_to_main_menu() {
        let output = run_script("1\n4040\n2\n");

        assert!(output.contains("Account not found."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn deposit_updates_the_balance() {
        let output = run_script("1\n1001\n1111\n2\n100.25\n1\n8\n");

        assert!(output.contains("Deposit successful. New balance: \u{20b9}5100.25"));
        assert!(output.contains("Current Balance: \u{20b9}5100.25"));
        assert!(output.contains("Exiting ATM. Goodbye!"));
    }

    #[test]
    fn malformed_amount_is_rejected_before_the_ledger() {
        let output = run_script("1\n1001\n1111\n2\nabc\n3\n-5\n1\n8\n");

        assert!(output.contains("Invalid amount."));
        assert!(output.contains("Amount must be positive."));
        assert!(output.contains("Current Balance: \u{20b9}5000.00"));
    }

    #[test]
    fn overdraw_is_reported_and_leaves_the_balance() {
        let output = run_script("1\n1001\n1111\n3\n6000\n1\n8\n");

        assert!(output.contains("Withdrawal failed: Insufficient funds"));
        assert!(output.contains("Current Balance: \u{20b9}5000.00"));
    }

    #[test]
    fn transfer_between_seeded_accounts() {
        let output = run_script("1\n1001\n1111\n4\n1002\n1000\n1\n8\n");

        assert!(output.contains("Transfer successful. New balance: \u{20b9}4000.00"));
        assert!(output.contains("Current Balance: \u{20b9}4000.00"));
    }

    #[test]
    fn transfer_to_self_is_refused() {
        let output = run_script("1\n1001\n1111\n4\n1001\n8\n");

        assert!(output.contains("Cannot transfer to the same account."));
    }

    #[test]
    fn transfer_to_unknown_recipient_is_refused() {
        let output = run_script("1\n1001\n1111\n4\n4040\n8\n");

        assert!(output.contains("Recipient account not found."));
    }

    #[test]
    fn mini_statement_lists_recent_activity() {
        let output = run_script("1\n1001\n1111\n2\n250\n5\n8\n");

        assert!(output.contains("--- Mini Statement (latest transactions) ---"));
        assert!(output.contains("Account opened with balance \u{20b9}5000.00"));
        assert!(output.contains("Deposited \u{20b9}250.00, new balance \u{20b9}5250.00"));
    }

    #[test]
    fn changed_pin_works_on_the_next_login() {
        let output = run_script("1\n1001\n1111\n6\n1111\n4321\n7\n1\n1001\n4321\n7\n2\n");

        assert!(output.contains("PIN changed successfully."));
        assert_eq!(output.matches("Login successful. Welcome, Amit Kumar!").count(), 2);
    }

    #[test]
    fn new_pin_must_be_four_digits() {
        let output = run_script("1\n1001\n1111\n6\n1111\n12\n8\n");

        assert!(output.contains("PIN must be 4 digits."));
    }

    #[test]
    fn wrong_current_pin_blocks_the_change() {
        let output = run_script("1\n1001\n1111\n6\n9999\n8\n");

        assert!(output.contains("Incorrect current PIN."));
    }

    #[test]
    fn end_of_input_ends_the_session_cleanly() {
        let output = run_script("1\n1001\n1111\n1\n");

        assert!(output.contains("Current Balance: \u{20b9}5000.00"));
    }
}

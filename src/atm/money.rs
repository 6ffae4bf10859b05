use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoneyError {
    #[error("Malformed amount {1:?}: {0}")]
    Parse(&'static str, String),

    #[error("Amount out of range: {0:?}")]
    OutOfRange(String),
}

/// An exact monetary amount, counted in minor units (paise).
///
/// Balances never touch binary floating point; parsing, arithmetic, and
/// display all work on the integer minor-unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Parses a plain decimal string ("750.50", "5", ".5", "-5") into a
    /// minor-unit amount. At most two fraction digits are accepted.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut parts = digits.splitn(3, '.');
        let units = parts.next().unwrap_or("");
        let fraction = parts.next().unwrap_or("");

        if parts.next().is_some() {
            Err(MoneyError::Parse(
                "too many decimal points",
                input.to_string(),
            ))?
        }

        if units.is_empty() && fraction.is_empty() {
            Err(MoneyError::Parse("no digits", input.to_string()))?
        }

        // Only bare digits on either side of the point; i64::from_str would
        // also accept an embedded sign ("5.-1").
        if !units.chars().all(|c| c.is_ascii_digit()) {
            Err(MoneyError::Parse("bad unit digits", input.to_string()))?
        }

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            Err(MoneyError::Parse("bad fraction digits", input.to_string()))?
        }

        if fraction.len() > 2 {
            Err(MoneyError::Parse(
                "more than two fraction digits",
                input.to_string(),
            ))?
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units
                .parse()
                .map_err(|_| MoneyError::OutOfRange(input.to_string()))?
        };

        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            // "5" means 50 minor units, so right-pad to two digits
            format!("{:0<2}", fraction)
                .parse()
                .map_err(|_| MoneyError::Parse("bad fraction digits", input.to_string()))?
        };

        let minor = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(|| MoneyError::OutOfRange(input.to_string()))?;

        Ok(Money(if negative { -minor } else { minor }))
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let minor = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, minor / 100, minor % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_and_fractional() {
        assert_eq!(Money::parse("750.50").unwrap(), Money(75050));
        assert_eq!(Money::parse("5").unwrap(), Money(500));
        assert_eq!(Money::parse("0.01").unwrap(), Money(1));
        assert_eq!(Money::parse(".5").unwrap(), Money(50));
        assert_eq!(Money::parse("  12.3 ").unwrap(), Money(1230));
    }

    #[test]
    fn parse_negative() {
        assert_eq!(Money::parse("-5").unwrap(), Money(-500));
        assert_eq!(Money::parse("-0.05").unwrap(), Money(-5));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("-").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1-2").is_err());
        assert!(Money::parse("+5").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn parse_rejects_signs_inside_the_fraction() {
        // i64's FromStr would happily read these as signed fractions,
        // turning "5.-1" into 4.99 and "0.-5" into a negative amount
        assert!(Money::parse("5.-1").is_err());
        assert!(Money::parse("5.+1").is_err());
        assert!(Money::parse("0.-5").is_err());
        assert!(Money::parse("-5.-1").is_err());
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(Money(100).checked_add(Money(50)), Some(Money(150)));
        assert_eq!(Money(100).checked_sub(Money(50)), Some(Money(50)));
        assert_eq!(Money(i64::MAX).checked_add(Money(1)), None);
    }

    #[test]
    fn display_two_fraction_digits() {
        assert_eq!(Money(500000).to_string(), "5000.00");
        assert_eq!(Money(75050).to_string(), "750.50");
        assert_eq!(Money(5).to_string(), "0.05");
        assert_eq!(Money(-5).to_string(), "-0.05");
    }

    #[test]
    fn repeated_small_deposits_are_exact() {
        let mut balance = Money::parse("750.50").unwrap();
        let penny = Money::parse("0.01").unwrap();

        for _ in 0..100 {
            balance = balance.checked_add(penny).unwrap();
        }

        assert_eq!(balance, Money::parse("751.50").unwrap());
    }
}

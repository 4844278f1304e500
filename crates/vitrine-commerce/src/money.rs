//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Brazilian real amount, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    pub const SYMBOL: &'static str = "R$";

    /// A BRL amount in cents.
    pub fn brl(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Format for display, e.g. "R$ 1.299,90".
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();

        let whole = (cents / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        format!("{}{} {},{:02}", sign, Self::SYMBOL, grouped, cents % 100)
    }

    /// Split into `parts` equal installments, rounded to the nearest cent.
    ///
    /// Returns zero when `parts` is zero.
    pub fn installment(&self, parts: u32) -> Money {
        if parts == 0 {
            return Money::default();
        }
        let parts = u128::from(parts);
        let doubled = u128::from(self.amount_cents.unsigned_abs()) * 2;
        let magnitude = (doubled + parts) / (parts * 2);
        // Only the magnitude of i64::MIN does not fit; it saturates.
        let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
        Money::brl(magnitude * self.amount_cents.signum())
    }

    /// Percentage saved going from `original` down to `self`, rounded.
    ///
    /// Returns zero for a zero original price.
    pub fn discount_from(&self, original: &Money) -> i64 {
        if original.amount_cents == 0 {
            return 0;
        }
        let saved = (original.amount_cents - self.amount_cents) as f64;
        (saved / original.amount_cents as f64 * 100.0).round() as i64
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl_display() {
        assert_eq!(Money::brl(89990).display(), "R$ 899,90");
        assert_eq!(Money::brl(129990).display(), "R$ 1.299,90");
        assert_eq!(Money::brl(1990).display(), "R$ 19,90");
        assert_eq!(Money::brl(5).display(), "R$ 0,05");
        assert_eq!(Money::brl(123456789).display(), "R$ 1.234.567,89");
        assert_eq!(Money::brl(-1500).display(), "-R$ 15,00");
    }

    #[test]
    fn test_installment_rounds_to_nearest_cent() {
        assert_eq!(Money::brl(89990).installment(12), Money::brl(7499));
        assert_eq!(Money::brl(1000).installment(3), Money::brl(333));
        assert_eq!(Money::brl(1001).installment(2), Money::brl(501));
        assert_eq!(Money::brl(1000).installment(0), Money::brl(0));
        assert_eq!(Money::brl(-1001).installment(2), Money::brl(-501));
    }

    #[test]
    fn test_installment_of_extreme_amounts() {
        assert_eq!(Money::brl(i64::MAX).installment(1), Money::brl(i64::MAX));
        assert_eq!(Money::brl(i64::MIN + 1).installment(1), Money::brl(i64::MIN + 1));
        assert_eq!(
            Money::brl(i64::MAX).installment(12),
            Money::brl(768_614_336_404_564_651)
        );
    }

    #[test]
    fn test_discount_from() {
        let price = Money::brl(89990);
        assert_eq!(price.discount_from(&Money::brl(129990)), 31);
        assert_eq!(price.discount_from(&price), 0);
        assert_eq!(price.discount_from(&Money::brl(0)), 0);
    }
}

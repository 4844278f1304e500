//! Shipping options shown once a destination is known.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shipping option with its price and delivery window in business days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingOption {
    /// Display name.
    pub name: String,
    /// Shipping price.
    pub price: Money,
    /// Minimum delivery business days.
    pub min_days: u32,
    /// Maximum delivery business days.
    pub max_days: u32,
}

impl ShippingOption {
    /// Create a new shipping option.
    pub fn new(name: impl Into<String>, price: Money, min_days: u32, max_days: u32) -> Self {
        Self {
            name: name.into(),
            price,
            min_days,
            max_days: max_days.max(min_days),
        }
    }

    /// Check if this is free shipping.
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    /// Delivery window, e.g. "2 dias úteis" or "5 a 7 dias úteis".
    pub fn delivery_window(&self) -> String {
        let unit = if self.max_days == 1 {
            "dia útil"
        } else {
            "dias úteis"
        };
        if self.min_days == self.max_days {
            format!("{} {}", self.max_days, unit)
        } else {
            format!("{} a {} {}", self.min_days, self.max_days, unit)
        }
    }

    /// Customer-facing estimate.
    ///
    /// Free options read "Chegará entre 5 a 7 dias úteis"; paid ones read
    /// "R$ 19,90 - 2 dias úteis".
    pub fn estimate(&self) -> String {
        if !self.is_free() {
            return format!("{} - {}", self.price.display(), self.delivery_window());
        }
        if self.min_days == self.max_days {
            format!("Chegará em {}", self.delivery_window())
        } else {
            format!("Chegará entre {}", self.delivery_window())
        }
    }
}

/// The options offered for any resolved address.
pub fn standard_options() -> Vec<ShippingOption> {
    vec![
        ShippingOption::new("Frete Grátis", Money::brl(0), 5, 7),
        ShippingOption::new("Expresso", Money::brl(1990), 2, 2),
    ]
}

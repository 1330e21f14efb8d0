//! Billing currencies and currency-tagged amounts.
//!
//! Amounts are `rust_decimal::Decimal` in major units; floats never touch money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::format_amount;

/// An amount together with the currency it is billed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g., 1500.50 Naira).
    pub amount: Decimal,
    /// Currency the amount is denominated in.
    pub currency: Currency,
}

/// Currencies a bill can be issued in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Nigerian Naira
    #[default]
    Ngn,
    /// US Dollar
    Usd,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Self; 2] = [Self::Ngn, Self::Usd];

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ngn => "NGN",
            Self::Usd => "USD",
        }
    }

    /// Symbol shown in front of formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ngn => "₦",
            Self::Usd => "$",
        }
    }

    /// Name of the major unit as written on receipts.
    #[must_use]
    pub const fn major_unit(self) -> &'static str {
        match self {
            Self::Ngn => "Naira",
            Self::Usd => "Dollars",
        }
    }

    /// Name of the minor (hundredth) unit as written on receipts.
    #[must_use]
    pub const fn minor_unit(self) -> &'static str {
        match self {
            Self::Ngn => "Kobo",
            Self::Usd => "Cents",
        }
    }
}

impl Money {
    /// Pairs an amount with its currency.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Nothing, in `currency`.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true for amounts below zero; negative zero does not count.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

impl std::fmt::Display for Money {
    /// Formats as symbol plus grouped amount, e.g. `₦1,500.50` or `-$20.00`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = format_amount(self.amount.abs());
        if self.is_negative() {
            write!(f, "-{}{formatted}", self.currency.symbol())
        } else {
            write!(f, "{}{formatted}", self.currency.symbol())
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NGN" => Ok(Self::Ngn),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

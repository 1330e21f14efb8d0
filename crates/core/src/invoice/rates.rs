//! Nightly room rates keyed by room type and currency.

use std::collections::HashMap;

use rust_decimal::Decimal;

use folio_shared::config::BillingConfig;
use folio_shared::format::clamp_amount;
use folio_shared::types::{Currency, RoomType};

/// Lookup of the default nightly rate for a room type in a currency.
pub trait RateTable {
    /// Returns the nightly rate.
    fn rate_for(&self, room_type: RoomType, currency: Currency) -> Decimal;
}

/// Built-in rate card with optional per-entry overrides.
#[derive(Debug, Clone, Default)]
pub struct StandardRates {
    overrides: HashMap<(RoomType, Currency), Decimal>,
}

impl StandardRates {
    /// Creates the built-in rate card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the rate card with the overrides listed in configuration.
    #[must_use]
    pub fn from_config(config: &BillingConfig) -> Self {
        config
            .rates
            .iter()
            .fold(Self::new(), |rates, entry| {
                rates.with_rate(entry.room_type, entry.currency, entry.rate)
            })
    }

    /// Overrides one rate, clamped to `0..=MAX_AMOUNT`.
    #[must_use]
    pub fn with_rate(mut self, room_type: RoomType, currency: Currency, rate: Decimal) -> Self {
        self.overrides
            .insert((room_type, currency), clamp_amount(rate));
        self
    }

    /// The rate card shipped with the application.
    #[must_use]
    pub fn base_rate(room_type: RoomType, currency: Currency) -> Decimal {
        match (currency, room_type) {
            (Currency::Ngn, RoomType::Standard) => Decimal::from(25_000),
            (Currency::Ngn, RoomType::Deluxe) => Decimal::from(35_000),
            (Currency::Ngn, RoomType::Executive) => Decimal::from(50_000),
            (Currency::Ngn, RoomType::Suite) => Decimal::from(80_000),
            (Currency::Usd, RoomType::Standard) => Decimal::from(30),
            (Currency::Usd, RoomType::Deluxe) => Decimal::from(45),
            (Currency::Usd, RoomType::Executive) => Decimal::from(65),
            (Currency::Usd, RoomType::Suite) => Decimal::from(100),
        }
    }
}

impl RateTable for StandardRates {
    fn rate_for(&self, room_type: RoomType, currency: Currency) -> Decimal {
        self.overrides
            .get(&(room_type, currency))
            .copied()
            .unwrap_or_else(|| Self::base_rate(room_type, currency))
    }
}

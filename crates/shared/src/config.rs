//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{Currency, RoomType, SubtotalPolicy};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing defaults for new invoices.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Ledger storage configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Billing defaults applied to freshly created records.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Currency for new invoices and walk-in bills.
    #[serde(default)]
    pub default_currency: Currency,
    /// Room type preselected on new invoices.
    #[serde(default)]
    pub default_room_type: RoomType,
    /// Tax percentage preselected on new invoices (7.5 means 7.5%).
    #[serde(default = "default_tax_percentage")]
    pub default_tax_percentage: Decimal,
    /// Policy for discounts larger than the charges.
    #[serde(default)]
    pub subtotal_policy: SubtotalPolicy,
    /// Nightly rates that replace the built-in table.
    #[serde(default)]
    pub rates: Vec<RateOverride>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            default_room_type: RoomType::default(),
            default_tax_percentage: default_tax_percentage(),
            subtotal_policy: SubtotalPolicy::default(),
            rates: Vec::new(),
        }
    }
}

fn default_tax_percentage() -> Decimal {
    Decimal::new(75, 1) // 7.5% VAT
}

/// A single nightly rate override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateOverride {
    /// Room type the rate applies to.
    pub room_type: RoomType,
    /// Currency the rate is quoted in.
    pub currency: Currency,
    /// Rate per night.
    pub rate: Decimal,
}

/// Ledger storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the file-backed store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Key the serialized ledger is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_storage_key() -> String {
    "hotel_transactions".to_string()
}

impl AppConfig {
    /// Loads configuration from `.env`, config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `FOLIO__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

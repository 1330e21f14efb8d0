//! Room classification and billing policy enums.

use serde::{Deserialize, Serialize};

/// Room classification used to pick a nightly rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// Standard room.
    #[default]
    Standard,
    /// Deluxe room.
    Deluxe,
    /// Executive room.
    Executive,
    /// Suite.
    Suite,
}

impl RoomType {
    /// All room types, cheapest first.
    pub const ALL: [Self; 4] = [Self::Standard, Self::Deluxe, Self::Executive, Self::Suite];

    /// Returns the label printed on receipts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Deluxe => "Deluxe",
            Self::Executive => "Executive",
            Self::Suite => "Suite",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "deluxe" => Ok(Self::Deluxe),
            "executive" => Ok(Self::Executive),
            "suite" => Ok(Self::Suite),
            _ => Err(format!("Unknown room type: {s}")),
        }
    }
}

/// What to do when a discount exceeds the room and additional charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtotalPolicy {
    /// Subtotal never drops below zero; tax and amount received follow.
    #[default]
    ClampToZero,
    /// A negative subtotal flows through to tax and amount received.
    AllowNegative,
}

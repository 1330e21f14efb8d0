//! Common types used across the application.

pub mod id;
pub mod money;
pub mod room;

pub use id::ChargeItemId;
pub use money::{Currency, Money};
pub use room::{RoomType, SubtotalPolicy};

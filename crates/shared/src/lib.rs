//! Shared types, formatting helpers, and configuration for Folio.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency types with decimal precision
//! - Room classification and billing policy enums
//! - Typed IDs for charge lines
//! - Currency-aware formatting and lenient amount parsing
//! - Configuration management
//! - Tracing setup

pub mod config;
pub mod format;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;

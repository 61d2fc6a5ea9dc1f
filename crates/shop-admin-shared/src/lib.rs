//! # Shop Admin Shared
//!
//! Configuration, telemetry, and constants shared by the shop admin crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::Settings;
pub use error::AppError;

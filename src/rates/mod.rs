pub mod selector;
pub mod treasury;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use treasury::TreasuryRateProvider;

/// Source of the exchange rate used to convert a transaction.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rate in effect for `country` shortly before the instant `at`.
    async fn fetch_rate(&self, at: DateTime<Utc>, country: &str) -> Result<f64>;
}

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::{error::Result, models::Transaction};

pub use postgres::PgTransactionStore;

/// Persistence for checkout transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert_transaction(
        &self,
        description: &str,
        transaction_date: DateTime<Utc>,
        transaction_value: f64,
    ) -> Result<i64>;

    /// Fails with `NotFoundError::Transaction` when no row has this id.
    async fn select_transaction_by_id(&self, id: i64) -> Result<Transaction>;

    /// Rows dated on `date`, ordered by id.
    async fn select_transactions(
        &self,
        date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>>;

    async fn select_transactions_total(&self, date: NaiveDate) -> Result<i64>;
}

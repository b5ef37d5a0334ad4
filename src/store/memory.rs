use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::TransactionStore;
use crate::{
    error::{NotFoundError, Result},
    models::Transaction,
};

/// In-memory store with sequential ids starting at 1.
#[derive(Default)]
pub struct MemoryTransactionStore {
    rows: Mutex<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn on_date(&self, date: NaiveDate) -> Vec<Transaction> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.transaction_date.date_naive() == date)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert_transaction(
        &self,
        description: &str,
        transaction_date: DateTime<Utc>,
        transaction_value: f64,
    ) -> Result<i64> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(Transaction {
            id,
            description: description.to_string(),
            transaction_date,
            transaction_value,
        });
        Ok(id)
    }

    async fn select_transaction_by_id(&self, id: i64) -> Result<Transaction> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| NotFoundError::Transaction(id).into())
    }

    async fn select_transactions(
        &self,
        date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .on_date(date)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn select_transactions_total(&self, date: NaiveDate) -> Result<i64> {
        Ok(self.on_date(date).len() as i64)
    }
}

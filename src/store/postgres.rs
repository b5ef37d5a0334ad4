use std::str::FromStr;

use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{prelude::*, Pool, Postgres};

use super::TransactionStore;
use crate::{
    error::{CheckoutError, NotFoundError, Result},
    models::Transaction,
};

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    description: String,
    transaction_date: DateTime<Utc>,
    transaction_value: BigDecimal,
}

impl From<TransactionRow> for Transaction {
    fn from(r: TransactionRow) -> Self {
        Transaction {
            id: r.id,
            description: r.description,
            transaction_date: r.transaction_date,
            transaction_value: r.transaction_value.to_f64().unwrap_or_default(),
        }
    }
}

fn to_numeric(value: f64) -> Result<BigDecimal> {
    BigDecimal::from_str(&format!("{:.2}", value))
        .map_err(|err| CheckoutError::Persistence(sqlx::Error::Encode(Box::new(err))))
}

#[derive(Clone)]
pub struct PgTransactionStore {
    p: Pool<Postgres>,
}

impl PgTransactionStore {
    pub fn new(p: Pool<Postgres>) -> Self {
        Self { p }
    }
}

fn log_db_error(op: &str, err: sqlx::Error) -> CheckoutError {
    log::error!("{} failed: {}", op, err);
    CheckoutError::Persistence(err)
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert_transaction(
        &self,
        description: &str,
        transaction_date: DateTime<Utc>,
        transaction_value: f64,
    ) -> Result<i64> {
        let id: i64 = sqlx::query(
            r#"
            INSERT INTO transactions (description, transaction_date, transaction_value)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(description)
        .bind(transaction_date)
        .bind(to_numeric(transaction_value)?)
        .fetch_one(&self.p)
        .await
        .map_err(|err| log_db_error("insert transaction", err))?
        .try_get(0)
        .map_err(|err| log_db_error("insert transaction", err))?;

        Ok(id)
    }

    async fn select_transaction_by_id(&self, id: i64) -> Result<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, description, transaction_date, transaction_value
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.p)
        .await
        .map_err(|err| log_db_error("select transaction", err))?;

        row.map(Transaction::from)
            .ok_or_else(|| NotFoundError::Transaction(id).into())
    }

    async fn select_transactions(
        &self,
        date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, description, transaction_date, transaction_value
            FROM transactions
            WHERE (transaction_date AT TIME ZONE 'UTC')::date = $1
            ORDER BY id
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.p)
        .await
        .map_err(|err| log_db_error("select transactions", err))?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn select_transactions_total(&self, date: NaiveDate) -> Result<i64> {
        let count: i64 = sqlx::query(
            r#"
            SELECT count(*)
            FROM transactions
            WHERE (transaction_date AT TIME ZONE 'UTC')::date = $1
            "#,
        )
        .bind(date)
        .fetch_one(&self.p)
        .await
        .map_err(|err| log_db_error("count transactions", err))?
        .try_get(0)
        .map_err(|err| log_db_error("count transactions", err))?;

        Ok(count)
    }
}

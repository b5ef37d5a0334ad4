use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    error::{Result, ValidationError},
    models::{EnrichedTransaction, TransactionPage},
    money::round2,
    rates::{
        selector::{start_of_day, EFFECTIVE_DATE_FORMAT},
        RateProvider,
    },
    store::TransactionStore,
};

pub const MAX_DESCRIPTION_LEN: usize = 50;
pub const TRANSACTION_DATE_FILTER: &str = "transaction_date";

pub fn validate_description(description: &str) -> std::result::Result<(), ValidationError> {
    let len = description.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyDescription);
    }
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

pub fn validate_value(value: f64) -> std::result::Result<(), ValidationError> {
    // `!(x > 0)` also rejects NaN
    if !(value > 0.0) {
        return Err(ValidationError::NonPositiveValue);
    }
    Ok(())
}

#[derive(Clone)]
pub struct CheckoutService {
    store: Arc<dyn TransactionStore>,
    rates: Arc<dyn RateProvider>,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn TransactionStore>, rates: Arc<dyn RateProvider>) -> Self {
        Self { store, rates }
    }

    pub async fn create_transaction(
        &self,
        description: &str,
        transaction_date: DateTime<Utc>,
        transaction_value: f64,
    ) -> Result<i64> {
        validate_description(description)?;
        validate_value(transaction_value)?;

        let id = self
            .store
            .insert_transaction(description, transaction_date, round2(transaction_value))
            .await?;
        log::info!("created transaction {}", id);

        Ok(id)
    }

    pub async fn get_by_id(&self, id: i64, country: &str) -> Result<EnrichedTransaction> {
        let transaction = self.store.select_transaction_by_id(id).await?;
        let rate = self
            .rates
            .fetch_rate(transaction.transaction_date, country)
            .await?;

        Ok(EnrichedTransaction::new(transaction, rate))
    }

    /// Every row of a page shares the transaction date filter, so the whole
    /// page is converted with a single rate.
    pub async fn get_list(
        &self,
        filters: &HashMap<String, String>,
        limit: i64,
        offset: i64,
        country: &str,
    ) -> Result<TransactionPage> {
        let raw_date = filters
            .get(TRANSACTION_DATE_FILTER)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingFilter(TRANSACTION_DATE_FILTER))?;

        let date = NaiveDate::parse_from_str(raw_date, EFFECTIVE_DATE_FORMAT).map_err(|_| {
            ValidationError::InvalidFilter {
                name: TRANSACTION_DATE_FILTER,
                value: raw_date.to_string(),
            }
        })?;

        let transactions = self.store.select_transactions(date, limit, offset).await?;
        let rate = self.rates.fetch_rate(start_of_day(date), country).await?;
        let data = transactions
            .into_iter()
            .map(|t| EnrichedTransaction::new(t, rate))
            .collect();
        let total = self.store.select_transactions_total(date).await?;

        Ok(TransactionPage { data, total })
    }
}

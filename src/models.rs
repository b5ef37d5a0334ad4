use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::money::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub transaction_date: DateTime<Utc>,
    pub transaction_value: f64,
}

/// A transaction together with the rate used to convert it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub exchange_rate: f64,
    #[serde(rename = "transaction_value_converted_to_wish_currency")]
    pub converted_value: f64,
}

impl EnrichedTransaction {
    pub fn new(transaction: Transaction, exchange_rate: f64) -> Self {
        let converted_value = round2(transaction.transaction_value * exchange_rate);
        Self {
            transaction,
            exchange_rate: round2(exchange_rate),
            converted_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    pub data: Vec<EnrichedTransaction>,
    pub total: i64,
}

/// One row of the Treasury rates of exchange dataset. Missing or `null`
/// columns read as empty strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeRateRecord {
    #[serde_as(as = "DefaultOnNull")]
    pub record_date: String,
    #[serde_as(as = "DefaultOnNull")]
    pub country: String,
    #[serde_as(as = "DefaultOnNull")]
    pub currency: String,
    #[serde_as(as = "DefaultOnNull")]
    pub country_currency_desc: String,
    #[serde_as(as = "DefaultOnNull")]
    pub exchange_rate: String,
    #[serde_as(as = "DefaultOnNull")]
    pub effective_date: String,
    #[serde_as(as = "DefaultOnNull")]
    pub src_line_nbr: String,
    #[serde_as(as = "DefaultOnNull")]
    pub record_fiscal_year: String,
    #[serde_as(as = "DefaultOnNull")]
    pub record_fiscal_quarter: String,
    #[serde_as(as = "DefaultOnNull")]
    pub record_calendar_year: String,
    #[serde_as(as = "DefaultOnNull")]
    pub record_calendar_quarter: String,
    #[serde_as(as = "DefaultOnNull")]
    pub record_calendar_month: String,
    #[serde_as(as = "DefaultOnNull")]
    pub record_calendar_day: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    pub data: Vec<ExchangeRateRecord>,
    #[serde(default)]
    pub meta: Meta,
}

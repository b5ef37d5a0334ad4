use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode, Url};

use super::{
    selector::{select_closest, EFFECTIVE_DATE_FORMAT},
    RateProvider,
};
use crate::{
    error::{CheckoutError, Result},
    models::RatesResponse,
};

const RATES_OF_EXCHANGE_PATH: &str = "/v1/accounting/od/rates_of_exchange";

/// Reads rates from the Treasury Reporting Rates of Exchange dataset.
pub struct TreasuryRateProvider {
    base_url: String,
    client: Client,
}

impl TreasuryRateProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CheckoutError::UpstreamUnavailable(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, date: NaiveDate, country: &str) -> Result<Url> {
        let filter = format!(
            "country:eq:{},effective_date:lte:{}",
            title_case(country),
            date.format(EFFECTIVE_DATE_FORMAT)
        );

        Url::parse_with_params(
            &format!("{}{}", self.base_url, RATES_OF_EXCHANGE_PATH),
            &[("filter", filter.as_str()), ("sort", "-effective_date")],
        )
        .map_err(|err| CheckoutError::UpstreamUnavailable(format!("cannot build request: {}", err)))
    }

    async fn fetch_records(&self, date: NaiveDate, country: &str) -> Result<RatesResponse> {
        let url = self.url(date, country)?;
        log::debug!("requesting exchange rates: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| CheckoutError::UpstreamUnavailable(err.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(CheckoutError::UpstreamUnavailable(format!(
                "request failed with status {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|err| CheckoutError::UpstreamUnavailable(err.to_string()))?;

        serde_json::from_str(&text).map_err(|err| {
            log::error!("cannot decode exchange rate response: {}", err);
            CheckoutError::MalformedResponse(err.to_string())
        })
    }
}

#[async_trait]
impl RateProvider for TreasuryRateProvider {
    async fn fetch_rate(&self, at: DateTime<Utc>, country: &str) -> Result<f64> {
        let date = at.date_naive();
        let response = self.fetch_records(date, country).await?;
        log::debug!(
            "received {} exchange rate records (meta count {}) for {} up to {}",
            response.data.len(),
            response.meta.count,
            country,
            date
        );

        let record = select_closest(&response.data, at).map_err(|err| {
            log::warn!("no exchange rate for {} near {}", country, at);
            err
        })?;

        record.exchange_rate.trim().parse::<f64>().map_err(|err| {
            CheckoutError::MalformedResponse(format!(
                "exchange rate '{}' is not a number: {}",
                record.exchange_rate, err
            ))
        })
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Apostrophes stay inside a word, so "cote d'ivoire" becomes "Cote D'ivoire".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_word = true;

    for c in s.chars() {
        if c.is_alphanumeric() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = c != '\'' && c != '’';
        }
    }

    out
}

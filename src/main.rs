mod config;
mod error;
mod front;
mod messages;
mod migration;
pub mod models;
mod money;
mod rates;
mod service;
mod store;

use std::sync::Arc;

use anyhow::Context;
use env_logger::Env;
use sqlx::postgres::PgPoolOptions;

use crate::{
    config::Config, front::AppState, messages::Messages, rates::TreasuryRateProvider,
    service::CheckoutService, store::PgTransactionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::try_init_from_env(Env::default().default_filter_or("checkout=info"))?;

    let config = Config::from_env()?;
    let messages = Messages::load(&config.error_messages_path)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("cannot connect to the database")?;

    migration::migrate(&pool, &config.migrations_path).await?;

    let rates = TreasuryRateProvider::new(&config.rates_base_url, config.rates_timeout)
        .context("cannot build the exchange rate client")?;
    let service = CheckoutService::new(
        Arc::new(PgTransactionStore::new(pool)),
        Arc::new(rates),
    );

    front::start_web_server(&config.bind_address, AppState { service, messages }).await
}

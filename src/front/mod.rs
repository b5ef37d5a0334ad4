pub mod checkout;
pub mod query;

use anyhow::Context;
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::CheckoutError,
    messages::{ErrorBody, Messages},
    service::CheckoutService,
};

#[derive(Clone)]
pub struct AppState {
    pub service: CheckoutService,
    pub messages: Messages,
}

pub fn new_router(state: AppState) -> Router {
    Router::new()
        .route("/api/checkout", post(checkout::insert_transaction))
        .route(
            "/api/checkout/transactions/country/:country",
            get(checkout::get_list),
        )
        .route(
            "/api/checkout/transactions/:transactionID/country/:country",
            get(checkout::get_by_id),
        )
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

pub async fn start_web_server(address: &str, state: AppState) -> anyhow::Result<()> {
    let app = new_router(state);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("cannot bind {}", address))?;
    log::info!("listening on http://{}", address);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Error returned to API clients as `400 {key, message}`.
#[derive(Debug)]
pub struct ApiError(ErrorBody);

impl ApiError {
    pub fn new(err: CheckoutError, s: &AppState) -> ApiError {
        log::warn!("request failed: {}", err);
        Self(s.messages.resolve(err.key(), err.detail().as_deref()))
    }

    pub fn request(key: &str, detail: impl AsRef<str>, s: &AppState) -> ApiError {
        log::warn!("bad request: {} {}", key, detail.as_ref());
        Self(s.messages.resolve(key, Some(detail.as_ref())))
    }

    pub fn unmapped(err: anyhow::Error, s: &AppState) -> ApiError {
        Self::request("error.unmapped", err.to_string(), s)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

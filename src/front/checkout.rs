use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{query, ApiError, AppState};
use crate::models::EnrichedTransaction;

#[derive(Debug, Deserialize)]
pub struct InsertTransaction {
    pub description: String,
    pub transaction_date: DateTime<Utc>,
    pub transaction_value: f64,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct List<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
}

#[axum::debug_handler]
pub async fn insert_transaction(
    State(s): State<AppState>,
    payload: Result<Json<InsertTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Json(req) =
        payload.map_err(|err| ApiError::request("error.request.body.invalid", err.body_text(), &s))?;

    let id = s
        .service
        .create_transaction(&req.description, req.transaction_date, req.transaction_value)
        .await
        .map_err(|err| ApiError::new(err, &s))?;

    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[axum::debug_handler]
pub async fn get_by_id(
    State(s): State<AppState>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Result<Json<EnrichedTransaction>, ApiError> {
    let Path(params) = params.map_err(|err| ApiError::unmapped(err.into(), &s))?;

    let id = path_param(&params, "transactionID", &s)?;
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::request("error.request.path.param.invalid", "transactionID", &s))?;
    let country = path_param(&params, "country", &s)?;

    let transaction = s
        .service
        .get_by_id(id, country)
        .await
        .map_err(|err| ApiError::new(err, &s))?;

    Ok(Json(transaction))
}

#[axum::debug_handler]
pub async fn get_list(
    State(s): State<AppState>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    q: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<List<EnrichedTransaction>>, ApiError> {
    let Path(params) = params.map_err(|err| ApiError::unmapped(err.into(), &s))?;
    let Query(q) = q.map_err(|err| ApiError::unmapped(err.into(), &s))?;

    let country = path_param(&params, "country", &s)?;
    let q = query::Query::from_params(q).normalize();

    let page = s
        .service
        .get_list(&q.filters, q.limit(), q.offset(), country)
        .await
        .map_err(|err| ApiError::new(err, &s))?;

    Ok(Json(List {
        pagination: Pagination { total: page.total },
        data: page.data,
    }))
}

fn path_param<'a>(
    params: &'a HashMap<String, String>,
    name: &str,
    s: &AppState,
) -> Result<&'a str, ApiError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::request("error.request.path.param.invalid", name, s))
}

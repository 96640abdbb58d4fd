pub mod activity;
pub mod analytics;
pub mod catalog;
pub mod detection;
pub mod health;
pub mod history;
pub mod market;
pub mod prediction;
pub mod schemes;

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;

use crate::api::error::ApiError;

/// Unwrap query parameters, answering 400 when they do not parse.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Blank filters behave as if absent.
pub(crate) fn filter(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

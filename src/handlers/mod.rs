//! HTTP handlers for apartments, reservations, images and the status catalog.

pub mod apartments;
pub mod catalog;
pub mod images;
pub mod reservations;

use crate::config::ListFailurePolicy;
use crate::error::AppError;
use std::collections::HashMap;
use std::str::FromStr;

/// Path ids are integers; anything else is a bad request. Non-positive ids parse and later miss.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Text query parameter; empty counts as absent.
fn text_param(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

fn number_param<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Result<Option<T>, AppError> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be a number, got '{}'", key, v))),
    }
}

/// Under `Degrade` a failed list is logged and answered as empty.
fn apply_list_policy<T>(policy: ListFailurePolicy, result: Result<Vec<T>, AppError>) -> Result<Vec<T>, AppError> {
    match (policy, result) {
        (ListFailurePolicy::Degrade, Err(e)) => {
            tracing::error!(error = %e, "list failed; answering with an empty list");
            Ok(Vec::new())
        }
        (_, result) => result,
    }
}

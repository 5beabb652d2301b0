//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::CREATED,
        Json(SuccessOne {
            data,
            meta: None,
        }),
    )
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            data,
            meta: None,
        }),
    )
}

/// 200 with a meta object, e.g. `{"changed": false}` after an update.
pub fn success_one_meta<T: Serialize>(data: T, meta: serde_json::Value) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            data,
            meta: Some(meta),
        }),
    )
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}

/// Error envelope for failures raised outside `AppError` (e.g. the router fallback).
pub fn error_body(code: &str, message: String, details: Option<serde_json::Value>) -> serde_json::Value {
    let mut error = serde_json::json!({
        "code": code,
        "message": message,
    });
    if let Some(details) = details {
        error["details"] = details;
    }
    serde_json::json!({ "error": error })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_counts_rows() {
        let (status, Json(body)) = success_many(vec![1, 2, 3]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.meta.count, 3);
    }

    #[test]
    fn error_body_omits_empty_details() {
        let body = error_body("not_found", "no route for /x".into(), None);
        assert_eq!(body["error"]["code"], "not_found");
        assert!(body["error"].get("details").is_none());
        let body = error_body("bad_request", "bad".into(), Some(serde_json::json!({ "field": "id" })));
        assert_eq!(body["error"]["details"]["field"], "id");
    }
}

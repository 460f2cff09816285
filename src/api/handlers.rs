//! Management API handlers for proxy definitions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::server::AppState;
use crate::store::{NewProxy, ProxyPatch, ProxyTarget, StoreError};

fn store_error_response(err: StoreError) -> Response {
    let status = match &err {
        StoreError::Duplicate => StatusCode::BAD_REQUEST,
        StoreError::Missing => StatusCode::NOT_FOUND,
        StoreError::Io(_) | StoreError::Serde(_) => {
            tracing::error!(error = %err, "proxy store operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "detail": err.to_string() }))).into_response()
}

pub async fn list_proxies(State(state): State<AppState>) -> Json<Vec<ProxyTarget>> {
    Json(state.store.list())
}

pub async fn create_proxy(
    State(state): State<AppState>,
    Json(new): Json<NewProxy>,
) -> Response {
    match state.store.create(new) {
        Ok(record) => {
            tracing::info!(proxy_id = %record.id, target = %record.target_url, "proxy created");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub async fn update_proxy(
    State(state): State<AppState>,
    Path(proxy_id): Path<String>,
    Json(patch): Json<ProxyPatch>,
) -> Response {
    match state.store.update(&proxy_id, patch) {
        Ok(record) => {
            tracing::info!(proxy_id = %record.id, enabled = record.enabled, "proxy updated");
            Json(record).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub async fn delete_proxy(
    State(state): State<AppState>,
    Path(proxy_id): Path<String>,
) -> Response {
    match state.store.delete(&proxy_id) {
        Ok(()) => {
            tracing::info!(proxy_id = %proxy_id, "proxy deleted");
            Json(json!({ "success": true })).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

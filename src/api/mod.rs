//! Management API for proxy definitions.
//!
//! CRUD over the store, mounted under `/_rproxy` so it can never collide
//! with a proxied application's own routes.

pub mod handlers;

use axum::routing::{get, put};
use axum::Router;

use crate::http::server::AppState;
use self::handlers::*;

pub fn management_router() -> Router<AppState> {
    Router::new()
        .route("/_rproxy/proxies", get(list_proxies).post(create_proxy))
        .route(
            "/_rproxy/proxies/{proxy_id}",
            put(update_proxy).delete(delete_proxy),
        )
}

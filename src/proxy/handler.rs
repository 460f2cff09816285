//! Proxy request handler.
//!
//! Orchestrates the pipeline per inbound request: resolve the proxy id,
//! sanitize inbound headers, forward, dispatch on content type for
//! rewriting, sanitize outbound headers, respond. A linear pipeline with
//! early-exit branches — there is no state machine here and no state left
//! behind after the response.

use std::time::Instant;

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::error::ProxyError;
use crate::proxy::forwarder::UpstreamResponse;
use crate::proxy::headers::{sanitize_inbound, sanitize_outbound};
use crate::rewrite::{rewrite_css, rewrite_html, RewriteContext};

/// `/proxy/{proxy_id}` and `/proxy/{proxy_id}/` — forward to the target root.
pub async fn proxy_root(
    State(state): State<AppState>,
    Path(proxy_id): Path<String>,
    request: Request,
) -> Response {
    handle(state, proxy_id, String::new(), request).await
}

/// `/proxy/{proxy_id}/{*path}` — forward the path remainder.
pub async fn proxy_path(
    State(state): State<AppState>,
    Path((proxy_id, path)): Path<(String, String)>,
    request: Request,
) -> Response {
    handle(state, proxy_id, path, request).await
}

async fn handle(state: AppState, proxy_id: String, path: String, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = match run_pipeline(&state, &proxy_id, &path, request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };

    metrics::record_request(
        method.as_str(),
        response.status().as_u16(),
        &proxy_id,
        start,
    );
    response
}

async fn run_pipeline(
    state: &AppState,
    proxy_id: &str,
    path: &str,
    request: Request,
) -> Result<Response, ProxyError> {
    let resolved = state.resolver.lookup(proxy_id)?;
    let ctx = RewriteContext::new(resolved.id, resolved.target_origin);

    let method = request.method().clone();
    let query = request.uri().query().map(str::to_string);
    let headers = sanitize_inbound(request.headers(), &ctx);

    let body = if method == Method::POST || method == Method::PUT || method == Method::PATCH {
        let bytes = axum::body::to_bytes(request.into_body(), state.config.listener.max_body_bytes)
            .await
            .map_err(|err| ProxyError::Internal(format!("failed to read request body: {}", err)))?;
        Some(bytes)
    } else {
        None
    };

    let upstream = state
        .forwarder
        .forward(method, &ctx, path, query.as_deref(), headers, body)
        .await?;

    Ok(build_response(upstream, &ctx, path))
}

/// Content-type dispatch: HTML and CSS bodies are decoded and rewritten,
/// everything else passes through untouched.
fn build_response(upstream: UpstreamResponse, ctx: &RewriteContext, path: &str) -> Response {
    let content_type = upstream
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.contains("text/html") {
        let text = String::from_utf8_lossy(&upstream.body);
        let outcome = rewrite_html(&text, ctx);
        let headers = sanitize_outbound(&upstream.headers, true);
        return respond(upstream.status, headers, Body::from(outcome.into_body()));
    }

    if content_type.contains("text/css") || path.ends_with(".css") {
        let text = String::from_utf8_lossy(&upstream.body);
        let rewritten = rewrite_css(&text, ctx.base_path());
        let headers = sanitize_outbound(&upstream.headers, true);
        return respond(upstream.status, headers, Body::from(rewritten));
    }

    let headers = sanitize_outbound(&upstream.headers, false);
    respond(upstream.status, headers, Body::from(upstream.body))
}

fn respond(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

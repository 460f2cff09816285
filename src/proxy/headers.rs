//! Header sanitization for both proxy directions.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers before forwarding and before responding
//! - Point `host`/`origin`/`referer` at the target origin on the way in
//! - Strip frame-blocking headers and add permissive CORS on the way out
//! - Drop payload headers that no longer describe a rewritten body
//!
//! # Design Decisions
//! - Pure functions over `http::HeaderMap` (case-insensitive by
//!   construction); the header sets are fixed constants
//! - A `content-length` that disagrees with the actual body is worse than
//!   none at all, so both payload headers go whenever the body was decoded

use axum::http::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::rewrite::RewriteContext;

/// Connection-scoped headers that must not cross a proxy boundary.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    "host",
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

/// Response headers that prevent the target from loading in an iframe.
pub const FRAME_BLOCKING_HEADERS: &[&str] = &[
    "x-frame-options",
    "content-security-policy",
    "content-security-policy-report-only",
];

fn authority(origin: &Url) -> String {
    let host = origin.host_str().unwrap_or_default();
    match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name)
}

/// Prepare client headers for forwarding to the target.
pub fn sanitize_inbound(headers: &HeaderMap, ctx: &RewriteContext) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }

    let authority = authority(&ctx.target_origin);
    let scheme = ctx.target_origin.scheme();

    if let Ok(value) = HeaderValue::from_str(&authority) {
        out.insert(header::HOST, value);
    }

    if out.contains_key(header::ORIGIN) {
        if let Ok(value) = HeaderValue::from_str(&format!("{}://{}", scheme, authority)) {
            out.insert(header::ORIGIN, value);
        }
    }

    // Referer keeps its path but moves to the target origin — only when it
    // points into this proxy's own prefix. A referer naming another proxy
    // id passes through untouched.
    if let Some(referer) = out
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
    {
        let marker = format!("{}/", ctx.base_path());
        if let Some(pos) = referer.find(&marker) {
            let rest = &referer[pos + marker.len()..];
            if let Ok(value) =
                HeaderValue::from_str(&format!("{}://{}/{}", scheme, authority, rest))
            {
                out.insert(header::REFERER, value);
            }
        }
    }

    out
}

/// Prepare upstream response headers for the client.
///
/// `body_mutated` must be true whenever the body was decoded or rewritten;
/// the payload headers are dropped so a stale declared length can never
/// disagree with the actual body.
pub fn sanitize_outbound(headers: &HeaderMap, body_mutated: bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len() + 3);
    for (name, value) in headers {
        let name_str = name.as_str();
        if is_hop_by_hop(name_str) || FRAME_BLOCKING_HEADERS.contains(&name_str) {
            continue;
        }
        if body_mutated
            && (name == header::CONTENT_ENCODING || name == header::CONTENT_LENGTH)
        {
            continue;
        }
        out.append(name.clone(), value.clone());
    }

    out.insert(
        "access-control-allow-origin",
        HeaderValue::from_static("*"),
    );
    out.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE, PATCH, OPTIONS"),
    );
    out.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("*"),
    );

    out
}

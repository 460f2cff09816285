//! Outbound request forwarding.
//!
//! # Responsibilities
//! - Build the outbound URL from target origin, path remainder and query
//! - Issue exactly one attempt with redirect-following and a fixed timeout
//! - Hand back upstream status, headers and (decoded) body bytes
//!
//! # Design Decisions
//! - No retries and no idle connection pooling: each request's outbound
//!   call is a scoped acquisition, released on every exit path
//! - Compressed upstream bodies are decoded transparently; the client
//!   drops `content-encoding`/`content-length` when it does so

use std::time::Duration;

use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;

use crate::config::UpstreamConfig;
use crate::proxy::error::ProxyError;
use crate::rewrite::RewriteContext;

/// Buffered upstream response.
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub struct RequestForwarder {
    client: reqwest::Client,
}

impl RequestForwarder {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client })
    }

    /// Build the outbound URL: `origin + "/" + path [+ "?" + query]`.
    fn build_url(ctx: &RewriteContext, path: &str, query: Option<&str>) -> String {
        let mut url = format!("{}/{}", ctx.origin_str(), path);
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    /// Forward a single request. Transport faults map to
    /// [`ProxyError::Upstream`]; nothing is retried.
    pub async fn forward(
        &self,
        method: Method,
        ctx: &RewriteContext,
        path: &str,
        query: Option<&str>,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<UpstreamResponse, ProxyError> {
        let url = Self::build_url(ctx, path, query);

        tracing::debug!(
            proxy_id = %ctx.proxy_id,
            method = %method,
            url = %url,
            "forwarding request"
        );

        let mut request = self.client.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn ctx() -> RewriteContext {
        RewriteContext::new("p1", Url::parse("http://10.0.0.5:8080/").unwrap())
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            RequestForwarder::build_url(&ctx(), "dash/index.html", None),
            "http://10.0.0.5:8080/dash/index.html"
        );
        assert_eq!(
            RequestForwarder::build_url(&ctx(), "search", Some("q=abc&page=2")),
            "http://10.0.0.5:8080/search?q=abc&page=2"
        );
        assert_eq!(
            RequestForwarder::build_url(&ctx(), "", None),
            "http://10.0.0.5:8080/"
        );
    }
}

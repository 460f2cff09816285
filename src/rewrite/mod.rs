//! Content rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! upstream response body
//!     → html.rs (attribute rules + inline CSS + bootstrap injection)
//!     → css.rs  (url(...) references)
//!     → url.rs  (shared classification, single source of truth)
//! ```
//!
//! # Design Decisions
//! - One URL classifier shared by both rewriters; the HTML rule table and
//!   the CSS scanner never carry their own prefix logic
//! - Rewrite failure is an explicit outcome, not an exception: callers get
//!   the original content back and the request still succeeds
//! - Absolute and protocol-relative URLs are never rewritten

use ::url::Url;

pub mod css;
pub mod html;
pub mod url;

pub use css::rewrite_css;
pub use html::rewrite_html;
pub use self::url::{classify, rebase, UrlKind, REWRITE_RULES, URL_ATTRIBUTES};

/// Per-request rewrite context, built from the resolved proxy target.
///
/// Constructed once per request and passed by reference into the rewrite
/// routines; never persisted or shared across requests.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    pub proxy_id: String,
    pub target_origin: Url,
    base_path: String,
}

impl RewriteContext {
    pub fn new(proxy_id: impl Into<String>, target_origin: Url) -> Self {
        let proxy_id = proxy_id.into();
        let base_path = format!("/proxy/{}", proxy_id);
        Self {
            proxy_id,
            target_origin,
            base_path,
        }
    }

    /// The prefix (`/proxy/{id}`) under which the target is re-exposed.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Target origin without a trailing slash, e.g. `http://10.0.0.5:8080`.
    pub fn origin_str(&self) -> &str {
        self.target_origin.as_str().trim_end_matches('/')
    }
}

/// Outcome of a rewrite pass over a response body.
///
/// The fallback policy is part of the contract: a failed rewrite yields
/// `Unchanged` with the original content, and the request proceeds with
/// the upstream's status. Rewrite failures never become request failures.
#[derive(Debug)]
pub enum RewriteOutcome {
    /// Content was transformed; any declared `content-length` or
    /// `content-encoding` no longer describes the body.
    Rewritten(String),
    /// Original content passed through (malformed markup or rewrite error).
    Unchanged(String),
}

impl RewriteOutcome {
    pub fn into_body(self) -> String {
        match self {
            RewriteOutcome::Rewritten(body) | RewriteOutcome::Unchanged(body) => body,
        }
    }

    pub fn was_rewritten(&self) -> bool {
        matches!(self, RewriteOutcome::Rewritten(_))
    }
}

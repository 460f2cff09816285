//! CSS `url(...)` rewriting.
//!
//! Applies to standalone CSS responses, inline `style` attributes and
//! `<style>` blocks. Every match is unquoted, trimmed, and classified by
//! the shared [`crate::rewrite::url`] rules; rewritten references are
//! normalized to double quotes.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rewrite::url::rebase;

static CSS_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"url\(\s*([^)]*?)\s*\)").expect("css url pattern is valid"));

/// Rewrite every `url(...)` reference in `content` onto `base_path`.
///
/// References classified as skip or absolute keep their original match
/// text, quoting included.
pub fn rewrite_css(content: &str, base_path: &str) -> String {
    CSS_URL
        .replace_all(content, |caps: &Captures| {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let value = raw.trim_matches(|c| c == '"' || c == '\'').trim();
            match rebase(value, base_path) {
                Some(rewritten) => format!("url(\"{}\")", rewritten),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

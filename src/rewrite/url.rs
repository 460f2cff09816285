//! Shared URL classification.
//!
//! Both the HTML and CSS rewriters route every candidate URL through
//! [`classify`] so the two can never drift apart on what gets rewritten.

/// How a URL reference should be treated when served under a proxy prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Leave untouched: empty, fragment, non-HTTP scheme, or already
    /// carrying the proxy base path.
    Skip,
    /// Absolute (`http://`, `https://`) or protocol-relative (`//`).
    /// Cross-origin references are not proxied transitively.
    Absolute,
    /// Starts with `/` — resolved against the origin root.
    RootRelative,
    /// Schemeless path resolved against the current document.
    Relative,
}

/// Classify a URL value against a proxy base path (e.g. `/proxy/p1`).
pub fn classify(value: &str, base_path: &str) -> UrlKind {
    if value.is_empty()
        || value.starts_with("data:")
        || value.starts_with("javascript:")
        || value.starts_with("mailto:")
        || value.starts_with('#')
        || value.starts_with(base_path)
    {
        UrlKind::Skip
    } else if value.starts_with("http://") || value.starts_with("https://") || value.starts_with("//")
    {
        UrlKind::Absolute
    } else if value.starts_with('/') {
        UrlKind::RootRelative
    } else {
        UrlKind::Relative
    }
}

/// Rewrite a URL value onto the proxy base path, or `None` when it must be
/// left as-is. Shared verbatim by the HTML attribute and CSS `url()` paths.
pub fn rebase(value: &str, base_path: &str) -> Option<String> {
    match classify(value, base_path) {
        UrlKind::Skip | UrlKind::Absolute => None,
        UrlKind::RootRelative => Some(format!("{}{}", base_path, value)),
        UrlKind::Relative => Some(format!("{}/{}", base_path, value)),
    }
}

/// URL-bearing attributes inspected on every rewritable element.
pub const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "data", "poster"];

/// Ordered rule table: element tag → attributes to rewrite on it.
pub const REWRITE_RULES: &[(&str, &[&str])] = &[
    ("a", URL_ATTRIBUTES),
    ("link", URL_ATTRIBUTES),
    ("script", URL_ATTRIBUTES),
    ("img", URL_ATTRIBUTES),
    ("iframe", URL_ATTRIBUTES),
    ("form", URL_ATTRIBUTES),
    ("video", URL_ATTRIBUTES),
    ("audio", URL_ATTRIBUTES),
    ("source", URL_ATTRIBUTES),
];

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/proxy/p1";

    #[test]
    fn test_classify_skip() {
        assert_eq!(classify("", BASE), UrlKind::Skip);
        assert_eq!(classify("data:image/png;base64,AA==", BASE), UrlKind::Skip);
        assert_eq!(classify("javascript:void(0)", BASE), UrlKind::Skip);
        assert_eq!(classify("mailto:ops@example.com", BASE), UrlKind::Skip);
        assert_eq!(classify("#section", BASE), UrlKind::Skip);
        assert_eq!(classify("/proxy/p1/app.js", BASE), UrlKind::Skip);
    }

    #[test]
    fn test_classify_absolute() {
        assert_eq!(classify("http://x.com/c.png", BASE), UrlKind::Absolute);
        assert_eq!(classify("https://x.com/c.png", BASE), UrlKind::Absolute);
        assert_eq!(classify("//cdn.x.com/c.png", BASE), UrlKind::Absolute);
    }

    #[test]
    fn test_classify_relative() {
        assert_eq!(classify("/img/a.png", BASE), UrlKind::RootRelative);
        assert_eq!(classify("img/a.png", BASE), UrlKind::Relative);
        assert_eq!(classify("a.png", BASE), UrlKind::Relative);
    }

    #[test]
    fn test_rebase() {
        assert_eq!(rebase("/about", BASE), Some("/proxy/p1/about".to_string()));
        assert_eq!(rebase("b.png", BASE), Some("/proxy/p1/b.png".to_string()));
        assert_eq!(rebase("http://x.com/c.png", BASE), None);
        assert_eq!(rebase("/proxy/p1/about", BASE), None);
    }

    #[test]
    fn test_rebase_is_idempotent() {
        let once = rebase("/about", BASE).unwrap();
        assert_eq!(rebase(&once, BASE), None);
    }
}

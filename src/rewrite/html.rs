//! HTML rewriting.
//!
//! Streams the document through `lol_html`, rewriting URL-bearing
//! attributes per the rule table, routing inline CSS through the CSS
//! rewriter, and injecting the client bootstrap script. The tokenizer is
//! error-recovering: unhandled markup is emitted byte-for-byte, so broken
//! documents pass through instead of failing the request.

use std::cell::{Cell, RefCell};

use lol_html::html_content::ContentType;
use lol_html::{element, text, HtmlRewriter, Settings};

use crate::rewrite::css::rewrite_css;
use crate::rewrite::url::{rebase, REWRITE_RULES};
use crate::rewrite::{RewriteContext, RewriteOutcome};

/// Client-side bootstrap injected into every proxied HTML document.
///
/// Wraps `fetch` and `XMLHttpRequest.prototype.open` so root-relative URLs
/// built at runtime are prefixed with the proxy base path before dispatch —
/// server-side rewriting cannot see URLs constructed after load.
const BOOTSTRAP_TEMPLATE: &str = r#"<script>(function() {
    const proxyBase = '__PROXY_BASE__';
    const targetUrl = '__TARGET_URL__';

    const originalFetch = window.fetch;
    window.fetch = function(url, options) {
        if (typeof url === 'string' && url.startsWith('/') && !url.startsWith(proxyBase)) {
            url = proxyBase + url;
        }
        return originalFetch(url, options);
    };

    const originalOpen = XMLHttpRequest.prototype.open;
    XMLHttpRequest.prototype.open = function(method, url, ...rest) {
        if (typeof url === 'string' && url.startsWith('/') && !url.startsWith(proxyBase)) {
            url = proxyBase + url;
        }
        return originalOpen.call(this, method, url, ...rest);
    };
})();</script>"#;

fn bootstrap_script(ctx: &RewriteContext) -> String {
    BOOTSTRAP_TEMPLATE
        .replace("__PROXY_BASE__", ctx.base_path())
        .replace("__TARGET_URL__", ctx.origin_str())
}

/// Rewrite an HTML document so it keeps working under the proxy prefix.
///
/// Any processing failure degrades to [`RewriteOutcome::Unchanged`] with
/// the original content.
pub fn rewrite_html(input: &str, ctx: &RewriteContext) -> RewriteOutcome {
    match run_rewriter(input, ctx) {
        Ok(output) => RewriteOutcome::Rewritten(output),
        Err(err) => {
            tracing::warn!(
                proxy_id = %ctx.proxy_id,
                error = %err,
                "html rewrite failed, returning original content"
            );
            RewriteOutcome::Unchanged(input.to_string())
        }
    }
}

fn run_rewriter(
    input: &str,
    ctx: &RewriteContext,
) -> Result<String, lol_html::errors::RewritingError> {
    let bootstrap = bootstrap_script(ctx);
    // Set once the script lands in <head>; <body> only injects when no
    // head was seen earlier in the stream.
    let injected = Cell::new(false);
    let style_text = RefCell::new(String::new());
    let mut output = Vec::with_capacity(input.len() + bootstrap.len());

    let mut handlers = Vec::new();

    for &(tag, attrs) in REWRITE_RULES {
        handlers.push(element!(tag, move |el| {
            for &attr in attrs {
                if let Some(value) = el.get_attribute(attr) {
                    if let Some(rewritten) = rebase(&value, ctx.base_path()) {
                        el.set_attribute(attr, &rewritten)?;
                    }
                }
            }
            Ok(())
        }));
    }

    handlers.push(element!("*[style]", |el| {
        if let Some(css) = el.get_attribute("style") {
            let rewritten = rewrite_css(&css, ctx.base_path());
            if rewritten != css {
                el.set_attribute("style", &rewritten)?;
            }
        }
        Ok(())
    }));

    // <style> text may arrive in several chunks; buffer until the node
    // ends so url(...) never gets split across a rewrite boundary.
    handlers.push(text!("style", |chunk| {
        style_text.borrow_mut().push_str(chunk.as_str());
        if chunk.last_in_text_node() {
            let css = style_text.borrow_mut().split_off(0);
            chunk.replace(&rewrite_css(&css, ctx.base_path()), ContentType::Html);
        } else {
            chunk.remove();
        }
        Ok(())
    }));

    handlers.push(element!("head", |el| {
        if !injected.get() {
            el.prepend(&bootstrap, ContentType::Html);
            injected.set(true);
        }
        Ok(())
    }));
    handlers.push(element!("body", |el| {
        if !injected.get() {
            el.prepend(&bootstrap, ContentType::Html);
            injected.set(true);
        }
        Ok(())
    }));

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: handlers,
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter.write(input.as_bytes())?;
    rewriter.end()?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

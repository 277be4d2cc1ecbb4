//! JavaScript snippets evaluated inside the page.
//!
//! Every value interpolated into a snippet goes through [`js_string`], so
//! ids and selectors coming from stored bookmarks cannot break out of their
//! string literal.

use turnmark_protocols::{ElementQuery, ScrollOptions};

/// Encode `value` as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    // JSON string literals are valid JavaScript string literals.
    serde_json::Value::from(value).to_string()
}

/// Expression evaluating to the element or `null`.
pub fn element(query: &ElementQuery) -> String {
    match query {
        ElementQuery::Selector(selector) => {
            format!("document.querySelector({})", js_string(selector))
        }
        ElementQuery::Id(id) => format!("document.getElementById({})", js_string(id)),
    }
}

/// Snapshot of `window.location` as a plain object.
pub fn location() -> &'static str {
    "({ href: location.href, origin: location.origin, host: location.host, \
     pathname: location.pathname, search: location.search })"
}

pub fn assign(href: &str) -> String {
    format!("(() => {{ location.href = {}; return true; }})()", js_string(href))
}

pub fn push_state(path: &str) -> String {
    format!(
        "(() => {{ history.pushState({{}}, \"\", {}); return location.href; }})()",
        js_string(path)
    )
}

/// `true` when the element is in the document.
pub fn exists(query: &ElementQuery) -> String {
    format!("{} !== null", element(query))
}

/// Scrolls the element; `false` when it is gone.
pub fn scroll_into_view(query: &ElementQuery, options: ScrollOptions) -> String {
    let options = serde_json::to_string(&options).unwrap_or_else(|_| "{}".to_string());
    with_element(query, "false", &format!("el.scrollIntoView({options}); return true;"))
}

/// Inline style value; `null` when the element is gone.
pub fn style_property(query: &ElementQuery, property: &str) -> String {
    with_element(
        query,
        "null",
        &format!("return el.style.getPropertyValue({});", js_string(property)),
    )
}

/// Sets (or removes, for an empty value) an inline style; `false` when the
/// element is gone.
pub fn set_style_property(query: &ElementQuery, property: &str, value: &str) -> String {
    let body = if value.is_empty() {
        format!("el.style.removeProperty({}); return true;", js_string(property))
    } else {
        format!(
            "el.style.setProperty({}, {}); return true;",
            js_string(property),
            js_string(value)
        )
    };
    with_element(query, "false", &body)
}

fn with_element(query: &ElementQuery, missing: &str, body: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return {missing}; {body} }})()",
        element(query)
    )
}

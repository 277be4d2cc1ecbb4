//! Browser page abstraction.
//!
//! Everything the engine and the platform adapters know about the outside
//! world goes through [`PageContext`]: the active location, history updates,
//! element lookup, scrolling and inline styles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PageError;

/// Read/write access to one browser page.
#[async_trait]
pub trait PageContext: Send + Sync {
    /// Current location of the page.
    async fn location(&self) -> Result<PageLocation, PageError>;

    /// Assign `location.href`. Relative hrefs resolve against the current page.
    async fn assign(&self, href: &str) -> Result<(), PageError>;

    /// Push a history entry without reloading the document.
    async fn push_state(&self, path: &str) -> Result<(), PageError>;

    /// Look up a single element.
    async fn find(&self, query: &ElementQuery) -> Result<Option<ElementHandle>, PageError>;

    /// Scroll an element into the viewport.
    async fn scroll_into_view(
        &self,
        element: &ElementHandle,
        options: ScrollOptions,
    ) -> Result<(), PageError>;

    /// Read an inline style property (empty string when unset).
    async fn style_property(
        &self,
        element: &ElementHandle,
        property: &str,
    ) -> Result<String, PageError>;

    /// Write an inline style property. An empty value removes it.
    async fn set_style_property(
        &self,
        element: &ElementHandle,
        property: &str,
        value: &str,
    ) -> Result<(), PageError>;
}

/// Snapshot of `window.location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub href: String,
    pub origin: String,
    pub host: String,
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl PageLocation {
    /// Parse an absolute href.
    pub fn parse(href: &str) -> Result<Self, PageError> {
        Ok(Self::from_url(&Url::parse(href)?))
    }

    /// Resolve `href` against this location, the way the browser does for
    /// `location.href = ...` and `history.pushState(..., url)`.
    pub fn resolve(&self, href: &str) -> Result<Self, PageError> {
        let base = Url::parse(&self.href)?;
        Ok(Self::from_url(&base.join(href)?))
    }

    /// Value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = Url::parse(&self.href).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn from_url(url: &Url) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        Self {
            href: url.as_str().to_string(),
            origin: url.origin().ascii_serialization(),
            host,
            pathname: url.path().to_string(),
            search: url.query().map(|q| format!("?{q}")).unwrap_or_default(),
        }
    }
}

/// How to find an element in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ElementQuery {
    /// `document.querySelector(selector)`
    Selector(String),
    /// `document.getElementById(id)`
    Id(String),
}

/// A resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    query: ElementQuery,
}

impl ElementHandle {
    pub fn new(query: ElementQuery) -> Self {
        Self { query }
    }

    /// The query that resolved this element.
    pub fn query(&self) -> &ElementQuery {
        &self.query
    }
}

/// `scrollIntoView` behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// `scrollIntoView` vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// Options passed to `scrollIntoView`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// Smooth scroll that centres the element vertically.
    pub fn smooth_center() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Center,
        }
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;

//! Browser automation seam
//!
//! Scenarios talk to the browser only through [`Browser`] and [`Page`].
//! The production implementation is a WebDriver client; unit tests swap
//! in an in-memory page.

pub mod preflight;
pub mod webdriver;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::common::{Error, Result};

pub use webdriver::{WebDriverBrowser, WebDriverPage};

/// Factory for page handles, one per scenario attempt
#[async_trait]
pub trait Browser: Send + Sync {
    type Page: Page;

    /// Open a fresh page in a new browser context
    async fn new_page(&self) -> Result<Self::Page>;
}

/// A live handle to one document in one browser context
#[async_trait]
pub trait Page: Send {
    /// Opaque handle to a located element
    type Element: Send + Sync;

    /// Navigate and wait for the driver to report the document loaded
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Current document title
    async fn title(&mut self) -> Result<String>;

    /// All elements matching a CSS selector, in document order
    async fn find_all(&mut self, selector: &str) -> Result<Vec<Self::Element>>;

    /// DOM `textContent` of an element, without whitespace normalization
    async fn text(&mut self, element: &Self::Element) -> Result<String>;

    /// Release the browser context
    async fn close(&mut self) -> Result<()>;
}

/// Resolve a selector to exactly one element
///
/// Zero matches and multiple matches are both locator errors; the first
/// match is never picked on an ambiguous page.
pub async fn locate<P: Page + ?Sized>(page: &mut P, selector: &str) -> Result<P::Element> {
    let mut matches = page.find_all(selector).await?;
    tracing::debug!(selector, matched = matches.len(), "Locator resolved");

    if matches.len() == 1 {
        Ok(matches.remove(0))
    } else {
        Err(Error::locator(selector, matches.len()))
    }
}

/// Bound a suspend point, mapping expiry to a timeout error
pub async fn bounded<T, F>(operation: &str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, limit_ms = limit.as_millis() as u64, "Operation timed out");
            Err(Error::timeout(operation, limit))
        }
    }
}

use super::error::DriverResult;
use crate::utils::config::BrowserConfig;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Storefront element, addressed by a single class name (e.g. `product-card`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    class: String,
}

impl Selector {
    pub fn class(name: impl Into<String>) -> Self {
        Self { class: name.into() }
    }

    /// CSS form understood by the browser
    pub fn to_css(&self) -> String {
        format!(".{}", self.class)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Class list of an element captured when a wait succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSnapshot {
    pub classes: Vec<String>,
}

impl ElementSnapshot {
    pub fn from_class_attr(class_attr: Option<&str>) -> Self {
        Self {
            classes: class_attr
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }
}

/// Browser session the scenarios drive.
///
/// One session is opened per run and shared by every scenario in order, so
/// page state (notably the cart) carries over between them.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page to an absolute URL
    async fn goto(&self, url: &str) -> DriverResult<()>;

    /// Wait until at least one element matching `selector` is attached.
    ///
    /// Returns `DriverError::Timeout` when nothing appears in time.
    async fn wait_for_present(&self, selector: &Selector, timeout: Duration) -> DriverResult<()>;

    /// Wait until the first matching element is visible.
    ///
    /// A timeout is not an error here; it yields `Ok(None)`. Any other
    /// browser failure is returned as an error.
    async fn wait_for_visible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> DriverResult<Option<ElementSnapshot>>;

    /// Number of elements currently matching `selector`
    async fn count(&self, selector: &Selector) -> DriverResult<usize>;

    /// Click the element at `index` among the current matches
    async fn click_nth(&self, selector: &Selector, index: usize) -> DriverResult<()>;

    /// Text of the first match, without waiting.
    ///
    /// Returns `DriverError::ElementNotFound` when nothing matches.
    async fn text_of(&self, selector: &Selector) -> DriverResult<String>;

    /// Whether the first match is currently visible
    async fn is_visible(&self, selector: &Selector) -> DriverResult<bool>;

    /// PNG screenshot of the current viewport
    async fn screenshot(&self) -> DriverResult<Vec<u8>>;

    /// Release the browser
    async fn close(&self) -> DriverResult<()>;
}

/// Opens browser sessions
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self, config: &BrowserConfig) -> DriverResult<Box<dyn BrowserSession>>;
}

//! FormDriver - abstract browser automation trait
//!
//! Page objects never talk to a browser directly. They go through
//! [`FormDriver`], which has two implementations:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  FormDriver (async trait)                                  │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────┐     ┌──────────────────────────┐ │
//! │  │  ChromiumDriver      │     │  MockDriver              │ │
//! │  │  (feature `browser`) │     │  (always available)      │ │
//! │  │  CDP via             │     │  in-memory DOM with      │ │
//! │  │  chromiumoxide       │     │  click/input handlers    │ │
//! │  └──────────────────────┘     └──────────────────────────┘ │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutating operations act on the first element matching the locator and
//! fail with [`crate::ProbeError::ElementNotFound`] when nothing matches.
//! They do not wait; waiting is [`crate::BasePage`]'s job.

use crate::locator::Locator;
use crate::result::ProbeResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Snapshot of one DOM element as seen by the driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// Lower-case tag name
    pub tag_name: String,
    /// `value` property for form controls, `None` for other elements
    pub value: Option<String>,
    /// Rendered text, trimmed; empty when the element is hidden
    pub text: String,
    /// Whether the element is rendered and visible
    pub displayed: bool,
    /// Checked state for checkboxes/radios, selected state for options
    pub selected: bool,
}

impl ElementState {
    /// `value` property, empty when the element has none
    #[must_use]
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Abstract driver for browser automation
#[async_trait]
pub trait FormDriver: Send + Sync {
    /// Navigate to URL and wait for the load event
    async fn navigate(&mut self, url: &str) -> ProbeResult<()>;

    /// URL of the current document
    async fn current_url(&self) -> ProbeResult<String>;

    /// First element matching the locator, if any
    async fn query(&self, locator: &Locator) -> ProbeResult<Option<ElementState>>;

    /// All elements matching the locator, in document order
    async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementState>>;

    /// Click the element
    async fn click(&mut self, locator: &Locator) -> ProbeResult<()>;

    /// Empty the element's value
    async fn clear(&mut self, locator: &Locator) -> ProbeResult<()>;

    /// Append text to the element's value, firing input events
    async fn send_keys(&mut self, locator: &Locator, text: &str) -> ProbeResult<()>;

    /// Select the `<option>` whose visible text equals `text`
    async fn select_by_visible_text(&mut self, locator: &Locator, text: &str) -> ProbeResult<()>;

    /// Capture the viewport as PNG bytes
    async fn screenshot(&self) -> ProbeResult<Vec<u8>>;

    /// Close the browser. Further calls are undefined.
    async fn close(&mut self) -> ProbeResult<()>;
}

#[async_trait]
impl<D: FormDriver + ?Sized> FormDriver for Box<D> {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        (**self).navigate(url).await
    }

    async fn current_url(&self) -> ProbeResult<String> {
        (**self).current_url().await
    }

    async fn query(&self, locator: &Locator) -> ProbeResult<Option<ElementState>> {
        (**self).query(locator).await
    }

    async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementState>> {
        (**self).query_all(locator).await
    }

    async fn click(&mut self, locator: &Locator) -> ProbeResult<()> {
        (**self).click(locator).await
    }

    async fn clear(&mut self, locator: &Locator) -> ProbeResult<()> {
        (**self).clear(locator).await
    }

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> ProbeResult<()> {
        (**self).send_keys(locator, text).await
    }

    async fn select_by_visible_text(&mut self, locator: &Locator, text: &str) -> ProbeResult<()> {
        (**self).select_by_visible_text(locator, text).await
    }

    async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
        (**self).screenshot().await
    }

    async fn close(&mut self) -> ProbeResult<()> {
        (**self).close().await
    }
}

//! Wait-and-locate wrapper around a [`FormDriver`].
//!
//! Every lookup waits (see [`crate::wait`]) until the element is present.
//! Interactions are single-step delegations to the driver; the only error
//! swallowing is in [`BasePage::is_displayed`].

use crate::driver::{ElementState, FormDriver};
use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{WaitOptions, Waiter};
use std::path::Path;
use tracing::{debug, info};

/// Base of all page objects: owns the driver and the wait policy
#[derive(Debug)]
pub struct BasePage<D: FormDriver> {
    driver: D,
    waiter: Waiter,
}

impl<D: FormDriver> BasePage<D> {
    /// Wrap a driver with the default 10 s wait
    pub fn new(driver: D) -> Self {
        Self::with_wait(driver, WaitOptions::default())
    }

    /// Wrap a driver with custom wait options
    pub fn with_wait(driver: D, options: WaitOptions) -> Self {
        Self {
            driver,
            waiter: Waiter::new(options),
        }
    }

    /// Wait options used for lookups
    pub const fn wait_options(&self) -> &WaitOptions {
        self.waiter.options()
    }

    /// Underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Give the driver back
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Navigate to `url`
    pub async fn open(&mut self, url: &str) -> ProbeResult<&mut Self> {
        info!(url, "opening page");
        self.driver.navigate(url).await?;
        Ok(self)
    }

    /// Wait until an element matching `locator` is present
    pub async fn find_element(&self, locator: &Locator) -> ProbeResult<ElementState> {
        let driver = &self.driver;
        self.waiter
            .until(
                || driver.query(locator),
                |timeout_ms| ProbeError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_ms,
                },
            )
            .await
    }

    /// Wait until at least one element matching `locator` is present
    pub async fn find_elements(&self, locator: &Locator) -> ProbeResult<Vec<ElementState>> {
        let driver = &self.driver;
        self.waiter
            .until(
                || async move {
                    let found = driver.query_all(locator).await?;
                    Ok((!found.is_empty()).then_some(found))
                },
                |timeout_ms| ProbeError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_ms,
                },
            )
            .await
    }

    /// Find and click; returns the element as it was before the click
    pub async fn click(&mut self, locator: &Locator) -> ProbeResult<ElementState> {
        let element = self.find_element(locator).await?;
        debug!(%locator, "click");
        self.driver.click(locator).await?;
        Ok(element)
    }

    /// Find, clear, then type `text`
    pub async fn type_text(&mut self, locator: &Locator, text: &str) -> ProbeResult<ElementState> {
        self.find_element(locator).await?;
        debug!(%locator, chars = text.chars().count(), "type");
        self.driver.clear(locator).await?;
        self.driver.send_keys(locator, text).await?;
        self.find_element(locator).await
    }

    /// Find and choose the `<option>` with the given visible text
    pub async fn select_by_visible_text(
        &mut self,
        locator: &Locator,
        text: &str,
    ) -> ProbeResult<ElementState> {
        self.find_element(locator).await?;
        debug!(%locator, option = text, "select");
        self.driver.select_by_visible_text(locator, text).await?;
        self.find_element(locator).await
    }

    /// Rendered text of the element
    pub async fn get_text(&self, locator: &Locator) -> ProbeResult<String> {
        Ok(self.find_element(locator).await?.text)
    }

    /// `value` property of the element, empty when it has none
    pub async fn get_value(&self, locator: &Locator) -> ProbeResult<String> {
        Ok(self.find_element(locator).await?.value.unwrap_or_default())
    }

    /// Checked/selected state of the element
    pub async fn is_selected(&self, locator: &Locator) -> ProbeResult<bool> {
        Ok(self.find_element(locator).await?.selected)
    }

    /// Whether the element is present and visible; never fails
    pub async fn is_displayed(&self, locator: &Locator) -> bool {
        match self.find_element(locator).await {
            Ok(element) => element.displayed,
            Err(e) => {
                debug!(%locator, error = %e, "treating lookup failure as not displayed");
                false
            }
        }
    }

    /// Alias of [`BasePage::find_element`]
    pub async fn wait_for_element(&self, locator: &Locator) -> ProbeResult<ElementState> {
        self.find_element(locator).await
    }

    /// Wait until the element is absent or hidden
    pub async fn wait_for_element_to_disappear(&self, locator: &Locator) -> ProbeResult<()> {
        let driver = &self.driver;
        self.waiter
            .until(
                || async move {
                    let element = driver.query(locator).await?;
                    Ok(element.map_or(true, |e| !e.displayed).then_some(()))
                },
                |timeout_ms| ProbeError::ElementStillVisible {
                    locator: locator.to_string(),
                    timeout_ms,
                },
            )
            .await
    }

    /// Save a PNG screenshot to `path`, creating parent directories
    pub async fn take_screenshot(&self, path: impl AsRef<Path>) -> ProbeResult<()> {
        let path = path.as_ref();
        let png = self.driver.screenshot().await?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, png).await?;
        info!(path = %path.display(), "screenshot saved");
        Ok(())
    }

    /// URL of the current document
    pub async fn get_current_url(&self) -> ProbeResult<String> {
        self.driver.current_url().await
    }

    /// Close the browser
    pub async fn close(&mut self) -> ProbeResult<()> {
        self.driver.close().await
    }
}

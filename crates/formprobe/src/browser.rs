//! Browser control for headless testing.
//!
//! When compiled with the `browser` feature, [`ChromiumDriver`] drives a real
//! Chromium over the Chrome `DevTools` Protocol via chromiumoxide. Element
//! operations are JavaScript snippets built from [`Locator::to_query`] and
//! evaluated in the page, so typing fires the same `input`/`change` events a
//! user would and page scripts (validation, counters) react to them.
//!
//! [`BrowserConfig`] is available without the feature so configuration code
//! compiles everywhere.

use serde::{Deserialize, Serialize};

#[cfg(feature = "browser")]
use crate::locator::Locator;

/// Browser launch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Start maximized (headed debugging sessions)
    pub maximized: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers/CI)
    pub sandbox: bool,
    /// Pass `--disable-dev-shm-usage` (small `/dev/shm` in containers)
    pub disable_dev_shm: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 1024,
            maximized: false,
            chromium_path: None,
            sandbox: false,
            disable_dev_shm: true,
        }
    }
}

impl BrowserConfig {
    /// Set window dimensions
    #[must_use]
    pub const fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Visible, maximized window for local debugging
    #[must_use]
    pub const fn headed_debug(mut self) -> Self {
        self.headless = false;
        self.maximized = true;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Command-line switches passed to Chromium beyond headless/sandbox
    #[must_use]
    pub fn extra_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.disable_dev_shm {
            args.push("--disable-dev-shm-usage");
        }
        if self.maximized {
            args.push("--start-maximized");
        }
        args
    }
}

/// Wrap a DOM query so the page returns the element's state as JSON text
#[cfg(feature = "browser")]
fn state_script(query: &str) -> String {
    format!(
        "JSON.stringify((function(el) {{ \
            if (!el) return null; \
            const s = window.getComputedStyle(el); \
            const r = el.getBoundingClientRect(); \
            const displayed = s.display !== 'none' && s.visibility !== 'hidden' && (r.width > 0 || r.height > 0); \
            return {{ \
                tag_name: el.tagName.toLowerCase(), \
                value: ('value' in el && el.value != null) ? String(el.value) : null, \
                text: displayed ? (el.innerText || '').trim() : '', \
                displayed: displayed, \
                selected: !!(el.checked || el.selected) \
            }}; \
        }})({query}))"
    )
}

#[cfg(feature = "browser")]
fn state_all_script(query: &str) -> String {
    let single = state_script("el");
    format!("JSON.stringify(({query}).map(function(el) {{ return JSON.parse({single}); }}))")
}

/// Run `body` against the first match; the snippet returns `'missing'` when
/// nothing matches, otherwise whatever `body` returns.
#[cfg(feature = "browser")]
fn action_script(locator: &Locator, body: &str) -> String {
    format!(
        "(function() {{ const el = {}; if (!el) return 'missing'; {body} }})()",
        locator.to_query()
    )
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{action_script, state_all_script, state_script, BrowserConfig};
    use crate::driver::{ElementState, FormDriver};
    use crate::locator::{js_string, Locator};
    use crate::result::{ProbeError, ProbeResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tokio::sync::Mutex;

    /// Chromium instance with one page, driven over CDP
    #[derive(Debug)]
    pub struct ChromiumDriver {
        config: BrowserConfig,
        browser: Mutex<CdpBrowser>,
        page: Mutex<CdpPage>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromiumDriver {
        /// Launch a new browser instance and open a blank page
        ///
        /// # Errors
        ///
        /// Returns error if browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> ProbeResult<Self> {
            let mut builder =
                CdpConfig::builder().window_size(config.window_width, config.window_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            for arg in config.extra_args() {
                builder = builder.arg(arg);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| ProbeError::BrowserLaunchError { message })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

            tracing::debug!(headless = config.headless, "chromium launched");

            Ok(Self {
                config,
                browser: Mutex::new(browser),
                page: Mutex::new(page),
                handle,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, script: &str) -> ProbeResult<T> {
            let page = self.page.lock().await;
            page.evaluate(script)
                .await
                .map_err(|e| ProbeError::script(e.to_string()))?
                .into_value()
                .map_err(|e| ProbeError::script(e.to_string()))
        }

        async fn eval_json<T: serde::de::DeserializeOwned>(&self, script: &str) -> ProbeResult<T> {
            let json: String = self.eval(script).await?;
            Ok(serde_json::from_str(&json)?)
        }

        /// Run an action snippet, mapping `'missing'` to `ElementNotFound`
        async fn act(&self, locator: &Locator, body: &str) -> ProbeResult<String> {
            let status: String = self.eval(&action_script(locator, body)).await?;
            if status == "missing" {
                return Err(ProbeError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_ms: 0,
                });
            }
            Ok(status)
        }
    }

    #[async_trait]
    impl FormDriver for ChromiumDriver {
        async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
            let page = self.page.lock().await;
            page.goto(url)
                .await
                .map_err(|e| ProbeError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> ProbeResult<String> {
            self.eval("window.location.href").await
        }

        async fn query(&self, locator: &Locator) -> ProbeResult<Option<ElementState>> {
            self.eval_json(&state_script(&locator.to_query())).await
        }

        async fn query_all(&self, locator: &Locator) -> ProbeResult<Vec<ElementState>> {
            self.eval_json(&state_all_script(&locator.to_all_query()))
                .await
        }

        async fn click(&mut self, locator: &Locator) -> ProbeResult<()> {
            self.act(locator, "el.scrollIntoView({block: 'center'}); el.click(); return 'ok';")
                .await?;
            Ok(())
        }

        async fn clear(&mut self, locator: &Locator) -> ProbeResult<()> {
            self.act(
                locator,
                "if (!('value' in el)) return 'readonly'; \
                 el.focus(); el.value = ''; \
                 el.dispatchEvent(new Event('input', { bubbles: true })); \
                 el.dispatchEvent(new Event('change', { bubbles: true })); \
                 return 'ok';",
            )
            .await
            .and_then(|status| readonly_check(locator, &status))
        }

        async fn send_keys(&mut self, locator: &Locator, text: &str) -> ProbeResult<()> {
            let text = js_string(text);
            let body = format!(
                "if (!('value' in el)) return 'readonly'; \
                 el.focus(); \
                 let v = el.value + {text}; \
                 if (el.maxLength >= 0 && v.length > el.maxLength) v = v.slice(0, el.maxLength); \
                 el.value = v; \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return 'ok';"
            );
            self.act(locator, &body)
                .await
                .and_then(|status| readonly_check(locator, &status))
        }

        async fn select_by_visible_text(
            &mut self,
            locator: &Locator,
            text: &str,
        ) -> ProbeResult<()> {
            let literal = js_string(text);
            let body = format!(
                "if (!el.options) return 'readonly'; \
                 const opt = Array.from(el.options).find(o => o.text.trim() === {literal}); \
                 if (!opt) return 'no-option'; \
                 opt.selected = true; \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return 'ok';"
            );
            match self.act(locator, &body).await?.as_str() {
                "no-option" => Err(ProbeError::OptionNotFound {
                    locator: locator.to_string(),
                    text: text.to_string(),
                }),
                status => readonly_check(locator, status),
            }
        }

        async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let screenshot =
                page.execute(params)
                    .await
                    .map_err(|e| ProbeError::ScreenshotError {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| ProbeError::ScreenshotError {
                    message: e.to_string(),
                })
        }

        async fn close(&mut self) -> ProbeResult<()> {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            let _ = browser.wait().await;
            self.handle.abort();
            tracing::debug!("chromium closed");
            Ok(())
        }
    }

    fn readonly_check(locator: &Locator, status: &str) -> ProbeResult<()> {
        if status == "readonly" {
            Err(ProbeError::InputError {
                message: format!("{locator} is not editable"),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;

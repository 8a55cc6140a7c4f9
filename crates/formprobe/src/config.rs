//! Suite configuration.
//!
//! Loaded from YAML, then overridden by environment variables and finally by
//! command-line flags (the CLI applies those itself).
//!
//! ```yaml
//! form_path: site/contact_form.html
//! headless: true
//! timeout_ms: 10000
//! submit_delay_ms: 2000
//! screenshot_dir: target/screenshots
//! ```

use crate::browser::BrowserConfig;
use crate::contact_page::DEFAULT_SUBMIT_DELAY_MS;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the form file
pub const FORM_PATH_ENV: &str = "CONTACT_FORM_PATH";

/// Environment variable naming the Chromium binary
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Default form location, relative to the working directory
pub const DEFAULT_FORM_PATH: &str = "contact_form.html";

/// Settings shared by every scenario of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Path (or `file://`/`http(s)://` URL) of the form under test
    pub form_path: String,
    /// Run the browser without a window
    pub headless: bool,
    /// Element wait timeout
    pub timeout_ms: u64,
    /// Element wait poll interval
    pub poll_interval_ms: u64,
    /// Pause after clicking submit
    pub submit_delay_ms: u64,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Where failure screenshots go (None = not saved)
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        let browser = BrowserConfig::default();
        Self {
            form_path: DEFAULT_FORM_PATH.to_string(),
            headless: browser.headless,
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            window_width: browser.window_width,
            window_height: browser.window_height,
            chromium_path: None,
            screenshot_dir: None,
        }
    }
}

impl SuiteConfig {
    /// Parse and validate a YAML document
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML, unknown keys or invalid values.
    pub fn from_yaml(yaml: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading suite config");
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Apply `CONTACT_FORM_PATH` and `CHROMIUM_PATH` from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(FORM_PATH_ENV).filter(|p| !p.is_empty()) {
            debug!(form_path = %path, "form path from environment");
            self.form_path = path;
        }
        if let Some(path) = lookup(CHROMIUM_PATH_ENV).filter(|p| !p.is_empty()) {
            self.chromium_path = Some(path);
        }
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] describing the first bad value.
    pub fn validate(&self) -> ProbeResult<()> {
        if self.form_path.trim().is_empty() {
            return Err(ProbeError::config("form_path must not be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(ProbeError::config("timeout_ms must be greater than 0"));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms > self.timeout_ms {
            return Err(ProbeError::config(format!(
                "poll_interval_ms must be in 1..={}",
                self.timeout_ms
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ProbeError::config("window size must be non-zero"));
        }
        Ok(())
    }

    /// URL the browser opens: `file://` plus the absolute form path
    ///
    /// Values that already carry a scheme are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn form_url(&self) -> ProbeResult<String> {
        let path = self.form_path.trim();
        if ["file://", "http://", "https://"]
            .iter()
            .any(|scheme| path.starts_with(scheme))
        {
            return Ok(path.to_string());
        }
        let path = Path::new(path);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let absolute = absolute.to_string_lossy().replace('\\', "/");
        if absolute.starts_with('/') {
            Ok(format!("file://{absolute}"))
        } else {
            Ok(format!("file:///{absolute}"))
        }
    }

    /// Wait policy for element lookups
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Browser launch settings
    #[must_use]
    pub fn browser_config(&self) -> BrowserConfig {
        let mut browser = BrowserConfig::default()
            .with_window(self.window_width, self.window_height)
            .with_headless(self.headless);
        if !self.headless {
            browser = browser.headed_debug();
        }
        if let Some(path) = &self.chromium_path {
            browser = browser.with_chromium_path(path.clone());
        }
        browser
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod load_tests {
        use super::*;
        use std::io::Write;

        #[test]
        fn test_default_config_is_valid() {
            let config = SuiteConfig::default();
            config.validate().unwrap();
            assert!(config.headless);
            assert_eq!(config.timeout_ms, 10_000);
            assert_eq!(config.submit_delay_ms, 2_000);
        }

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = SuiteConfig::from_yaml("form_path: site/form.html\nheadless: false\n")
                .unwrap();
            assert_eq!(config.form_path, "site/form.html");
            assert!(!config.headless);
            assert_eq!(config.poll_interval_ms, 100);
        }

        #[test]
        fn test_unknown_key_rejected() {
            let err = SuiteConfig::from_yaml("form_pth: x.html\n").unwrap_err();
            assert!(matches!(err, ProbeError::Yaml(_)));
        }

        #[test]
        fn test_invalid_values_rejected() {
            let err = SuiteConfig::from_yaml("timeout_ms: 0\n").unwrap_err();
            assert!(matches!(err, ProbeError::Config { .. }));
            let err =
                SuiteConfig::from_yaml("timeout_ms: 50\npoll_interval_ms: 100\n").unwrap_err();
            assert!(err.to_string().contains("poll_interval_ms"));
        }

        #[test]
        fn test_from_yaml_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "submit_delay_ms: 0").unwrap();
            writeln!(file, "screenshot_dir: shots").unwrap();
            let config = SuiteConfig::from_yaml_file(file.path()).unwrap();
            assert_eq!(config.submit_delay_ms, 0);
            assert_eq!(config.screenshot_dir, Some(PathBuf::from("shots")));
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let err = SuiteConfig::from_yaml_file("/nonexistent/suite.yaml").unwrap_err();
            assert!(matches!(err, ProbeError::Io(_)));
        }
    }

    mod override_tests {
        use super::*;

        #[test]
        fn test_env_overrides() {
            let config = SuiteConfig::default().with_overrides_from(|key| match key {
                FORM_PATH_ENV => Some("/srv/form.html".to_string()),
                CHROMIUM_PATH_ENV => Some("/usr/bin/chromium".to_string()),
                _ => None,
            });
            assert_eq!(config.form_path, "/srv/form.html");
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        }

        #[test]
        fn test_empty_env_values_ignored() {
            let config = SuiteConfig::default().with_overrides_from(|_| Some(String::new()));
            assert_eq!(config.form_path, DEFAULT_FORM_PATH);
            assert_eq!(config.chromium_path, None);
        }
    }

    mod derive_tests {
        use super::*;

        #[test]
        fn test_form_url_absolute_path() {
            let config = SuiteConfig {
                form_path: "/srv/site/contact_form.html".to_string(),
                ..SuiteConfig::default()
            };
            assert_eq!(
                config.form_url().unwrap(),
                "file:///srv/site/contact_form.html"
            );
        }

        #[test]
        fn test_form_url_relative_path_is_absolutized() {
            let url = SuiteConfig::default().form_url().unwrap();
            assert!(url.starts_with("file://"));
            assert!(url.ends_with("/contact_form.html"));
        }

        #[test]
        fn test_form_url_keeps_scheme() {
            let config = SuiteConfig {
                form_path: "http://localhost:8000/contact_form.html".to_string(),
                ..SuiteConfig::default()
            };
            assert_eq!(
                config.form_url().unwrap(),
                "http://localhost:8000/contact_form.html"
            );
        }

        #[test]
        fn test_browser_config_headed_is_maximized() {
            let config = SuiteConfig {
                headless: false,
                chromium_path: Some("/opt/chrome".to_string()),
                ..SuiteConfig::default()
            };
            let browser = config.browser_config();
            assert!(!browser.headless);
            assert!(browser.maximized);
            assert_eq!(browser.chromium_path.as_deref(), Some("/opt/chrome"));
        }

        #[test]
        fn test_wait_options() {
            let config = SuiteConfig {
                timeout_ms: 500,
                poll_interval_ms: 50,
                ..SuiteConfig::default()
            };
            let wait = config.wait_options();
            assert_eq!(wait.timeout_ms, 500);
            assert_eq!(wait.poll_interval_ms, 50);
        }
    }
}

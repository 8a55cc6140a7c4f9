//! Result and error types for formprobe.

use thiserror::Error;

/// Result type for formprobe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the form
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched the locator before the wait expired
    #[error("Element not found: {locator} (waited {timeout_ms}ms)")]
    ElementNotFound {
        /// Locator description
        locator: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// Element stayed visible past the wait
    #[error("Element did not disappear: {locator} (waited {timeout_ms}ms)")]
    ElementStillVisible {
        /// Locator description
        locator: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// `<select>` has no option with the requested visible text
    #[error("No option with text {text:?} in {locator}")]
    OptionNotFound {
        /// Locator description
        locator: String,
        /// Visible text that was requested
        text: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    ScriptError {
        /// Error message
        message: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ProbeError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a script evaluation error
    #[must_use]
    pub fn script(message: impl Into<String>) -> Self {
        Self::ScriptError {
            message: message.into(),
        }
    }
}

/// Fail with [`ProbeError::AssertionFailed`] unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> ProbeResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ProbeError::assertion(message))
    }
}

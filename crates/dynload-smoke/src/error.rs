// Error types for the dynamic-loading scenario

use std::time::Duration;

use thiserror::Error;

use crate::session::Target;

/// Result type alias for scenario operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the scenario
///
/// Every variant is terminal for the run: nothing is retried or recovered
/// locally. The runner captures a best-effort failure screenshot, releases
/// the session, and propagates the error unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The browser session could not be started
    ///
    /// Covers a missing or immediately-exiting chromedriver binary as well
    /// as a refused WebDriver session request. Check that `chromedriver`
    /// and a matching Chrome are on the PATH.
    #[error("failed to start browser session: {0}")]
    SessionStart(String),

    /// Page navigation failed (network/DNS failure, non-responsive server)
    #[error("navigation to '{url}' failed: {message}")]
    Navigation { url: String, message: String },

    /// No element matched the target
    #[error("no element matching {0}")]
    ElementNotFound(Target),

    /// The element exists but could not be activated
    ///
    /// Typically the element is obscured, disabled, or outside the viewport.
    #[error("element {target} not interactable: {message}")]
    ElementNotInteractable { target: Target, message: String },

    /// A bounded wait ran out before its condition became true
    #[error("timed out after {}s waiting until {condition}", timeout.as_secs())]
    Timeout { condition: String, timeout: Duration },

    /// The element's text did not match the expected value exactly
    ///
    /// Byte-for-byte equality, no normalization or trimming.
    #[error("text mismatch: expected {expected:?}, got {actual:?}")]
    TextMismatch { expected: String, actual: String },

    /// The element is present in the structural tree but not rendered
    #[error("element {0} is present but not visible")]
    NotVisible(Target),

    /// Unclassified WebDriver command failure
    #[error("webdriver command failed: {0}")]
    Driver(String),

    /// I/O error while persisting an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

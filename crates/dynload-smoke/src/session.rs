// Session capability trait and element targets
//
// The scenario consumes exactly eight driver primitives: session start
// (which lives with the concrete driver), navigate, click, read-text,
// visibility check, bounded waits, screenshot, and close. Everything but
// start is abstracted here so the runner can execute against a scripted
// fake without a real browser.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Polling interval for bounded visibility waits (100ms)
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How to find an element on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// By the element's `id` attribute
    Id(String),
    /// By CSS selector
    Css(String),
}

impl Target {
    /// Targets the element with the given `id` attribute.
    pub fn id(id: impl Into<String>) -> Self {
        Target::Id(id.into())
    }

    /// Targets the first element matching the given CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Target::Css(selector.into())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(id) => write!(f, "id={id}"),
            Target::Css(selector) => write!(f, "css={selector}"),
        }
    }
}

/// An open browser session.
///
/// One session is exclusively owned by one run from acquisition to release
/// and is never shared. `close` consumes the handle, so a session cannot be
/// released twice; the runner guarantees it is released exactly once.
#[async_trait]
pub trait Session: Send + Sync {
    /// Loads the given URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Locates the target and activates it.
    async fn click(&self, target: &Target) -> Result<()>;

    /// Reads the visible text of the target element.
    async fn text(&self, target: &Target) -> Result<String>;

    /// Whether the target is currently rendered.
    ///
    /// An element absent from the structural tree counts as not displayed.
    async fn is_displayed(&self, target: &Target) -> Result<bool>;

    /// Waits until the target is no longer displayed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the element is still displayed when
    /// `timeout` elapses.
    async fn wait_hidden(&self, target: &Target, timeout: Duration) -> Result<()>;

    /// Waits until the target is displayed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the element has not become displayed
    /// when `timeout` elapses.
    async fn wait_displayed(&self, target: &Target, timeout: Duration) -> Result<()>;

    /// Captures a screenshot of the current page state as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Terminates the browser session.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Re-evaluates `condition` every [`POLL_INTERVAL`] until it returns true
/// or `timeout` elapses.
///
/// `description` names the condition in the resulting [`Error::Timeout`].
pub(crate) async fn poll_until<F, Fut>(
    description: &str,
    timeout: Duration,
    mut condition: F,
) -> Result<()>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<bool>> + Send,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition().await? {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(Error::Timeout {
                condition: description.to_string(),
                timeout,
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

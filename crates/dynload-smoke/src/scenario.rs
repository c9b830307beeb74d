// Scenario definition and runner
//
// One linear interaction/verification sequence against the dynamic-loading
// demo page: click the start control, wait out the loading indicator,
// verify the injected text, screenshot the result. The session is released
// exactly once whatever happens in between.

use std::path::PathBuf;
use std::time::Duration;

use crate::artifact;
use crate::error::{Error, Result};
use crate::session::{Session, Target};

/// The demo page under test.
pub const DYNAMIC_LOADING_URL: &str = "https://the-internet.herokuapp.com/dynamic_loading/1";

/// Text the page injects once loading completes.
pub const EXPECTED_TEXT: &str = "Hello World!";

/// Budget for each bounded wait.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything one run needs: the page, the three elements involved, the
/// expected text, the wait budget, and where screenshots land.
///
/// `Default` is the dynamic-loading scenario; tests swap in their own
/// artifact paths via struct update syntax.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Page to load
    pub url: String,
    /// Control that triggers the asynchronous load
    pub start_button: Target,
    /// Indicator shown while the load is in flight
    pub loading_indicator: Target,
    /// Element holding the injected result text
    pub result_text: Target,
    /// Exact text the result element must carry
    pub expected_text: String,
    /// Timeout applied to each wait independently
    pub wait_timeout: Duration,
    /// Screenshot path for a passing run (parent directory is created)
    pub success_screenshot: PathBuf,
    /// Screenshot path for a failing run
    pub failure_screenshot: PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            url: DYNAMIC_LOADING_URL.to_string(),
            start_button: Target::css("#start button"),
            loading_indicator: Target::id("loading"),
            result_text: Target::css("#finish h4"),
            expected_text: EXPECTED_TEXT.to_string(),
            wait_timeout: WAIT_TIMEOUT,
            success_screenshot: PathBuf::from("screenshots/dynamic_loading_result.png"),
            failure_screenshot: PathBuf::from("error_screenshot.png"),
        }
    }
}

/// Runs the scenario on an already-open session and releases it.
///
/// Exactly one screenshot is written per run: the success artifact on a
/// passing run, otherwise a best-effort failure artifact. A failure while
/// capturing the failure screenshot never masks the scenario error.
///
/// # Errors
///
/// Propagates the first error hit in steps 2-8, after the session has been
/// closed. A close failure on an otherwise passing run is itself an error.
pub async fn run(session: Box<dyn Session>, scenario: &Scenario) -> Result<()> {
    let outcome = drive(&*session, scenario).await;

    if let Err(error) = &outcome {
        tracing::error!("scenario failed: {error}");
        capture_failure_screenshot(&*session, scenario).await;
    }

    tracing::info!("closing browser session");
    let closed = session.close().await;

    outcome?;
    closed
}

/// The interaction/verification sequence, in strict order.
async fn drive(session: &dyn Session, scenario: &Scenario) -> Result<()> {
    tracing::info!("navigating to {}", scenario.url);
    session.goto(&scenario.url).await?;

    tracing::info!("clicking start control {}", scenario.start_button);
    session.click(&scenario.start_button).await?;

    tracing::info!("waiting for {} to disappear", scenario.loading_indicator);
    session
        .wait_hidden(&scenario.loading_indicator, scenario.wait_timeout)
        .await?;

    tracing::info!("waiting for {} to appear", scenario.result_text);
    session
        .wait_displayed(&scenario.result_text, scenario.wait_timeout)
        .await?;

    let actual = session.text(&scenario.result_text).await?;
    if actual != scenario.expected_text {
        return Err(Error::TextMismatch {
            expected: scenario.expected_text.clone(),
            actual,
        });
    }
    tracing::info!("result text matches {:?}", scenario.expected_text);

    // Visibility re-checked independently of the wait above.
    if !session.is_displayed(&scenario.result_text).await? {
        return Err(Error::NotVisible(scenario.result_text.clone()));
    }
    tracing::info!("result element is visible");

    let png = session.screenshot().await?;
    artifact::write(&scenario.success_screenshot, &png).await?;
    tracing::info!(
        "screenshot saved to {}",
        scenario.success_screenshot.display()
    );

    Ok(())
}

async fn capture_failure_screenshot(session: &dyn Session, scenario: &Scenario) {
    let captured = match session.screenshot().await {
        Ok(png) => artifact::write(&scenario.failure_screenshot, &png).await,
        Err(error) => Err(error),
    };
    match captured {
        Ok(()) => tracing::info!(
            "failure screenshot saved to {}",
            scenario.failure_screenshot.display()
        ),
        Err(error) => tracing::warn!("could not capture failure screenshot: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_targets_the_dynamic_loading_page() {
        let scenario = Scenario::default();
        assert_eq!(scenario.url, DYNAMIC_LOADING_URL);
        assert_eq!(scenario.start_button, Target::css("#start button"));
        assert_eq!(scenario.loading_indicator, Target::id("loading"));
        assert_eq!(scenario.result_text, Target::css("#finish h4"));
        assert_eq!(scenario.expected_text, "Hello World!");
        assert_eq!(scenario.wait_timeout, Duration::from_secs(10));
    }
}

//! dynload-smoke: headless-Chrome smoke test for the-internet's
//! "dynamic loading" page.
//!
//! One fixed scenario: navigate to the page, click the start control, wait
//! for the loading indicator to disappear, wait for the result element to
//! appear, assert its text is exactly `"Hello World!"`, and save a
//! screenshot. A failing run captures a failure screenshot instead; the
//! browser session is released exactly once either way.
//!
//! The scenario runner only sees the [`Session`] trait, so it runs against
//! a scripted fake in tests and against [`WebDriverSession`] (fantoccini
//! over a managed chromedriver) in the binary.
//!
//! # Example
//!
//! ```ignore
//! use dynload_smoke::{Chromedriver, Scenario, WebDriverSession};
//!
//! #[tokio::main]
//! async fn main() -> dynload_smoke::Result<()> {
//!     let scenario = Scenario::default();
//!
//!     let chromedriver = Chromedriver::launch().await?;
//!     let session = WebDriverSession::start(chromedriver.url()).await?;
//!     let outcome = dynload_smoke::run(Box::new(session), &scenario).await;
//!     chromedriver.shutdown().await?;
//!
//!     outcome
//! }
//! ```

pub mod artifact;
mod error;
pub mod scenario;
pub mod session;
pub mod webdriver;

// Re-export error types
pub use error::{Error, Result};

// Re-export the scenario and its runner
pub use scenario::{Scenario, run};

// Re-export the session seam
pub use session::{Session, Target};

// Re-export the real driver
pub use webdriver::{Chromedriver, WebDriverSession};
